//! Loading provider packages by name.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use semver::Version;

use crate::package::Package;

/// Why a provider package could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unknown package `{0}`")]
    UnknownPackage(String),

    #[error("package `{name}` is not available at version {requested}")]
    VersionMismatch {
        name: String,
        requested: Version,
        available: Option<Version>,
    },

    /// Failure reported by an external provider host.
    #[error("failed to load package `{name}`: {source}")]
    Provider {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Produces fully populated packages on demand.
///
/// Implementations must tolerate concurrent calls for different names.
/// Concurrent calls for the same name may happen too; deduplicating their
/// results is the package cache's job.
pub trait ProviderLoader: Send + Sync {
    fn load_package(
        &self,
        name: &str,
        version: Option<&Version>,
    ) -> Result<Arc<Package>, LoadError>;
}

/// Loader over packages registered up front.
#[derive(Default)]
pub struct MemoryLoader {
    packages: RwLock<FxHashMap<String, Arc<Package>>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package under its own name, replacing any earlier one.
    pub fn register(&self, package: Package) {
        self.packages
            .write()
            .insert(package.name.clone(), Arc::new(package));
    }

    #[must_use]
    pub fn with_package(self, package: Package) -> Self {
        self.register(package);
        self
    }
}

impl ProviderLoader for MemoryLoader {
    fn load_package(
        &self,
        name: &str,
        version: Option<&Version>,
    ) -> Result<Arc<Package>, LoadError> {
        let package = self
            .packages
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::UnknownPackage(name.to_owned()))?;

        if let Some(requested) = version {
            if package.version.as_ref() != Some(requested) {
                return Err(LoadError::VersionMismatch {
                    name: name.to_owned(),
                    requested: requested.clone(),
                    available: package.version.clone(),
                });
            }
        }
        Ok(package)
    }
}
