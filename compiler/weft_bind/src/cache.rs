//! Process-wide cache of loaded provider packages.
//!
//! # Loading
//! [`PackageCache::load_or_get`] checks the cache under a read lock, then
//! loads and indexes the package with no lock held, and finally installs the
//! result under the write lock. Two callers racing on the same missing
//! package may both run the loader; whichever installs first wins and the
//! other's candidate is dropped in favour of the installed entry. An
//! installed entry is never replaced.
//!
//! Load failures are returned as-is and nothing is cached, so a later call
//! retries the load.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use weft_schema::{Function, LoadError, Package, ProviderLoader, Resource};

use crate::canonical::canonicalize_token;

/// A loaded package with its resources and functions indexed by canonical
/// token. Immutable once built.
#[derive(Debug)]
pub struct PackageSchema {
    package: Arc<Package>,
    resources: FxHashMap<String, Arc<Resource>>,
    functions: FxHashMap<String, Arc<Function>>,
}

impl PackageSchema {
    pub fn new(package: Arc<Package>) -> Self {
        let resources = package
            .resources
            .iter()
            .map(|r| (canonicalize_token(&r.token, &package), Arc::clone(r)))
            .collect();
        let functions = package
            .functions
            .iter()
            .map(|f| (canonicalize_token(&f.token, &package), Arc::clone(f)))
            .collect();
        PackageSchema {
            package,
            resources,
            functions,
        }
    }

    #[inline]
    pub fn package(&self) -> &Arc<Package> {
        &self.package
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.package.name
    }

    /// Look up a resource by any spelling of its token.
    pub fn resource(&self, token: &str) -> Option<&Arc<Resource>> {
        self.resources.get(&canonicalize_token(token, &self.package))
    }

    /// Look up a function by any spelling of its token.
    pub fn function(&self, token: &str) -> Option<&Arc<Function>> {
        self.functions.get(&canonicalize_token(token, &self.package))
    }

    /// Resources keyed by canonical token.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &Arc<Resource>)> {
        self.resources.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Functions keyed by canonical token.
    pub fn functions(&self) -> impl Iterator<Item = (&str, &Arc<Function>)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Package name to [`PackageSchema`], shared by every binder of a session.
#[derive(Default)]
pub struct PackageCache {
    entries: RwLock<FxHashMap<String, Arc<PackageSchema>>>,
}

impl PackageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The installed schema for `name`, if any. Never loads.
    pub fn get(&self, name: &str) -> Option<Arc<PackageSchema>> {
        self.entries.read().get(name).cloned()
    }

    /// The installed schema for `name`, loading it through `loader` on a miss.
    // TODO: thread requested package versions through to the loader.
    #[tracing::instrument(level = "debug", skip(self, loader))]
    pub fn load_or_get(
        &self,
        loader: &dyn ProviderLoader,
        name: &str,
    ) -> Result<Arc<PackageSchema>, LoadError> {
        if let Some(schema) = self.get(name) {
            tracing::trace!("package cache hit");
            return Ok(schema);
        }

        let package = loader.load_package(name, None)?;
        let candidate = Arc::new(PackageSchema::new(package));

        let mut entries = self.entries.write();

        // Double-check after acquiring write lock
        if let Some(installed) = entries.get(name) {
            tracing::debug!("another load installed this package first; dropping candidate");
            return Ok(Arc::clone(installed));
        }
        entries.insert(name.to_owned(), Arc::clone(&candidate));

        tracing::debug!(
            resources = candidate.resources.len(),
            functions = candidate.functions.len(),
            "installed package schema"
        );
        Ok(candidate)
    }

    /// Number of installed packages.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for PackageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.read();
        let mut names: Vec<&str> = entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("PackageCache")
            .field("packages", &names)
            .finish()
    }
}
