//! Binding context for dependency injection.
//!
//! `BindContext` holds the collaborators and shared caches a [`Binder`]
//! needs. Binders of one session are built from clones of the same context
//! so they share its package cache, synthesized array and union types, and
//! opaque registry.
//! Tests swap individual pieces out with the `with_*` methods:
//!
//! ```ignore
//! let ctx = BindContext::new(Arc::new(loader))
//!     .with_package_cache(Arc::new(PackageCache::new()));
//! let mut binder = Binder::new(ctx);
//! ```
//!
//! [`Binder`]: crate::Binder

use std::fmt;
use std::sync::Arc;

use weft_model::SharedOpaqueRegistry;
use weft_schema::ProviderLoader;

use crate::array_types::ArrayTypeCache;
use crate::cache::PackageCache;
use crate::union_types::UnionTypeCache;

/// Package whose resources are language intrinsics with no provider schema.
pub const BUILTIN_PACKAGE: &str = "pulumi";

#[derive(Clone)]
pub struct BindContext {
    /// Source of provider packages on a cache miss.
    pub loader: Arc<dyn ProviderLoader>,
    pub package_cache: Arc<PackageCache>,
    pub array_types: Arc<ArrayTypeCache>,
    pub union_types: Arc<UnionTypeCache>,
    pub opaque_types: SharedOpaqueRegistry,
    /// Package name skipped when collecting references.
    pub builtin_package: String,
}

impl BindContext {
    /// A context with fresh caches around `loader`.
    pub fn new(loader: Arc<dyn ProviderLoader>) -> Self {
        BindContext {
            loader,
            package_cache: Arc::new(PackageCache::new()),
            array_types: Arc::new(ArrayTypeCache::new()),
            union_types: Arc::new(UnionTypeCache::new()),
            opaque_types: SharedOpaqueRegistry::new(),
            builtin_package: BUILTIN_PACKAGE.to_owned(),
        }
    }

    #[must_use]
    pub fn with_loader(mut self, loader: Arc<dyn ProviderLoader>) -> Self {
        self.loader = loader;
        self
    }

    #[must_use]
    pub fn with_package_cache(mut self, cache: Arc<PackageCache>) -> Self {
        self.package_cache = cache;
        self
    }

    #[must_use]
    pub fn with_array_types(mut self, cache: Arc<ArrayTypeCache>) -> Self {
        self.array_types = cache;
        self
    }

    #[must_use]
    pub fn with_union_types(mut self, cache: Arc<UnionTypeCache>) -> Self {
        self.union_types = cache;
        self
    }

    #[must_use]
    pub fn with_opaque_types(mut self, registry: SharedOpaqueRegistry) -> Self {
        self.opaque_types = registry;
        self
    }

    #[must_use]
    pub fn with_builtin_package(mut self, name: impl Into<String>) -> Self {
        self.builtin_package = name.into();
        self
    }
}

impl fmt::Debug for BindContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindContext")
            .field("package_cache", &self.package_cache)
            .field("array_types", &self.array_types)
            .field("union_types", &self.union_types)
            .field("opaque_types", &self.opaque_types)
            .field("builtin_package", &self.builtin_package)
            .finish_non_exhaustive()
    }
}
