//! Schema binding for weft.
//!
//! Bridges provider package schemas and the model type system:
//!
//! ```text
//! Binder::collect_references ──► PackageCache::load_or_get ──► ProviderLoader (on miss)
//!                                        │
//!                                        ▼
//!                         Binder::schema_type_to_type  (schema → model)
//!                                        │
//!                                        ▼
//!                         Binder::schema_for_type      (model → schema)
//! ```
//!
//! The [`PackageCache`], [`ArrayTypeCache`], [`UnionTypeCache`] and opaque
//! type registry are
//! shared by every binder built from the same [`BindContext`]; everything
//! else lives in a per-unit [`Binder`].

mod array_types;
mod binder;
mod cache;
mod canonical;
mod context;
mod error;
mod references;
mod reverse;
mod stack;
mod translate;
mod union_types;

#[cfg(test)]
mod test_support;

pub use array_types::ArrayTypeCache;
pub use binder::{Binder, FunctionSignature, ResourceSignature};
pub use cache::{PackageCache, PackageSchema};
pub use canonical::canonicalize_token;
pub use context::{BindContext, BUILTIN_PACKAGE};
pub use error::BindError;
pub use reverse::SchemaResolver;
pub use union_types::UnionTypeCache;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=weft_bind=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
