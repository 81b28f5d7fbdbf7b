//! Provider schema type system.
//!
//! A provider package declares resources and functions whose properties are
//! described by [`SchemaType`]s. Packages come from a [`ProviderLoader`];
//! [`MemoryLoader`] serves packages registered in-process.

mod loader;
mod package;
mod types;

pub use loader::{LoadError, MemoryLoader, ProviderLoader};
pub use package::{Function, Package, Resource};
pub use types::{ArrayType, MapType, ObjectType, Property, SchemaType, TokenType, UnionType};

pub use semver::Version;
