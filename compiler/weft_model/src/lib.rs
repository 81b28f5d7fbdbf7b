//! Model type system for weft.
//!
//! [`Type`] is what the binder checks expressions against and what code
//! generation consumes. Object types may carry a back-annotation to the
//! provider [`SchemaType`](weft_schema::SchemaType) they were translated
//! from; opaque types are interned through an [`OpaqueRegistry`].

mod format;
mod opaque;
mod types;

pub use opaque::{
    OpaqueError, OpaqueId, OpaqueRegistry, OpaqueType, SharedOpaqueRegistry, ARCHIVE_NAME,
    ASSET_NAME,
};
pub use types::{ObjectType, Type};
