//! Model types used for expression checking and code generation.
//!
//! Types compare structurally. Payloads are `Arc`-shared so cloning a type
//! is cheap regardless of its depth.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use weft_schema::SchemaType;

use crate::opaque::OpaqueType;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Int,
    Number,
    String,
    List(Arc<Type>),
    /// Map with string keys.
    Map(Arc<Type>),
    Object(Arc<ObjectType>),
    /// Two or more distinct, non-union members. Build with [`Type::union`].
    Union(Arc<[Type]>),
    Opaque(OpaqueType),
    Output(Arc<Type>),
    Promise(Arc<Type>),
    Dynamic,
    /// The empty type: no usable type information.
    None,
}

/// Object type with named properties.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectType {
    pub properties: BTreeMap<String, Type>,
    /// Schema type this object was translated from, if any.
    pub annotation: Option<SchemaType>,
}

impl Type {
    pub fn list(element: Type) -> Type {
        Type::List(Arc::new(element))
    }

    pub fn map(element: Type) -> Type {
        Type::Map(Arc::new(element))
    }

    pub fn output(element: Type) -> Type {
        Type::Output(Arc::new(element))
    }

    pub fn promise(element: Type) -> Type {
        Type::Promise(Arc::new(element))
    }

    pub fn object(properties: BTreeMap<String, Type>, annotation: Option<SchemaType>) -> Type {
        Type::Object(Arc::new(ObjectType {
            properties,
            annotation,
        }))
    }

    /// Union of `types`.
    ///
    /// Nested unions are flattened and repeated members dropped, keeping
    /// first-seen order. A single remaining member is returned as-is and an
    /// empty union is [`Type::None`].
    pub fn union(types: impl IntoIterator<Item = Type>) -> Type {
        let mut seen = FxHashSet::default();
        let mut elements = Vec::new();
        let mut push = |ty: Type| {
            if seen.insert(ty.clone()) {
                elements.push(ty);
            }
        };
        for ty in types {
            match ty {
                Type::Union(members) => members.iter().cloned().for_each(&mut push),
                other => push(other),
            }
        }

        match elements.len() {
            0 => Type::None,
            1 => elements.swap_remove(0),
            _ => Type::Union(Arc::from(elements)),
        }
    }

    /// `element` or nothing.
    pub fn optional(element: Type) -> Type {
        Type::union([element, Type::None])
    }

    /// Members of a union, or the type itself.
    pub fn members(&self) -> &[Type] {
        match self {
            Type::Union(members) => members,
            other => std::slice::from_ref(other),
        }
    }
}
