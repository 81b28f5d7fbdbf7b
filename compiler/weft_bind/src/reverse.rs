//! Recovering schema types from model types.
//!
//! Code generation works on checked expression types but needs
//! provider-specific detail; [`SchemaResolver`] maps a model type back to
//! the schema type it most likely came from. Not finding one is normal and
//! means "no schema information".

use rustc_hash::{FxHashMap, FxHashSet};
use weft_model::{OpaqueId, Type};
use weft_schema::SchemaType;

use crate::array_types::ArrayTypeCache;
use crate::binder::Binder;
use crate::stack::ensure_sufficient_stack;
use crate::union_types::UnionTypeCache;

/// Read-only view over a session's translation records and the shared
/// caches of synthesized array and union types.
#[derive(Clone, Copy)]
pub struct SchemaResolver<'a> {
    type_schemas: &'a FxHashMap<Type, SchemaType>,
    array_types: &'a ArrayTypeCache,
    union_types: &'a UnionTypeCache,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(
        type_schemas: &'a FxHashMap<Type, SchemaType>,
        array_types: &'a ArrayTypeCache,
        union_types: &'a UnionTypeCache,
    ) -> Self {
        SchemaResolver {
            type_schemas,
            array_types,
            union_types,
        }
    }

    /// The schema type associated with `ty`.
    ///
    /// A union resolves to a schema union of its members' schema types,
    /// skipping members with none; if only one distinct schema type is left
    /// it is returned on its own.
    ///
    /// Synthesized arrays and unions are interned in the context's caches, so
    /// equal model types resolve to the identical schema object every time.
    pub fn resolve(&self, ty: &Type) -> Option<SchemaType> {
        ensure_sufficient_stack(|| self.resolve_inner(ty))
    }

    fn resolve_inner(&self, ty: &Type) -> Option<SchemaType> {
        match ty {
            Type::Bool => Some(SchemaType::Bool),
            Type::Int => Some(SchemaType::Int),
            Type::Number => Some(SchemaType::Number),
            Type::String => Some(SchemaType::String),
            Type::List(element) => {
                let element = self.resolve(element)?;
                Some(self.array_types.get_or_insert(element))
            }
            Type::Object(object) => object.annotation.clone(),
            Type::Output(element) | Type::Promise(element) => self.resolve(element),
            Type::Opaque(opaque) => match opaque.id() {
                OpaqueId::ARCHIVE => Some(SchemaType::Archive),
                OpaqueId::ASSET => Some(SchemaType::Asset),
                _ => self.type_schemas.get(ty).cloned(),
            },
            Type::Union(members) => self.resolve_union(members),
            Type::Map(_) | Type::Dynamic | Type::None => None,
        }
    }

    fn resolve_union(&self, members: &[Type]) -> Option<SchemaType> {
        let mut seen = FxHashSet::default();
        let mut schemas = Vec::new();
        let mut add = |schema: SchemaType| {
            if seen.insert(schema.clone()) {
                schemas.push(schema);
            }
        };

        for member in members {
            match self.resolve(member) {
                Some(SchemaType::Union(union)) => {
                    union.elements.iter().cloned().for_each(&mut add);
                }
                Some(schema) => add(schema),
                None => {}
            }
        }

        match schemas.len() {
            0 => None,
            1 => Some(schemas.swap_remove(0)),
            _ => Some(self.union_types.get_or_insert(schemas)),
        }
    }
}

impl Binder {
    /// The schema type associated with a model type, if any.
    pub fn schema_for_type(&self, ty: &Type) -> Option<SchemaType> {
        self.schema_resolver().resolve(ty)
    }

    pub fn schema_resolver(&self) -> SchemaResolver<'_> {
        SchemaResolver::new(
            &self.type_schemas,
            &self.ctx.array_types,
            &self.ctx.union_types,
        )
    }
}
