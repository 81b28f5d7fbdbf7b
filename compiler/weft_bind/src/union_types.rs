//! One canonical schema union per member list.
//!
//! Reverse resolution synthesizes union schema types from the members of a
//! model union. Interning them here gives a union the same identity on
//! every resolution, which in turn keeps list-of-union elements stable keys
//! in the [`ArrayTypeCache`](crate::ArrayTypeCache). Members compare by
//! schema identity and in order.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use weft_schema::SchemaType;

#[derive(Default)]
pub struct UnionTypeCache {
    unions: RwLock<FxHashMap<Box<[SchemaType]>, SchemaType>>,
}

impl UnionTypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, elements: &[SchemaType]) -> Option<SchemaType> {
        self.unions.read().get(elements).cloned()
    }

    /// The canonical union of `elements`, synthesizing it on first request.
    pub fn get_or_insert(&self, elements: Vec<SchemaType>) -> SchemaType {
        if let Some(union) = self.get(&elements) {
            return union;
        }

        self.unions
            .write()
            .entry(elements.into_boxed_slice())
            .or_insert_with_key(|elements| SchemaType::union(elements.to_vec()))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.unions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for UnionTypeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionTypeCache")
            .field("len", &self.len())
            .finish()
    }
}
