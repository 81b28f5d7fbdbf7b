//! One canonical `array<T>` schema type per element type.
//!
//! Reverse resolution synthesizes array schema types for list model types.
//! Caching them here means every list with the same element schema
//! resolves to the same `Array` object. Keys compare by schema identity.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use weft_schema::SchemaType;

#[derive(Default)]
pub struct ArrayTypeCache {
    arrays: RwLock<FxHashMap<SchemaType, SchemaType>>,
}

impl ArrayTypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, element: &SchemaType) -> Option<SchemaType> {
        self.arrays.read().get(element).cloned()
    }

    /// The canonical array of `element`, synthesizing it on first request.
    pub fn get_or_insert(&self, element: SchemaType) -> SchemaType {
        if let Some(array) = self.get(&element) {
            return array;
        }

        // The entry API re-checks under the write lock.
        self.arrays
            .write()
            .entry(element)
            .or_insert_with_key(|element| SchemaType::array(element.clone()))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.arrays.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ArrayTypeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayTypeCache")
            .field("len", &self.len())
            .finish()
    }
}
