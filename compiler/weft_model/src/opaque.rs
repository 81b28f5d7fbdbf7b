//! Nominal opaque types, interned by name.
//!
//! An [`OpaqueRegistry`] hands out one [`OpaqueType`] per name, so two
//! lookups of the same name compare equal. Registries are scoped to a
//! compilation session and shared between its binders through
//! [`SharedOpaqueRegistry`].
//!
//! # Pre-registered Types
//! `Archive` and `Asset` are registered at construction with the fixed ids
//! [`OpaqueId::ARCHIVE`] and [`OpaqueId::ASSET`].

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Registry-local identity of an opaque type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpaqueId(u32);

impl OpaqueId {
    pub const ARCHIVE: OpaqueId = OpaqueId(0);
    pub const ASSET: OpaqueId = OpaqueId(1);

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OpaqueType {
    id: OpaqueId,
    name: Arc<str>,
}

impl OpaqueType {
    #[inline]
    pub fn id(&self) -> OpaqueId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Error when registering an opaque type fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpaqueError {
    /// A type with this name is already registered.
    Duplicate(String),
    /// Ran out of ids.
    Overflow,
}

impl fmt::Display for OpaqueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpaqueError::Duplicate(name) => write!(f, "opaque type `{name}` is already declared"),
            OpaqueError::Overflow => write!(f, "opaque type registry exceeded u32::MAX types"),
        }
    }
}

impl std::error::Error for OpaqueError {}

pub const ARCHIVE_NAME: &str = "Archive";
pub const ASSET_NAME: &str = "Asset";

struct OpaqueTable {
    by_name: FxHashMap<Arc<str>, OpaqueType>,
    /// Id for the next registration; `None` once every id is taken.
    next: Option<u32>,
}

impl OpaqueTable {
    fn with_builtins() -> Self {
        let mut by_name = FxHashMap::default();
        for (id, name) in [(OpaqueId::ARCHIVE, ARCHIVE_NAME), (OpaqueId::ASSET, ASSET_NAME)] {
            let name: Arc<str> = Arc::from(name);
            by_name.insert(Arc::clone(&name), OpaqueType { id, name });
        }
        OpaqueTable {
            by_name,
            next: Some(OpaqueId::ASSET.0 + 1),
        }
    }

    fn insert(&mut self, name: &str) -> Result<OpaqueType, OpaqueError> {
        let raw = self.next.ok_or(OpaqueError::Overflow)?;
        self.next = raw.checked_add(1);
        let id = OpaqueId(raw);
        let name: Arc<str> = Arc::from(name);
        let ty = OpaqueType {
            id,
            name: Arc::clone(&name),
        };
        self.by_name.insert(name, ty.clone());
        Ok(ty)
    }
}

/// Name to opaque type table.
///
/// # Thread Safety
/// Lookups take a shared lock; registration takes the exclusive lock and
/// re-checks the name before inserting.
pub struct OpaqueRegistry {
    table: RwLock<OpaqueTable>,
}

#[allow(
    clippy::len_without_is_empty,
    reason = "the built-in types are always registered"
)]
impl OpaqueRegistry {
    pub fn new() -> Self {
        OpaqueRegistry {
            table: RwLock::new(OpaqueTable::with_builtins()),
        }
    }

    pub fn get_by_name(&self, name: &str) -> Option<OpaqueType> {
        self.table.read().by_name.get(name).cloned()
    }

    /// Register a new opaque type. Fails if `name` is already taken.
    pub fn create(&self, name: &str) -> Result<OpaqueType, OpaqueError> {
        let mut table = self.table.write();
        if table.by_name.contains_key(name) {
            return Err(OpaqueError::Duplicate(name.to_owned()));
        }
        table.insert(name)
    }

    /// The opaque type named `name`, registering it on first use.
    pub fn get_or_create(&self, name: &str) -> Result<OpaqueType, OpaqueError> {
        if let Some(ty) = self.get_by_name(name) {
            return Ok(ty);
        }

        let mut table = self.table.write();
        // Double-check after acquiring write lock
        if let Some(ty) = table.by_name.get(name) {
            return Ok(ty.clone());
        }
        table.insert(name)
    }

    pub fn archive(&self) -> OpaqueType {
        self.builtin(OpaqueId::ARCHIVE, ARCHIVE_NAME)
    }

    pub fn asset(&self) -> OpaqueType {
        self.builtin(OpaqueId::ASSET, ASSET_NAME)
    }

    fn builtin(&self, id: OpaqueId, name: &str) -> OpaqueType {
        self.get_by_name(name).unwrap_or_else(|| OpaqueType {
            id,
            name: Arc::from(name),
        })
    }

    /// Number of registered types, `Archive` and `Asset` included.
    pub fn len(&self) -> usize {
        self.table.read().by_name.len()
    }
}

impl Default for OpaqueRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OpaqueRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueRegistry")
            .field("len", &self.len())
            .finish()
    }
}

/// Clonable handle to one session's [`OpaqueRegistry`].
#[derive(Clone, Debug, Default)]
pub struct SharedOpaqueRegistry(Arc<OpaqueRegistry>);

impl SharedOpaqueRegistry {
    pub fn new() -> Self {
        SharedOpaqueRegistry(Arc::new(OpaqueRegistry::new()))
    }
}

impl std::ops::Deref for SharedOpaqueRegistry {
    type Target = OpaqueRegistry;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
