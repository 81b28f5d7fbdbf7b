//! Provider schema types.
//!
//! Composite schema types are shared through `Arc` and compare by identity,
//! the way a provider's type graph hands out one object per declared type.
//! Two separately built `array<string>` values are different keys in a hash
//! map; use [`SchemaType::structurally_eq`] to compare shapes instead.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A provider-declared type describing the shape of a property.
#[derive(Clone, Debug)]
pub enum SchemaType {
    Bool,
    Int,
    Number,
    String,
    Archive,
    Asset,
    Json,
    Any,
    Array(Arc<ArrayType>),
    Map(Arc<MapType>),
    Object(Arc<ObjectType>),
    Token(Arc<TokenType>),
    Union(Arc<UnionType>),
}

#[derive(Debug)]
pub struct ArrayType {
    pub element: SchemaType,
}

/// Map from string keys to `element`.
#[derive(Debug)]
pub struct MapType {
    pub element: SchemaType,
}

#[derive(Debug, Default)]
pub struct ObjectType {
    /// Declared token for named object types; `None` for inline shapes.
    pub token: Option<String>,
    pub properties: Vec<Property>,
}

#[derive(Clone, Debug)]
pub struct Property {
    pub name: String,
    pub ty: SchemaType,
    pub required: bool,
}

impl Property {
    pub fn required(name: impl Into<String>, ty: SchemaType) -> Self {
        Property {
            name: name.into(),
            ty,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, ty: SchemaType) -> Self {
        Property {
            name: name.into(),
            ty,
            required: false,
        }
    }
}

/// A nominal type declared by a package, such as a string enum.
///
/// `underlying` is the structural representation values of the token type
/// also accept.
#[derive(Debug)]
pub struct TokenType {
    pub token: String,
    pub underlying: Option<SchemaType>,
}

#[derive(Debug)]
pub struct UnionType {
    pub elements: Vec<SchemaType>,
}

impl SchemaType {
    pub fn array(element: SchemaType) -> Self {
        SchemaType::Array(Arc::new(ArrayType { element }))
    }

    pub fn map(element: SchemaType) -> Self {
        SchemaType::Map(Arc::new(MapType { element }))
    }

    /// An inline object type with the given properties.
    pub fn object(properties: Vec<Property>) -> Self {
        SchemaType::Object(Arc::new(ObjectType {
            token: None,
            properties,
        }))
    }

    pub fn token(token: impl Into<String>, underlying: Option<SchemaType>) -> Self {
        SchemaType::Token(Arc::new(TokenType {
            token: token.into(),
            underlying,
        }))
    }

    pub fn union(elements: Vec<SchemaType>) -> Self {
        SchemaType::Union(Arc::new(UnionType { elements }))
    }

    /// Address of the shared payload of a composite type.
    fn identity(&self) -> Option<*const ()> {
        match self {
            SchemaType::Array(t) => Some(Arc::as_ptr(t).cast()),
            SchemaType::Map(t) => Some(Arc::as_ptr(t).cast()),
            SchemaType::Object(t) => Some(Arc::as_ptr(t).cast()),
            SchemaType::Token(t) => Some(Arc::as_ptr(t).cast()),
            SchemaType::Union(t) => Some(Arc::as_ptr(t).cast()),
            SchemaType::Bool
            | SchemaType::Int
            | SchemaType::Number
            | SchemaType::String
            | SchemaType::Archive
            | SchemaType::Asset
            | SchemaType::Json
            | SchemaType::Any => None,
        }
    }

    /// Compare two schema types by shape rather than identity.
    pub fn structurally_eq(&self, other: &SchemaType) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (SchemaType::Array(a), SchemaType::Array(b)) => a.element.structurally_eq(&b.element),
            (SchemaType::Map(a), SchemaType::Map(b)) => a.element.structurally_eq(&b.element),
            (SchemaType::Object(a), SchemaType::Object(b)) => {
                a.token == b.token
                    && a.properties.len() == b.properties.len()
                    && a.properties.iter().zip(&b.properties).all(|(p, q)| {
                        p.name == q.name && p.required == q.required && p.ty.structurally_eq(&q.ty)
                    })
            }
            (SchemaType::Token(a), SchemaType::Token(b)) => {
                a.token == b.token
                    && match (&a.underlying, &b.underlying) {
                        (Some(x), Some(y)) => x.structurally_eq(y),
                        (None, None) => true,
                        _ => false,
                    }
            }
            (SchemaType::Union(a), SchemaType::Union(b)) => {
                a.elements.len() == b.elements.len()
                    && a
                        .elements
                        .iter()
                        .zip(&b.elements)
                        .all(|(x, y)| x.structurally_eq(y))
            }
            _ => false,
        }
    }
}

impl PartialEq for SchemaType {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self.identity() == other.identity()
    }
}

impl Eq for SchemaType {}

impl Hash for SchemaType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        if let Some(addr) = self.identity() {
            std::ptr::hash(addr, state);
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaType::Bool => f.write_str("boolean"),
            SchemaType::Int => f.write_str("integer"),
            SchemaType::Number => f.write_str("number"),
            SchemaType::String => f.write_str("string"),
            SchemaType::Archive => f.write_str("archive"),
            SchemaType::Asset => f.write_str("asset"),
            SchemaType::Json => f.write_str("json"),
            SchemaType::Any => f.write_str("any"),
            SchemaType::Array(t) => write!(f, "array<{}>", t.element),
            SchemaType::Map(t) => write!(f, "map<{}>", t.element),
            SchemaType::Object(t) => {
                if let Some(token) = &t.token {
                    return f.write_str(token);
                }
                f.write_str("object{")?;
                for (i, prop) in t.properties.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    let marker = if prop.required { "" } else { "?" };
                    write!(f, "{}{marker}: {}", prop.name, prop.ty)?;
                }
                f.write_str("}")
            }
            SchemaType::Token(t) => f.write_str(&t.token),
            SchemaType::Union(t) => {
                for (i, element) in t.elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{element}")?;
                }
                Ok(())
            }
        }
    }
}
