//! Human-readable rendering of model types.
//!
//! Mirrors the configuration language's type syntax:
//! `list(string)`, `object({name = string})`, `union(int, none)`.

use std::fmt;

use crate::types::Type;

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => f.write_str("bool"),
            Type::Int => f.write_str("int"),
            Type::Number => f.write_str("number"),
            Type::String => f.write_str("string"),
            Type::List(element) => write!(f, "list({element})"),
            Type::Map(element) => write!(f, "map({element})"),
            Type::Object(object) => {
                f.write_str("object({")?;
                for (i, (name, ty)) in object.properties.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name} = {ty}")?;
                }
                f.write_str("})")
            }
            Type::Union(members) => {
                f.write_str("union(")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str(")")
            }
            Type::Opaque(opaque) => f.write_str(opaque.name()),
            Type::Output(element) => write!(f, "output({element})"),
            Type::Promise(element) => write!(f, "promise({element})"),
            Type::Dynamic => f.write_str("dynamic"),
            Type::None => f.write_str("none"),
        }
    }
}
