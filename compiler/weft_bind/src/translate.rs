//! Translating schema types into model types.
//!
//! | Schema            | Model                                      |
//! |-------------------|--------------------------------------------|
//! | `array<T>`        | `list(T)`                                  |
//! | `map<T>`          | `map(T)`                                   |
//! | object            | object; non-required properties optional   |
//! | token             | opaque, or `union(opaque, underlying)`     |
//! | union             | union of translated elements, in order     |
//! | archive / asset   | built-in `Archive` / `Asset` opaque types  |
//! | json / any        | `dynamic`                                  |

use weft_model::Type;
use weft_schema::{SchemaType, TokenType};

use crate::binder::Binder;
use crate::stack::ensure_sufficient_stack;

impl Binder {
    /// Translate a schema type into the model type system.
    ///
    /// Every type produced along the way, nested ones included, is recorded
    /// against the schema type it came from.
    pub fn schema_type_to_type(&mut self, src: &SchemaType) -> Type {
        ensure_sufficient_stack(|| {
            let result = self.translate(src);
            tracing::trace!(schema = %src, model = %result, "translated schema type");
            self.type_schemas.insert(result.clone(), src.clone());
            result
        })
    }

    fn translate(&mut self, src: &SchemaType) -> Type {
        match src {
            SchemaType::Array(array) => Type::list(self.schema_type_to_type(&array.element)),
            SchemaType::Map(map) => Type::map(self.schema_type_to_type(&map.element)),
            SchemaType::Object(object) => {
                let properties = object
                    .properties
                    .iter()
                    .map(|prop| (prop.name.clone(), self.property_type(prop)))
                    .collect();
                Type::object(properties, Some(src.clone()))
            }
            SchemaType::Token(token) => self.token_type(src, token),
            SchemaType::Union(union) => {
                let elements: Vec<Type> = union
                    .elements
                    .iter()
                    .map(|element| self.schema_type_to_type(element))
                    .collect();
                Type::union(elements)
            }
            SchemaType::Bool => Type::Bool,
            SchemaType::Int => Type::Int,
            SchemaType::Number => Type::Number,
            SchemaType::String => Type::String,
            SchemaType::Archive => Type::Opaque(self.ctx.opaque_types.archive()),
            SchemaType::Asset => Type::Opaque(self.ctx.opaque_types.asset()),
            SchemaType::Json | SchemaType::Any => Type::Dynamic,
        }
    }

    fn token_type(&mut self, src: &SchemaType, token: &TokenType) -> Type {
        let opaque = match self.ctx.opaque_types.get_or_create(&token.token) {
            Ok(opaque) => Type::Opaque(opaque),
            Err(err) => {
                tracing::warn!(token = %token.token, error = %err, "no opaque type for token");
                return Type::None;
            }
        };

        let Some(underlying) = &token.underlying else {
            return opaque;
        };
        // The union is recorded by the caller; the opaque member needs its own
        // entry so it can be traced back on its own.
        self.type_schemas.insert(opaque.clone(), src.clone());
        let underlying = self.schema_type_to_type(underlying);
        Type::union([opaque, underlying])
    }
}
