//! Per-session binder state.
//!
//! A [`Binder`] belongs to one binding unit and is not shared between
//! threads. It records which packages the unit references and which schema
//! type each translated model type came from. Package loading goes through
//! the shared [`PackageCache`](crate::PackageCache) of its context.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use weft_ir::{decompose_token, Span};
use weft_model::Type;
use weft_schema::{Function, Package, Property, Resource, SchemaType};

use crate::cache::PackageSchema;
use crate::context::BindContext;
use crate::error::BindError;

pub struct Binder {
    pub(crate) ctx: BindContext,
    /// Packages resolved for this unit, by name.
    pub(crate) referenced_packages: BTreeMap<String, Arc<PackageSchema>>,
    /// Schema type each translated model type was derived from.
    pub(crate) type_schemas: FxHashMap<Type, SchemaType>,
}

/// Model types of a resource's inputs and outputs.
#[derive(Clone, Debug)]
pub struct ResourceSignature {
    pub resource: Arc<Resource>,
    pub inputs: Type,
    pub outputs: Type,
}

/// Model types of a function's arguments and result.
#[derive(Clone, Debug)]
pub struct FunctionSignature {
    pub function: Arc<Function>,
    pub inputs: Type,
    pub outputs: Type,
}

impl Binder {
    pub fn new(ctx: BindContext) -> Self {
        Binder {
            ctx,
            referenced_packages: BTreeMap::new(),
            type_schemas: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn context(&self) -> &BindContext {
        &self.ctx
    }

    pub fn referenced_package(&self, name: &str) -> Option<&Arc<Package>> {
        self.referenced_packages.get(name).map(|s| s.package())
    }

    /// Names of referenced packages, sorted.
    pub fn referenced_packages(&self) -> impl Iterator<Item = &str> {
        self.referenced_packages.keys().map(String::as_str)
    }

    /// Schema type recorded for `ty` by an earlier translation.
    pub fn type_schema(&self, ty: &Type) -> Option<&SchemaType> {
        self.type_schemas.get(ty)
    }

    /// Look a resource up in the referenced packages.
    ///
    /// `Ok(None)` when the resource's package has not been referenced or
    /// does not declare it.
    #[tracing::instrument(level = "debug", skip(self, span))]
    pub fn resource_signature(
        &mut self,
        token: &str,
        span: Span,
    ) -> Result<Option<ResourceSignature>, BindError> {
        let Some(schema) = self.package_for(token, span)? else {
            return Ok(None);
        };
        let Some(resource) = schema.resource(token).cloned() else {
            return Ok(None);
        };

        let inputs = self.properties_type(&resource.input_properties);
        let outputs = self.properties_type(&resource.properties);
        Ok(Some(ResourceSignature {
            resource,
            inputs,
            outputs,
        }))
    }

    /// Look a function up in the referenced packages.
    ///
    /// A function without declared inputs or outputs gets an empty object
    /// type for them.
    #[tracing::instrument(level = "debug", skip(self, span))]
    pub fn function_signature(
        &mut self,
        token: &str,
        span: Span,
    ) -> Result<Option<FunctionSignature>, BindError> {
        let Some(schema) = self.package_for(token, span)? else {
            return Ok(None);
        };
        let Some(function) = schema.function(token).cloned() else {
            return Ok(None);
        };

        let inputs = match &function.inputs {
            Some(object) => self.schema_type_to_type(&SchemaType::Object(Arc::clone(object))),
            None => Type::object(BTreeMap::new(), None),
        };
        let outputs = match &function.outputs {
            Some(object) => self.schema_type_to_type(&SchemaType::Object(Arc::clone(object))),
            None => Type::object(BTreeMap::new(), None),
        };
        Ok(Some(FunctionSignature {
            function,
            inputs,
            outputs,
        }))
    }

    fn package_for(
        &self,
        token: &str,
        span: Span,
    ) -> Result<Option<Arc<PackageSchema>>, BindError> {
        let parts = decompose_token(token, span)?;
        Ok(self.referenced_packages.get(parts.package).cloned())
    }

    /// Object type over a resource's property list. Non-required properties
    /// become optional.
    fn properties_type(&mut self, properties: &[Property]) -> Type {
        let fields = properties
            .iter()
            .map(|prop| (prop.name.clone(), self.property_type(prop)))
            .collect();
        Type::object(fields, None)
    }

    pub(crate) fn property_type(&mut self, prop: &Property) -> Type {
        let ty = self.schema_type_to_type(&prop.ty);
        if prop.required {
            ty
        } else {
            Type::optional(ty)
        }
    }
}

impl std::fmt::Debug for Binder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binder")
            .field("referenced_packages", &self.referenced_packages.keys())
            .field("type_schemas", &self.type_schemas.len())
            .finish_non_exhaustive()
    }
}
