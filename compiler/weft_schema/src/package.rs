//! Provider package declarations.

use std::sync::Arc;

use regex::Regex;
use semver::Version;

use crate::types::{ObjectType, Property};

/// Module reserved for provider resources; it never names a real module.
const PROVIDERS_MODULE: &str = "providers";

/// A loaded provider package: the resources and functions it declares.
#[derive(Debug)]
pub struct Package {
    pub name: String,
    pub version: Option<Version>,
    /// Extracts the canonical module from a token's module component via
    /// its first capture group. `None` keeps the module as written.
    module_format: Option<Regex>,
    pub resources: Vec<Arc<Resource>>,
    pub functions: Vec<Arc<Function>>,
}

#[derive(Debug)]
pub struct Resource {
    pub token: String,
    pub input_properties: Vec<Property>,
    pub properties: Vec<Property>,
}

#[derive(Debug)]
pub struct Function {
    pub token: String,
    pub inputs: Option<Arc<ObjectType>>,
    pub outputs: Option<Arc<ObjectType>>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Package {
            name: name.into(),
            version: None,
            module_format: None,
            resources: Vec::new(),
            functions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Set the module format, e.g. `(.*)(?:/[^/]*)` to fold
    /// `s3/bucket` into `s3`.
    pub fn with_module_format(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.module_format = Some(Regex::new(pattern)?);
        Ok(self)
    }

    #[must_use]
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(Arc::new(resource));
        self
    }

    #[must_use]
    pub fn with_function(mut self, function: Function) -> Self {
        self.functions.push(Arc::new(function));
        self
    }

    /// Normalize the module component of `token` for this package.
    ///
    /// Malformed tokens, the `providers` module, modules the format does not
    /// match, and `index` modules all normalize to the empty module.
    pub fn token_to_module(&self, token: &str) -> String {
        let components: Vec<&str> = token.split(':').collect();
        let [_, module, _] = components.as_slice() else {
            return String::new();
        };
        if *module == PROVIDERS_MODULE {
            return String::new();
        }

        let canonical = match &self.module_format {
            None => *module,
            Some(format) => {
                match format.captures(module).and_then(|caps| caps.get(1)) {
                    Some(m) => m.as_str(),
                    None => return String::new(),
                }
            }
        };
        if canonical.starts_with("index") {
            return String::new();
        }
        canonical.to_owned()
    }
}

#[cfg(test)]
mod tests;
