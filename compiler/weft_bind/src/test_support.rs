//! Fixture packages and loaders shared by unit tests.

#![allow(clippy::unwrap_used, reason = "tests can panic")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use weft_ir::ast::{Attribute, Resource as ResourceNode};
use weft_ir::{Expr, Node, Span};
use weft_schema::{
    Function, LoadError, MemoryLoader, ObjectType, Package, Property, ProviderLoader, Resource,
    SchemaType, Version,
};

use crate::{BindContext, Binder};

/// Loader that counts calls per package and can be told to fail.
#[derive(Default)]
pub struct CountingLoader {
    inner: MemoryLoader,
    calls: Mutex<FxHashMap<String, usize>>,
    total: AtomicUsize,
    failing: Mutex<Vec<String>>,
}

impl CountingLoader {
    pub fn with_fixtures() -> Self {
        let loader = CountingLoader::default();
        loader.inner.register(aws_package());
        loader.inner.register(random_package());
        loader
    }

    pub fn calls(&self, name: &str) -> usize {
        self.calls.lock().get(name).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn fail(&self, name: &str) {
        self.failing.lock().push(name.to_owned());
    }

    pub fn recover(&self, name: &str) {
        self.failing.lock().retain(|n| n != name);
    }
}

impl ProviderLoader for CountingLoader {
    fn load_package(
        &self,
        name: &str,
        version: Option<&Version>,
    ) -> Result<Arc<Package>, LoadError> {
        *self.calls.lock().entry(name.to_owned()).or_default() += 1;
        self.total.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().iter().any(|n| n == name) {
            return Err(LoadError::Provider {
                name: name.to_owned(),
                source: "provider plugin crashed".into(),
            });
        }
        self.inner.load_package(name, version)
    }
}

pub fn canned_acl() -> SchemaType {
    SchemaType::token("aws:s3/cannedAcl:CannedAcl", Some(SchemaType::String))
}

/// `aws` with an `s3` bucket resource and a `getRegion` function.
pub fn aws_package() -> Package {
    let website = SchemaType::Object(Arc::new(ObjectType {
        token: Some("aws:s3/BucketWebsite:BucketWebsite".to_owned()),
        properties: vec![
            Property::optional("indexDocument", SchemaType::String),
            Property::optional("errorDocument", SchemaType::String),
        ],
    }));
    Package::new("aws")
        .with_version(Version::new(5, 0, 0))
        .with_module_format("(.*)(?:/[^/]*)")
        .unwrap()
        .with_resource(Resource {
            token: "aws:s3/bucket:Bucket".to_owned(),
            input_properties: vec![
                Property::optional("bucket", SchemaType::String),
                Property::optional("tags", SchemaType::map(SchemaType::String)),
                Property::optional("website", website),
                Property::optional("acl", canned_acl()),
            ],
            properties: vec![
                Property::required("arn", SchemaType::String),
                Property::required("bucket", SchemaType::String),
            ],
        })
        .with_function(Function {
            token: "aws:index/getRegion:getRegion".to_owned(),
            inputs: Some(Arc::new(ObjectType {
                token: None,
                properties: vec![Property::optional("name", SchemaType::String)],
            })),
            outputs: Some(Arc::new(ObjectType {
                token: None,
                properties: vec![
                    Property::required("name", SchemaType::String),
                    Property::required("endpoint", SchemaType::String),
                ],
            })),
        })
}

/// `random` with a `RandomId` resource and an argument-less `getUuid`.
pub fn random_package() -> Package {
    Package::new("random")
        .with_resource(Resource {
            token: "random:index/randomId:RandomId".to_owned(),
            input_properties: vec![Property::required("byteLength", SchemaType::Int)],
            properties: vec![Property::required("hex", SchemaType::String)],
        })
        .with_function(Function {
            token: "random:index/getUuid:getUuid".to_owned(),
            inputs: None,
            outputs: None,
        })
}

pub fn binder(loader: Arc<CountingLoader>) -> Binder {
    Binder::new(BindContext::new(loader))
}

pub fn resource(token: &str, body: Vec<(&str, Expr)>) -> Node {
    Node::Resource(ResourceNode {
        name: "r".to_owned(),
        token: token.to_owned(),
        token_span: Span::new(9, 9 + u32::try_from(token.len()).unwrap()),
        body: body
            .into_iter()
            .map(|(name, value)| Attribute {
                name: name.to_owned(),
                value,
                span: Span::DUMMY,
            })
            .collect(),
        span: Span::DUMMY,
    })
}
