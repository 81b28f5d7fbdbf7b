//! End-to-end binding through the public API.
//!
//! Several binders share one context: loaded packages, opaque types and
//! array schema types are shared, and each binder keeps its own references.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rayon::prelude::*;
use weft_bind::{BindContext, BindError, Binder, PackageCache};
use weft_ir::ast::{Attribute, Resource as ResourceNode};
use weft_ir::{Expr, Node, Span};
use weft_model::Type;
use weft_schema::{
    Function, LoadError, MemoryLoader, ObjectType, Package, Property, ProviderLoader, Resource,
    SchemaType, Version,
};

/// Serves `kubernetes` and `tls` and counts every load.
struct ProviderHost {
    packages: MemoryLoader,
    loads: AtomicUsize,
}

impl ProviderHost {
    fn new() -> Self {
        ProviderHost {
            packages: MemoryLoader::new()
                .with_package(kubernetes())
                .with_package(tls()),
            loads: AtomicUsize::new(0),
        }
    }

    fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ProviderLoader for ProviderHost {
    fn load_package(
        &self,
        name: &str,
        version: Option<&Version>,
    ) -> Result<Arc<Package>, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.packages.load_package(name, version)
    }
}

fn kubernetes() -> Package {
    let labels = SchemaType::map(SchemaType::String);
    let metadata = SchemaType::Object(Arc::new(ObjectType {
        token: Some("kubernetes:meta/v1:ObjectMeta".to_owned()),
        properties: vec![
            Property::optional("name", SchemaType::String),
            Property::optional("labels", labels),
        ],
    }));
    Package::new("kubernetes")
        .with_version(Version::new(4, 1, 0))
        .with_resource(Resource {
            token: "kubernetes:core/v1:ConfigMap".to_owned(),
            input_properties: vec![
                Property::optional("metadata", metadata.clone()),
                Property::optional("data", SchemaType::map(SchemaType::String)),
                Property::optional("binaryData", SchemaType::map(SchemaType::Archive)),
            ],
            properties: vec![
                Property::required("metadata", metadata),
                Property::required("immutable", SchemaType::Bool),
            ],
        })
}

fn tls() -> Package {
    let algorithm = SchemaType::token("tls:index/Algorithm:Algorithm", Some(SchemaType::String));
    Package::new("tls")
        .with_resource(Resource {
            token: "tls:index/privateKey:PrivateKey".to_owned(),
            input_properties: vec![
                Property::required("algorithm", algorithm.clone()),
                Property::optional("rsaBits", SchemaType::Int),
            ],
            properties: vec![
                Property::required("privateKeyPem", SchemaType::String),
                Property::required("algorithm", algorithm),
            ],
        })
        .with_function(Function {
            token: "tls:index/getPublicKey:getPublicKey".to_owned(),
            inputs: Some(Arc::new(ObjectType {
                token: None,
                properties: vec![Property::required("privateKeyPem", SchemaType::String)],
            })),
            outputs: Some(Arc::new(ObjectType {
                token: None,
                properties: vec![
                    Property::required("publicKeyPem", SchemaType::String),
                    Property::required("algorithms", SchemaType::array(SchemaType::String)),
                ],
            })),
        })
}

fn config_map(name: &str) -> Node {
    let token = "kubernetes:core/v1:ConfigMap";
    let public_key = Expr::invoke(
        "tls:index/getPublicKey:getPublicKey",
        Expr::object(
            [(
                Expr::string("privateKeyPem", Span::new(80, 93)),
                Expr::variable("pem", Span::new(96, 99)),
            )],
            Span::new(78, 101),
        ),
        Span::new(60, 102),
    );
    Node::Resource(ResourceNode {
        name: name.to_owned(),
        token: token.to_owned(),
        token_span: Span::new(12, 40),
        body: vec![Attribute {
            name: "data".to_owned(),
            value: Expr::object(
                [(Expr::string("key", Span::new(52, 55)), public_key)],
                Span::new(50, 110),
            ),
            span: Span::new(45, 110),
        }],
        span: Span::new(0, 112),
    })
}

#[test]
fn bind_config_map_end_to_end() {
    weft_bind::init_tracing();
    let host = Arc::new(ProviderHost::new());
    let mut binder = Binder::new(BindContext::new(host.clone()));

    binder.collect_references(&config_map("settings")).unwrap();
    assert_eq!(
        binder.referenced_packages().collect::<Vec<_>>(),
        vec!["kubernetes", "tls"]
    );
    assert_eq!(
        binder.referenced_package("kubernetes").unwrap().version,
        Some(Version::new(4, 1, 0))
    );

    let sig = binder
        .resource_signature("kubernetes:core/v1:ConfigMap", Span::new(12, 40))
        .unwrap()
        .expect("ConfigMap is declared by kubernetes");
    let Type::Object(inputs) = &sig.inputs else {
        panic!("resource inputs are an object");
    };
    let binary = &inputs.properties["binaryData"];
    let archive = Type::Opaque(binder.context().opaque_types.archive());
    assert_eq!(binary, &Type::optional(Type::map(archive)));

    let public_key = binder
        .function_signature("tls:index/getPublicKey:getPublicKey", Span::new(60, 102))
        .unwrap()
        .expect("getPublicKey is declared by tls");
    let Type::Object(outputs) = &public_key.outputs else {
        panic!("function outputs are an object");
    };
    let algorithms = &outputs.properties["algorithms"];
    assert_eq!(algorithms, &Type::list(Type::String));

    // lists resolve to the shared array schema type, not the declared one
    let resolved = binder.schema_for_type(algorithms).unwrap();
    assert!(resolved.structurally_eq(&SchemaType::array(SchemaType::String)));
    assert_eq!(binder.schema_for_type(&Type::list(Type::String)), Some(resolved));

    assert_eq!(host.loads(), 2);
}

#[test]
fn token_inputs_round_trip_through_model_types() {
    let host = Arc::new(ProviderHost::new());
    let mut binder = Binder::new(BindContext::new(host));
    let node = Node::Resource(ResourceNode {
        name: "key".to_owned(),
        token: "tls:index/privateKey:PrivateKey".to_owned(),
        token_span: Span::new(10, 41),
        body: Vec::new(),
        span: Span::new(0, 44),
    });
    binder.collect_references(&node).unwrap();

    let key = binder
        .resource_signature("tls:index:PrivateKey", Span::new(10, 41))
        .unwrap()
        .unwrap();
    let Type::Object(inputs) = &key.inputs else {
        panic!("resource inputs are an object");
    };
    let algorithm = &inputs.properties["algorithm"];
    assert_eq!(algorithm.members().len(), 2);
    assert_eq!(algorithm.members()[1], Type::String);

    let SchemaType::Union(union) = binder.schema_for_type(algorithm).unwrap() else {
        panic!("a backed token resolves to a union");
    };
    let declared = &key.resource.input_properties[0].ty;
    assert!(union.elements.contains(declared));
    assert!(union.elements.contains(&SchemaType::String));
}

#[test]
fn concurrent_binders_share_one_context() {
    let host = Arc::new(ProviderHost::new());
    let ctx = BindContext::new(host.clone());

    let archives: Vec<Type> = (0..32)
        .into_par_iter()
        .map(|i| {
            let mut binder = Binder::new(ctx.clone());
            binder
                .collect_references(&config_map(&format!("settings-{i}")))
                .unwrap();
            let sig = binder
                .resource_signature("kubernetes:core/v1:ConfigMap", Span::DUMMY)
                .unwrap()
                .unwrap();
            let Type::Object(inputs) = sig.inputs else {
                panic!("resource inputs are an object");
            };
            inputs.properties["binaryData"].clone()
        })
        .collect();

    assert!(archives.windows(2).all(|w| w[0] == w[1]));
    let kubernetes = ctx.package_cache.get("kubernetes").unwrap();
    let tls = ctx.package_cache.get("tls").unwrap();
    assert_eq!(kubernetes.name(), "kubernetes");
    assert_eq!(tls.name(), "tls");
    assert_eq!(ctx.package_cache.len(), 2);
    // racing misses may each load; the cache still installs one schema per name
    assert!(host.loads() >= 2);
}

#[test]
fn concurrent_binders_see_the_installed_schema() {
    let host = Arc::new(ProviderHost::new());
    let ctx = BindContext::new(host);

    let schemas: Vec<_> = (0..16)
        .into_par_iter()
        .map(|i| {
            let mut binder = Binder::new(ctx.clone());
            binder.collect_references(&config_map(&format!("m{i}"))).unwrap();
            Arc::clone(binder.referenced_package("tls").unwrap())
        })
        .collect();

    let installed = ctx.package_cache.get("tls").unwrap();
    for package in &schemas {
        assert!(Arc::ptr_eq(package, installed.package()));
    }
}

#[test]
fn separate_caches_load_separately() {
    let host = Arc::new(ProviderHost::new());
    let first = BindContext::new(host.clone());
    let second = first.clone().with_package_cache(Arc::new(PackageCache::new()));

    for ctx in [first, second] {
        Binder::new(ctx)
            .collect_references(&config_map("settings"))
            .unwrap();
    }
    assert_eq!(host.loads(), 4);
}

#[test]
fn missing_provider_is_reported() {
    let ctx = BindContext::new(Arc::new(MemoryLoader::new().with_package(kubernetes())));
    let mut binder = Binder::new(ctx);

    let err = binder.collect_references(&config_map("settings")).unwrap_err();

    assert!(matches!(err, BindError::Load(LoadError::UnknownPackage(ref name)) if name == "tls"));
    assert_eq!(err.to_string(), "unknown package `tls`");
    assert_eq!(
        binder.referenced_packages().collect::<Vec<_>>(),
        vec!["kubernetes"]
    );
}
