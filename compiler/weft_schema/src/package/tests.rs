#![allow(clippy::unwrap_used, reason = "tests can panic")]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_verbatim_module() {
    let pkg = Package::new("pkgA");
    assert_eq!(pkg.token_to_module("pkgA:moduleX:Member"), "moduleX");
    assert_eq!(pkg.token_to_module("pkgA:s3/bucket:Bucket"), "s3/bucket");
}

#[test]
fn test_index_and_providers_are_empty() {
    let pkg = Package::new("aws");
    assert_eq!(pkg.token_to_module("aws:index:getAmi"), "");
    assert_eq!(pkg.token_to_module("aws:index/getAmi:getAmi"), "");
    assert_eq!(pkg.token_to_module("pulumi:providers:aws"), "");
}

#[test]
fn test_malformed_token_has_no_module() {
    let pkg = Package::new("aws");
    assert_eq!(pkg.token_to_module("aws:Bucket"), "");
    assert_eq!(pkg.token_to_module("a:b:c:d"), "");
}

#[test]
fn test_module_format_capture() {
    let pkg = Package::new("aws")
        .with_module_format("(.*)(?:/[^/]*)")
        .unwrap();
    assert_eq!(pkg.token_to_module("aws:s3/bucket:Bucket"), "s3");
    assert_eq!(pkg.token_to_module("aws:ec2/instance:Instance"), "ec2");
    // no trailing segment: the format does not match
    assert_eq!(pkg.token_to_module("aws:s3:Bucket"), "");
    assert_eq!(pkg.token_to_module("aws:index/region:Region"), "");
}

#[test]
fn test_invalid_module_format() {
    assert!(Package::new("aws").with_module_format("(unclosed").is_err());
}

#[test]
fn test_builders() {
    let pkg = Package::new("random")
        .with_version(Version::new(4, 2, 0))
        .with_resource(Resource {
            token: "random:index/randomId:RandomId".to_owned(),
            input_properties: Vec::new(),
            properties: Vec::new(),
        })
        .with_function(Function {
            token: "random:index/getId:getId".to_owned(),
            inputs: None,
            outputs: None,
        });
    assert_eq!(pkg.version, Some(Version::new(4, 2, 0)));
    assert_eq!(pkg.resources.len(), 1);
    assert_eq!(pkg.functions.len(), 1);
}
