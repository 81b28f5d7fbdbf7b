//! Canonical `package:module:member` tokens.

use weft_ir::{decompose_token, Span};
use weft_schema::Package;

/// Rewrite `token` into the canonical form used to index `package`'s
/// resources and functions: the package's own name, its normalized module
/// path, and the token's member.
///
/// Every lookup in a [`PackageSchema`](crate::PackageSchema) table must go
/// through here first.
pub fn canonicalize_token(token: &str, package: &Package) -> String {
    let member = match decompose_token(token, Span::DUMMY) {
        Ok(parts) => parts.member,
        Err(_) => token,
    };
    format!(
        "{}:{}:{}",
        package.name,
        package.token_to_module(token),
        member
    )
}
