//! Resource and invocation tokens.
//!
//! A token names a provider member as `package:module:member`, e.g.
//! `aws:s3/bucket:Bucket`. Module paths are left as written here; each
//! package decides how its module paths normalize.

use std::fmt;

use crate::Span;

/// The three components of a well-formed token, borrowed from the token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TokenParts<'a> {
    pub package: &'a str,
    pub module: &'a str,
    pub member: &'a str,
}

/// A token that does not split into exactly three components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedToken {
    pub token: String,
    pub span: Span,
}

impl fmt::Display for MalformedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malformed token `{}` at {}: expected `package:module:member`",
            self.token, self.span
        )
    }
}

impl std::error::Error for MalformedToken {}

/// Split a token into its package, module and member components.
pub fn decompose_token(token: &str, span: Span) -> Result<TokenParts<'_>, MalformedToken> {
    let mut parts = token.split(':');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(package), Some(module), Some(member), None) => Ok(TokenParts {
            package,
            module,
            member,
        }),
        _ => Err(MalformedToken {
            token: token.to_owned(),
            span,
        }),
    }
}
