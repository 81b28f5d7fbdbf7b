//! Syntax-level inputs to the weft schema binder.
//!
//! - [`Span`]: byte ranges carried into errors
//! - [`decompose_token`]: splits `package:module:member` tokens
//! - [`ast`]: bound top-level nodes and expressions
//! - [`visitor`]: traversal over nodes and expressions

pub mod ast;
mod span;
mod token;
pub mod visitor;

pub use ast::{Call, Expr, ExprKind, Node};
pub use span::{Span, SpanError};
pub use token::{decompose_token, MalformedToken, TokenParts};
pub use visitor::Visitor;
