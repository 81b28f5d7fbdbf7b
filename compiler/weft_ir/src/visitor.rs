//! Node and expression visitor.
//!
//! Default `visit_*` methods call the matching `walk_*` function, which
//! visits every child. Override a `visit_*` method to observe a node kind
//! and call `walk_*` from it to keep descending.
//!
//! ```text
//! struct CountCalls(usize);
//!
//! impl<'ast> Visitor<'ast> for CountCalls {
//!     fn visit_call(&mut self, call: &'ast Call, span: Span) {
//!         self.0 += 1;
//!         walk_call(self, call);
//!     }
//! }
//! ```

use crate::ast::{Call, Expr, ExprKind, Node};
use crate::Span;

pub trait Visitor<'ast> {
    fn visit_node(&mut self, node: &'ast Node) {
        walk_node(self, node);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    /// Visit a function call; `span` is the span of the whole call expression.
    fn visit_call(&mut self, call: &'ast Call, span: Span) {
        let _ = span;
        walk_call(self, call);
    }
}

pub fn walk_node<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, node: &'ast Node) {
    match node {
        Node::Resource(resource) => {
            for attr in &resource.body {
                visitor.visit_expr(&attr.value);
            }
        }
        Node::Local(local) => visitor.visit_expr(&local.value),
        Node::Config(config) => {
            if let Some(default) = &config.default {
                visitor.visit_expr(default);
            }
        }
        Node::Output(output) => visitor.visit_expr(&output.value),
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::Null
        | ExprKind::Bool(_)
        | ExprKind::Number(_)
        | ExprKind::String(_)
        | ExprKind::Variable(_) => {}
        ExprKind::Template(parts) | ExprKind::Tuple(parts) => {
            for part in parts {
                visitor.visit_expr(part);
            }
        }
        ExprKind::Call(call) => visitor.visit_call(call, expr.span),
        ExprKind::Object(items) => {
            for item in items {
                visitor.visit_expr(&item.key);
                visitor.visit_expr(&item.value);
            }
        }
        ExprKind::Index { collection, key } => {
            visitor.visit_expr(collection);
            visitor.visit_expr(key);
        }
        ExprKind::GetAttr { object, .. } => visitor.visit_expr(object),
        ExprKind::Conditional {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_expr(then_branch);
            visitor.visit_expr(else_branch);
        }
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Binary { lhs, rhs, .. } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        ExprKind::For(for_expr) => {
            visitor.visit_expr(&for_expr.collection);
            if let Some(key) = &for_expr.key {
                visitor.visit_expr(key);
            }
            visitor.visit_expr(&for_expr.value);
            if let Some(condition) = &for_expr.condition {
                visitor.visit_expr(condition);
            }
        }
    }
}

pub fn walk_call<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, call: &'ast Call) {
    for arg in &call.args {
        visitor.visit_expr(arg);
    }
}
