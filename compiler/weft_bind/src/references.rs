//! Collecting the provider packages a node references.

use std::collections::BTreeSet;

use weft_ir::ast::Call;
use weft_ir::visitor::{walk_call, Visitor};
use weft_ir::{decompose_token, Node, Span};

use crate::binder::Binder;
use crate::error::BindError;

/// Every `invoke` token under a node.
#[derive(Default)]
struct InvokeTokens<'ast> {
    tokens: Vec<(&'ast str, Span)>,
}

impl<'ast> Visitor<'ast> for InvokeTokens<'ast> {
    fn visit_call(&mut self, call: &'ast Call, _span: Span) {
        if let Some(token) = call.invoke_token() {
            self.tokens.push(token);
        }
        walk_call(self, call);
    }
}

impl Binder {
    /// Make sure every package `node` references is resolved.
    ///
    /// Collects the package of a resource's own token and of every `invoke`
    /// inside the node, then resolves the ones not yet referenced through
    /// the package cache, in name order. The built-in package is skipped.
    ///
    /// Stops at the first package that fails to load; packages resolved
    /// before it stay referenced.
    #[tracing::instrument(level = "debug", skip_all, fields(node = node.name()))]
    pub fn collect_references(&mut self, node: &Node) -> Result<(), BindError> {
        let mut names = BTreeSet::new();

        if let Node::Resource(resource) = node {
            let parts = decompose_token(&resource.token, resource.token_span)?;
            names.insert(parts.package);
        }

        let mut invokes = InvokeTokens::default();
        invokes.visit_node(node);
        for (token, span) in invokes.tokens {
            let parts = decompose_token(token, span)?;
            names.insert(parts.package);
        }

        names.remove(self.ctx.builtin_package.as_str());

        for name in names {
            if self.referenced_packages.contains_key(name) {
                continue;
            }
            let schema = self
                .ctx
                .package_cache
                .load_or_get(self.ctx.loader.as_ref(), name)?;
            tracing::debug!(package = name, "resolved referenced package");
            self.referenced_packages.insert(name.to_owned(), schema);
        }
        Ok(())
    }
}
