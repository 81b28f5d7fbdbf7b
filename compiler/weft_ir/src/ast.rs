//! Bound top-level nodes and their expression trees.
//!
//! These are the shapes the schema binder inspects; producing them from
//! configuration source is the parser's job. Every expression carries the
//! span it was parsed from.

use crate::Span;

/// Name of the intrinsic used to call a provider function:
/// `invoke("pkg:module:fn", { ... })`.
pub const INVOKE: &str = "invoke";

/// A top-level declaration in a configuration program.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Resource(Resource),
    Local(LocalVariable),
    Config(ConfigVariable),
    Output(OutputVariable),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Resource(r) => &r.name,
            Node::Local(l) => &l.name,
            Node::Config(c) => &c.name,
            Node::Output(o) => &o.name,
        }
    }
}

/// `resource <name> "<token>" { <attributes> }`
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    pub name: String,
    /// The resource type token, e.g. `aws:s3/bucket:Bucket`.
    pub token: String,
    pub token_span: Span,
    pub body: Vec<Attribute>,
    pub span: Span,
}

/// `<name> = <value>` inside a block body.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocalVariable {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

/// `config <name> "<type>" { default = <expr> }`
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigVariable {
    pub name: String,
    pub type_name: String,
    pub default: Option<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OutputVariable {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Interpolated string; parts are literals and interpolated expressions.
    Template(Vec<Expr>),
    Variable(String),
    Call(Call),
    Tuple(Vec<Expr>),
    Object(Vec<ObjectItem>),
    Index {
        collection: Box<Expr>,
        key: Box<Expr>,
    },
    GetAttr {
        object: Box<Expr>,
        name: String,
    },
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    For(Box<ForExpr>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectItem {
    pub key: Expr,
    pub value: Expr,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

/// `[for k, v in collection : value if condition]`, or the object form
/// `{for k, v in collection : key => value if condition}`.
#[derive(Clone, Debug, PartialEq)]
pub struct ForExpr {
    pub key_var: Option<String>,
    pub value_var: String,
    pub collection: Expr,
    pub key: Option<Expr>,
    pub value: Expr,
    pub condition: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expr>,
}

impl Call {
    /// The provider function token of an `invoke` call, with the span of the
    /// argument it was read from.
    ///
    /// Returns `None` for any other call, and for an `invoke` whose first
    /// argument is not a plain string literal.
    pub fn invoke_token(&self) -> Option<(&str, Span)> {
        if self.name != INVOKE {
            return None;
        }
        let first = self.args.first()?;
        let literal = match &first.kind {
            ExprKind::Template(parts) if parts.len() == 1 => &parts[0],
            _ => first,
        };
        match &literal.kind {
            ExprKind::String(token) => Some((token.as_str(), first.span)),
            _ => None,
        }
    }
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    pub fn string(value: impl Into<String>, span: Span) -> Self {
        Expr::new(ExprKind::String(value.into()), span)
    }

    pub fn variable(name: impl Into<String>, span: Span) -> Self {
        Expr::new(ExprKind::Variable(name.into()), span)
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>, span: Span) -> Self {
        Expr::new(
            ExprKind::Call(Call {
                name: name.into(),
                args,
            }),
            span,
        )
    }

    /// `invoke("<token>", <args>)`
    pub fn invoke(token: impl Into<String>, args: Expr, span: Span) -> Self {
        Expr::call(INVOKE, vec![Expr::string(token, span), args], span)
    }

    pub fn object(items: impl IntoIterator<Item = (Expr, Expr)>, span: Span) -> Self {
        let items = items
            .into_iter()
            .map(|(key, value)| ObjectItem { key, value })
            .collect();
        Expr::new(ExprKind::Object(items), span)
    }
}
