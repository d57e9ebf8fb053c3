//! The engine's view of a markup literal.
//!
//! JSX nodes from the host AST are lowered into these variants before any
//! folding happens, so every later stage matches exhaustively on a small,
//! closed set of shapes instead of the full JSX grammar.

mod lower;

pub use lower::{lower_element, lower_fragment};

use swc_core::common::Span;
use swc_core::ecma::ast::Expr;

/// One element or fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupNode {
    /// Tag name as written (`div`, `svg:rect`). `None` for fragments.
    pub tag: Option<String>,
    /// Attributes in source order.
    pub attrs: Vec<AttributeEntry>,
    /// Children in source order.
    pub children: Vec<ChildNode>,
    pub span: Span,
}

impl MarkupNode {
    pub fn is_fragment(&self) -> bool {
        self.tag.is_none()
    }
}

/// An attribute or attribute spread. Later entries override earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeEntry {
    /// `name="value"`, `name={expr}`, or a bare `name` (value `true`).
    NamedValue { name: String, value: Box<Expr> },
    /// `{...expr}`
    Spread(Box<Expr>),
}

/// A child of an element or fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildNode {
    /// Raw JSX text, before whitespace normalisation.
    Text(String),
    /// `{expr}` where `expr` is not itself markup.
    Expr(Box<Expr>),
    /// `{...expr}`
    Spread(Box<Expr>),
    /// A nested element or fragment, written directly or inside `{}`.
    NestedMarkup(MarkupNode),
}
