//! Turns a merged run into host syntax.

use swc_core::common::{DUMMY_SP, Span, SyntaxContext};
use swc_core::ecma::ast::*;
use swc_core::ecma::atoms::Atom;

use super::escape::{SplitSegment, split_tpl_segment};
use super::{Hole, HoleKind, MergedRun};
use crate::config::{Markers, Options};
use crate::error::{TransformError, TransformErrorKind, TransformResult};

/// Final form of a compiled markup expression.
#[derive(Debug, Clone, PartialEq)]
pub enum EmittedNode {
    /// Fully static markup with no template function configured.
    PlainString(String),
    /// A tagged template with `segments` interleaved with `holes`.
    TaggedCall {
        tag: Box<Expr>,
        segments: Vec<String>,
        /// Hole payloads already wrapped in their marker objects.
        holes: Vec<Box<Expr>>,
    },
}

/// Chooses the output form for `run`.
///
/// Fails only when the run has holes but no template function is configured;
/// `span` is the markup expression the error is reported at.
pub fn emit(run: MergedRun, options: &Options, span: Span) -> TransformResult<EmittedNode> {
    let Some(tag) = &options.template else {
        if !run.is_static() {
            return Err(TransformError::new(
                TransformErrorKind::MissingTemplate { holes: run.holes.len() },
                span,
            ));
        }
        return Ok(EmittedNode::PlainString(run.segments.concat()));
    };
    let holes = run
        .holes
        .into_iter()
        .map(|hole| wrap_hole(hole, &options.markers))
        .collect();
    Ok(EmittedNode::TaggedCall {
        tag: tag.clone(),
        segments: run.segments,
        holes,
    })
}

/// `{ <marker>: expr }`
fn wrap_hole(hole: Hole, markers: &Markers) -> Box<Expr> {
    let key = match hole.kind {
        HoleKind::Child => &markers.child,
        HoleKind::ChildrenSpread => &markers.children,
        HoleKind::AttributeSpread => &markers.spread,
    };
    Box::new(Expr::Object(ObjectLit {
        span: DUMMY_SP,
        props: vec![PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
            key: prop_name(key),
            value: hole.expr,
        })))],
    }))
}

fn prop_name(key: &str) -> PropName {
    let is_ident = key.starts_with(Ident::is_valid_start) && key.chars().all(Ident::is_valid_continue);
    if is_ident {
        PropName::Ident(IdentName::new(key.into(), DUMMY_SP))
    } else {
        PropName::Str(str_lit(key, DUMMY_SP))
    }
}

fn str_lit(text: &str, span: Span) -> Str {
    Str {
        span,
        value: Atom::from(text).into(),
        raw: None,
    }
}

/// `text` must already be free of template syntax, so `raw` and `cooked`
/// are the same string.
fn tpl_element(text: &str, tail: bool) -> TplElement {
    TplElement {
        span: DUMMY_SP,
        tail,
        cooked: Some(Atom::from(text).into()),
        raw: Atom::from(text),
    }
}

/// Lays `segments` and `holes` out as a template literal. Text a template
/// literal cannot hold verbatim is passed as an extra string-literal
/// expression, which reads the same to tags using `raw` or `cooked`.
fn build_tpl(segments: Vec<String>, holes: Vec<Box<Expr>>) -> Tpl {
    let mut quasis = Vec::with_capacity(segments.len());
    let mut exprs = Vec::with_capacity(holes.len());
    let mut pending = String::new();
    let mut holes = holes.into_iter();
    for segment in &segments {
        let SplitSegment { quasis: texts, literals } = split_tpl_segment(segment);
        let mut texts = texts.into_iter();
        if let Some(first) = texts.next() {
            pending.push_str(&first);
        }
        for (literal, text) in literals.iter().zip(texts) {
            quasis.push(tpl_element(&std::mem::replace(&mut pending, text), false));
            exprs.push(Box::new(Expr::Lit(Lit::Str(str_lit(literal, DUMMY_SP)))));
        }
        if let Some(hole) = holes.next() {
            quasis.push(tpl_element(&std::mem::take(&mut pending), false));
            exprs.push(hole);
        }
    }
    quasis.push(tpl_element(&pending, true));
    Tpl {
        span: DUMMY_SP,
        exprs,
        quasis,
    }
}

impl EmittedNode {
    pub fn hole_count(&self) -> usize {
        match self {
            Self::PlainString(..) => 0,
            Self::TaggedCall { holes, .. } => holes.len(),
        }
    }

    /// Builds the replacement expression, spanning `span`.
    pub fn into_expr(self, span: Span) -> Box<Expr> {
        match self {
            Self::PlainString(text) => Box::new(Expr::Lit(Lit::Str(str_lit(&text, span)))),
            Self::TaggedCall { tag, segments, holes } => Box::new(Expr::TaggedTpl(TaggedTpl {
                span,
                ctxt: SyntaxContext::empty(),
                tag,
                type_params: None,
                tpl: Box::new(build_tpl(segments, holes)),
            })),
        }
    }
}
