//! Compiles one top-level markup expression.
//!
//! Elements are serialized into a flat list of [`RunSegment`]s in source
//! order. Nested elements are compiled in isolation first: if they turn out
//! fully static their text is inlined, otherwise they become their own tagged
//! template inside a child hole. Fragments add no markup of their own, so
//! their children are spliced into the parent's list directly.

use swc_core::common::Span;
use tracing::{debug, trace};

use crate::attrs;
use crate::classify::{Classified, classify};
use crate::config::Options;
use crate::error::TransformResult;
use crate::markup::{ChildNode, MarkupNode};
use crate::serialize::{is_raw_text_element, is_void_element, serialize_attributes};
use crate::template::{EmittedNode, Hole, HoleKind, RunSegment, emit, merge};

/// Compiles `node` into its final form.
pub fn compile(node: &MarkupNode, options: &Options) -> TransformResult<EmittedNode> {
    let compiler = Compiler {
        options,
        root_span: node.span,
    };
    let mut parts = Vec::new();
    compiler.push_node(node, &mut parts, false)?;
    let emitted = emit(merge(parts), options, node.span)?;
    debug!(
        tag = node.tag.as_deref().unwrap_or("<fragment>"),
        holes = emitted.hole_count(),
        "compiled markup"
    );
    Ok(emitted)
}

struct Compiler<'a> {
    options: &'a Options,
    /// Errors are reported at the top-level expression, which is what the
    /// caller leaves untouched.
    root_span: Span,
}

impl Compiler<'_> {
    fn push_node(&self, node: &MarkupNode, out: &mut Vec<RunSegment>, raw_text: bool) -> TransformResult<()> {
        match &node.tag {
            Some(tag) => self.push_element(tag, node, out),
            None => self.push_children(&node.children, out, raw_text),
        }
    }

    fn push_element(&self, tag: &str, node: &MarkupNode, out: &mut Vec<RunSegment>) -> TransformResult<()> {
        let folded = attrs::fold(&node.attrs);

        let mut open = format!("<{tag}");
        let statics = serialize_attributes(&folded.statics);
        if !statics.is_empty() {
            open.push(' ');
            open.push_str(&statics);
        }
        out.push(RunSegment::Text(open));
        if let Some(remainder) = folded.remainder {
            out.push(RunSegment::Text(" ".to_string()));
            out.push(RunSegment::Hole(Hole::new(HoleKind::AttributeSpread, remainder)));
        }

        if node.children.is_empty() {
            // HTML parsers read `<script />` as an open tag.
            let close = if is_void_element(tag) {
                ">".to_string()
            } else if is_raw_text_element(tag) {
                format!("></{tag}>")
            } else {
                " />".to_string()
            };
            out.push(RunSegment::Text(close));
            return Ok(());
        }

        out.push(RunSegment::Text(">".to_string()));
        self.push_children(&node.children, out, is_raw_text_element(tag))?;
        out.push(RunSegment::Text(format!("</{tag}>")));
        Ok(())
    }

    fn push_children(&self, children: &[ChildNode], out: &mut Vec<RunSegment>, raw_text: bool) -> TransformResult<()> {
        for child in children {
            match classify(child, self.options.whitespace, raw_text) {
                Classified::Text(text) => out.push(RunSegment::Text(text)),
                Classified::Hole(hole) => out.push(RunSegment::Hole(hole)),
                Classified::Empty => {}
                Classified::Nested(nested) if nested.is_fragment() => {
                    self.push_children(&nested.children, out, raw_text)?;
                }
                Classified::Nested(nested) => out.push(self.nested_element(nested)?),
            }
        }
        Ok(())
    }

    fn nested_element(&self, node: &MarkupNode) -> TransformResult<RunSegment> {
        let mut parts = Vec::new();
        self.push_node(node, &mut parts, false)?;
        let run = merge(parts);
        if run.is_static() {
            trace!(tag = node.tag.as_deref(), "inlining static element");
            return Ok(RunSegment::Text(run.segments.concat()));
        }
        let emitted = emit(run, self.options, self.root_span)?;
        Ok(RunSegment::Hole(Hole::new(HoleKind::Child, emitted.into_expr(node.span))))
    }
}
