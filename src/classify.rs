//! Child classification.
//!
//! Decides per child whether it contributes literal text, a runtime hole, or
//! nested markup the compiler has to descend into.

use tracing::trace;

use crate::config::Whitespace;
use crate::eval::{EvalResult, evaluate};
use crate::markup::{ChildNode, MarkupNode};
use crate::serialize::{escape_text, serialize_child};
use crate::template::{Hole, HoleKind};

/// What a single child turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified<'a> {
    /// Serialized, markup-escaped text. Never empty.
    Text(String),
    Hole(Hole),
    /// Markup the caller compiles recursively.
    Nested(&'a MarkupNode),
    /// The child renders nothing.
    Empty,
}

/// Classifies `child` of an element. `raw_text` is set inside `script` and
/// `style`, where text is written without markup escaping.
pub fn classify(child: &ChildNode, whitespace: Whitespace, raw_text: bool) -> Classified<'_> {
    match child {
        ChildNode::Text(text) => {
            let text = whitespace.apply(text);
            text_or_empty(if raw_text { text } else { escape_text(&text) })
        }
        ChildNode::NestedMarkup(node) => Classified::Nested(node),
        ChildNode::Spread(expr) => Classified::Hole(Hole::new(HoleKind::ChildrenSpread, expr.clone())),
        ChildNode::Expr(expr) => {
            let rendered = match evaluate(expr) {
                EvalResult::Static(value) => serialize_child(&value, raw_text),
                EvalResult::Dynamic => None,
            };
            match rendered {
                Some(text) => text_or_empty(text),
                None => {
                    trace!("dynamic child");
                    Classified::Hole(Hole::new(HoleKind::Child, expr.clone()))
                }
            }
        }
    }
}

fn text_or_empty(text: String) -> Classified<'static> {
    if text.is_empty() {
        Classified::Empty
    } else {
        Classified::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::lower_element;
    use crate::parse::parse_expr;
    use swc_core::ecma::ast::Expr;

    fn children(source: &str) -> Vec<ChildNode> {
        let Expr::JSXElement(elt) = *parse_expr(source).unwrap() else {
            panic!("not an element: {source}");
        };
        lower_element(&elt).unwrap().children
    }

    fn classify_one(source: &str, whitespace: Whitespace, raw_text: bool) -> Classified<'static> {
        let children = children(source);
        assert_eq!(children.len(), 1, "{source}");
        match classify(&children[0], whitespace, raw_text) {
            Classified::Text(text) => Classified::Text(text),
            Classified::Hole(hole) => Classified::Hole(hole),
            Classified::Empty => Classified::Empty,
            Classified::Nested(..) => panic!("unexpected nested markup"),
        }
    }

    fn text(s: &str) -> Classified<'static> {
        Classified::Text(s.to_string())
    }

    fn hole_kind(classified: Classified<'_>) -> Option<HoleKind> {
        match classified {
            Classified::Hole(hole) => Some(hole.kind),
            _ => None,
        }
    }

    #[test]
    fn test_text_is_trimmed_and_escaped() {
        assert_eq!(
            classify_one("<p>\n   a < b \n</p>", Whitespace::Trim, false),
            text("a &lt; b")
        );
    }

    #[test]
    fn test_whitespace_only_text_is_empty() {
        assert_eq!(classify_one("<p>\n   \n</p>", Whitespace::Trim, false), Classified::Empty);
        assert_eq!(classify_one("<p>\n   \n</p>", Whitespace::Collapse, false), Classified::Empty);
    }

    #[test]
    fn test_raw_text_is_not_escaped() {
        assert_eq!(
            classify_one("<script>{'if (a < b) run()'}</script>", Whitespace::Trim, true),
            text("if (a < b) run()")
        );
    }

    #[test]
    fn test_static_expressions_render_as_text() {
        assert_eq!(classify_one("<p>{'<b>'}</p>", Whitespace::Trim, false), text("&lt;b&gt;"));
        assert_eq!(classify_one("<p>{42}</p>", Whitespace::Trim, false), text("42"));
        assert_eq!(classify_one("<p>{`tpl`}</p>", Whitespace::Trim, false), text("tpl"));
    }

    #[test]
    fn test_jsx_falsy_values_render_nothing() {
        for source in ["<p>{true}</p>", "<p>{false}</p>", "<p>{null}</p>", "<p>{undefined}</p>", "<p>{''}</p>"] {
            assert_eq!(classify_one(source, Whitespace::Trim, false), Classified::Empty, "{source}");
        }
    }

    #[test]
    fn test_dynamic_children_become_holes() {
        assert_eq!(hole_kind(classify_one("<p>{name}</p>", Whitespace::Trim, false)), Some(HoleKind::Child));
        assert_eq!(
            hole_kind(classify_one("<p>{{a: 1}}</p>", Whitespace::Trim, false)),
            Some(HoleKind::Child)
        );
        assert_eq!(
            hole_kind(classify_one("<p><Foo /></p>", Whitespace::Trim, false)),
            Some(HoleKind::Child)
        );
    }

    #[test]
    fn test_spread_children_are_always_holes() {
        assert_eq!(
            hole_kind(classify_one("<p>{...['a']}</p>", Whitespace::Trim, false)),
            Some(HoleKind::ChildrenSpread)
        );
    }

    #[test]
    fn test_nested_markup_is_returned() {
        let children = children("<p><b>x</b></p>");
        assert!(matches!(
            classify(&children[0], Whitespace::Trim, false),
            Classified::Nested(node) if node.tag.as_deref() == Some("b")
        ));
    }
}
