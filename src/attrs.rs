//! Attribute folding.
//!
//! Attributes and attribute spreads are walked in source order against one
//! working [`Mapping`]. The walk stops at the first entry whose value is not
//! known at compile time; from there on the override order can only be
//! resolved at runtime, so that entry and everything after it travel together
//! as one object expression.

use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::*;
use swc_core::ecma::atoms::Atom;
use tracing::trace;

use crate::eval::{EvalResult, Mapping, StaticValue, evaluate, merge_spread, order_own_keys};
use crate::markup::AttributeEntry;

/// Attributes split into a static prefix and a runtime remainder.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldedAttributes {
    /// Attributes fully known at compile time, in first-insertion order.
    pub statics: Mapping,
    /// Object expression for the attribute spread hole, if any entry was
    /// dynamic.
    pub remainder: Option<Box<Expr>>,
}

/// Folds an element's attribute list.
pub fn fold(entries: &[AttributeEntry]) -> FoldedAttributes {
    let mut statics = Mapping::new();
    for (index, entry) in entries.iter().enumerate() {
        if fold_entry(&mut statics, entry).is_none() {
            trace!(index, remaining = entries.len() - index, "dynamic attribute, deferring the rest");
            order_own_keys(&mut statics);
            return FoldedAttributes {
                statics,
                remainder: Some(remainder_expr(&entries[index..])),
            };
        }
    }
    order_own_keys(&mut statics);
    FoldedAttributes { statics, remainder: None }
}

/// Applies one entry to `statics`, or returns `None` (leaving `statics`
/// untouched) if the entry is dynamic.
fn fold_entry(statics: &mut Mapping, entry: &AttributeEntry) -> Option<()> {
    match entry {
        AttributeEntry::NamedValue { name, value } => match evaluate(value) {
            // An object has no canonical attribute text.
            EvalResult::Static(StaticValue::Mapping(..)) | EvalResult::Dynamic => None,
            EvalResult::Static(value) => {
                statics.insert(name.clone(), value);
                Some(())
            }
        },
        AttributeEntry::Spread(expr) => {
            let source = evaluate(expr).into_static()?;
            if let StaticValue::Mapping(entries) = &source
                && entries.values().any(|value| matches!(value, StaticValue::Mapping(..)))
            {
                return None;
            }
            merge_spread(statics, source)
        }
    }
}

/// Rebuilds the dynamic tail of the attribute list as a single expression
/// with the same override order.
fn remainder_expr(entries: &[AttributeEntry]) -> Box<Expr> {
    if let [AttributeEntry::Spread(expr)] = entries {
        return expr.clone();
    }
    let props = entries
        .iter()
        .map(|entry| match entry {
            AttributeEntry::NamedValue { name, value } => PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
                key: PropName::Str(Str {
                    span: DUMMY_SP,
                    value: Atom::from(name.as_str()).into(),
                    raw: None,
                }),
                value: value.clone(),
            }))),
            AttributeEntry::Spread(expr) => PropOrSpread::Spread(SpreadElement {
                dot3_token: DUMMY_SP,
                expr: expr.clone(),
            }),
        })
        .collect();
    Box::new(Expr::Object(ObjectLit { span: DUMMY_SP, props }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::lower_element;
    use crate::parse::parse_expr;
    use swc_core::ecma::codegen::to_code;

    fn fold_source(source: &str) -> FoldedAttributes {
        let expr = parse_expr(source).unwrap();
        let Expr::JSXElement(elt) = *expr else {
            panic!("not an element: {source}");
        };
        fold(&lower_element(&elt).unwrap().attrs)
    }

    fn keys(statics: &Mapping) -> Vec<&str> {
        statics.keys().map(String::as_str).collect()
    }

    fn normalized(source: &str) -> String {
        to_code(parse_expr(source).unwrap().unwrap_parens())
    }

    #[test]
    fn test_all_static() {
        let folded = fold_source(r#"<div foo="1" bar={2} baz />"#);
        assert_eq!(keys(&folded.statics), ["foo", "bar", "baz"]);
        assert_eq!(folded.statics["bar"], StaticValue::Number(2.0));
        assert_eq!(folded.statics["baz"], StaticValue::Bool(true));
        assert!(folded.remainder.is_none());
    }

    #[test]
    fn test_later_attribute_overrides_earlier() {
        let folded = fold_source(r#"<div foo="1" bar="x" foo="2" />"#);
        assert_eq!(keys(&folded.statics), ["foo", "bar"]);
        assert_eq!(folded.statics["foo"], StaticValue::String("2".into()));
    }

    #[test]
    fn test_nested_static_spreads() {
        let folded = fold_source("<div {...{foo: 'foo', ...{bar: 'bar', ...{baz: true}}}} />");
        assert_eq!(keys(&folded.statics), ["foo", "bar", "baz"]);
        assert!(folded.remainder.is_none());
    }

    #[test]
    fn test_dynamic_value_defers_the_tail() {
        let folded = fold_source(r#"<div bar="123" foo={foo} {...{foo, bar, baz}} />"#);
        assert_eq!(keys(&folded.statics), ["bar"]);
        let remainder = folded.remainder.unwrap();
        assert_eq!(to_code(&*remainder), normalized(r#"({"foo": foo, ...{foo, bar, baz}})"#));
    }

    #[test]
    fn test_lone_dynamic_spread_is_passed_through() {
        let folded = fold_source(r#"<div a="1" {...props} />"#);
        assert_eq!(keys(&folded.statics), ["a"]);
        assert_eq!(to_code(&*folded.remainder.unwrap()), normalized("props"));
    }

    #[test]
    fn test_static_entries_after_dynamic_stay_in_remainder() {
        let folded = fold_source(r#"<div {...props} id="x" />"#);
        assert!(folded.statics.is_empty());
        assert_eq!(
            to_code(&*folded.remainder.unwrap()),
            normalized(r#"({...props, "id": "x"})"#)
        );
    }

    #[test]
    fn test_object_valued_attribute_is_dynamic() {
        let folded = fold_source("<div style={{color: 'red'}} />");
        assert!(folded.statics.is_empty());
        assert!(folded.remainder.is_some());
    }

    #[test]
    fn test_spread_carrying_object_value_is_dynamic() {
        let folded = fold_source("<div id=\"a\" {...{style: {color: 'red'}}} />");
        assert_eq!(keys(&folded.statics), ["id"]);
        assert_eq!(
            to_code(&*folded.remainder.unwrap()),
            normalized("({style: {color: 'red'}})")
        );
    }

    #[test]
    fn test_array_index_keys_come_first() {
        let folded = fold_source("<div a=\"1\" {...{b: 'x', 1: 'y'}} />");
        assert_eq!(keys(&folded.statics), ["1", "a", "b"]);
        assert!(folded.remainder.is_none());
    }

    #[test]
    fn test_spread_of_null_is_ignored() {
        let folded = fold_source("<div a={1} {...null} />");
        assert_eq!(keys(&folded.statics), ["a"]);
        assert!(folded.remainder.is_none());
    }

    #[test]
    fn test_no_attributes() {
        let folded = fold_source("<div />");
        assert!(folded.statics.is_empty());
        assert!(folded.remainder.is_none());
    }
}
