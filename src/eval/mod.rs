//! Static value evaluation.
//!
//! Decides whether a host expression has a value known at compile time.
//! Evaluation is all-or-nothing: an object literal either folds completely
//! into a [`Mapping`] or the whole expression is [`EvalResult::Dynamic`].
//! Nothing here ever fails; shapes we do not understand are simply dynamic.

mod number;

pub use number::js_number_to_string;

use std::cmp::Ordering;

use indexmap::IndexMap;
use swc_core::ecma::ast::*;

/// Ordered key/value association with object-spread semantics: a re-assigned
/// key keeps the position of its first insertion and takes the new value.
/// Array-index keys are moved ahead of other keys by [`order_own_keys`].
pub type Mapping = IndexMap<String, StaticValue>;

/// A value known at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum StaticValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    /// Decimal digits of a bigint literal, without the `n` suffix.
    BigInt(String),
    String(String),
    Mapping(Mapping),
}

impl StaticValue {
    /// `String(value)` for primitives. Mappings have no useful string form
    /// and return `None`.
    pub fn to_js_string(&self) -> Option<String> {
        Some(match self {
            Self::Undefined => "undefined".to_string(),
            Self::Null => "null".to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => js_number_to_string(*value),
            Self::BigInt(digits) => digits.clone(),
            Self::String(value) => value.clone(),
            Self::Mapping(..) => return None,
        })
    }
}

/// Outcome of evaluating one expression.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalResult {
    Static(StaticValue),
    Dynamic,
}

impl EvalResult {
    pub fn into_static(self) -> Option<StaticValue> {
        match self {
            Self::Static(value) => Some(value),
            Self::Dynamic => None,
        }
    }
}

/// Evaluates an expression at compile time.
pub fn evaluate(expr: &Expr) -> EvalResult {
    match evaluate_static(expr) {
        Some(value) => EvalResult::Static(value),
        None => EvalResult::Dynamic,
    }
}

/// Contents of a string literal. Strings holding lone surrogates cannot be
/// represented as Rust text and stay dynamic.
pub(crate) fn str_value(s: &Str) -> Option<String> {
    s.value.as_str().map(str::to_owned)
}

fn evaluate_static(expr: &Expr) -> Option<StaticValue> {
    match expr {
        Expr::Lit(lit) => evaluate_lit(lit),
        Expr::Paren(ParenExpr { expr, .. }) => evaluate_static(expr),
        Expr::TsConstAssertion(TsConstAssertion { expr, .. })
        | Expr::TsAs(TsAsExpr { expr, .. })
        | Expr::TsSatisfies(TsSatisfiesExpr { expr, .. }) => evaluate_static(expr),
        Expr::Ident(ident) if &*ident.sym == "undefined" => Some(StaticValue::Undefined),
        Expr::Tpl(tpl) => evaluate_tpl(tpl),
        Expr::Unary(unary) => evaluate_unary(unary),
        Expr::Object(ObjectLit { props, .. }) => {
            let mut mapping = Mapping::new();
            for prop in props {
                fold_prop(&mut mapping, prop)?;
            }
            order_own_keys(&mut mapping);
            Some(StaticValue::Mapping(mapping))
        }
        _ => None,
    }
}

fn evaluate_lit(lit: &Lit) -> Option<StaticValue> {
    match lit {
        Lit::Str(s) => str_value(s).map(StaticValue::String),
        Lit::Num(Number { value, .. }) => Some(StaticValue::Number(*value)),
        Lit::Bool(Bool { value, .. }) => Some(StaticValue::Bool(*value)),
        Lit::Null(..) => Some(StaticValue::Null),
        Lit::BigInt(BigInt { value, .. }) => Some(StaticValue::BigInt(value.to_string())),
        Lit::Regex(..) | Lit::JSXText(..) => None,
    }
}

fn evaluate_tpl(tpl: &Tpl) -> Option<StaticValue> {
    if !tpl.exprs.is_empty() {
        return None;
    }
    let [TplElement { cooked, .. }] = &tpl.quasis[..] else {
        return None;
    };
    // `cooked` is absent when the literal contains an invalid escape.
    let text = cooked.as_ref()?.as_str()?;
    Some(StaticValue::String(text.to_owned()))
}

fn evaluate_unary(unary: &UnaryExpr) -> Option<StaticValue> {
    let arg = evaluate_static(&unary.arg)?;
    match (unary.op, arg) {
        (UnaryOp::Void, StaticValue::Mapping(..)) => None,
        (UnaryOp::Void, _) => Some(StaticValue::Undefined),
        (UnaryOp::Minus, StaticValue::Number(value)) => Some(StaticValue::Number(-value)),
        (UnaryOp::Plus, StaticValue::Number(value)) => Some(StaticValue::Number(value)),
        _ => None,
    }
}

/// Folds one object literal member into `mapping`, or bails out.
fn fold_prop(mapping: &mut Mapping, prop: &PropOrSpread) -> Option<()> {
    match prop {
        PropOrSpread::Spread(SpreadElement { expr, .. }) => merge_spread(mapping, evaluate_static(expr)?),
        PropOrSpread::Prop(prop) => match &**prop {
            Prop::KeyValue(KeyValueProp { key, value }) => {
                let key = prop_key(key)?;
                let value = evaluate_static(value)?;
                mapping.insert(key, value);
                Some(())
            }
            Prop::Shorthand(..)
            | Prop::Assign(..)
            | Prop::Getter(..)
            | Prop::Setter(..)
            | Prop::Method(..) => None,
        },
    }
}

/// Merges a spread source into `mapping` with last-write-wins semantics.
///
/// Spreading `null` or `undefined` contributes nothing. Any other non-mapping
/// value (strings spread their characters, for one) is left to the runtime.
pub(crate) fn merge_spread(mapping: &mut Mapping, source: StaticValue) -> Option<()> {
    match source {
        StaticValue::Mapping(entries) => {
            for (key, value) in entries {
                mapping.insert(key, value);
            }
            Some(())
        }
        StaticValue::Null | StaticValue::Undefined => Some(()),
        _ => None,
    }
}

/// Reorders `mapping` the way JavaScript enumerates own properties: array
/// index keys first in ascending numeric order, then the remaining keys in
/// insertion order.
pub(crate) fn order_own_keys(mapping: &mut Mapping) {
    mapping.sort_by(|a, _, b, _| match (array_index(a), array_index(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// `Some(n)` if `key` is the canonical text of an array index
/// (`0 ..= 2^32 - 2`, no sign, no leading zeros).
fn array_index(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}

fn prop_key(key: &PropName) -> Option<String> {
    let key = match key {
        PropName::Ident(ident) => ident.sym.to_string(),
        PropName::Str(s) => str_value(s)?,
        PropName::Num(Number { value, .. }) => js_number_to_string(*value),
        PropName::Computed(..) | PropName::BigInt(..) => return None,
    };
    // A literal `__proto__` key sets the prototype instead of an own property.
    if key == "__proto__" {
        return None;
    }
    Some(key)
}
