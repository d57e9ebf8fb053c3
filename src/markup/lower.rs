use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::*;

use super::{AttributeEntry, ChildNode, MarkupNode};

/// Returns the tag text of a plain markup element, or `None` for components
/// (`<Foo />`, `<a.b />`), which are left to other JSX transforms.
fn element_tag_name(name: &JSXElementName) -> Option<String> {
    match name {
        JSXElementName::Ident(ident) => {
            let sym: &str = &ident.sym;
            let intrinsic = sym.starts_with(|c: char| c.is_ascii_lowercase()) || sym.contains('-');
            intrinsic.then(|| sym.to_string())
        }
        JSXElementName::JSXNamespacedName(name) => Some(format!("{}:{}", name.ns.sym, name.name.sym)),
        JSXElementName::JSXMemberExpr(..) => None,
    }
}

fn attr_name(name: &JSXAttrName) -> String {
    match name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(name) => format!("{}:{}", name.ns.sym, name.name.sym),
    }
}

fn true_lit() -> Box<Expr> {
    Box::new(Expr::Lit(Lit::Bool(Bool {
        span: DUMMY_SP,
        value: true,
    })))
}

/// Lowers a JSX element. Returns `None` if the element is a component.
pub fn lower_element(elt: &JSXElement) -> Option<MarkupNode> {
    let tag = element_tag_name(&elt.opening.name)?;
    let attrs = elt.opening.attrs.iter().filter_map(lower_attr).collect();
    Some(MarkupNode {
        tag: Some(tag),
        attrs,
        children: lower_children(&elt.children),
        span: elt.span,
    })
}

/// Lowers a JSX fragment.
pub fn lower_fragment(frag: &JSXFragment) -> MarkupNode {
    MarkupNode {
        tag: None,
        attrs: vec![],
        children: lower_children(&frag.children),
        span: frag.span,
    }
}

fn lower_attr(attr: &JSXAttrOrSpread) -> Option<AttributeEntry> {
    match attr {
        JSXAttrOrSpread::SpreadElement(SpreadElement { expr, .. }) => Some(AttributeEntry::Spread(expr.clone())),
        JSXAttrOrSpread::JSXAttr(JSXAttr { name, value, .. }) => {
            let value = match value {
                None => true_lit(),
                Some(JSXAttrValue::Str(s)) => Box::new(Expr::Lit(Lit::Str(s.clone()))),
                Some(JSXAttrValue::JSXExprContainer(JSXExprContainer { expr, .. })) => match expr {
                    JSXExpr::Expr(expr) => expr.clone(),
                    // `name={}` carries nothing to render.
                    JSXExpr::JSXEmptyExpr(..) => return None,
                },
                Some(JSXAttrValue::JSXElement(elt)) => Box::new(Expr::JSXElement(elt.clone())),
                Some(JSXAttrValue::JSXFragment(frag)) => Box::new(Expr::JSXFragment(frag.clone())),
            };
            Some(AttributeEntry::NamedValue {
                name: attr_name(name),
                value,
            })
        }
    }
}

fn lower_children(children: &[JSXElementChild]) -> Vec<ChildNode> {
    children.iter().filter_map(lower_child).collect()
}

fn lower_child(child: &JSXElementChild) -> Option<ChildNode> {
    match child {
        JSXElementChild::JSXText(JSXText { value, .. }) => Some(ChildNode::Text(value.to_string())),
        JSXElementChild::JSXElement(elt) => Some(match lower_element(elt) {
            Some(node) => ChildNode::NestedMarkup(node),
            None => ChildNode::Expr(Box::new(Expr::JSXElement(elt.clone()))),
        }),
        JSXElementChild::JSXFragment(frag) => Some(ChildNode::NestedMarkup(lower_fragment(frag))),
        JSXElementChild::JSXExprContainer(JSXExprContainer { expr, .. }) => match expr {
            JSXExpr::JSXEmptyExpr(..) => None,
            JSXExpr::Expr(expr) => Some(lower_expr_child(expr)),
        },
        JSXElementChild::JSXSpreadChild(JSXSpreadChild { expr, .. }) => Some(ChildNode::Spread(expr.clone())),
    }
}

fn lower_expr_child(expr: &Expr) -> ChildNode {
    match expr.unwrap_parens() {
        Expr::JSXElement(elt) => match lower_element(elt) {
            Some(node) => ChildNode::NestedMarkup(node),
            None => ChildNode::Expr(Box::new(expr.clone())),
        },
        Expr::JSXFragment(frag) => ChildNode::NestedMarkup(lower_fragment(frag)),
        _ => ChildNode::Expr(Box::new(expr.clone())),
    }
}
