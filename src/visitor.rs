//! Host traversal.
//!
//! [`StaticJsx`] replaces every markup expression that is not nested inside
//! another one. Nested markup is handled by the compiler as part of its root.
//! The visitor keeps descending into the result of a replacement, and into
//! markup it had to leave untouched, so markup sitting inside expressions
//! (`{cond && <b />}`) is compiled as a root of its own.
//!
//! With an `importSource` configured the tag and its injected import share a
//! fresh hygiene mark per module, so a user binding of the same name is kept
//! apart by the host's hygiene pass. This needs swc's `GLOBALS` to be set, as
//! it is inside a plugin.

use swc_core::common::{DUMMY_SP, Mark, SyntaxContext};
use swc_core::ecma::ast::*;
use swc_core::ecma::atoms::Atom;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};
use tracing::{debug, warn};

use crate::compile::compile;
use crate::config::{Options, TemplateImport};
use crate::error::TransformError;
use crate::markup::{MarkupNode, lower_element, lower_fragment};

/// Rewrites markup literals into template calls.
pub struct StaticJsx {
    options: Options,
    errors: Vec<TransformError>,
    transformed: usize,
}

impl StaticJsx {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            errors: Vec::new(),
            transformed: 0,
        }
    }

    /// Markup expressions that could not be compiled. They were left as they
    /// were.
    pub fn errors(&self) -> &[TransformError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<TransformError> {
        std::mem::take(&mut self.errors)
    }

    /// Number of top-level markup expressions replaced so far.
    pub fn transformed(&self) -> usize {
        self.transformed
    }

    /// Compiles `node` and replaces `expr` with the result. On failure `expr`
    /// is left untouched and the error recorded.
    fn replace(&mut self, expr: &mut Expr, node: MarkupNode) {
        match compile(&node, &self.options) {
            Ok(emitted) => {
                *expr = *emitted.into_expr(node.span);
                self.transformed += 1;
            }
            Err(err) => {
                warn!(error = %err, "leaving markup untouched");
                self.errors.push(err);
            }
        }
    }
}

impl VisitMut for StaticJsx {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        let node = match expr {
            Expr::JSXElement(elt) => lower_element(elt),
            Expr::JSXFragment(frag) => Some(lower_fragment(frag)),
            _ => None,
        };
        if let Some(node) = node {
            // Direct markup children of a failed root are part of it and were
            // reported with it; only expressions below are visited as roots.
            self.replace(expr, node);
        }
        expr.visit_mut_children_with(self);
    }

    fn visit_mut_module(&mut self, module: &mut Module) {
        let before = self.transformed;
        let local_ctxt = self
            .options
            .import
            .is_some()
            .then(|| SyntaxContext::empty().apply_mark(Mark::new()));
        if let Some(ctxt) = local_ctxt {
            self.options.set_tag_ctxt(ctxt);
        }
        module.visit_mut_children_with(self);
        if self.transformed == before {
            return;
        }
        if let (Some(import), Some(ctxt)) = (&self.options.import, local_ctxt) {
            debug!(source = %import.source, local = %import.local, "injecting template import");
            module.body.insert(0, import_decl(import, ctxt));
        }
    }
}

/// `import { <imported> as <local> } from "<source>";` with `local` in
/// `local_ctxt`.
fn import_decl(import: &TemplateImport, local_ctxt: SyntaxContext) -> ModuleItem {
    ModuleItem::ModuleDecl(ModuleDecl::Import(ImportDecl {
        span: DUMMY_SP,
        specifiers: vec![ImportSpecifier::Named(ImportNamedSpecifier {
            span: DUMMY_SP,
            local: Ident::new(import.local.as_str().into(), DUMMY_SP, local_ctxt),
            imported: Some(ModuleExportName::Ident(Ident::new(
                import.imported.as_str().into(),
                DUMMY_SP,
                SyntaxContext::empty(),
            ))),
            is_type_only: false,
        })],
        src: Box::new(Str {
            span: DUMMY_SP,
            value: Atom::from(import.source.as_str()).into(),
            raw: None,
        }),
        type_only: false,
        with: None,
        phase: ImportPhase::Evaluation,
    }))
}
