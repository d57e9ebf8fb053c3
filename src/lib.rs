//! Compiles JSX into tagged template literals at build time.
//!
//! Every markup literal is folded as far as compile-time knowledge allows:
//! literal attributes, statically known object spreads and literal children
//! are serialized straight into the template text, and only genuinely dynamic
//! parts are left as holes for the runtime template function.
//!
//! ```text
//! <div {...{foo: 'foo', ...{bar: 'bar', ...{baz: true}}}} />
//!   => String.raw`<div foo="foo" bar="bar" baz />`
//!
//! <div bar="123" foo={foo} {...{foo, bar, baz}} />
//!   => String.raw`<div bar="123" ${{$$spread: {"foo": foo, ...{foo, bar, baz}}}} />`
//! ```
//!
//! # Holes
//!
//! Each hole is an object with a single marker key telling the template
//! function what kind of value it receives:
//!
//! - `$$spread` - remaining attributes, as an object to be spread
//! - `$$child` - one child value
//! - `$$children` - an iterable of children
//!
//! The keys, the tag expression and an optional import of the tag are set
//! through [`Config`].
//!
//! # Usage
//!
//! Built with the `plugin` feature this crate is an swc Wasm plugin. As a
//! library, resolve a [`Config`] and run [`transform`] (or the
//! [`StaticJsx`] visitor directly) over a parsed program.

mod attrs;
mod classify;
mod compile;
pub mod config;
pub mod error;
mod eval;
mod markup;
pub mod parse;
mod serialize;
mod template;
mod visitor;

pub use config::{Config, Options, Whitespace};
pub use error::{ConfigError, TransformError, TransformErrorKind, TransformResult};
pub use visitor::StaticJsx;

use swc_core::ecma::ast::Program;
use swc_core::ecma::visit::VisitMutWith;

/// Rewrites all markup literals in `program`.
///
/// Markup that cannot be compiled is left unchanged and reported in the
/// returned list. Must run inside swc's `GLOBALS` when an import source is
/// configured.
pub fn transform(program: &mut Program, options: Options) -> Vec<TransformError> {
    let mut visitor = StaticJsx::new(options);
    program.visit_mut_with(&mut visitor);
    tracing::debug!(
        transformed = visitor.transformed(),
        errors = visitor.errors().len(),
        "static jsx pass finished"
    );
    visitor.take_errors()
}

#[cfg(feature = "plugin")]
mod plugin {
    use anyhow::Context;
    use swc_core::common::errors::HANDLER;
    use swc_core::ecma::ast::Program;
    use swc_core::plugin::{plugin_transform, proxies::TransformPluginProgramMetadata};

    use crate::config::{Config, Options};

    fn read_options(metadata: &TransformPluginProgramMetadata) -> anyhow::Result<Options> {
        let json = metadata.get_transform_plugin_config().unwrap_or_default();
        let config = Config::from_json(&json).context("failed to read the plugin configuration")?;
        config.resolve().context("invalid plugin configuration")
    }

    #[plugin_transform]
    pub fn process_transform(mut program: Program, metadata: TransformPluginProgramMetadata) -> Program {
        let mut options = match read_options(&metadata) {
            Ok(options) => options,
            Err(err) => {
                HANDLER.with(|handler| handler.struct_err(&format!("[static-jsx] {err:#}")).emit());
                return program;
            }
        };
        options.mark_tag_unresolved(metadata.unresolved_mark);
        let errors = crate::transform(&mut program, options);
        HANDLER.with(|handler| {
            for err in &errors {
                handler
                    .struct_span_err(err.span, &err.to_string())
                    .help(err.help())
                    .emit();
            }
        });
        program
    }
}
