//! Thin wrappers over the swc parser.
//!
//! Used to turn the configured `template` string into an expression, and by
//! tests to build real JSX trees from source text.

use std::rc::Rc;

use swc_core::common::{FileName, SourceMap};
use swc_core::ecma::ast::{EsVersion, Expr, Module};
use swc_core::ecma::parser::{Parser, StringInput, Syntax, TsSyntax, lexer::Lexer};

fn tsx_syntax() -> Syntax {
    Syntax::Typescript(TsSyntax {
        tsx: true,
        decorators: true,
        ..Default::default()
    })
}

/// Parses a TSX expression from a source string.
pub fn parse_expr(source: &str) -> Result<Box<Expr>, String> {
    let cm: Rc<SourceMap> = Rc::new(SourceMap::default());
    let fm = cm.new_source_file(FileName::Custom("expr.tsx".into()).into(), source.to_string());
    let lexer = Lexer::new(tsx_syntax(), EsVersion::latest(), StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);
    parser.parse_expr().map_err(|e| format!("{:?}", e.kind()))
}

/// Parses a TSX module from a source string.
pub fn parse_module(source: &str) -> Result<Module, String> {
    let cm: Rc<SourceMap> = Rc::new(SourceMap::default());
    let fm = cm.new_source_file(FileName::Custom("input.tsx".into()).into(), source.to_string());
    let lexer = Lexer::new(tsx_syntax(), EsVersion::latest(), StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);
    parser.parse_module().map_err(|e| format!("{:?}", e.kind()))
}
