//! End-to-end tests: parse a module, run the transform, print it back.

use swc_core::common::{GLOBALS, Globals, SyntaxContext};
use swc_core::ecma::ast::Program;
use swc_core::ecma::codegen::to_code;
use swc_plugin_static_jsx::parse::parse_module;
use swc_plugin_static_jsx::{Config, TransformErrorKind, transform};

fn program(source: &str) -> Program {
    Program::Module(parse_module(source).unwrap_or_else(|e| panic!("parse error {e} in {source}")))
}

fn transform_with(source: &str, config: &str) -> String {
    let options = Config::from_json(config).unwrap().resolve().unwrap();
    let mut program = program(source);
    let errors = GLOBALS.set(&Globals::new(), || transform(&mut program, options));
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    to_code(&program)
}

fn assert_transform(source: &str, expected: &str) {
    assert_transform_with(source, "{}", expected);
}

fn assert_transform_with(source: &str, config: &str, expected: &str) {
    assert_eq!(transform_with(source, config), to_code(&program(expected)));
}

// ==================== Static folding ====================

#[test]
fn test_empty_element() {
    assert_transform("<div />;", "String.raw`<div />`;");
}

#[test]
fn test_namespaced_names() {
    assert_transform(
        r#"<foo:bar foo:baz="123" />;"#,
        r#"String.raw`<foo:bar foo:baz="123" />`;"#,
    );
}

#[test]
fn test_nested_spreads_fold_completely() {
    assert_transform(
        "<div {...{foo: 'foo', ...{bar: 'bar', ...{baz: true}}}} />;",
        r#"String.raw`<div foo="foo" bar="bar" baz />`;"#,
    );
}

#[test]
fn test_dynamic_attribute_keeps_override_order() {
    assert_transform(
        r#"<div bar="123" foo={foo} {...{foo, bar, baz}} />;"#,
        r#"String.raw`<div bar="123" ${{$$spread: {"foo": foo, ...{foo, bar, baz}}}} />`;"#,
    );
}

#[test]
fn test_static_spread_with_dynamic_member() {
    assert_transform(
        "<div {...{foo: 'foo', cool: true, baz}} />;",
        "String.raw`<div ${{$$spread: {foo: 'foo', cool: true, baz}}} />`;",
    );
}

#[test]
fn test_empty_spread() {
    assert_transform("<div {...{}} />;", "String.raw`<div />`;");
}

#[test]
fn test_duplicate_attributes_last_wins() {
    assert_transform(r#"<div foo="1" foo="2" />;"#, r#"String.raw`<div foo="2" />`;"#);
}

#[test]
fn test_fully_static_document() {
    let source = r#"
        const page = (
            <html lang="en">
                <head>
                    <meta charset="utf-8" />
                    <style>{`body > main { margin: 0 }`}</style>
                    <script>{'if (a < b && c) start()'}</script>
                </head>
                <body>
                    <main>
                        Hello there!
                        <span data-foo data-bar={123}> Another good day! </span>
                    </main>
                </body>
            </html>
        );"#;
    let expected = concat!(
        "const page = (String.raw`",
        r#"<html lang="en"><head><meta charset="utf-8">"#,
        "<style>body > main { margin: 0 }</style>",
        "<script>if (a < b && c) start()</script>",
        r#"</head><body><main>Hello there!<span data-foo data-bar="123">Another good day!</span></main></body></html>"#,
        "`);"
    );
    assert_transform(source, expected);
}

#[test]
fn test_text_is_markup_escaped() {
    assert_transform(
        r#"<p title={'"quoted"'}>{'1 < 2 & 3 > 2'}</p>;"#,
        r#"String.raw`<p title="&quot;quoted&quot;">1 &lt; 2 &amp; 3 &gt; 2</p>`;"#,
    );
}

#[test]
fn test_template_syntax_in_text_reads_back_unchanged() {
    assert_transform(
        "<code>{'`${x}`'}</code>;",
        r#"String.raw`<code>${"`$"}{x}${"`"}</code>`;"#,
    );
}

#[test]
fn test_backslashes_in_text_read_back_unchanged() {
    assert_transform(
        r"<p>C:\path</p>;",
        r#"String.raw`<p>C:${"\\"}path</p>`;"#,
    );
    assert_transform(
        r#"<p title={'a\\b'}>{'\\'}</p>;"#,
        r#"String.raw`<p title="a${"\\"}b">${"\\"}</p>`;"#,
    );
}

#[test]
fn test_non_breaking_space_is_kept() {
    assert_transform("<p>&nbsp;</p>;", "String.raw`<p>\u{a0}</p>`;");
    assert_transform_with(
        "<p>\n  a&nbsp;\n</p>;",
        r#"{"whitespace": "collapse"}"#,
        "String.raw`<p>a\u{a0}</p>`;",
    );
}

#[test]
fn test_spread_carrying_object_value_stays_dynamic() {
    assert_transform(
        r#"<div id="a" {...{style: {color: 'red'}}} />;"#,
        r#"String.raw`<div id="a" ${{$$spread: {style: {color: 'red'}}}} />`;"#,
    );
}

#[test]
fn test_array_index_keys_enumerate_first() {
    assert_transform(
        "<div {...{b: 'x', 1: 'y'}} />;",
        r#"String.raw`<div 1="y" b="x" />`;"#,
    );
}

#[test]
fn test_childless_raw_text_elements_close_explicitly() {
    assert_transform(
        r#"<head><script src="a.js" /><style /></head>;"#,
        r#"String.raw`<head><script src="a.js"></script><style></style></head>`;"#,
    );
}

// ==================== Holes ====================

#[test]
fn test_child_hole() {
    assert_transform(
        "<p>Hello {name}!</p>;",
        "String.raw`<p>Hello${{$$child: name}}!</p>`;",
    );
}

#[test]
fn test_children_spread_hole() {
    assert_transform(
        "<ul>{...items}</ul>;",
        "String.raw`<ul>${{$$children: items}}</ul>`;",
    );
}

#[test]
fn test_lone_spread_passes_expression_through() {
    assert_transform("<div {...props} />;", "String.raw`<div ${{$$spread: props}} />`;");
}

#[test]
fn test_markup_in_hole_expression() {
    assert_transform(
        "<ul>{items.map(item => <li>{item}</li>)}</ul>;",
        "String.raw`<ul>${{$$child: items.map(item => String.raw`<li>${{$$child: item}}</li>`)}}</ul>`;",
    );
}

#[test]
fn test_nested_dynamic_element() {
    assert_transform(
        r#"<div class="card"><h1>Title</h1><p class={cls}>body</p></div>;"#,
        r#"String.raw`<div class="card"><h1>Title</h1>${{$$child: String.raw`<p ${{$$spread: {"class": cls}}}>body</p>`}}</div>`;"#,
    );
}

#[test]
fn test_fragment_root_and_children() {
    assert_transform(
        "<><b /><>{x}</></>;",
        "String.raw`<b />${{$$child: x}}`;",
    );
}

#[test]
fn test_component_is_left_for_other_transforms() {
    assert_transform(
        "const a = <Foo />; const b = <div><Foo /></div>;",
        "const a = <Foo />; const b = String.raw`<div>${{$$child: <Foo />}}</div>`;",
    );
}

// ==================== Configuration ====================

#[test]
fn test_custom_template_and_markers() {
    assert_transform_with(
        "<div {...props}>{x}{...xs}</div>;",
        r#"{"template": "lib.html", "spread": "s", "child": "c", "children": "cs"}"#,
        "lib.html`<div ${{s: props}}>${{c: x}}${{cs: xs}}</div>`;",
    );
}

#[test]
fn test_null_template_static_markup() {
    assert_transform_with(
        "const a = <div><br /></div>;",
        r#"{"template": null}"#,
        r#"const a = "<div><br></div>";"#,
    );
}

#[test]
fn test_null_template_with_holes_is_an_error() {
    let options = Config::from_json(r#"{"template": null}"#).unwrap().resolve().unwrap();
    let source = "const a = <div>{x}</div>;";
    let mut module = program(source);
    let errors = transform(&mut module, options);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, TransformErrorKind::MissingTemplate { holes: 1 });
    assert_eq!(to_code(&module), to_code(&program(source)));
}

#[test]
fn test_import_source() {
    assert_transform_with(
        "export default () => <p>{x}</p>;",
        r#"{"template": "html", "importSource": "lit-html"}"#,
        r#"import { html as _html } from "lit-html"; export default () => _html`<p>${{$$child: x}}</p>`;"#,
    );
}

#[test]
fn test_import_does_not_capture_user_binding() {
    let options = Config::from_json(r#"{"template": "html", "importSource": "lit-html"}"#)
        .unwrap()
        .resolve()
        .unwrap();
    let mut module = program("const _html = 1; export const a = <p />;");
    let errors = GLOBALS.set(&Globals::new(), || transform(&mut module, options));
    assert!(errors.is_empty());
    let Program::Module(module) = module else {
        panic!("expected module");
    };
    let locals: Vec<_> = module
        .body
        .iter()
        .filter_map(|item| item.as_module_decl()?.as_import()?.specifiers[0].as_named())
        .map(|specifier| specifier.local.ctxt)
        .collect();
    assert_eq!(locals.len(), 1);
    assert_ne!(locals[0], SyntaxContext::empty());
}

#[test]
fn test_static_markup_inside_failed_markup_is_compiled() {
    let options = Config::from_json(r#"{"template": null}"#).unwrap().resolve().unwrap();
    let mut module = program("const a = <p>{x}{ok && <b>y</b>}</p>;");
    let errors = transform(&mut module, options);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        to_code(&module),
        to_code(&program(r#"const a = <p>{x}{ok && "<b>y</b>"}</p>;"#))
    );
}

#[test]
fn test_whitespace_collapse() {
    assert_transform_with(
        "<p>\n  one\n  two {x} three\n</p>;",
        r#"{"whitespace": "collapse"}"#,
        "String.raw`<p>one two ${{$$child: x}} three</p>`;",
    );
}

// ==================== Properties ====================

#[test]
fn test_transform_is_deterministic() {
    let source = r#"<section id="s" {...rest}><h2>{title}</h2>{...rows}<footer /></section>;"#;
    assert_eq!(transform_with(source, "{}"), transform_with(source, "{}"));
}

#[test]
fn test_code_without_markup_is_unchanged() {
    let source = "const a = `x${y}`; function f() { return a < b; }";
    assert_transform(source, source);
}
