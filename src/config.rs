//! Plugin configuration.
//!
//! The configuration is a JSON object passed by the host (e.g. the
//! `jsc.experimental.plugins` entry of `.swcrc`). Unknown keys are ignored so
//! callers can pass extra fields without breaking the build.

use serde::Deserialize;
use swc_core::common::{DUMMY_SP, Mark, SyntaxContext};
use swc_core::ecma::ast::{Expr, Ident};

use crate::error::ConfigError;
use crate::parse::parse_expr;

const DEFAULT_TEMPLATE: &str = "String.raw";

/// Raw configuration as written by the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Expression naming the tag function. `null` requests untagged output,
    /// which only works for fully static markup.
    #[serde(default = "default_template")]
    pub template: Option<String>,
    /// Module to import `template` from. When absent the tag must already be
    /// in scope.
    #[serde(default)]
    pub import_source: Option<String>,
    /// Marker key for attribute spread holes.
    #[serde(default = "default_spread")]
    pub spread: String,
    /// Marker key for interpolated child holes.
    #[serde(default = "default_child")]
    pub child: String,
    /// Marker key for spread children holes.
    #[serde(default = "default_children")]
    pub children: String,
    /// How literal text children are normalised.
    #[serde(default)]
    pub whitespace: Whitespace,
}

fn default_template() -> Option<String> {
    Some(DEFAULT_TEMPLATE.to_string())
}

fn default_spread() -> String {
    "$$spread".to_string()
}

fn default_child() -> String {
    "$$child".to_string()
}

fn default_children() -> String {
    "$$children".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template: default_template(),
            import_source: None,
            spread: default_spread(),
            child: default_child(),
            children: default_children(),
            whitespace: Whitespace::default(),
        }
    }
}

/// Whitespace policy for JSX text children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Whitespace {
    /// Trim leading and trailing whitespace of every text child.
    #[default]
    Trim,
    /// Standard JSX rule: trim each line, drop blank lines, join with a space.
    Collapse,
    /// Keep text exactly as written.
    Preserve,
}

impl Whitespace {
    /// Applies the policy to a text child. Returns an empty string when the
    /// text contributes nothing.
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Trim => text.trim_matches(is_jsx_whitespace).to_string(),
            Self::Preserve => text.to_string(),
            Self::Collapse => collapse_jsx_whitespace(text),
        }
    }
}

/// Whitespace as JSX sees it. Other Unicode spaces, `&nbsp;` among them,
/// are content.
fn is_jsx_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// JSX text semantics: whitespace that contains a line break is removed,
/// whitespace within a line is kept.
fn collapse_jsx_whitespace(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let last = lines.len() - 1;
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let line = line.trim_end_matches('\r');
        let mut trimmed = line;
        if i != 0 {
            trimmed = trimmed.trim_start_matches(is_jsx_whitespace);
        }
        if i != last {
            trimmed = trimmed.trim_end_matches(is_jsx_whitespace);
        }
        if trimmed.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(trimmed);
    }
    out
}

/// Marker key names used to tag hole payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub spread: String,
    pub child: String,
    pub children: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            spread: default_spread(),
            child: default_child(),
            children: default_children(),
        }
    }
}

/// The template function import to inject into transformed modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateImport {
    /// Exported name in `source`.
    pub imported: String,
    /// Local binding the tag is referenced through.
    pub local: String,
    /// Module specifier.
    pub source: String,
}

/// Configuration after validation, ready for the engine.
#[derive(Debug, Clone)]
pub struct Options {
    /// The tag expression, or `None` for untagged output.
    pub template: Option<Box<Expr>>,
    pub import: Option<TemplateImport>,
    pub markers: Markers,
    pub whitespace: Whitespace,
}

impl Default for Options {
    fn default() -> Self {
        // `String.raw` is a valid expression, so this cannot fail.
        Config::default()
            .resolve()
            .unwrap_or_else(|_| Options {
                template: None,
                import: None,
                markers: Markers::default(),
                whitespace: Whitespace::default(),
            })
    }
}

impl Options {
    /// Resolves the default tag against the host's unresolved mark, so it
    /// refers to the global and not to a local binding of the same name.
    /// Imported tags are left alone; they get their own mark per module.
    pub fn mark_tag_unresolved(&mut self, unresolved_mark: Mark) {
        if self.import.is_none() {
            self.set_tag_ctxt(SyntaxContext::empty().apply_mark(unresolved_mark));
        }
    }

    /// Sets the context of the identifier the tag expression starts with.
    pub(crate) fn set_tag_ctxt(&mut self, ctxt: SyntaxContext) {
        if let Some(ident) = self.template.as_deref_mut().and_then(root_ident_mut) {
            ident.ctxt = ctxt;
        }
    }
}

/// `a` in `a`, `a.b.c` and `(a).b`.
fn root_ident_mut(expr: &mut Expr) -> Option<&mut Ident> {
    match expr {
        Expr::Ident(ident) => Some(ident),
        Expr::Member(member) => root_ident_mut(&mut member.obj),
        Expr::Paren(paren) => root_ident_mut(&mut paren.expr),
        _ => None,
    }
}

impl Config {
    /// Reads a configuration from its JSON text. An empty string yields the
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the configuration and parses the template expression.
    pub fn resolve(self) -> Result<Options, ConfigError> {
        for (option, key) in [
            ("spread", &self.spread),
            ("child", &self.child),
            ("children", &self.children),
        ] {
            if key.is_empty() {
                return Err(ConfigError::EmptyMarkerKey { option });
            }
        }

        let mut template = match &self.template {
            Some(source) => Some(parse_expr(source).map_err(|message| ConfigError::InvalidTemplate {
                source_text: source.clone(),
                message,
            })?),
            None => None,
        };

        let import = match (&self.import_source, &mut template) {
            (Some(source), Some(tag)) => {
                let Expr::Ident(ident) = tag.unwrap_parens() else {
                    return Err(ConfigError::TemplateNotIdent {
                        found: self.template.clone().unwrap_or_default(),
                    });
                };
                let imported = ident.sym.to_string();
                let local = format!("_{imported}");
                *tag = Box::new(Expr::Ident(Ident::new(
                    local.as_str().into(),
                    DUMMY_SP,
                    SyntaxContext::empty(),
                )));
                Some(TemplateImport {
                    imported,
                    local,
                    source: source.clone(),
                })
            }
            (Some(_), None) => {
                return Err(ConfigError::TemplateNotIdent {
                    found: "null".to_string(),
                });
            }
            (None, _) => None,
        };

        Ok(Options {
            template,
            import,
            markers: Markers {
                spread: self.spread,
                child: self.child,
                children: self.children,
            },
            whitespace: self.whitespace,
        })
    }
}
