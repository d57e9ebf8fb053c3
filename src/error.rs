//! Error types for the transform.
//!
//! Ambiguity is never an error: anything the evaluator cannot fold degrades to
//! a runtime hole. The only failure native to the engine is a markup
//! expression that needs holes while no template function is configured.
//! Everything else here is a configuration problem detected up front.

use swc_core::common::Span;
use thiserror::Error;

/// Result alias used throughout the engine.
pub type TransformResult<T> = Result<T, TransformError>;

/// A fatal condition at a specific markup expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[static-jsx] {kind}")]
pub struct TransformError {
    /// The kind of error.
    pub kind: TransformErrorKind,
    /// Span of the top-level markup expression that could not be emitted.
    pub span: Span,
}

impl TransformError {
    pub fn new(kind: TransformErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Help text shown under the diagnostic.
    pub fn help(&self) -> &'static str {
        self.kind.help()
    }
}

/// The kind of transform error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransformErrorKind {
    /// The element has dynamic parts but `template` is `null`.
    #[error("markup has {holes} dynamic part(s) but no template function is configured")]
    MissingTemplate { holes: usize },
}

impl TransformErrorKind {
    pub fn help(&self) -> &'static str {
        match self {
            Self::MissingTemplate { .. } => {
                "set `template` to a tag function, or make every attribute and child static"
            }
        }
    }
}

/// Problems with the plugin configuration itself.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse `template` as an expression: `{source_text}`: {message}")]
    InvalidTemplate { source_text: String, message: String },

    #[error("`template` must be an identifier when `importSource` is set, found `{found}`")]
    TemplateNotIdent { found: String },

    #[error("marker key must not be empty (option `{option}`)")]
    EmptyMarkerKey { option: &'static str },

    #[error("invalid plugin configuration: {0}")]
    Json(#[from] serde_json::Error),
}
