//! Literal runs and holes.
//!
//! The compiler produces a flat sequence of [`RunSegment`]s per top-level
//! markup expression. [`merge`] collapses adjacent text so the result has
//! exactly one literal segment around every hole, which is the shape a
//! template literal needs.

mod emit;
mod escape;

pub use emit::{EmittedNode, emit};

use swc_core::ecma::ast::Expr;

/// Which marker key a hole is wrapped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleKind {
    /// An interpolated child, `{expr}`.
    Child,
    /// A spread child, `{...expr}`.
    ChildrenSpread,
    /// The dynamic tail of an element's attributes.
    AttributeSpread,
}

/// A value only known at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Hole {
    pub kind: HoleKind,
    pub expr: Box<Expr>,
}

impl Hole {
    pub fn new(kind: HoleKind, expr: Box<Expr>) -> Self {
        Self { kind, expr }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunSegment {
    /// Already serialized and markup-escaped text.
    Text(String),
    Hole(Hole),
}

/// Text and holes in alternation. `segments.len() == holes.len() + 1`
/// always holds; segments may be empty strings.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRun {
    pub segments: Vec<String>,
    pub holes: Vec<Hole>,
}

impl MergedRun {
    pub fn is_static(&self) -> bool {
        self.holes.is_empty()
    }
}

/// Concatenates adjacent text and keeps holes in source order.
pub fn merge(parts: impl IntoIterator<Item = RunSegment>) -> MergedRun {
    let mut segments = vec![String::new()];
    let mut holes = Vec::new();
    for part in parts {
        match part {
            RunSegment::Text(text) => {
                if let Some(last) = segments.last_mut() {
                    last.push_str(&text);
                }
            }
            RunSegment::Hole(hole) => {
                holes.push(hole);
                segments.push(String::new());
            }
        }
    }
    MergedRun { segments, holes }
}
