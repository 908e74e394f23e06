//! Errors raised by scope tree operations
//!
//! Insertion errors describe malformed or conflicting scanner output and carry
//! both scopes involved. Render errors are contract violations by the caller:
//! a display-space query made while display spans are stale.

use std::fmt;

use crate::span::Span;

/// Name and source span of a scope, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeLabel {
    pub name: String,
    pub span: Span,
}

impl ScopeLabel {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

impl fmt::Display for ScopeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.span)
    }
}

/// Errors that can occur when inserting a scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// The inserted scope overlaps an existing one without either containing the other
    Intersect {
        existing: ScopeLabel,
        inserted: ScopeLabel,
    },
    /// The child scope does not fit inside the parent it was placed under
    Nesting {
        parent: ScopeLabel,
        child: ScopeLabel,
    },
    /// The inserted scope has exactly the same source span as an existing one
    Duplicate {
        existing: ScopeLabel,
        inserted: ScopeLabel,
    },
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intersect { existing, inserted } => {
                write!(f, "scope {} intersects scope {}", inserted, existing)
            }
            Self::Nesting { parent, child } => write!(
                f,
                "parent scope {} does not contain child scope {}",
                parent, child
            ),
            Self::Duplicate { existing, inserted } => {
                write!(f, "scope {} duplicates scope {}", inserted, existing)
            }
        }
    }
}

impl std::error::Error for ScopeError {}

/// Display spans were requested while they are not valid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// The tree has never been rendered
    NotRendered,
    /// The tree was modified after the last render
    Dirty,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRendered => write!(f, "display spans requested before the first render"),
            Self::Dirty => write!(f, "display spans requested after an insert without re-rendering"),
        }
    }
}

impl std::error::Error for RenderError {}
