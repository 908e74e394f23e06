//! Scope tree - nested source scopes rendered as a foldable outline
//!
//! This crate builds a tree of named, nested scopes from a source document
//! (as reported by a scanner), renders it as an indented outline, and maps
//! positions in that outline back to scopes for folding.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod fold;
pub mod outline;
pub mod scanner;
pub mod span;
pub mod tracing;
pub mod tree;

// Re-export commonly used types
pub use config::OutlineConfig;
pub use error::{RenderError, ScopeError, ScopeLabel};
pub use fold::{FoldCommand, FoldRegion, SelectionSink};
pub use outline::OutlineView;
pub use scanner::{LanguageId, ParseError};
pub use span::Span;
pub use tree::{NodeId, ScopeRef, ScopeTree};
