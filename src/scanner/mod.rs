//! Source scanning
//!
//! A [`Scanner`] turns source text into a flat list of named scopes with
//! source spans. [`build_tree`] inserts them into a [`ScopeTree`]; nesting is
//! the tree's job, so scanners may report scopes in any order.

mod cpp;
mod languages;

pub use cpp::CppScanner;
pub use languages::LanguageId;

use std::fmt;

use crate::error::ScopeError;
use crate::span::Span;
use crate::tree::ScopeTree;

/// A scope reported by a scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedScope {
    pub span: Span,
    pub name: String,
}

impl ScannedScope {
    pub fn new(span: Span, name: impl Into<String>) -> Self {
        Self {
            span,
            name: name.into(),
        }
    }
}

/// Produces the scopes of a source document
pub trait Scanner {
    fn scan(&mut self, source: &str) -> Result<Vec<ScannedScope>, ParseError>;
}

/// Errors from scanning a document or building its scope tree
#[derive(Debug)]
pub enum ParseError {
    /// No scanner exists for the language
    UnsupportedLanguage(String),
    /// The grammar could not be loaded or produced no parse tree
    Grammar(String),
    /// A scanned scope was rejected by the tree
    Scope { line: usize, error: ScopeError },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnsupportedLanguage(name) => {
                write!(f, "No scope scanner for language: {}", name)
            }
            ParseError::Grammar(msg) => write!(f, "Grammar error: {}", msg),
            ParseError::Scope { line, error } => {
                write!(f, "Parse error (line {}): {}", line, error)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Scope { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Create the scanner registered for `language`
pub fn scanner_for(language: LanguageId) -> Result<Box<dyn Scanner>, ParseError> {
    match language {
        LanguageId::C | LanguageId::Cpp => Ok(Box::new(CppScanner::new(language)?)),
        LanguageId::PlainText => Err(ParseError::UnsupportedLanguage(
            language.display_name().to_string(),
        )),
    }
}

/// Scan `source` and build its scope tree
pub fn parse(source: &str, language: LanguageId) -> Result<ScopeTree, ParseError> {
    let mut scanner = scanner_for(language)?;
    let scopes = scanner.scan(source)?;
    build_tree(source, scopes)
}

/// Insert scanned scopes into a new tree spanning `source`.
///
/// Stops at the first rejected scope.
pub fn build_tree(
    source: &str,
    scopes: impl IntoIterator<Item = ScannedScope>,
) -> Result<ScopeTree, ParseError> {
    let mut tree = ScopeTree::new(source.len());
    for scope in scopes {
        tracing::debug!("Inserting scope {} {}", scope.name, scope.span);
        let begin = scope.span.begin();
        tree.insert(scope.span, scope.name)
            .map_err(|error| ParseError::Scope {
                line: line_of(source, begin),
                error,
            })?;
    }
    Ok(tree)
}

/// 1-based line number of byte `offset`
fn line_of(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
