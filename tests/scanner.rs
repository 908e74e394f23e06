//! Scanning real C and C++ sources into scope trees

mod common;

use common::sample;
use scope_tree::scanner::{self, build_tree, ScannedScope, Scanner};
use scope_tree::{LanguageId, OutlineView, ParseError, ScopeError, Span};

#[test]
fn test_cpp_sample_outline() {
    let source = sample("scopes.cpp");
    let mut tree = scanner::parse(&source, LanguageId::Cpp).unwrap();

    assert_eq!(
        tree.render(),
        "namespace geo\n    class Point\n        Point(int x, int y)\n        int norm() const;\n    int Point::norm() const\nint main()\n"
    );
}

#[test]
fn test_c_sample_outline() {
    let source = sample("shapes.c");
    let mut tree = scanner::parse(&source, LanguageId::C).unwrap();

    assert_eq!(
        tree.render(),
        "struct shape\n    union\n        struct\nenum kind\ndouble area(const struct shape *s, enum kind k);\ndouble area(const struct shape *s, enum kind k)\n"
    );
}

#[test]
fn test_source_spans_cover_scope_text() {
    let source = sample("scopes.cpp");
    let tree = scanner::parse(&source, LanguageId::Cpp).unwrap();

    let class = tree.iter().find(|s| s.name() == "class Point").unwrap();
    let span = class.source_span();
    let text = &source[span.begin()..span.end()];
    assert!(text.starts_with("class Point {"));
    assert!(text.ends_with("};"));
    assert_eq!(tree.document_length(), source.len());
}

#[test]
fn test_fold_class_in_sample() {
    let source = sample("scopes.cpp");
    let tree = scanner::parse(&source, LanguageId::Cpp).unwrap();
    let mut view = OutlineView::new(tree);

    let class_line = view.text().find("    class Point").unwrap();
    assert!(view.toggle_at(class_line).unwrap());
    assert_eq!(
        view.visible_text(),
        "namespace geo\n    class Point…\n    int Point::norm() const\nint main()\n"
    );
}

/// Scanner returning canned scopes
struct Canned(Vec<ScannedScope>);

impl Scanner for Canned {
    fn scan(&mut self, _source: &str) -> Result<Vec<ScannedScope>, ParseError> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_conflicting_scanner_output_reports_line() {
    let source = "void f() {\n}\nvoid g() {\n}\n";
    let mut scanner = Canned(vec![
        ScannedScope::new(Span::new(0, 12), "void f()"),
        ScannedScope::new(Span::new(11, 25), "void g()"),
    ]);

    let err = build_tree(source, scanner.scan(source).unwrap()).unwrap_err();
    match err {
        ParseError::Scope { line, error } => {
            assert_eq!(line, 2);
            assert!(matches!(error, ScopeError::Intersect { .. }));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_plain_text_has_no_scanner() {
    assert!(matches!(
        scanner::scanner_for(LanguageId::PlainText),
        Err(ParseError::UnsupportedLanguage(_))
    ));
}
