//! C and C++ scope scanning with tree-sitter
//!
//! Walks the parse tree collecting namespaces, classes, structs, unions and
//! enums that have a body, function definitions, and function prototypes.

use tree_sitter::{Node, Parser};

use super::{LanguageId, ParseError, ScannedScope, Scanner};
use crate::span::Span;

/// Scanner for C and C++ sources
pub struct CppScanner {
    parser: Parser,
    language: LanguageId,
}

impl CppScanner {
    pub fn new(language: LanguageId) -> Result<Self, ParseError> {
        let ts_lang: tree_sitter::Language = match language {
            LanguageId::C => tree_sitter_c::LANGUAGE.into(),
            LanguageId::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            other => {
                return Err(ParseError::UnsupportedLanguage(
                    other.display_name().to_string(),
                ))
            }
        };

        let mut parser = Parser::new();
        parser
            .set_language(&ts_lang)
            .map_err(|e| ParseError::Grammar(e.to_string()))?;

        Ok(Self { parser, language })
    }
}

impl Scanner for CppScanner {
    fn scan(&mut self, source: &str) -> Result<Vec<ScannedScope>, ParseError> {
        let tree = self.parser.parse(source, None).ok_or_else(|| {
            ParseError::Grammar(format!(
                "{} parser produced no tree",
                self.language.display_name()
            ))
        })?;

        let root = tree.root_node();
        if root.has_error() {
            tracing::warn!(
                "{} source has syntax errors, outline may be incomplete",
                self.language.display_name()
            );
        }

        let mut scopes = Vec::new();
        collect_scopes(root, source, self.language, &mut scopes);
        tracing::debug!("Scanned {} scope(s)", scopes.len());
        Ok(scopes)
    }
}

fn child_by_field<'a>(node: &Node<'a>, field: &str) -> Option<Node<'a>> {
    node.child_by_field_name(field)
}

fn node_span(node: &Node) -> Span {
    Span::from(node.byte_range())
}

/// Span of a type specifier, taking in the `;` that closes it if it follows
/// immediately
fn specifier_span(node: &Node, source: &str) -> Span {
    let span = node_span(node);
    if source.as_bytes().get(span.end()) == Some(&b';') {
        Span::new(span.begin(), span.end() + 1)
    } else {
        span
    }
}

fn collect_scopes(node: Node, source: &str, language: LanguageId, scopes: &mut Vec<ScannedScope>) {
    let has_body = || child_by_field(&node, "body").is_some();

    let span = match node.kind() {
        "namespace_definition" | "class_specifier" if language == LanguageId::Cpp && has_body() => {
            Some(specifier_span(&node, source))
        }
        "struct_specifier" | "union_specifier" | "enum_specifier" if has_body() => {
            Some(specifier_span(&node, source))
        }
        "function_definition" => Some(node_span(&node)),
        "declaration" | "field_declaration" if declares_function(&node) => Some(node_span(&node)),
        _ => None,
    };

    if let Some(span) = span {
        scopes.push(ScannedScope {
            span,
            name: scope_name(source, span),
        });
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_scopes(child, source, language, scopes);
    }
}

/// Whether a declaration's declarator, looking through pointers and
/// references, is a function declarator
fn declares_function(node: &Node) -> bool {
    let mut current = child_by_field(node, "declarator");
    while let Some(declarator) = current {
        match declarator.kind() {
            "function_declarator" => return true,
            "pointer_declarator" | "reference_declarator" => {
                current = child_by_field(&declarator, "declarator").or_else(|| {
                    let mut cursor = declarator.walk();
                    let last = declarator.named_children(&mut cursor).last();
                    last
                });
            }
            _ => return false,
        }
    }
    false
}

/// Outline label for a scope: its source text up to the first `;` (kept),
/// `{` or lone `:`. Multi-line headers keep their line breaks, each marked
/// with a trailing ` \`.
pub(crate) fn scope_name(source: &str, span: Span) -> String {
    let text = source.get(span.begin()..span.end()).unwrap_or("");
    let bytes = text.as_bytes();

    let mut end = text.len();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b';' => {
                end = i + 1;
                break;
            }
            b'{' => {
                end = i;
                break;
            }
            b':' if bytes.get(i + 1) == Some(&b':') => {
                i += 2;
                continue;
            }
            b':' => {
                end = i;
                break;
            }
            _ => {}
        }
        i += 1;
    }

    text[..end]
        .trim()
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" \\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(text: &str) -> String {
        scope_name(text, Span::new(0, text.len()))
    }

    fn scan(language: LanguageId, source: &str) -> Vec<(String, Span)> {
        let mut scanner = CppScanner::new(language).unwrap();
        scanner
            .scan(source)
            .unwrap()
            .into_iter()
            .map(|s| (s.name, s.span))
            .collect()
    }

    #[test]
    fn test_name_stops_before_body() {
        assert_eq!(name_of("int main() {\n  return 0;\n}"), "int main()");
        assert_eq!(name_of("namespace geo {\n}"), "namespace geo");
    }

    #[test]
    fn test_name_keeps_prototype_semicolon() {
        assert_eq!(name_of("int norm() const;"), "int norm() const;");
    }

    #[test]
    fn test_name_stops_at_initializer_list_but_not_scope_operator() {
        assert_eq!(name_of("Point(int x) : x_(x) {}"), "Point(int x)");
        assert_eq!(
            name_of("int Point::norm() const {\n}"),
            "int Point::norm() const"
        );
        assert_eq!(name_of("class Derived : public Base {}"), "class Derived");
    }

    #[test]
    fn test_name_marks_line_breaks() {
        assert_eq!(
            name_of("static int\nadd(int a,\n    int b)   \n\n{\n}"),
            "static int \\\nadd(int a, \\\n    int b)"
        );
    }

    #[test]
    fn test_scan_c_functions_and_structs() {
        let source = "struct point {\n    int x;\n};\n\nint add(int a, int b);\n\nint add(int a, int b) {\n    return a + b;\n}\n";
        let scopes = scan(LanguageId::C, source);

        let names: Vec<&str> = scopes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["struct point", "int add(int a, int b);", "int add(int a, int b)"]
        );
        // The struct's closing semicolon belongs to its scope
        assert_eq!(scopes[0].1, Span::new(0, 28));
    }

    #[test]
    fn test_scan_skips_forward_declarations_and_variables() {
        let source = "struct opaque;\nint counter;\nint *make(void);\n";
        let scopes = scan(LanguageId::C, source);

        let names: Vec<&str> = scopes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["int *make(void);"]);
    }

    #[test]
    fn test_scan_cpp_class_members() {
        let source = "class Point {\npublic:\n    int norm() const;\n    int x() const { return x_; }\nprivate:\n    int x_;\n};\n";
        let scopes = scan(LanguageId::Cpp, source);

        let names: Vec<&str> = scopes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["class Point", "int norm() const;", "int x() const"]);
    }

    #[test]
    fn test_plain_text_has_no_scanner() {
        assert!(matches!(
            CppScanner::new(LanguageId::PlainText),
            Err(ParseError::UnsupportedLanguage(_))
        ));
    }
}
