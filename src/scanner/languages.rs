//! Language identification and detection
//!
//! Maps file extensions and names to the languages a scanner exists for.

use std::path::Path;

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageId {
    #[default]
    PlainText,
    C,
    Cpp,
}

impl LanguageId {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "c" => LanguageId::C,
            // Headers are parsed as C++, which accepts nearly all C headers
            "h" | "hh" | "hpp" | "hxx" | "cpp" | "cc" | "cxx" => LanguageId::Cpp,
            _ => LanguageId::PlainText,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(LanguageId::PlainText)
    }

    /// Look up a language by the name used on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "c" => Some(LanguageId::C),
            "cpp" | "c++" | "cxx" => Some(LanguageId::Cpp),
            "text" | "plain" | "plaintext" => Some(LanguageId::PlainText),
            _ => None,
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "Plain Text",
            LanguageId::C => "C",
            LanguageId::Cpp => "C++",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(LanguageId::from_extension("c"), LanguageId::C);
        assert_eq!(LanguageId::from_extension("C"), LanguageId::C);
        assert_eq!(LanguageId::from_extension("h"), LanguageId::Cpp);
        assert_eq!(LanguageId::from_extension("hpp"), LanguageId::Cpp);
        assert_eq!(LanguageId::from_extension("cc"), LanguageId::Cpp);
        assert_eq!(LanguageId::from_extension("rs"), LanguageId::PlainText);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            LanguageId::from_path(Path::new("/tmp/widget.cpp")),
            LanguageId::Cpp
        );
        assert_eq!(LanguageId::from_path(Path::new("main.c")), LanguageId::C);
        assert_eq!(
            LanguageId::from_path(Path::new("Makefile")),
            LanguageId::PlainText
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(LanguageId::from_name("C++"), Some(LanguageId::Cpp));
        assert_eq!(LanguageId::from_name("c"), Some(LanguageId::C));
        assert_eq!(LanguageId::from_name("cobol"), None);
    }
}
