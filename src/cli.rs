//! Command-line argument parsing
//!
//! Supports:
//! - Language override for files without a recognised extension
//! - Indent width override for the rendered outline
//! - Folding scopes at outline offsets before printing
//! - Text or JSON output

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::OutlineConfig;
use crate::scanner::LanguageId;

/// Print the nested scopes of a C or C++ source file as an indented outline
#[derive(Parser, Debug)]
#[command(
    name = "scope-tree",
    version,
    about = "Print the nested scopes of a C or C++ source file as an indented outline"
)]
pub struct CliArgs {
    /// Source file to outline
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Source language (c or cpp); detected from the file extension by default
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<String>,

    /// Spaces per nesting level (overrides the config file)
    #[arg(long, value_name = "N")]
    pub indent_width: Option<usize>,

    /// Fold the scope under this outline offset; may be repeated
    #[arg(long = "fold", value_name = "OFFSET")]
    pub folds: Vec<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// The outline text, with folded scopes collapsed to a marker
    #[default]
    Text,
    /// The nested scopes with source and display spans
    Json,
}

/// Configuration derived from CLI arguments and the config file
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub file: PathBuf,
    pub language: LanguageId,
    pub indent_width: usize,
    /// Outline offsets to toggle, in order
    pub folds: Vec<usize>,
    pub format: OutputFormat,
}

impl CliArgs {
    /// Resolve parsed CLI args against the loaded config
    pub fn into_config(self, config: &OutlineConfig) -> Result<RunConfig, String> {
        let language = match &self.language {
            Some(name) => {
                LanguageId::from_name(name).ok_or_else(|| format!("Unknown language: {}", name))?
            }
            None => LanguageId::from_path(&self.file),
        };

        if language == LanguageId::PlainText {
            return Err(format!(
                "No C or C++ source detected for {} (use --language)",
                self.file.display()
            ));
        }

        Ok(RunConfig {
            file: self.file,
            language,
            indent_width: self.indent_width.unwrap_or(config.indent_width),
            folds: self.folds,
            format: self.format,
        })
    }
}
