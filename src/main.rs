//! scope-tree: print the scope outline of a C or C++ source file
//!
//! Usage:
//!   scope-tree src/shapes.cpp
//!   scope-tree src/shapes.cpp --fold 0 --indent-width 2
//!   scope-tree include/api.h --format json

use anyhow::{Context, Result};
use clap::Parser;

use scope_tree::cli::{CliArgs, OutputFormat};
use scope_tree::config::OutlineConfig;
use scope_tree::outline::OutlineView;
use scope_tree::scanner;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let (config, config_error) = match OutlineConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (OutlineConfig::default(), Some(e)),
    };
    let _log_guard = scope_tree::tracing::init(&config);
    if let Some(e) = config_error {
        tracing::warn!("{}; using defaults", e);
    }

    let run = args
        .into_config(&config)
        .map_err(|e| anyhow::anyhow!("Invalid arguments: {}", e))?;

    let source = std::fs::read_to_string(&run.file)
        .with_context(|| format!("reading {}", run.file.display()))?;
    let mut tree = scanner::parse(&source, run.language)
        .with_context(|| format!("parsing {}", run.file.display()))?;
    tree.set_indent_width(run.indent_width);
    tracing::info!(
        "Parsed {} scope(s) from {} as {}",
        tree.size(),
        run.file.display(),
        run.language.display_name()
    );

    let mut view = OutlineView::new(tree);
    for &offset in &run.folds {
        if !view.toggle_at(offset)? {
            tracing::warn!("Nothing to fold at outline offset {}", offset);
        }
    }

    match run.format {
        OutputFormat::Text => print!("{}", view.visible_text()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&view.snapshot())
                .context("serializing outline")?;
            println!("{}", json);
        }
    }

    Ok(())
}
