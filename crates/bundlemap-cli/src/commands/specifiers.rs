//! `bundlemap specifiers`: resolve import specifiers to package identifiers.

use crate::formatters::{formatter_for, OutputFormat, SpecifierResult};
use anyhow::{bail, Context, Result};
use bundlemap_core::SpecifierParser;
use std::io::{self, BufRead};

/// Options for the specifiers command.
pub struct SpecifiersRunOptions {
    pub specifiers: Vec<String>,
    pub stdin: bool,
    pub format: OutputFormat,
    pub pretty: bool,
}

/// Pairs each specifier with its package identifier, preserving order.
pub fn resolve_specifiers(specifiers: Vec<String>) -> Vec<SpecifierResult> {
    let packages = SpecifierParser::parse_all(&specifiers);
    specifiers
        .into_iter()
        .zip(packages)
        .map(|(specifier, package)| SpecifierResult { specifier, package })
        .collect()
}

/// Runs the specifiers command.
pub fn run_specifiers(options: SpecifiersRunOptions) -> Result<()> {
    let mut specifiers = options.specifiers;

    if options.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read specifiers from stdin")?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                specifiers.push(trimmed.to_string());
            }
        }
    }

    if specifiers.is_empty() {
        bail!("No specifiers given. Pass them as arguments or use --stdin.");
    }

    let results = resolve_specifiers(specifiers);
    let unresolved = results.iter().filter(|r| r.package.is_empty()).count();
    tracing::info!(total = results.len(), unresolved, "resolved specifiers");

    let output = formatter_for(options.format, options.pretty).format_specifiers(&results)?;
    print!("{}", output);
    if options.format == OutputFormat::Json {
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_specifiers_keeps_order() {
        let results = resolve_specifiers(vec![
            "@babel/core/lib/index.js".to_string(),
            "../util.js".to_string(),
        ]);

        assert_eq!(results[0].specifier, "@babel/core/lib/index.js");
        assert_eq!(results[0].package, "@babel/core");
        assert_eq!(results[1].package, "");
    }

    #[test]
    fn test_no_specifiers_is_an_error() {
        let result = run_specifiers(SpecifiersRunOptions {
            specifiers: Vec::new(),
            stdin: false,
            format: OutputFormat::Human,
            pretty: true,
        });
        assert!(result.is_err());
    }
}
