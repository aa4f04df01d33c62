//! Human-readable formatter.

use super::{Formatter, SpecifierResult};
use anyhow::Result;
use bundlemap_core::{format_bytes, Group, TargetReport};
use colored::Colorize;
use std::fmt::Write;

pub struct HumanFormatter;

impl Formatter for HumanFormatter {
    fn format_specifiers(&self, results: &[SpecifierResult]) -> Result<String> {
        let mut out = String::new();
        for result in results {
            if result.package.is_empty() {
                writeln!(out, "{} -> {}", result.specifier, "(no package)".dimmed())?;
            } else {
                writeln!(out, "{} -> {}", result.specifier, result.package.green())?;
            }
        }
        Ok(out)
    }

    fn format_reports(&self, reports: &[TargetReport]) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "\nBundle Size Report")?;
        writeln!(out, "==================")?;

        for report in reports {
            writeln!(
                out,
                "\n{} {} ({} bundle{}, {})",
                "Target:".bold(),
                report.target.cyan(),
                report.groups.len(),
                if report.groups.len() == 1 { "" } else { "s" },
                format_bytes(report.total_weight())
            )?;

            for bundle in &report.groups {
                write_group(&mut out, bundle, 1)?;
            }
        }

        Ok(out)
    }
}

fn write_group(out: &mut String, group: &Group, depth: usize) -> std::fmt::Result {
    let indent = "  ".repeat(depth);
    let size = format_bytes(group.weight);

    if group.is_leaf() {
        writeln!(out, "{indent}{}  {}", group.label, size.dimmed())?;
    } else {
        writeln!(out, "{indent}{}  {}", group.label.bold(), size.dimmed())?;
        for child in &group.children {
            write_group(out, child, depth + 1)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_tree_is_indented() {
        colored::control::set_override(false);

        let reports = vec![TargetReport {
            target: "browser".to_string(),
            groups: vec![Group::with_weight(
                "index.js",
                2048,
                vec![Group::directory(
                    "src",
                    vec![Group::leaf("a.js", 100), Group::leaf("b.js", 20)],
                )],
            )],
        }];

        let text = HumanFormatter.format_reports(&reports).unwrap();
        assert!(text.contains("Target: browser (1 bundle, 2.0 KB)"));
        assert!(text.contains("\n  index.js  2.0 KB\n"));
        assert!(text.contains("\n    src  120 bytes\n"));
        assert!(text.contains("\n      a.js  100 bytes\n"));
    }

    #[test]
    fn test_specifiers_mark_missing_packages() {
        colored::control::set_override(false);

        let results = vec![
            SpecifierResult {
                specifier: "react/jsx-runtime".to_string(),
                package: "react".to_string(),
            },
            SpecifierResult {
                specifier: "./App.js".to_string(),
                package: String::new(),
            },
        ];

        let text = HumanFormatter.format_specifiers(&results).unwrap();
        assert_eq!(text, "react/jsx-runtime -> react\n./App.js -> (no package)\n");
    }
}
