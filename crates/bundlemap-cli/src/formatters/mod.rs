//! Output formatters for bundlemap results.

pub mod human;
pub mod json;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

use anyhow::Result;
use bundlemap_core::TargetReport;
use serde::Serialize;

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// A specifier paired with the package it resolves to (`""` for none).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecifierResult {
    pub specifier: String,
    pub package: String,
}

/// Trait for rendering command results
pub trait Formatter {
    /// Render resolved specifiers
    fn format_specifiers(&self, results: &[SpecifierResult]) -> Result<String>;

    /// Render per-target size reports
    fn format_reports(&self, reports: &[TargetReport]) -> Result<String>;
}

/// Formatter for the requested output format.
pub fn formatter_for(format: OutputFormat, pretty: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter),
        OutputFormat::Json => Box::new(JsonFormatter { pretty }),
    }
}
