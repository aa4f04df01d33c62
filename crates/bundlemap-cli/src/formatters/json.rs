//! JSON formatter.

use super::{Formatter, SpecifierResult};
use anyhow::Result;
use bundlemap_core::TargetReport;
use serde::Serialize;

pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl Formatter for JsonFormatter {
    fn format_specifiers(&self, results: &[SpecifierResult]) -> Result<String> {
        self.render(results)
    }

    fn format_reports(&self, reports: &[TargetReport]) -> Result<String> {
        self.render(reports)
    }
}
