use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use vigil_core::{Report, Severity};

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

#[derive(Serialize)]
pub struct Summary {
    pub checks_run: usize,
    pub findings_count: usize,
    pub severity_counts: HashMap<Severity, usize>,
    pub duration_ms: u128,
}

impl Summary {
    pub fn new(checks_run: usize, report: &Report, duration: std::time::Duration) -> Self {
        Self {
            checks_run,
            findings_count: report.findings.len(),
            severity_counts: report.severity_counts(),
            duration_ms: duration.as_millis(),
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.severity_counts.get(&severity).copied().unwrap_or(0)
    }
}

pub trait Formatter {
    fn print(&self, report: &Report, summary: &Summary) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Format {
    Text,
    Json,
}

impl From<&str> for Format {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Format::Json,
            _ => Format::Text,
        }
    }
}
