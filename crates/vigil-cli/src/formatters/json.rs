use crate::formatters::{Formatter, Summary};
use anyhow::Result;
use serde::Serialize;
use vigil_core::{Finding, Report};

pub struct JsonFormatter;

const SCHEMA_VERSION: &str = "vigil-v1";

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(rename = "schemaVersion")]
    schema_version: &'a str,
    summary: &'a Summary,
    findings: &'a [Finding],
}

impl Formatter for JsonFormatter {
    fn print(&self, report: &Report, summary: &Summary) -> Result<()> {
        let json = serde_json::to_string_pretty(&JsonReport {
            schema_version: SCHEMA_VERSION,
            summary,
            findings: &report.findings,
        })?;
        println!("{}", json);
        Ok(())
    }
}
