use crate::formatters::{Formatter, Summary};
use crate::output::formatter::print_finding;
use anyhow::Result;
use colored::Colorize;
use vigil_core::{Report, Severity};

/// Sequential findings in execution order, then a priority summary with
/// CRITICAL items first.
pub struct TextFormatter {
    pub quiet: bool,
}

impl Formatter for TextFormatter {
    fn print(&self, report: &Report, summary: &Summary) -> Result<()> {
        if !self.quiet {
            for finding in &report.findings {
                print_finding(finding);
            }
            println!();
        }

        println!("{}", "Priority summary".bold());
        println!("{}", "----------------".dimmed());

        let critical = summary.count(Severity::Critical);
        if critical > 0 {
            println!("{} ({critical}) fix immediately:", "CRITICAL".red().bold());
            for finding in report.of_severity(Severity::Critical) {
                println!("  - [{}] {}", finding.check.cyan(), finding.message);
            }
        }

        let warn = summary.count(Severity::Warn);
        if warn > 0 {
            println!("{} ({warn}) review:", "WARN".yellow().bold());
            for finding in report.of_severity(Severity::Warn) {
                println!("  - [{}] {}", finding.check.cyan(), finding.message);
            }
        }

        let ok = summary.count(Severity::Ok);
        println!("{} ({ok}) no action needed.", "OK".green());

        println!(
            "\n{} finding(s) from {} check(s) in {} ms",
            summary.findings_count, summary.checks_run, summary.duration_ms
        );

        Ok(())
    }
}
