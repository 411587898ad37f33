use colored::{ColoredString, Colorize};
use vigil_core::{Finding, Severity};

pub fn severity_tag(severity: Severity) -> ColoredString {
    match severity {
        Severity::Ok => " OK ".green(),
        Severity::Warn => "WARN".yellow().bold(),
        Severity::Critical => "CRIT".red().bold(),
    }
}

pub fn print_finding(finding: &Finding) {
    println!(
        "[{}] [{}] {}",
        severity_tag(finding.severity),
        finding.check.cyan(),
        finding.message
    );
    if let Some(detail) = &finding.detail {
        for line in detail.lines() {
            println!("       {}", line.dimmed());
        }
    }
    for step in &finding.remediation {
        println!("       {} {}", "->".bold(), step);
    }
}
