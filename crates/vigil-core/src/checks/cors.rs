use crate::checks::Check;
use crate::model::Finding;
use ignore::WalkBuilder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;
use vigil_config::AuditConfig;

// Files above this size are almost certainly not hand-written config.
const MAX_FILE_SIZE: u64 = 1_000_000;

/// Heuristic text search for CORS configuration. This is deliberately not a
/// configuration parser: a wildcard in a comment is a false positive and a
/// differently-spelled origin list is a false negative, both accepted
/// limitations.
pub struct CorsCheck;

impl Check for CorsCheck {
    fn key(&self) -> &'static str {
        "cors"
    }

    fn run(&self, config: &AuditConfig) -> Vec<Finding> {
        let matches = collect_marker_lines(
            &config.cors.project_root,
            &config.cors.marker,
            config.cors.max_matches,
        );

        if matches.is_empty() {
            return vec![Finding::warn(
                self.key(),
                format!(
                    "no explicit CORS configuration found (searched for {:?})",
                    config.cors.marker
                ),
            )
            .with_remediation([
                "Configure an explicit origin allow-list instead of relying on defaults",
            ])];
        }

        let wildcard: Vec<&String> = matches.iter().filter(|l| l.contains('*')).collect();
        if !wildcard.is_empty() {
            let offending = wildcard
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            return vec![Finding::critical(
                self.key(),
                "CORS configuration allows a wildcard origin",
            )
            .with_detail(offending)
            .with_remediation([
                "Replace the wildcard with an explicit list of allowed domains",
            ])];
        }

        vec![
            Finding::ok(self.key(), "CORS configuration found with no wildcard origin")
                .with_detail(matches.join("\n")),
        ]
    }
}

/// Gitignore-aware walk collecting up to `max_matches` lines containing the
/// marker, labelled `path:line_number: content`.
fn collect_marker_lines(root: &Path, marker: &str, max_matches: usize) -> Vec<String> {
    let mut matches = Vec::new();

    let walker = WalkBuilder::new(root).build();
    for entry in walker.filter_map(|e| e.ok()) {
        if matches.len() >= max_matches {
            break;
        }
        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        if let Ok(meta) = entry.metadata() {
            if meta.len() > MAX_FILE_SIZE {
                debug!(path = %path.display(), "skipping oversized file");
                continue;
            }
        }

        let Ok(file) = File::open(path) else {
            continue;
        };
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            // Binary or non-UTF-8 content ends the file scan, not the walk.
            let Ok(content) = line else {
                break;
            };
            if content.contains(marker) {
                matches.push(format!("{}:{}: {}", path.display(), idx + 1, content.trim()));
                if matches.len() >= max_matches {
                    break;
                }
            }
        }
    }

    matches
}
