use std::fs;
use std::io;
use std::path::Path;

/// A `KEY=VALUE` secrets file, read once per check. Lookups are
/// first-match-wins: later duplicates of a key are ignored, matching simple
/// line-scan semantics.
#[derive(Debug, Clone)]
pub struct EnvFile {
    lines: Vec<String>,
}

impl EnvFile {
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.lines().map(|l| l.to_string()).collect(),
        }
    }

    /// First raw line assigning `key`, comment lines excluded.
    pub fn raw_line(&self, key: &str) -> Option<&str> {
        self.lines
            .iter()
            .map(|l| l.as_str())
            .find(|line| Self::line_assigns(line, key))
    }

    /// Value of the first assignment of `key`, trimmed, with one layer of
    /// matching quotes removed.
    pub fn get(&self, key: &str) -> Option<&str> {
        let line = self.raw_line(key)?;
        let (_, value) = line.split_once('=')?;
        let value = value.trim();
        Some(strip_quotes(value))
    }

    fn line_assigns(line: &str, key: &str) -> bool {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            return false;
        }
        match trimmed.split_once('=') {
            Some((lhs, _)) => lhs.trim() == key,
            None => false,
        }
    }
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
