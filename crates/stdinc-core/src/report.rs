//! Per-file reports.
//!
//! A file with no diagnostics has no report: [`FileReport::build`] returns
//! `None`, which callers read as "checked and clean".

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::resolver::Diagnostics;

/// Diagnostics for one file that has at least one finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Diagnostics,
}

impl FileReport {
    /// Wrap `diagnostics` for `path`, or `None` if there is nothing to report.
    pub fn build(path: impl Into<PathBuf>, diagnostics: Diagnostics) -> Option<Self> {
        if diagnostics.is_empty() {
            return None;
        }
        Some(Self {
            path: path.into(),
            diagnostics,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Grouped block: unrecognized identifiers, missing includes, unused
    /// headers, each section only when non-empty.
    pub fn render(&self) -> String {
        let d = &self.diagnostics;
        let mut out = String::new();
        let _ = writeln!(out, "{}:", self.path.display());

        if !d.unrecognized.is_empty() {
            let symbols: Vec<&str> = d.unrecognized.iter().map(|u| u.symbol.as_str()).collect();
            let _ = writeln!(out, "  unrecognized identifiers: {}", symbols.join(", "));
        }
        if !d.missing_includes.is_empty() {
            out.push_str("  missing includes:\n");
            for m in &d.missing_includes {
                let _ = writeln!(
                    out,
                    "    #include <{}>    // {} (line {})",
                    m.header, m.symbol, m.line
                );
            }
        }
        if !d.unused_headers.is_empty() {
            let headers: Vec<&str> = d.unused_headers.iter().map(|u| u.header.as_str()).collect();
            let _ = writeln!(out, "  unused headers: {}", headers.join(", "));
        }

        out
    }

    /// One `path:line: code: message` line per diagnostic.
    pub fn short_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.diagnostics.iter().map(move |d| {
            format!("{}:{}: {}: {}", self.path.display(), d.line(), d.code(), d)
        })
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
