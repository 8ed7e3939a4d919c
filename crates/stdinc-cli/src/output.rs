//! Rendering of per-file results to stdout.

use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;
use stdinc_core::FileReport;

/// Output format for `stdinc check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Grouped block per file.
    Report,
    /// One `path:line: code: message` line per diagnostic.
    Short,
    /// One JSON object per file.
    Json,
}

impl Format {
    /// Parse a config value such as `"report"`.
    pub fn from_config(value: &str) -> anyhow::Result<Self> {
        <Self as ValueEnum>::from_str(value, true)
            .map_err(|e| anyhow::anyhow!("invalid output.format {value:?}: {e}"))
    }
}

/// Writes results in one format.
pub struct Renderer<W> {
    format: Format,
    show_clean: bool,
    out: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(format: Format, show_clean: bool, out: W) -> Self {
        Self {
            format,
            show_clean,
            out,
        }
    }

    pub fn report(&mut self, report: &FileReport) -> io::Result<()> {
        match self.format {
            Format::Report => write!(self.out, "{report}"),
            Format::Short => {
                for line in report.short_lines() {
                    writeln!(self.out, "{line}")?;
                }
                Ok(())
            }
            Format::Json => {
                let json = serde_json::to_string(report).map_err(io::Error::other)?;
                writeln!(self.out, "{json}")
            }
        }
    }

    pub fn clean(&mut self, path: &Path) -> io::Result<()> {
        if !self.show_clean {
            return Ok(());
        }
        match self.format {
            Format::Report => writeln!(self.out, "{} standard includes OK", path.display()),
            Format::Short => writeln!(self.out, "{}: ok", path.display()),
            Format::Json => {
                let json = serde_json::json!({ "path": path, "clean": true });
                writeln!(self.out, "{json}")
            }
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
