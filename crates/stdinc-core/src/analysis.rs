//! Per-file analysis driver.
//!
//! An [`Analyzer`] owns the read-only registry and the project prefix. Each
//! call analyses one file in isolation; nothing is shared or mutated between
//! calls, so an `Analyzer` can be used from many threads at once.

use std::path::{Path, PathBuf};

use stdinc_config::AppConfig;
use tracing::debug;

use crate::includes::{DeclaredHeaders, extract_includes};
use crate::registry::{HeaderRegistry, RegistryError};
use crate::report::FileReport;
use crate::resolver::{Diagnostics, resolve};
use crate::source::SourceText;
use crate::usage::{UsedSymbols, extract_usages};

/// Errors from analysing a file.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What one file declares and uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAnalysis {
    pub declared: DeclaredHeaders,
    pub used: UsedSymbols,
}

impl FileAnalysis {
    /// Extract declared headers and used symbols from a file's text.
    pub fn from_source(source: &SourceText, project_prefix: Option<&str>) -> Self {
        Self {
            declared: extract_includes(source, project_prefix),
            used: extract_usages(source),
        }
    }

    /// Resolve against `registry`.
    pub fn diagnostics(&self, registry: &HeaderRegistry) -> Diagnostics {
        resolve(&self.declared, &self.used, registry)
    }
}

/// Analyses files against one header registry.
#[derive(Debug, Clone)]
pub struct Analyzer {
    registry: HeaderRegistry,
    project_prefix: Option<String>,
}

impl Analyzer {
    /// Create an analyzer. An empty prefix is treated as no prefix.
    pub fn new(registry: HeaderRegistry, project_prefix: Option<String>) -> Self {
        Self {
            registry,
            project_prefix: project_prefix.filter(|p| !p.is_empty()),
        }
    }

    /// Build the registry and prefix from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, RegistryError> {
        let registry = HeaderRegistry::new(&config.headers.table())?;
        Ok(Self::new(registry, config.project.namespace_prefix.clone()))
    }

    pub fn registry(&self) -> &HeaderRegistry {
        &self.registry
    }

    pub fn project_prefix(&self) -> Option<&str> {
        self.project_prefix.as_deref()
    }

    /// Analyse file contents.
    pub fn analyze_source(&self, text: &str) -> Diagnostics {
        let source = SourceText::new(text);
        FileAnalysis::from_source(&source, self.project_prefix()).diagnostics(&self.registry)
    }

    /// Read and analyse one file. `Ok(None)` means the file is clean.
    ///
    /// Bytes that are not valid UTF-8 are replaced before analysis; only
    /// ASCII is ever matched.
    pub fn analyze_path(&self, path: &Path) -> Result<Option<FileReport>, AnalysisError> {
        let bytes = std::fs::read(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        let diagnostics = self.analyze_source(&text);
        debug!(
            path = %path.display(),
            findings = diagnostics.len(),
            "Analysed file"
        );
        Ok(FileReport::build(path, diagnostics))
    }
}
