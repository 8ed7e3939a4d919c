#![deny(unsafe_code)]

//! stdinc core — checks C++ standard-library includes against actual usage.
//!
//! A file is scanned once to find the headers it includes with
//! `#include <...>` and the `std::name` identifiers it uses in code (string
//! literals and comments are skipped). Both sets are then cross-referenced
//! with a [`HeaderRegistry`] to find:
//!
//! - identifiers the registry does not know,
//! - identifiers whose header is not included,
//! - included headers that nothing uses.
//!
//! ```text
//!  SourceText ──► Classifier ──► extract_usages ──┐
//!       │                                         ├─► resolve ──► FileReport
//!       └────────────────────► extract_includes ──┘      ▲
//!                                                        │
//!                                    HeaderRegistry ─────┘
//! ```

/// Per-file analysis driver and error type.
pub mod analysis;
/// `#include <...>` extraction.
pub mod includes;
/// Inverted symbol → header lookup.
pub mod registry;
/// Per-file report assembly and rendering.
pub mod report;
/// Mismatch resolution and diagnostic types.
pub mod resolver;
/// Code / string / comment classification.
pub mod scanner;
/// Line-normalised source buffer.
pub mod source;
/// `std::` usage extraction.
pub mod usage;

pub use analysis::{AnalysisError, Analyzer, FileAnalysis};
pub use includes::DeclaredHeaders;
pub use registry::{HeaderRegistry, RegistryError};
pub use report::FileReport;
pub use resolver::{Diagnostic, Diagnostics, MissingInclude, Unrecognized, UnusedHeader};
pub use scanner::{Classifier, LexState};
pub use source::SourceText;
pub use usage::UsedSymbols;
