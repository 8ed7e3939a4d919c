//! Mismatch resolution — cross-references declared headers and used symbols
//! against the registry.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::includes::DeclaredHeaders;
use crate::registry::HeaderRegistry;
use crate::usage::UsedSymbols;

/// A used symbol the registry does not know.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Unrecognized {
    pub symbol: String,
    pub line: usize,
}

/// A used symbol whose header is known but not included.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MissingInclude {
    pub header: String,
    pub symbol: String,
    pub line: usize,
}

/// An included header none of whose symbols are used.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct UnusedHeader {
    pub header: String,
    pub line: usize,
}

/// All diagnostics for one file, each collection sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub unrecognized: Vec<Unrecognized>,
    pub missing_includes: Vec<MissingInclude>,
    pub unused_headers: Vec<UnusedHeader>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.unrecognized.is_empty()
            && self.missing_includes.is_empty()
            && self.unused_headers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.unrecognized.len() + self.missing_includes.len() + self.unused_headers.len()
    }

    /// All diagnostics in report order: unrecognized, missing, unused.
    pub fn iter(&self) -> impl Iterator<Item = Diagnostic<'_>> {
        self.unrecognized
            .iter()
            .map(Diagnostic::Unrecognized)
            .chain(self.missing_includes.iter().map(Diagnostic::MissingInclude))
            .chain(self.unused_headers.iter().map(Diagnostic::UnusedHeader))
    }
}

/// One diagnostic of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic<'a> {
    Unrecognized(&'a Unrecognized),
    MissingInclude(&'a MissingInclude),
    UnusedHeader(&'a UnusedHeader),
}

impl Diagnostic<'_> {
    /// Source line the diagnostic points at.
    pub fn line(&self) -> usize {
        match self {
            Diagnostic::Unrecognized(d) => d.line,
            Diagnostic::MissingInclude(d) => d.line,
            Diagnostic::UnusedHeader(d) => d.line,
        }
    }

    /// Stable short code for the diagnostic kind.
    pub fn code(&self) -> &'static str {
        match self {
            Diagnostic::Unrecognized(_) => "unrecognized",
            Diagnostic::MissingInclude(_) => "missing-include",
            Diagnostic::UnusedHeader(_) => "unused-header",
        }
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Unrecognized(d) => {
                write!(f, "unrecognized identifier {}", d.symbol)
            }
            Diagnostic::MissingInclude(d) => {
                write!(f, "missing #include <{}> for {}", d.header, d.symbol)
            }
            Diagnostic::UnusedHeader(d) => write!(f, "unused header <{}>", d.header),
        }
    }
}

/// Produce the three diagnostic collections for one file.
///
/// Every declared header starts with a zero tally. Each used symbol is either
/// unknown to the registry, owned by a header that is not declared, or counts
/// towards its declared header. Headers left at zero are unused.
pub fn resolve(
    declared: &DeclaredHeaders,
    used: &UsedSymbols,
    registry: &HeaderRegistry,
) -> Diagnostics {
    let mut tally: BTreeMap<&str, usize> = declared.iter().map(|(h, _)| (h, 0)).collect();
    let mut diagnostics = Diagnostics::default();

    for (symbol, line) in used.iter() {
        match registry.lookup(symbol) {
            None => diagnostics.unrecognized.push(Unrecognized {
                symbol: symbol.to_string(),
                line,
            }),
            Some(header) => match tally.get_mut(header) {
                Some(count) => *count += 1,
                None => diagnostics.missing_includes.push(MissingInclude {
                    header: header.to_string(),
                    symbol: symbol.to_string(),
                    line,
                }),
            },
        }
    }

    diagnostics.unused_headers = tally
        .into_iter()
        .filter(|&(_, count)| count == 0)
        .map(|(header, _)| UnusedHeader {
            header: header.to_string(),
            line: declared.line(header).unwrap_or_default(),
        })
        .collect();

    diagnostics.unrecognized.sort();
    diagnostics.missing_includes.sort();
    diagnostics.unused_headers.sort();
    diagnostics
}
