//! Usage extraction — `std::name` tokens that appear in code.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::scanner::{Classifier, LexState};
use crate::source::SourceText;

/// Namespace qualifier that marks a standard-library reference.
pub const STD_QUALIFIER: &str = "std::";

/// Qualified `std::` identifiers used in one file, with the line of first use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UsedSymbols {
    first_use: BTreeMap<String, usize>,
}

impl UsedSymbols {
    /// Record a use; keeps the earliest line.
    pub fn insert(&mut self, symbol: impl Into<String>, line: usize) {
        self.first_use
            .entry(symbol.into())
            .and_modify(|l| *l = (*l).min(line))
            .or_insert(line);
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.first_use.contains_key(symbol)
    }

    /// Line of first use, 1-based.
    pub fn first_line(&self, symbol: &str) -> Option<usize> {
        self.first_use.get(symbol).copied()
    }

    /// Symbols in sorted order with their first-use line.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.first_use.iter().map(|(s, &l)| (s.as_str(), l))
    }

    pub fn len(&self) -> usize {
        self.first_use.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_use.is_empty()
    }
}

/// Whether `b` may continue a qualified name. Deliberately `[a-z_]` only:
/// digits and uppercase letters end the name (`std::int8_t` reads as
/// `std::int`).
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b == b'_'
}

/// Collect every `std::name` that starts in a code region.
///
/// A bare `std::` with no name after it is skipped.
pub fn extract_usages(source: &SourceText) -> UsedSymbols {
    let text = source.as_str();
    let bytes = text.as_bytes();
    let mut used = UsedSymbols::default();

    for (offset, state) in Classifier::new(source) {
        if state != LexState::Code || !bytes[offset..].starts_with(STD_QUALIFIER.as_bytes()) {
            continue;
        }
        let name_start = offset + STD_QUALIFIER.len();
        let name_len = bytes[name_start..]
            .iter()
            .position(|&b| !is_name_byte(b))
            .unwrap_or(bytes.len() - name_start);
        if name_len == 0 {
            continue;
        }
        used.insert(&text[offset..name_start + name_len], source.line_of(offset));
    }

    used
}
