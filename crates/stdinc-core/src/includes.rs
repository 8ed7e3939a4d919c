//! Include extraction — headers named in `#include <...>` directives.
//!
//! Recognition is by line prefix only and does not consult the classifier.
//! Quoted includes (`#include "x.hpp"`) and directives without a closing `>`
//! yield nothing.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::scanner::INCLUDE_DIRECTIVE;
use crate::source::SourceText;

/// Standard headers a file includes, with the line of the first directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeclaredHeaders {
    first_line: BTreeMap<String, usize>,
}

impl DeclaredHeaders {
    /// Record a header; keeps the earliest line.
    pub fn insert(&mut self, header: impl Into<String>, line: usize) {
        self.first_line.entry(header.into()).or_insert(line);
    }

    pub fn contains(&self, header: &str) -> bool {
        self.first_line.contains_key(header)
    }

    /// Line of the first directive naming `header`, 1-based.
    pub fn line(&self, header: &str) -> Option<usize> {
        self.first_line.get(header).copied()
    }

    /// Headers in sorted order with their directive line.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.first_line.iter().map(|(h, &l)| (h.as_str(), l))
    }

    pub fn len(&self) -> usize {
        self.first_line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_line.is_empty()
    }
}

/// Header named by one line, if it is an angle-bracket include.
///
/// Leading indentation before `#include` is allowed.
pub fn parse_include(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(INCLUDE_DIRECTIVE)?;
    let open = rest.find('<')?;
    let after = &rest[open + 1..];
    let close = after.find('>')?;
    let header = &after[..close];
    (!header.is_empty()).then_some(header)
}

/// Collect the angle-bracket includes of a file.
///
/// Headers starting with `project_prefix` belong to the project and are left
/// out.
pub fn extract_includes(source: &SourceText, project_prefix: Option<&str>) -> DeclaredHeaders {
    let mut declared = DeclaredHeaders::default();

    for (index, line) in source.lines().enumerate() {
        let Some(header) = parse_include(line) else {
            continue;
        };
        if project_prefix.is_some_and(|prefix| header.starts_with(prefix)) {
            continue;
        }
        declared.insert(header, index + 1);
    }

    declared
}
