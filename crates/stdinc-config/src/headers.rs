//! Header table — which standard-library header provides which `std::` symbol.
//!
//! The table is plain data: a map from header name (as written between `<` and
//! `>` in an include directive) to the qualified symbols it provides. The core
//! crate inverts it into a lookup registry at startup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A `header → [symbols]` table.
pub type HeaderTable = BTreeMap<String, Vec<String>>;

/// Built-in table shipped with stdinc.
const BUILTIN: &[(&str, &[&str])] = &[
    ("algorithm", &["std::max"]),
    ("cctype", &["std::isspace"]),
    ("chrono", &["std::chrono"]),
    ("cstddef", &["std::size_t"]),
    ("ctime", &["std::ctime", "std::time_t"]),
    ("exception", &["std::exception"]),
    ("fstream", &["std::ifstream"]),
    ("iomanip", &["std::setw"]),
    ("ios", &["std::ios", "std::ios_base", "std::left", "std::right"]),
    ("iostream", &["std::cout", "std::endl"]),
    ("list", &["std::list"]),
    ("map", &["std::map"]),
    ("ostream", &["std::ostream"]),
    ("regex", &["std::regex", "std::regex_match"]),
    ("set", &["std::set"]),
    ("sstream", &["std::stringstream"]),
    (
        "stdexcept",
        &["std::invalid_argument", "std::logic_error", "std::runtime_error"],
    ),
    ("string", &["std::string", "std::to_string", "std::getline"]),
    ("unordered_map", &["std::unordered_map"]),
    ("unordered_set", &["std::unordered_set"]),
    ("utility", &["std::make_pair", "std::pair", "std::move"]),
    ("vector", &["std::vector"]),
];

/// The built-in header table.
pub fn builtin_table() -> HeaderTable {
    BUILTIN
        .iter()
        .map(|(header, symbols)| {
            (
                header.to_string(),
                symbols.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect()
}

/// Header table configuration.
///
/// ## TOML Example
///
/// ```toml
/// [headers]
/// use_defaults = true
///
/// [headers.provides]
/// numeric = ["std::accumulate"]
/// memory = ["std::unique_ptr", "std::shared_ptr"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadersConfig {
    /// Start from the built-in table.
    #[serde(default = "default_use_defaults")]
    pub use_defaults: bool,

    /// Extra entries, merged on top of the built-in table.
    #[serde(default)]
    pub provides: HeaderTable,
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            use_defaults: default_use_defaults(),
            provides: HeaderTable::new(),
        }
    }
}

fn default_use_defaults() -> bool {
    true
}

impl HeadersConfig {
    /// The effective table: built-ins (when enabled) with `provides` merged in.
    ///
    /// A header listed in both keeps the built-in symbols first, followed by
    /// any configured symbols not already present.
    pub fn table(&self) -> HeaderTable {
        let mut table = if self.use_defaults {
            builtin_table()
        } else {
            HeaderTable::new()
        };

        for (header, symbols) in &self.provides {
            let entry = table.entry(header.clone()).or_default();
            for symbol in symbols {
                if !entry.contains(symbol) {
                    entry.push(symbol.clone());
                }
            }
        }

        table
    }
}
