//! Header registry — inverted `symbol → header` lookup.
//!
//! Built once from a [`HeaderTable`] and read-only afterwards, so one registry
//! can be shared by any number of concurrent analyses.

use std::collections::{BTreeSet, HashMap};

use stdinc_config::HeaderTable;
use tracing::{debug, warn};

use crate::usage::STD_QUALIFIER;

/// Errors from building a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("header table contains no symbols")]
    Empty,
}

/// Lookup from qualified symbol to the header that provides it.
#[derive(Debug, Clone)]
pub struct HeaderRegistry {
    owners: HashMap<String, String>,
    headers: BTreeSet<String>,
}

impl HeaderRegistry {
    /// Invert a `header → [symbols]` table.
    ///
    /// A symbol listed under more than one header goes to the last such
    /// header in table order; this is logged at `warn`. Symbols whose name
    /// contains anything outside `[a-z_]` are kept but logged, since usage
    /// extraction can never produce them.
    pub fn new(table: &HeaderTable) -> Result<Self, RegistryError> {
        let mut owners: HashMap<String, String> = HashMap::new();
        let mut headers = BTreeSet::new();

        for (header, symbols) in table {
            headers.insert(header.clone());
            for symbol in symbols {
                if let Some(previous) = owners.insert(symbol.clone(), header.clone()) {
                    warn!(
                        symbol = %symbol,
                        previous = %previous,
                        header = %header,
                        "Symbol listed under several headers, keeping the last"
                    );
                }
                if !is_matchable(symbol) {
                    warn!(
                        symbol = %symbol,
                        header = %header,
                        "Symbol can never be matched: names are read as [a-z_] only"
                    );
                }
            }
        }

        if owners.is_empty() {
            return Err(RegistryError::Empty);
        }

        debug!(
            headers = headers.len(),
            symbols = owners.len(),
            "Header registry built"
        );
        Ok(Self { owners, headers })
    }

    /// Header that provides `symbol`, if known.
    pub fn lookup(&self, symbol: &str) -> Option<&str> {
        self.owners.get(symbol).map(String::as_str)
    }

    /// All headers in the table, sorted.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(String::as_str)
    }

    /// Symbols attributed to `header`, sorted.
    pub fn symbols_for(&self, header: &str) -> Vec<&str> {
        let mut symbols: Vec<&str> = self
            .owners
            .iter()
            .filter(|(_, h)| h.as_str() == header)
            .map(|(s, _)| s.as_str())
            .collect();
        symbols.sort_unstable();
        symbols
    }

    /// Number of known symbols.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Whether the registry knows no symbols. Never true for a built registry.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

fn is_matchable(symbol: &str) -> bool {
    symbol.strip_prefix(STD_QUALIFIER).is_some_and(|name| {
        !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase() || b == b'_')
    })
}
