//! Cross-venue symbol reconciliation.
//!
//! Backpack spells some tickers differently from Variational (`PUMP` vs
//! `PUMPFUN`, thousand-unit `kBONK` vs `BONK`). The reconciler maps a
//! Backpack symbol to its Variational spelling and reports symbols that
//! are suppressed from the joined view.

use std::collections::{HashMap, HashSet};

/// Default Backpack → Variational spellings
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("PUMP", "PUMPFUN"),
    ("kBONK", "BONK"),
    ("kPEPE", "PEPE"),
    ("kSHIB", "SHIB"),
];

/// Default suppressed Backpack symbols (thousand-unit contracts whose prices
/// are not comparable 1:1 with the Variational listing)
pub const DEFAULT_BLOCKLIST: &[&str] = &["kBONK", "kPEPE", "kSHIB"];

/// Read-only alias table plus blocklist, injected into the spread engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolReconciler {
    aliases: HashMap<String, String>,
    blocklist: HashSet<String>,
}

impl SymbolReconciler {
    pub fn new<A, B>(aliases: A, blocklist: B) -> Self
    where
        A: IntoIterator<Item = (String, String)>,
        B: IntoIterator<Item = String>,
    {
        Self {
            aliases: aliases.into_iter().collect(),
            blocklist: blocklist.into_iter().collect(),
        }
    }

    /// Variational spelling of a Backpack symbol (identity when unaliased).
    pub fn canonical<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.aliases.get(symbol).map(String::as_str).unwrap_or(symbol)
    }

    pub fn is_blocked(&self, symbol: &str) -> bool {
        self.blocklist.contains(symbol)
    }
}

impl Default for SymbolReconciler {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string())),
            DEFAULT_BLOCKLIST.iter().map(|s| s.to_string()),
        )
    }
}
