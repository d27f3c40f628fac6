//! Division name fixes.
//!
//! The game writes its HTML exports as UTF-8, but they are frequently
//! re-saved or read as Latin-1, so `Série` turns into `SÃ©rie`. Each garbled
//! spelling is mapped back to its canonical name by exact string match.

use std::collections::HashMap;

/// Accented division names known to come out garbled in exports.
const ACCENTED_LEAGUES: &[&str] = &[
    "Brasileirão Assaí Série A",
    "Brasileirão Série B",
    "Brasileirão Série C",
    "Primera Federación Grupo I",
    "Primera Federación Grupo II",
    "Segunda Federación Grupo I",
    "Süper Lig",
    "Liga Profesional de Fútbol",
    "Primera División",
    "Österreichische Bundesliga",
    "Première Ligue",
];

/// Exact-match table from raw division strings to canonical names.
#[derive(Debug, Clone, Default)]
pub struct LeagueNameFixes {
    fixes: HashMap<String, String>,
}

impl LeagueNameFixes {
    /// An empty table: every name passes through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table covering Latin-1 mis-decoding of accented names.
    pub fn builtin() -> Self {
        let fixes = ACCENTED_LEAGUES
            .iter()
            .map(|name| (mis_decode_latin1(name), (*name).to_string()))
            .collect();
        Self { fixes }
    }

    /// Add or replace a fix. Later inserts win.
    pub fn insert(&mut self, raw: impl Into<String>, canonical: impl Into<String>) {
        self.fixes.insert(raw.into(), canonical.into());
    }

    /// Extend with extra fixes, overriding existing raw keys.
    pub fn extend<I, K, V>(&mut self, fixes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (raw, canonical) in fixes {
            self.insert(raw, canonical);
        }
    }

    /// Canonical name for `division`, or the input unchanged if no fix exists.
    pub fn canonicalize<'a>(&'a self, division: &'a str) -> &'a str {
        self.fixes
            .get(division)
            .map(String::as_str)
            .unwrap_or(division)
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }
}

/// Reproduce what a UTF-8 string looks like after being read as Latin-1:
/// every byte becomes the code point of the same value.
fn mis_decode_latin1(s: &str) -> String {
    s.bytes().map(char::from).collect()
}
