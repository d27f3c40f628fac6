//! Provenance labels for the three export sources.

use serde::{Deserialize, Serialize};

/// Which shortlist export a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signability {
    /// Players listed for transfer
    #[serde(rename = "Available for Transfer")]
    Transfer,

    /// Players listed for loan
    #[serde(rename = "Available on Loan")]
    Loan,

    /// Everyone else in the search
    #[serde(rename = "Not Transferrable")]
    Untransferable,
}

impl Signability {
    /// All sources in merge priority order.
    pub const ALL: [Signability; 3] = [
        Signability::Transfer,
        Signability::Loan,
        Signability::Untransferable,
    ];

    /// Label stored in the `Signability` column.
    pub fn label(&self) -> &'static str {
        match self {
            Signability::Transfer => "Available for Transfer",
            Signability::Loan => "Available on Loan",
            Signability::Untransferable => "Not Transferrable",
        }
    }
}

impl std::fmt::Display for Signability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
