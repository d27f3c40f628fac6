//! League name canonicalization and league power ratings.
//!
//! - **names**: exact-match fixes for garbled division names
//! - **power**: division → power rating table with an `"Others"` fallback

mod names;
mod power;

pub use names::*;
pub use power::*;
