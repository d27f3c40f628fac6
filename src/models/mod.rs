//! Core data models for player rows and archetype results.

pub mod cell;
pub mod columns;
mod ids;
mod position;
mod report;
mod row;
mod signability;

pub use cell::Cell;
pub use ids::*;
pub use position::*;
pub use report::*;
pub use row::*;
pub use signability::*;
