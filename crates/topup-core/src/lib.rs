//! Domain types shared by the token top-up crates.
//!
//! Holds the organization and member records, exact token amounts, the
//! aggregated view models consumed by the report renderer, the error type,
//! CLI settings and the line-formatting helpers.

pub mod amount;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use amount::Amount;
pub use error::{Result, TopUpError};
