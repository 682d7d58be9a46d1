//! Data layer for the token top-up report.
//!
//! Loads organization and member records from JSON, joins active members to
//! their organizations and writes the finished report to disk.

pub mod aggregator;
pub mod reader;
