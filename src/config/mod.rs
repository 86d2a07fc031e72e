//! Parsing helpers for command-line values.

pub mod assignment;

pub use assignment::parse_assignment;
