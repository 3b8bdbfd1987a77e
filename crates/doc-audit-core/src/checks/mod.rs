//! Checks run by rules against a single declaration.
//!
//! - [`density`]: inline comment density of functions
//! - [`presence`]: headline and per-member doc comments of traits and structs
//!
//! Checks are total: every well-formed declaration yields zero or more
//! diagnostics and nothing else.

pub mod density;
pub mod presence;
