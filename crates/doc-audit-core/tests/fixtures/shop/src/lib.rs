//! Shop.

pub mod domain;
pub mod infra;

/// Anything that can be priced.
pub trait Priced {
    /// Price in cents.
    fn price(&self) -> u64;

    fn currency(&self) -> &str {
        "EUR"
    }
}
