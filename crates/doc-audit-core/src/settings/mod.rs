//! Rule settings loaded from TOML or JSON.
//!
//! # Architecture
//!
//! ```text
//! TOML / JSON text
//!   ↓ serde (DTO layer)
//! dto types
//!   ↓ validate + convert
//! Settings (immutable rule sets)
//! ```

pub mod dto;
pub mod loader;

use crate::rule::Settings;

/// Errors from parsing settings text and loading rules.
#[derive(Debug, thiserror::Error)]
pub enum LoadSettingsError {
    /// TOML deserialization failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON deserialization failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parameter validation failed.
    #[error("{0}")]
    Load(#[from] loader::LoadError),
}

/// Parses TOML rule sections into [`Settings`].
///
/// Returns empty settings if no section is present.
///
/// # Errors
///
/// Returns an error if TOML parsing or parameter validation fails.
pub fn settings_from_toml(content: &str) -> Result<Settings, LoadSettingsError> {
    let dto: dto::SettingsDto = toml::from_str(content)?;
    Ok(loader::load(dto)?)
}

/// Parses JSON settings (`{"functions": [...], "interfaces": [...]}`) into
/// [`Settings`].
///
/// # Errors
///
/// Returns an error if JSON parsing or parameter validation fails.
pub fn settings_from_json(content: &str) -> Result<Settings, LoadSettingsError> {
    let dto: dto::SettingsDto = serde_json::from_str(content)?;
    Ok(loader::load(dto)?)
}
