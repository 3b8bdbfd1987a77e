//! DTO → [`Settings`] conversion with validation.

use tracing::warn;

use crate::checks::density::DensityParams;
use crate::checks::presence::{InterfaceDocParams, StructDocParams};
use crate::rule::{Rule, Settings};
use crate::target::Target;

use super::dto::{
    DensityParamsDto, FunctionRuleDto, InterfaceRuleDto, SettingsDto, StructRuleDto,
};

/// A rejected parameter value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// Density outside of 0–100.
    #[error("min_comment_density must be between 0 and 100, got {0}")]
    DensityOutOfRange(i64),

    /// Negative line threshold.
    #[error("min_lines_of_code must not be negative, got {0}")]
    NegativeMinLines(i64),
}

/// Errors during DTO → Settings conversion.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {source}")]
    Validation {
        /// Where the error occurred (e.g., "functions[1].params").
        context: String,
        /// The rejected value.
        source: ParamError,
    },
}

/// Converts a `SettingsDto` to validated, immutable [`Settings`].
///
/// Rules keep their order within each section.
///
/// # Errors
///
/// Returns the first invalid parameter block.
pub fn load(dto: SettingsDto) -> Result<Settings, LoadError> {
    let mut settings = Settings::new();

    for (i, rule) in dto.functions.into_iter().enumerate() {
        settings.add_rule(convert_function(rule, i)?);
    }
    for (i, rule) in dto.interfaces.into_iter().enumerate() {
        settings.add_rule(convert_interface(rule, i));
    }
    for (i, rule) in dto.structs.into_iter().enumerate() {
        settings.add_rule(convert_struct(rule, i));
    }

    Ok(settings)
}

fn convert_function(dto: FunctionRuleDto, index: usize) -> Result<Rule, LoadError> {
    let ctx = format!("functions[{index}]");
    let params = convert_density(dto.params).map_err(|source| LoadError::Validation {
        context: format!("{ctx}.params"),
        source,
    })?;
    Ok(Rule::function(checked_targets(dto.targets, &ctx), params))
}

fn convert_density(dto: DensityParamsDto) -> Result<DensityParams, ParamError> {
    if !(0..=100).contains(&dto.min_comment_density) {
        return Err(ParamError::DensityOutOfRange(dto.min_comment_density));
    }
    if dto.min_lines_of_code < 0 {
        return Err(ParamError::NegativeMinLines(dto.min_lines_of_code));
    }
    Ok(DensityParams::new(
        dto.min_comment_density,
        dto.min_lines_of_code,
    ))
}

fn convert_interface(dto: InterfaceRuleDto, index: usize) -> Rule {
    let targets = checked_targets(dto.targets, &format!("interfaces[{index}]"));
    Rule::interface(
        targets,
        InterfaceDocParams {
            require_headline_comment: dto.params.require_headline_comment,
            require_method_comment: dto.params.require_method_comment,
        },
    )
}

fn convert_struct(dto: StructRuleDto, index: usize) -> Rule {
    let targets = checked_targets(dto.targets, &format!("structs[{index}]"));
    Rule::structure(
        targets,
        StructDocParams {
            require_headline_comment: dto.params.require_headline_comment,
            require_field_comment: dto.params.require_field_comment,
        },
    )
}

/// Accepts targets as-is, warning about the ones that can never match.
fn checked_targets(targets: Vec<Target>, context: &str) -> Vec<Target> {
    if targets.is_empty() {
        warn!("{context}: rule has no targets and will never apply");
    }
    for (i, target) in targets.iter().enumerate() {
        if target.packages.is_empty() {
            warn!("{context}.targets[{i}]: empty package list matches nothing");
        }
    }
    targets
}
