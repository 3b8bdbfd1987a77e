//! Deserialization types (DTO layer) for rule settings.
//!
//! These types exist solely for serde deserialization.
//! They are converted to [`crate::rule::Settings`] via the loader.
//!
//! Keys are snake_case; the camelCase and PascalCase spellings of the JSON
//! settings format are accepted as aliases.

use serde::{Deserialize, Serialize};

use crate::checks::density::{DEFAULT_MIN_COMMENT_DENSITY, DEFAULT_MIN_LINES_OF_CODE};
use crate::target::Target;

/// Raw representation of the three rule sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsDto {
    /// `[[functions]]` rules.
    #[serde(default, alias = "Functions")]
    pub functions: Vec<FunctionRuleDto>,

    /// `[[interfaces]]` rules.
    #[serde(default, alias = "Interfaces")]
    pub interfaces: Vec<InterfaceRuleDto>,

    /// `[[structs]]` rules.
    #[serde(default, alias = "Structs")]
    pub structs: Vec<StructRuleDto>,
}

impl SettingsDto {
    /// Whether no section holds a rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.interfaces.is_empty() && self.structs.is_empty()
    }
}

/// A comment density rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRuleDto {
    /// Package selectors.
    #[serde(default, alias = "Targets")]
    pub targets: Vec<Target>,
    /// Thresholds; missing keys take the defaults.
    #[serde(default, alias = "Params")]
    pub params: DensityParamsDto,
}

/// Density thresholds as written in the file.
///
/// Signed: negative values are rejected by the loader, not by serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityParamsDto {
    /// Minimum comment density in percent.
    #[serde(
        default = "default_min_comment_density",
        alias = "minCommentDensity",
        alias = "MinCommentDensity"
    )]
    pub min_comment_density: i64,
    /// Functions below this many lines are exempt.
    #[serde(
        default = "default_min_lines_of_code",
        alias = "minLinesOfCode",
        alias = "MinLinesOfCode"
    )]
    pub min_lines_of_code: i64,
}

impl Default for DensityParamsDto {
    fn default() -> Self {
        Self {
            min_comment_density: DEFAULT_MIN_COMMENT_DENSITY,
            min_lines_of_code: DEFAULT_MIN_LINES_OF_CODE,
        }
    }
}

/// A trait documentation rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRuleDto {
    /// Package selectors.
    #[serde(default, alias = "Targets")]
    pub targets: Vec<Target>,
    /// Switches; missing keys are `false`.
    #[serde(default, alias = "Params")]
    pub params: InterfaceParamsDto,
}

/// Switches of a trait documentation rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceParamsDto {
    /// Require a doc comment on the trait.
    #[serde(
        default,
        alias = "requireHeadlineComment",
        alias = "RequireHeadlineComment"
    )]
    pub require_headline_comment: bool,
    /// Require a doc comment on each method.
    #[serde(
        default,
        alias = "requireMethodComment",
        alias = "RequireMethodComment"
    )]
    pub require_method_comment: bool,
}

/// A struct documentation rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructRuleDto {
    /// Package selectors.
    #[serde(default, alias = "Targets")]
    pub targets: Vec<Target>,
    /// Switches; missing keys are `false`.
    #[serde(default, alias = "Params")]
    pub params: StructParamsDto,
}

/// Switches of a struct documentation rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructParamsDto {
    /// Require a doc comment on the struct.
    #[serde(
        default,
        alias = "requireHeadlineComment",
        alias = "RequireHeadlineComment"
    )]
    pub require_headline_comment: bool,
    /// Require a doc comment on each field.
    #[serde(
        default,
        alias = "requireFieldComment",
        alias = "RequireFieldComment"
    )]
    pub require_field_comment: bool,
}

fn default_min_comment_density() -> i64 {
    DEFAULT_MIN_COMMENT_DENSITY
}

fn default_min_lines_of_code() -> i64 {
    DEFAULT_MIN_LINES_OF_CODE
}
