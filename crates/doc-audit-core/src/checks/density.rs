//! Comment density of functions.
//!
//! # Line accounting
//!
//! For a function spanning lines `start..=end`:
//!
//! - `total = end - start` (a delta, signature and body included)
//! - `doc = lines of the attached doc comment`
//! - `inline = lines of every file comment block lying entirely inside the
//!   span`, minus any lines it shares with the doc comment
//! - `comment = doc + inline`
//! - `code = total - inline`
//! - `density = comment / code * 100`
//!
//! Body comments are not children of the function node, so `inline` comes
//! from the file's [`FileCommentIndex`], not from the declaration itself.
//! Functions shorter than `min_lines_of_code` are exempt, and a function with
//! no measurable code (`code <= 0`) never fails.

use std::path::Path;

use crate::comments::FileCommentIndex;
use crate::model::FunctionDecl;
use crate::types::{Diagnostic, Location};

/// Check name reported in diagnostics.
pub const NAME: &str = "comment-density";

/// Default `min_comment_density`, in percent.
pub const DEFAULT_MIN_COMMENT_DENSITY: i64 = 10;

/// Default `min_lines_of_code`.
pub const DEFAULT_MIN_LINES_OF_CODE: i64 = 10;

/// Thresholds for the density check.
///
/// Values are applied literally; range validation belongs to the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensityParams {
    /// Minimum comment lines per code line, in percent.
    pub min_comment_density: i64,
    /// Functions measuring fewer lines than this are exempt.
    pub min_lines_of_code: i64,
}

impl Default for DensityParams {
    fn default() -> Self {
        Self {
            min_comment_density: DEFAULT_MIN_COMMENT_DENSITY,
            min_lines_of_code: DEFAULT_MIN_LINES_OF_CODE,
        }
    }
}

impl DensityParams {
    /// Creates parameters with explicit thresholds.
    #[must_use]
    pub fn new(min_comment_density: i64, min_lines_of_code: i64) -> Self {
        Self {
            min_comment_density,
            min_lines_of_code,
        }
    }
}

/// Line counts gathered for one function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensityMeasurement {
    /// Delta between the last and first line of the function.
    pub total_lines: i64,
    /// Lines of the attached doc comment.
    pub doc_lines: i64,
    /// Lines of comments found inside the function span.
    pub inline_comment_lines: i64,
    /// `doc_lines + inline_comment_lines`.
    pub comment_lines: i64,
    /// `total_lines - inline_comment_lines`.
    pub code_lines: i64,
}

impl DensityMeasurement {
    /// Comment lines per code line, in percent.
    ///
    /// Returns `None` when there is no code to measure against.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn density(&self) -> Option<f64> {
        if self.code_lines <= 0 {
            return None;
        }
        Some(self.comment_lines as f64 / self.code_lines as f64 * 100.0)
    }

    /// Comment lines needed to reach `min_density` percent.
    ///
    /// Saturates at `i64::MAX` for out-of-range densities.
    #[must_use]
    pub fn required_comment_lines(&self, min_density: i64) -> i64 {
        let needed = i128::from(self.code_lines) * i128::from(min_density);
        if needed <= 0 {
            0
        } else {
            i64::try_from((needed + 99) / 100).unwrap_or(i64::MAX)
        }
    }
}

fn lines(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Measures a function against the comments of its file.
#[must_use]
pub fn measure(function: &FunctionDecl, comments: &FileCommentIndex) -> DensityMeasurement {
    let span = function.header.span;
    let doc = function.header.doc;

    let total_lines = lines(span.delta());
    let doc_lines = doc.map_or(0, |d| lines(d.line_count()));

    // Lines already counted as doc comment are not counted again.
    let inline_comment_lines: i64 = comments
        .within(span)
        .map(|block| {
            let shared = doc.map_or(0, |d| d.overlap(&block.span()));
            lines(block.line_count() - shared)
        })
        .sum();

    DensityMeasurement {
        total_lines,
        doc_lines,
        inline_comment_lines,
        comment_lines: doc_lines + inline_comment_lines,
        code_lines: total_lines - inline_comment_lines,
    }
}

/// Runs the density check on one function.
///
/// Returns a diagnostic when the measured density falls below
/// `params.min_comment_density`.
#[must_use]
pub fn check(
    file: &Path,
    function: &FunctionDecl,
    comments: &FileCommentIndex,
    params: &DensityParams,
) -> Option<Diagnostic> {
    let header = &function.header;
    if lines(header.span.delta()) < params.min_lines_of_code {
        tracing::trace!("{}: exempt, shorter than {} lines", header.name, params.min_lines_of_code);
        return None;
    }

    let m = measure(function, comments);
    let density = m.density()?;

    #[allow(clippy::cast_precision_loss)]
    let below = density < params.min_comment_density as f64;
    if !below {
        return None;
    }

    Some(Diagnostic::new(
        NAME,
        Location::at(file.to_path_buf(), header.position),
        format!(
            "function '{}' should have more documentation. lines of code: {}, expected comment lines: {}, found: {}",
            header.name,
            m.code_lines,
            m.required_comment_lines(params.min_comment_density),
            m.comment_lines,
        ),
    ))
}
