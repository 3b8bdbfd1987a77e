//! Per-file context: test detection, package paths, byte offsets.

use std::path::{Component, Path, PathBuf};

/// Package root used when none is configured.
pub const DEFAULT_PACKAGE: &str = "crate";

/// Context about the file being extracted.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Whether the path below the root follows a test-file convention.
    pub is_test: bool,
    /// Package path of the file's top-level items (e.g. `crate::domain::user`).
    pub package: String,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    line_offsets: Vec<usize>,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    ///
    /// `package_root` is prepended to the module path derived from the
    /// file's location under `root`.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path, package_root: &str) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        let package = package_path(package_root, &relative_path);
        let is_test = is_test_file(&relative_path);
        let line_offsets = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            path,
            content,
            is_test,
            package,
            relative_path,
            line_offsets,
        }
    }

    /// Calculates the byte offset for a 1-indexed line and a 1-indexed
    /// character column.
    ///
    /// Returns the end of the file when the line is out of bounds.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        if line == 0 {
            return 0;
        }
        let Some(&start) = self.line_offsets.get(line - 1) else {
            return self.content.len();
        };
        let line_text = self.content[start..].lines().next().unwrap_or("");
        let within = line_text
            .char_indices()
            .nth(column.saturating_sub(1))
            .map_or(line_text.len(), |(i, _)| i);
        start + within
    }
}

/// Detects if a file is a test file based on path conventions.
///
/// Test files are skipped entirely: none of their declarations are audited.
#[must_use]
pub fn is_test_file(path: &Path) -> bool {
    for component in path.components() {
        if let Component::Normal(s) = component {
            let s = s.to_string_lossy();
            if s == "tests" || s == "test" || s == "benches" {
                return true;
            }
        }
    }

    if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
        if file_name.ends_with("_test.rs")
            || file_name.ends_with("_tests.rs")
            || file_name.starts_with("test_")
            || file_name == "tests.rs"
        {
            return true;
        }
    }

    false
}

/// Computes the package path of a file from its path relative to the root.
///
/// A leading `src` is dropped and `mod.rs`, `lib.rs` and `main.rs` name
/// their directory: `src/domain/user.rs` becomes `crate::domain::user` and
/// `src/lib.rs` becomes `crate`.
#[must_use]
pub fn package_path(package_root: &str, relative_path: &Path) -> String {
    let mut parts: Vec<String> = relative_path
        .with_extension("")
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str().map(String::from),
            _ => None,
        })
        .collect();

    if parts.first().is_some_and(|p| p == "src") {
        parts.remove(0);
    }

    if let Some(last) = parts.last() {
        if last == "mod" || last == "lib" || last == "main" {
            parts.pop();
        }
    }

    std::iter::once(package_root.to_string())
        .chain(parts)
        .collect::<Vec<_>>()
        .join("::")
}
