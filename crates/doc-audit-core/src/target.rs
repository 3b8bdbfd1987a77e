//! Package-path filters for rules.

use serde::{Deserialize, Serialize};

/// Selects declarations by the path of the package that owns them.
///
/// A package matches when its full path starts with any of the configured
/// prefixes. Matching is a raw string-prefix test: no separator handling and
/// no trimming, so `crate::dom` also matches `crate::domain`.
///
/// A target without prefixes matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Package path prefixes (e.g. `crate::domain`).
    #[serde(default, alias = "Packages")]
    pub packages: Vec<String>,
}

impl Target {
    /// Creates a target from package prefixes.
    #[must_use]
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }

    /// Tests whether `package` starts with any configured prefix.
    #[must_use]
    pub fn matches(&self, package: &str) -> bool {
        self.packages.iter().any(|p| package.starts_with(p.as_str()))
    }
}

/// Tests whether any target in the list matches `package`.
#[must_use]
pub fn any_matches(targets: &[Target], package: &str) -> bool {
    targets.iter().any(|t| t.matches(package))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_exact_and_nested_packages() {
        let target = Target::new(["crate::domain"]);
        assert!(target.matches("crate::domain"));
        assert!(target.matches("crate::domain::user"));
        assert!(!target.matches("crate::infra"));
    }

    #[test]
    fn prefix_matching_is_monotonic() {
        let target = Target::new(["a/b"]);
        for suffix in ["", "/c", "c", "/c/d"] {
            assert!(target.matches(&format!("a/b{suffix}")));
        }
        assert!(!target.matches("a/c"));
    }

    #[test]
    fn prefix_matching_ignores_segment_boundaries() {
        let target = Target::new(["crate::dom"]);
        assert!(target.matches("crate::domain"));
    }

    #[test]
    fn empty_target_matches_nothing() {
        let target = Target::default();
        assert!(!target.matches("crate"));
        assert!(!target.matches(""));
    }

    #[test]
    fn empty_prefix_matches_everything() {
        let target = Target::new([""]);
        assert!(target.matches("anything::at::all"));
    }

    #[test]
    fn any_of_several_prefixes() {
        let target = Target::new(["crate::api", "crate::domain"]);
        assert!(target.matches("crate::domain::order"));
        assert!(target.matches("crate::api"));
        assert!(!target.matches("crate::infra"));
    }

    #[test]
    fn any_matches_over_target_list() {
        let targets = vec![Target::default(), Target::new(["crate::app"])];
        assert!(any_matches(&targets, "crate::app::main"));
        assert!(!any_matches(&[], "crate::app"));
    }
}
