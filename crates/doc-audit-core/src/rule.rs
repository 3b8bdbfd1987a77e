//! Rules, rule sets, and the immutable settings they live in.
//!
//! A [`Rule`] pairs package [`Target`]s with one [`Check`]. Every check kind
//! goes through the same two operations, [`Rule::is_applicable`] and
//! [`Rule::evaluate`], so the engine needs one loop instead of one per kind.

use std::fmt;

use crate::checks::density::{self, DensityParams};
use crate::checks::presence::{self, InterfaceDocParams, StructDocParams};
use crate::model::{DeclKind, Declaration, SourceFile};
use crate::target::{self, Target};
use crate::types::Diagnostic;

/// The analysis a rule performs, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Inline comment density of functions.
    Density(DensityParams),
    /// Headline and method comments of traits.
    InterfaceDocs(InterfaceDocParams),
    /// Headline and field comments of structs.
    StructDocs(StructDocParams),
}

impl Check {
    /// The declaration kind this check applies to.
    #[must_use]
    pub fn kind(&self) -> DeclKind {
        match self {
            Self::Density(_) => DeclKind::Function,
            Self::InterfaceDocs(_) => DeclKind::Interface,
            Self::StructDocs(_) => DeclKind::Struct,
        }
    }

    /// Name reported in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Density(_) => density::NAME,
            Self::InterfaceDocs(_) => presence::INTERFACE_NAME,
            Self::StructDocs(_) => presence::STRUCT_NAME,
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Density(p) => write!(
                f,
                "{} (min_comment_density = {}%, min_lines_of_code = {})",
                self.name(),
                p.min_comment_density,
                p.min_lines_of_code
            ),
            Self::InterfaceDocs(p) => write!(
                f,
                "{} (require_headline_comment = {}, require_method_comment = {})",
                self.name(),
                p.require_headline_comment,
                p.require_method_comment
            ),
            Self::StructDocs(p) => write!(
                f,
                "{} (require_headline_comment = {}, require_field_comment = {})",
                self.name(),
                p.require_headline_comment,
                p.require_field_comment
            ),
        }
    }
}

/// A check restricted to the packages selected by its targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    targets: Vec<Target>,
    check: Check,
}

impl Rule {
    /// Creates a rule from targets and a check.
    #[must_use]
    pub fn new(targets: Vec<Target>, check: Check) -> Self {
        Self { targets, check }
    }

    /// Creates a function density rule.
    #[must_use]
    pub fn function(targets: Vec<Target>, params: DensityParams) -> Self {
        Self::new(targets, Check::Density(params))
    }

    /// Creates a trait documentation rule.
    #[must_use]
    pub fn interface(targets: Vec<Target>, params: InterfaceDocParams) -> Self {
        Self::new(targets, Check::InterfaceDocs(params))
    }

    /// Creates a struct documentation rule.
    #[must_use]
    pub fn structure(targets: Vec<Target>, params: StructDocParams) -> Self {
        Self::new(targets, Check::StructDocs(params))
    }

    /// The targets selecting packages for this rule.
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// The check this rule runs.
    #[must_use]
    pub fn check(&self) -> &Check {
        &self.check
    }

    /// Whether at least one target matches `package`.
    #[must_use]
    pub fn is_applicable(&self, package: &str) -> bool {
        target::any_matches(&self.targets, package)
    }

    /// Runs the check against one declaration of `file`.
    ///
    /// Declarations of another kind than the check's yield nothing.
    #[must_use]
    pub fn evaluate(&self, file: &SourceFile, decl: &Declaration) -> Vec<Diagnostic> {
        match (&self.check, decl) {
            (Check::Density(params), Declaration::Function(f)) => {
                density::check(&file.path, f, &file.comments, params)
                    .into_iter()
                    .collect()
            }
            (Check::InterfaceDocs(params), Declaration::Interface(i)) => {
                presence::check_interface(&file.path, i, params)
            }
            (Check::StructDocs(params), Declaration::Struct(s)) => {
                presence::check_struct(&file.path, s, params)
            }
            _ => Vec::new(),
        }
    }
}

/// Rules of one declaration kind, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    kind: DeclKind,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates an empty set for `kind`.
    #[must_use]
    pub fn new(kind: DeclKind) -> Self {
        Self {
            kind,
            rules: Vec::new(),
        }
    }

    /// The declaration kind of this set.
    #[must_use]
    pub fn kind(&self) -> DeclKind {
        self.kind
    }

    /// Appends a rule.
    ///
    /// # Errors
    ///
    /// Returns the rule back if its check targets another declaration kind.
    pub fn push(&mut self, rule: Rule) -> Result<(), Rule> {
        if rule.check.kind() != self.kind {
            return Err(rule);
        }
        self.rules.push(rule);
        Ok(())
    }

    /// All rules, in insertion order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules whose targets match `package`, in insertion order.
    pub fn applicable<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |r| r.is_applicable(package))
    }
}

/// The three rule sets, built once and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    functions: RuleSet,
    interfaces: RuleSet,
    structs: RuleSet,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Creates settings without rules.
    #[must_use]
    pub fn new() -> Self {
        Self {
            functions: RuleSet::new(DeclKind::Function),
            interfaces: RuleSet::new(DeclKind::Interface),
            structs: RuleSet::new(DeclKind::Struct),
        }
    }

    /// Adds a rule to the set matching its check kind.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.add_rule(rule);
        self
    }

    /// Adds a rule to the set matching its check kind.
    pub fn add_rule(&mut self, rule: Rule) {
        let set = self.set_mut(rule.check.kind());
        if let Err(rule) = set.push(rule) {
            tracing::warn!("{} rule does not belong in the {} set", rule.check.kind(), set.kind());
        }
    }

    fn set_mut(&mut self, kind: DeclKind) -> &mut RuleSet {
        match kind {
            DeclKind::Function => &mut self.functions,
            DeclKind::Interface => &mut self.interfaces,
            DeclKind::Struct => &mut self.structs,
        }
    }

    /// Function rules.
    #[must_use]
    pub fn functions(&self) -> &RuleSet {
        &self.functions
    }

    /// Interface rules.
    #[must_use]
    pub fn interfaces(&self) -> &RuleSet {
        &self.interfaces
    }

    /// Struct rules.
    #[must_use]
    pub fn structs(&self) -> &RuleSet {
        &self.structs
    }

    /// All rule sets in evaluation order.
    #[must_use]
    pub fn rule_sets(&self) -> [&RuleSet; 3] {
        [&self.functions, &self.interfaces, &self.structs]
    }

    /// Total number of rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rule_sets().iter().map(|s| s.len()).sum()
    }

    /// Whether no rule is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rule_count() == 0
    }
}
