//! Rule engine: applies every matching rule to every declaration.

use tracing::{debug, trace};

use crate::context::is_test_file;
use crate::model::{Declaration, SourceFile};
use crate::rule::Settings;
use crate::types::{AuditResult, Diagnostic};

/// Runs [`Settings`] against extracted files.
///
/// The engine holds no state besides the settings, so one instance can be
/// shared across threads and reused for any number of files.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'s> {
    settings: &'s Settings,
}

impl<'s> RuleEngine<'s> {
    /// Creates an engine over `settings`.
    #[must_use]
    pub fn new(settings: &'s Settings) -> Self {
        Self { settings }
    }

    /// Checks one declaration against all three rule sets.
    ///
    /// Every applicable rule runs; there is no priority and no short-circuit.
    #[must_use]
    pub fn check_declaration(&self, file: &SourceFile, decl: &Declaration) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for set in self.settings.rule_sets() {
            for rule in set.applicable(decl.package()) {
                trace!(
                    "{} '{}' in {}: applying {}",
                    decl.kind(),
                    decl.name(),
                    decl.package(),
                    rule.check().name()
                );
                diagnostics.extend(rule.evaluate(file, decl));
            }
        }
        diagnostics
    }

    /// Checks every declaration of one file, in document order.
    #[must_use]
    pub fn check_file(&self, file: &SourceFile) -> Vec<Diagnostic> {
        debug!(
            "Checking {} ({} declarations, {} comment blocks)",
            file.path.display(),
            file.declarations.len(),
            file.comments.len()
        );
        file.declarations
            .iter()
            .flat_map(|decl| self.check_declaration(file, decl))
            .collect()
    }

    /// Checks files in the given order, skipping test files.
    #[must_use]
    pub fn audit<'f, I>(&self, files: I) -> AuditResult
    where
        I: IntoIterator<Item = &'f SourceFile>,
    {
        let mut result = AuditResult::new();
        for file in files {
            if is_test_file(&file.path) {
                trace!("Skipping test file: {}", file.path.display());
                result.files_skipped += 1;
                continue;
            }
            result.diagnostics.extend(self.check_file(file));
            result.files_checked += 1;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::density::DensityParams;
    use crate::checks::presence::{InterfaceDocParams, StructDocParams};
    use crate::comments::FileCommentIndex;
    use crate::model::{DeclHeader, FunctionDecl, InterfaceDecl, LineSpan, Member, Position, StructDecl};
    use crate::rule::Rule;
    use crate::target::Target;

    fn header(name: &str, package: &str, line: usize) -> DeclHeader {
        DeclHeader::new(name, package, Position::new(line, 1), LineSpan::new(line, line + 4))
    }

    fn config_struct(package: &str) -> Declaration {
        Declaration::Struct(StructDecl {
            header: header("Config", package, 1),
            fields: vec![
                Member::new("name", Position::new(2, 5)),
                Member::new("port", Position::new(3, 5)),
            ],
        })
    }

    fn strict_struct_rule(prefix: &str) -> Rule {
        Rule::structure(
            vec![Target::new([prefix])],
            StructDocParams {
                require_headline_comment: true,
                require_field_comment: true,
            },
        )
    }

    #[test]
    fn overlapping_rules_fire_independently() {
        let settings = Settings::new()
            .with_rule(strict_struct_rule("crate"))
            .with_rule(strict_struct_rule("crate::app"));
        let file = SourceFile::new("src/app.rs").with_declaration(config_struct("crate::app"));

        // two matching rules times three findings each
        let diagnostics = RuleEngine::new(&settings).check_file(&file);
        assert_eq!(diagnostics.len(), 6);
    }

    #[test]
    fn unmatched_package_produces_nothing() {
        let settings = Settings::new().with_rule(strict_struct_rule("crate::domain"));
        let file = SourceFile::new("src/app.rs").with_declaration(config_struct("crate::app"));
        assert!(RuleEngine::new(&settings).check_file(&file).is_empty());
    }

    #[test]
    fn declarations_are_checked_in_document_order() {
        let settings = Settings::new()
            .with_rule(strict_struct_rule("crate"))
            .with_rule(Rule::interface(
                vec![Target::new(["crate"])],
                InterfaceDocParams {
                    require_headline_comment: true,
                    require_method_comment: false,
                },
            ));
        let file = SourceFile::new("src/lib.rs")
            .with_declaration(Declaration::Interface(InterfaceDecl {
                header: header("Store", "crate", 1),
                methods: vec![],
            }))
            .with_declaration(Declaration::Struct(StructDecl {
                header: header("Memory", "crate", 10),
                fields: vec![],
            }));
        let lines: Vec<usize> = RuleEngine::new(&settings)
            .check_file(&file)
            .iter()
            .map(|d| d.location.line)
            .collect();
        assert_eq!(lines, vec![1, 10]);
    }

    #[test]
    fn function_rules_use_file_comments() {
        let settings = Settings::new().with_rule(Rule::function(
            vec![Target::new(["crate"])],
            DensityParams::new(10, 10),
        ));
        let function = Declaration::Function(FunctionDecl {
            header: DeclHeader::new("load", "crate", Position::new(1, 1), LineSpan::new(1, 21)),
            body: LineSpan::new(1, 21),
        });
        let bare = SourceFile::new("src/lib.rs").with_declaration(function.clone());
        let commented = bare
            .clone()
            .with_comments(FileCommentIndex::from_spans([LineSpan::new(4, 6)]));

        let engine = RuleEngine::new(&settings);
        assert_eq!(engine.check_file(&bare).len(), 1);
        assert!(engine.check_file(&commented).is_empty());
    }

    #[test]
    fn audit_skips_test_files() {
        let settings = Settings::new().with_rule(strict_struct_rule("crate"));
        let files = vec![
            SourceFile::new("src/config_test.rs").with_declaration(config_struct("crate::config_test")),
            SourceFile::new("tests/integration.rs").with_declaration(config_struct("crate")),
            SourceFile::new("src/config.rs").with_declaration(config_struct("crate::config")),
        ];
        let result = RuleEngine::new(&settings).audit(&files);
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.files_skipped, 2);
        assert!(result
            .diagnostics
            .iter()
            .all(|d| d.location.file.ends_with("config.rs")));
        assert_eq!(result.diagnostics.len(), 3);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Settings>();
        assert_send_sync::<RuleEngine<'static>>();
    }
}
