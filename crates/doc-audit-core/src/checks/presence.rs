//! Headline and per-member documentation of traits and structs.
//!
//! A "headline" comment is the doc comment attached to the type itself.
//! Member comments are the doc comments attached to each trait method or
//! struct field. Attachment is whatever the front-end recorded on the node;
//! no line-range correlation happens here.

use std::path::Path;

use crate::model::{DeclHeader, DeclKind, InterfaceDecl, Member, StructDecl};
use crate::types::{Diagnostic, Location};

/// Check name for interface (trait) diagnostics.
pub const INTERFACE_NAME: &str = "interface-docs";

/// Check name for struct diagnostics.
pub const STRUCT_NAME: &str = "struct-docs";

/// Switches for the interface check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterfaceDocParams {
    /// Require a doc comment on the trait itself.
    pub require_headline_comment: bool,
    /// Require a doc comment on every trait method.
    pub require_method_comment: bool,
}

/// Switches for the struct check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructDocParams {
    /// Require a doc comment on the struct itself.
    pub require_headline_comment: bool,
    /// Require a doc comment on every field.
    pub require_field_comment: bool,
}

/// Checks a trait declaration.
#[must_use]
pub fn check_interface(
    file: &Path,
    decl: &InterfaceDecl,
    params: &InterfaceDocParams,
) -> Vec<Diagnostic> {
    check_documented(
        file,
        INTERFACE_NAME,
        DeclKind::Interface,
        &decl.header,
        &decl.methods,
        params.require_headline_comment,
        params.require_method_comment,
    )
}

/// Checks a struct declaration.
#[must_use]
pub fn check_struct(file: &Path, decl: &StructDecl, params: &StructDocParams) -> Vec<Diagnostic> {
    check_documented(
        file,
        STRUCT_NAME,
        DeclKind::Struct,
        &decl.header,
        &decl.fields,
        params.require_headline_comment,
        params.require_field_comment,
    )
}

fn check_documented(
    file: &Path,
    rule: &str,
    kind: DeclKind,
    header: &DeclHeader,
    members: &[Member],
    require_headline: bool,
    require_members: bool,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if require_headline && header.doc.is_none() {
        diagnostics.push(Diagnostic::new(
            rule,
            Location::at(file.to_path_buf(), header.position),
            format!("missing headline comment for {kind} '{}'", header.name),
        ));
    }

    if require_members {
        diagnostics.extend(members.iter().filter(|m| !m.is_documented()).map(|m| {
            Diagnostic::new(
                rule,
                Location::at(file.to_path_buf(), m.position),
                format!(
                    "missing comment for member '{}' of {kind} '{}'",
                    m.name, header.name
                ),
            )
        }));
    }

    diagnostics
}
