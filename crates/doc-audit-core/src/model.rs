//! Pure data model for audited declarations.
//!
//! This module contains no syn and no I/O. Front-ends (see [`crate::extract`])
//! produce these types; checks only ever read them.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::comments::FileCommentIndex;

// ────────────────────────────────────────────
// Spans
// ────────────────────────────────────────────

/// An inclusive range of 1-indexed source lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineSpan {
    start: usize,
    end: usize,
}

impl LineSpan {
    /// Creates a span, swapping the bounds if they arrive reversed.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// A span covering exactly one line.
    #[must_use]
    pub fn single(line: usize) -> Self {
        Self::new(line, line)
    }

    /// First line of the span.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last line of the span.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Distance between the last and the first line (`end - start`).
    ///
    /// Used to measure declarations: a function whose braces sit on lines
    /// 1 and 20 has a delta of 19.
    #[must_use]
    pub fn delta(&self) -> usize {
        self.end - self.start
    }

    /// Number of lines covered, both bounds included.
    ///
    /// Used to measure comments: a comment on lines 4..=6 covers 3 lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }

    /// Whether `other` lies entirely inside this span.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Number of lines shared by both spans.
    #[must_use]
    pub fn overlap(&self, other: &Self) -> usize {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end < start {
            0
        } else {
            end - start + 1
        }
    }

    /// Smallest span covering both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for LineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "L{}", self.start)
        } else {
            write!(f, "L{}-L{}", self.start, self.end)
        }
    }
}

/// Where a declaration or member name sits in its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in the file, when the front-end knows it.
    pub offset: usize,
    /// Length of the highlighted name in bytes.
    pub length: usize,
}

impl Position {
    /// Creates a position from a line and a column.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this position.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

// ────────────────────────────────────────────
// Declarations
// ────────────────────────────────────────────

/// Kind of an audited declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    /// `fn` item or method with a body.
    Function,
    /// `trait` item.
    Interface,
    /// `struct` item.
    Struct,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Interface => write!(f, "interface"),
            Self::Struct => write!(f, "struct"),
        }
    }
}

/// A trait method or struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Member name (field index for tuple fields).
    pub name: String,
    /// Position of the member name.
    pub position: Position,
    /// Span of the directly-attached doc comment.
    pub doc: Option<LineSpan>,
}

impl Member {
    /// Creates an undocumented member.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            doc: None,
        }
    }

    /// Attaches a doc comment span.
    #[must_use]
    pub fn with_doc(mut self, doc: LineSpan) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Whether the member carries its own doc comment.
    #[must_use]
    pub fn is_documented(&self) -> bool {
        self.doc.is_some()
    }
}

/// Fields shared by every declaration kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclHeader {
    /// Declared name.
    pub name: String,
    /// Owning package path (e.g. `crate::domain::user`).
    pub package: String,
    /// Position of the declared name.
    pub position: Position,
    /// Full span of the declaration, outer attributes excluded.
    pub span: LineSpan,
    /// Span of the directly-attached doc comment.
    pub doc: Option<LineSpan>,
}

impl DeclHeader {
    /// Creates a header without a doc comment.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        package: impl Into<String>,
        position: Position,
        span: LineSpan,
    ) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            position,
            span,
            doc: None,
        }
    }

    /// Attaches a doc comment span.
    #[must_use]
    pub fn with_doc(mut self, doc: LineSpan) -> Self {
        self.doc = Some(doc);
        self
    }
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    /// Name, package, span and doc comment.
    pub header: DeclHeader,
    /// Span of the body block.
    pub body: LineSpan,
}

/// An interface (trait) declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    /// Name, package, span and doc comment.
    pub header: DeclHeader,
    /// Method signatures in declaration order.
    pub methods: Vec<Member>,
}

/// A struct declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    /// Name, package, span and doc comment.
    pub header: DeclHeader,
    /// Fields in declaration order.
    pub fields: Vec<Member>,
}

/// Any declaration the audit understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// See [`FunctionDecl`].
    Function(FunctionDecl),
    /// See [`InterfaceDecl`].
    Interface(InterfaceDecl),
    /// See [`StructDecl`].
    Struct(StructDecl),
}

impl Declaration {
    /// Returns the kind tag.
    #[must_use]
    pub fn kind(&self) -> DeclKind {
        match self {
            Self::Function(_) => DeclKind::Function,
            Self::Interface(_) => DeclKind::Interface,
            Self::Struct(_) => DeclKind::Struct,
        }
    }

    /// Returns the shared header.
    #[must_use]
    pub fn header(&self) -> &DeclHeader {
        match self {
            Self::Function(f) => &f.header,
            Self::Interface(i) => &i.header,
            Self::Struct(s) => &s.header,
        }
    }

    /// Declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.header().name
    }

    /// Owning package path.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.header().package
    }
}

// ────────────────────────────────────────────
// Files
// ────────────────────────────────────────────

/// One file's worth of extracted declarations and comments.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path reported in diagnostics.
    pub path: PathBuf,
    /// Declarations in document order.
    pub declarations: Vec<Declaration>,
    /// Every comment block in the file.
    pub comments: FileCommentIndex,
}

impl SourceFile {
    /// Creates a file with no declarations and no comments.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            declarations: Vec::new(),
            comments: FileCommentIndex::default(),
        }
    }

    /// Appends a declaration.
    #[must_use]
    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Replaces the comment index.
    #[must_use]
    pub fn with_comments(mut self, comments: FileCommentIndex) -> Self {
        self.comments = comments;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_and_line_count_differ_by_one() {
        let span = LineSpan::new(1, 20);
        assert_eq!(span.delta(), 19);
        assert_eq!(span.line_count(), 20);
    }

    #[test]
    fn reversed_bounds_are_normalised() {
        let span = LineSpan::new(9, 3);
        assert_eq!(span.start(), 3);
        assert_eq!(span.end(), 9);
    }

    #[test]
    fn containment_requires_both_bounds() {
        let outer = LineSpan::new(10, 20);
        assert!(outer.contains(&LineSpan::new(10, 20)));
        assert!(outer.contains(&LineSpan::new(12, 14)));
        assert!(!outer.contains(&LineSpan::new(9, 12)));
        assert!(!outer.contains(&LineSpan::new(18, 21)));
    }

    #[test]
    fn overlap_counts_shared_lines() {
        let a = LineSpan::new(1, 5);
        assert_eq!(a.overlap(&LineSpan::new(4, 8)), 2);
        assert_eq!(a.overlap(&LineSpan::new(6, 8)), 0);
        assert_eq!(a.overlap(&LineSpan::single(5)), 1);
    }

    #[test]
    fn display_span() {
        assert_eq!(LineSpan::single(4).to_string(), "L4");
        assert_eq!(LineSpan::new(4, 7).to_string(), "L4-L7");
    }

    #[test]
    fn declaration_accessors() {
        let decl = Declaration::Struct(StructDecl {
            header: DeclHeader::new("Config", "crate::app", Position::new(3, 12), LineSpan::new(3, 6)),
            fields: vec![Member::new("name", Position::new(4, 5))],
        });
        assert_eq!(decl.kind(), DeclKind::Struct);
        assert_eq!(decl.name(), "Config");
        assert_eq!(decl.package(), "crate::app");
        assert!(decl.header().doc.is_none());
    }
}
