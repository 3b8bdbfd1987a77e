//! File-level comment index.
//!
//! `syn` keeps doc comments as attributes but drops every other comment, so
//! comments written inside a function body never show up in its tree. This
//! module parses the file a second time with tree-sitter-rust, where comments
//! survive as `line_comment` and `block_comment` nodes, and groups adjacent
//! ones into [`CommentBlock`]s. Checks then correlate blocks with
//! declarations by line-range containment.

use thiserror::Error;
use tree_sitter::{Language, Node, Parser};

use crate::model::LineSpan;

/// Errors raised while collecting comments.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The Rust grammar could not be loaded into the parser.
    #[error("failed to load the Rust grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser returned no tree.
    #[error("tree-sitter produced no syntax tree")]
    NoTree,
}

/// A maximal run of adjacent comments with no code between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentBlock {
    span: LineSpan,
}

impl CommentBlock {
    /// Creates a block covering `span`.
    #[must_use]
    pub fn new(span: LineSpan) -> Self {
        Self { span }
    }

    /// Lines covered by the block.
    #[must_use]
    pub fn span(&self) -> LineSpan {
        self.span
    }

    /// Number of lines covered, both ends included.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.span.line_count()
    }
}

/// Every comment block of one file, ordered by start line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCommentIndex {
    blocks: Vec<CommentBlock>,
}

impl FileCommentIndex {
    /// Builds an index from blocks in any order.
    #[must_use]
    pub fn from_blocks(blocks: impl IntoIterator<Item = CommentBlock>) -> Self {
        let mut blocks: Vec<CommentBlock> = blocks.into_iter().collect();
        blocks.sort_by_key(|b| (b.span.start(), b.span.end()));
        Self { blocks }
    }

    /// Builds an index from bare spans, one block per span.
    #[must_use]
    pub fn from_spans(spans: impl IntoIterator<Item = LineSpan>) -> Self {
        Self::from_blocks(spans.into_iter().map(CommentBlock::new))
    }

    /// Parses Rust source text and indexes all of its comments.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or the parser
    /// yields no tree.
    pub fn scan(source: &str) -> Result<Self, ScanError> {
        let language: Language = tree_sitter_rust::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        let tree = parser.parse(source, None).ok_or(ScanError::NoTree)?;

        let mut comments = Vec::new();
        collect_comments(tree.root_node(), &mut comments);

        let mut grouper = Grouper::new(source.as_bytes());
        for node in comments {
            grouper.push(node);
        }
        Ok(Self {
            blocks: grouper.finish(),
        })
    }

    /// All blocks, ordered by start line.
    #[must_use]
    pub fn blocks(&self) -> &[CommentBlock] {
        &self.blocks
    }

    /// Number of blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the file has no comments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks lying entirely inside `span`.
    ///
    /// Blocks that merely straddle a boundary are excluded.
    pub fn within(&self, span: LineSpan) -> impl Iterator<Item = &CommentBlock> {
        let first = self.blocks.partition_point(|b| b.span.start() < span.start());
        self.blocks[first..]
            .iter()
            .take_while(move |b| b.span.start() <= span.end())
            .filter(move |b| span.contains(&b.span))
    }
}

fn is_comment(node: &Node<'_>) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

/// Pre-order walk; comment nodes come out in source order.
fn collect_comments<'t>(root: Node<'t>, out: &mut Vec<Node<'t>>) {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if is_comment(&node) {
            out.push(node);
        } else if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

// ────────────────────────────────────────────
// Grouping
// ────────────────────────────────────────────

struct OpenBlock {
    span: LineSpan,
    end_byte: usize,
    after_code: bool,
}

/// Merges comments separated only by whitespace on consecutive lines.
///
/// A block that starts after code on its line (`x += 1; // note`) only takes
/// comments from that same line.
struct Grouper<'s> {
    source: &'s [u8],
    open: Option<OpenBlock>,
    blocks: Vec<CommentBlock>,
}

impl<'s> Grouper<'s> {
    fn new(source: &'s [u8]) -> Self {
        Self {
            source,
            open: None,
            blocks: Vec::new(),
        }
    }

    fn push(&mut self, node: Node<'_>) {
        let span = node_lines(&node);
        let start_byte = node.start_byte();

        if let Some(open) = self.open.as_mut() {
            let joins = self.source.get(open.end_byte..start_byte).is_some_and(is_blank)
                && span.start() <= open.span.end() + 1
                && (!open.after_code || span.start() == open.span.end());
            if joins {
                open.span = open.span.union(&span);
                open.end_byte = node.end_byte();
                return;
            }
        }

        let after_code = self.follows_code(start_byte);
        if let Some(done) = self.open.replace(OpenBlock {
            span,
            end_byte: node.end_byte(),
            after_code,
        }) {
            self.blocks.push(CommentBlock::new(done.span));
        }
    }

    fn follows_code(&self, start_byte: usize) -> bool {
        let head = self.source.get(..start_byte).unwrap_or_default();
        let line_start = head.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
        !is_blank(&head[line_start..])
    }

    fn finish(mut self) -> Vec<CommentBlock> {
        if let Some(done) = self.open.take() {
            self.blocks.push(CommentBlock::new(done.span));
        }
        self.blocks
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

/// 1-indexed lines of a comment node.
///
/// Line comments may own their newline, ending at column 0 of the next row;
/// that row is not part of the comment.
fn node_lines(node: &Node<'_>) -> LineSpan {
    let start = node.start_position();
    let end = node.end_position();
    let end_row = if end.column == 0 && end.row > start.row {
        end.row - 1
    } else {
        end.row
    };
    LineSpan::new(start.row + 1, end_row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(source: &str) -> Vec<(usize, usize)> {
        FileCommentIndex::scan(source)
            .unwrap()
            .blocks()
            .iter()
            .map(|b| (b.span().start(), b.span().end()))
            .collect()
    }

    #[test]
    fn finds_line_and_block_comments() {
        let src = "fn a() {\n    // one\n    let x = 1;\n    /* two\n       lines */\n}\n";
        assert_eq!(spans(src), vec![(2, 2), (4, 5)]);
    }

    #[test]
    fn adjacent_line_comments_merge() {
        let src = "// a\n// b\n// c\nfn f() {}\n";
        let index = FileCommentIndex::scan(src).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.blocks()[0].line_count(), 3);
    }

    #[test]
    fn blank_line_splits_blocks() {
        let src = "// a\n\n// b\nfn f() {}\n";
        assert_eq!(spans(src), vec![(1, 1), (3, 3)]);
    }

    #[test]
    fn code_between_comments_splits_blocks() {
        let src = "fn f() {\n    // a\n    let x = 1;\n    // b\n}\n";
        assert_eq!(spans(src), vec![(2, 2), (4, 4)]);
    }

    #[test]
    fn trailing_comment_stands_alone() {
        let src = "fn f() {\n    let x = 1; // a\n    // b\n    let y = 2;\n}\n";
        assert_eq!(spans(src), vec![(2, 2), (3, 3)]);
    }

    #[test]
    fn trailing_comments_on_one_line_merge() {
        let src = "fn f() {\n    let x = 1; /* a */ // b\n    // c\n}\n";
        assert_eq!(spans(src), vec![(2, 2), (3, 3)]);
    }

    #[test]
    fn closing_brace_comment_does_not_swallow_next_item_comment() {
        let src = "\
fn a() {
    // setup
    let x = 1;
    let y = 2;
    let z = 3;
    let w = 4;
    let v = 5;
    let u = 6;
    let t = 7;
    let s = 8;
    let r = 9;
} // end of a
// next item note
fn b() {}
";
        assert_eq!(spans(src), vec![(2, 2), (12, 12), (13, 13)]);

        let index = FileCommentIndex::scan(src).unwrap();
        let inside: Vec<LineSpan> = index.within(LineSpan::new(1, 12)).map(CommentBlock::span).collect();
        assert_eq!(inside, vec![LineSpan::single(2), LineSpan::single(12)]);
    }

    #[test]
    fn nested_block_comments() {
        let src = "/* outer /* inner */\n still outer */\nfn f() {}\n";
        assert_eq!(spans(src), vec![(1, 2)]);
    }

    #[test]
    fn comment_markers_inside_strings_are_ignored() {
        let src = r##"fn f() {
    let a = "// not a comment";
    let b = r#"/* nor "this" */"#;
    let c = '/';
    let d = b"//";
    // real
}
"##;
        assert_eq!(spans(src), vec![(6, 6)]);
    }

    #[test]
    fn escaped_quotes_do_not_end_strings() {
        let src = "fn f() {\n    let s = \"a \\\" // still string\";\n    // real\n}\n";
        assert_eq!(spans(src), vec![(3, 3)]);
    }

    #[test]
    fn lifetimes_are_not_char_literals() {
        let src = "fn f<'a>(x: &'a str) -> &'a str { x } // tail\n";
        assert_eq!(spans(src), vec![(1, 1)]);
    }

    #[test]
    fn multiline_string_keeps_line_numbers() {
        let src = "const S: &str = \"one\ntwo\nthree\";\n// after\n";
        assert_eq!(spans(src), vec![(4, 4)]);
    }

    #[test]
    fn doc_comments_are_comments_too() {
        let src = "/// doc\n/// more\nfn f() {}\n";
        assert_eq!(spans(src), vec![(1, 2)]);
    }

    #[test]
    fn comments_inside_macro_invocations_are_found() {
        let src = "fn f() {\n    let v = vec![\n        // first\n        1,\n    ];\n}\n";
        assert_eq!(spans(src), vec![(3, 3)]);
    }

    #[test]
    fn within_excludes_straddling_blocks() {
        let index = FileCommentIndex::from_spans([
            LineSpan::new(1, 3),
            LineSpan::new(5, 6),
            LineSpan::new(9, 12),
            LineSpan::new(15, 15),
        ]);
        let inside: Vec<LineSpan> = index.within(LineSpan::new(2, 10)).map(CommentBlock::span).collect();
        assert_eq!(inside, vec![LineSpan::new(5, 6)]);
    }

    #[test]
    fn within_includes_blocks_on_the_boundary() {
        let index = FileCommentIndex::from_spans([LineSpan::new(10, 11), LineSpan::single(20)]);
        assert_eq!(index.within(LineSpan::new(10, 20)).count(), 2);
    }

    #[test]
    fn from_blocks_sorts_by_start() {
        let index = FileCommentIndex::from_spans([LineSpan::single(8), LineSpan::single(2)]);
        assert_eq!(index.blocks()[0].span(), LineSpan::single(2));
    }
}
