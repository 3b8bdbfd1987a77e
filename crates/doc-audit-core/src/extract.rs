//! Declaration extraction from `syn` syntax trees.
//!
//! Maps Rust items onto the audit model:
//!
//! | Rust item | Declaration | Members |
//! |-----------|-------------|---------|
//! | `fn`, `impl` method, trait method with a body | `Function` | - |
//! | `trait` | `Interface` | trait `fn`s |
//! | `struct` | `Struct` | fields (tuple fields by index) |
//!
//! Spans exclude outer attributes, so a doc comment sits just above its
//! declaration's span instead of inside it.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::visit::Visit;
use syn::{
    AttrStyle, Attribute, Block, Fields, ImplItemFn, ItemFn, ItemMod, ItemStruct, ItemTrait, Meta,
    Signature, TraitItem, TraitItemFn, Visibility,
};
use thiserror::Error;

use crate::comments::{FileCommentIndex, ScanError};
use crate::context::FileContext;
use crate::model::{
    DeclHeader, Declaration, FunctionDecl, InterfaceDecl, LineSpan, Member, Position, SourceFile,
    StructDecl,
};

/// Returns the span of the outer doc comment attached to an item.
///
/// Covers `///`, `/** */` and `#[doc = "..."]` alike; consecutive doc
/// attributes form one span from the first to the last line. Doc settings
/// such as `#[doc(hidden)]` or `#[doc(alias = "..")]` carry no text and are
/// not documentation.
#[must_use]
pub fn doc_span(attrs: &[Attribute]) -> Option<LineSpan> {
    attrs
        .iter()
        .filter(|attr| {
            matches!(attr.style, AttrStyle::Outer)
                && matches!(&attr.meta, Meta::NameValue(nv) if nv.path.is_ident("doc"))
        })
        .map(|attr| {
            let span = attr.span();
            LineSpan::new(span.start().line, span.end().line)
        })
        .reduce(|a, b| a.union(&b))
}

/// Extracts every audited declaration of a parsed file, in document order.
#[must_use]
pub fn extract(ctx: &FileContext, ast: &syn::File) -> Vec<Declaration> {
    let mut visitor = DeclarationVisitor {
        ctx,
        modules: Vec::new(),
        declarations: Vec::new(),
    };
    visitor.visit_file(ast);
    visitor.declarations
}

/// Errors from [`parse_source`].
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The content is not valid Rust.
    #[error(transparent)]
    Syntax(#[from] syn::Error),

    /// Comments could not be collected.
    #[error(transparent)]
    Comments(#[from] ScanError),
}

/// Parses a file and builds its [`SourceFile`]: declarations plus comments.
///
/// The returned file carries the context's relative path.
///
/// # Errors
///
/// Returns [`ExtractError::Syntax`] when the content is not valid Rust.
pub fn parse_source(ctx: &FileContext) -> Result<SourceFile, ExtractError> {
    let ast = syn::parse_file(ctx.content)?;
    Ok(SourceFile {
        path: ctx.relative_path.clone(),
        declarations: extract(ctx, &ast),
        comments: FileCommentIndex::scan(ctx.content)?,
    })
}

struct DeclarationVisitor<'a> {
    ctx: &'a FileContext<'a>,
    modules: Vec<String>,
    declarations: Vec<Declaration>,
}

impl DeclarationVisitor<'_> {
    fn package(&self) -> String {
        if self.modules.is_empty() {
            self.ctx.package.clone()
        } else {
            format!("{}::{}", self.ctx.package, self.modules.join("::"))
        }
    }

    fn position(&self, ident: &syn::Ident) -> Position {
        let start = ident.span().start();
        let column = start.column + 1;
        Position::new(start.line, column).with_span(
            self.ctx.offset_for(start.line, column),
            ident.to_string().len(),
        )
    }

    fn span_position(&self, span: Span) -> Position {
        let start = span.start();
        let column = start.column + 1;
        Position::new(start.line, column).with_span(self.ctx.offset_for(start.line, column), 1)
    }

    fn header(&self, ident: &syn::Ident, attrs: &[Attribute], start: Span, end: Span) -> DeclHeader {
        DeclHeader {
            name: ident.to_string(),
            package: self.package(),
            position: self.position(ident),
            span: LineSpan::new(start.start().line, end.end().line),
            doc: doc_span(attrs),
        }
    }

    fn push_function(&mut self, attrs: &[Attribute], vis: &Visibility, sig: &Signature, block: &Block) {
        let start = item_start(vis, sig.span());
        let close = block.brace_token.span.close();
        let header = self.header(&sig.ident, attrs, start, close);
        self.declarations.push(Declaration::Function(FunctionDecl {
            header,
            body: LineSpan::new(block.brace_token.span.open().start().line, close.end().line),
        }));
    }

    fn member(&self, ident: &syn::Ident, attrs: &[Attribute]) -> Member {
        Member {
            name: ident.to_string(),
            position: self.position(ident),
            doc: doc_span(attrs),
        }
    }
}

/// First token after the outer attributes.
fn item_start(vis: &Visibility, rest: Span) -> Span {
    match vis {
        Visibility::Inherited => rest,
        _ => vis.span(),
    }
}

fn struct_end(node: &ItemStruct) -> Span {
    if let Some(semi) = &node.semi_token {
        return semi.span();
    }
    match &node.fields {
        Fields::Named(named) => named.brace_token.span.close(),
        Fields::Unnamed(unnamed) => unnamed.paren_token.span.close(),
        Fields::Unit => node.ident.span(),
    }
}

fn trait_start(node: &ItemTrait) -> Span {
    let keyword = node
        .unsafety
        .map(|u| u.span)
        .or_else(|| node.auto_token.map(|a| a.span))
        .unwrap_or(node.trait_token.span);
    item_start(&node.vis, keyword)
}

impl<'ast> Visit<'ast> for DeclarationVisitor<'_> {
    fn visit_item_mod(&mut self, node: &'ast ItemMod) {
        if node.content.is_none() {
            return;
        }
        self.modules.push(node.ident.to_string());
        syn::visit::visit_item_mod(self, node);
        self.modules.pop();
    }

    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        self.push_function(&node.attrs, &node.vis, &node.sig, &node.block);
        syn::visit::visit_item_fn(self, node);
    }

    fn visit_impl_item_fn(&mut self, node: &'ast ImplItemFn) {
        self.push_function(&node.attrs, &node.vis, &node.sig, &node.block);
        syn::visit::visit_impl_item_fn(self, node);
    }

    fn visit_item_trait(&mut self, node: &'ast ItemTrait) {
        let methods = node
            .items
            .iter()
            .filter_map(|item| match item {
                TraitItem::Fn(f) => Some(self.member(&f.sig.ident, &f.attrs)),
                _ => None,
            })
            .collect();
        let header = self.header(
            &node.ident,
            &node.attrs,
            trait_start(node),
            node.brace_token.span.close(),
        );
        self.declarations
            .push(Declaration::Interface(InterfaceDecl { header, methods }));
        syn::visit::visit_item_trait(self, node);
    }

    fn visit_trait_item_fn(&mut self, node: &'ast TraitItemFn) {
        if let Some(block) = &node.default {
            self.push_function(&node.attrs, &Visibility::Inherited, &node.sig, block);
        }
        syn::visit::visit_trait_item_fn(self, node);
    }

    fn visit_item_struct(&mut self, node: &'ast ItemStruct) {
        let fields = match &node.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .filter_map(|f| f.ident.as_ref().map(|ident| self.member(ident, &f.attrs)))
                .collect(),
            Fields::Unnamed(unnamed) => unnamed
                .unnamed
                .iter()
                .enumerate()
                .map(|(i, f)| Member {
                    name: i.to_string(),
                    position: self.span_position(f.ty.span()),
                    doc: doc_span(&f.attrs),
                })
                .collect(),
            Fields::Unit => Vec::new(),
        };
        let header = self.header(
            &node.ident,
            &node.attrs,
            item_start(&node.vis, node.struct_token.span),
            struct_end(node),
        );
        self.declarations
            .push(Declaration::Struct(StructDecl { header, fields }));
        syn::visit::visit_item_struct(self, node);
    }
}
