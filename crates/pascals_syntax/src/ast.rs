// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree, layered on top of untyped `SyntaxNode`s

mod node_ext;
mod nodes;
mod operators;

use std::marker::PhantomData;

use crate::{
    syntax_node::{SyntaxNode, SyntaxNodeChildren, SyntaxToken},
    SyntaxKind,
};

pub use self::{
    node_ext::{Accessor, FactorKind, Stmt, Subprogram, TypeSpecKind},
    nodes::*,
    operators::{ArithOp, BinaryOp, LogicOp, RelOp, UnaryOp},
};

// NOTE! "typed ast" here does not mean annotated with types in the target language.
// It means that rather than encoding syntactic elements with enum variants, they
// are encoded via types, i.e. `struct`s.
/// The main trait to go from untyped `SyntaxNode` to a typed ast. The
/// conversion itself has zero runtime cost: ast and syntax nodes have exactly
/// the same representation: a pointer to the tree root and a pointer to the
/// node itself.
pub trait AstNode {
    fn can_cast(kind: SyntaxKind) -> bool
    where
        Self: Sized;

    fn cast(syntax: SyntaxNode) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &SyntaxNode;

    /// Lexemes under this node joined without separators.
    fn text(&self) -> String {
        self.syntax().text().to_string()
    }
}

/// An iterator over `SyntaxNode` children of a particular AST type.
#[derive(Debug, Clone)]
pub struct AstChildren<N> {
    inner: SyntaxNodeChildren,
    ph: PhantomData<N>,
}

impl<N> AstChildren<N> {
    fn new(parent: &SyntaxNode) -> Self {
        AstChildren {
            inner: parent.children(),
            ph: PhantomData,
        }
    }
}

impl<N: AstNode> Iterator for AstChildren<N> {
    type Item = N;
    fn next(&mut self) -> Option<N> {
        self.inner.find_map(N::cast)
    }
}

mod support {
    use super::{AstChildren, AstNode, SyntaxKind, SyntaxNode, SyntaxToken};

    pub(super) fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
        parent.children().find_map(N::cast)
    }

    pub(super) fn children<N: AstNode>(parent: &SyntaxNode) -> AstChildren<N> {
        AstChildren::new(parent)
    }

    pub(super) fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
        parent
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|it| it.kind() == kind)
    }

    /// First direct token child that is one of `kinds`.
    pub(super) fn token_of(parent: &SyntaxNode, kinds: &[SyntaxKind]) -> Option<SyntaxToken> {
        parent
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|it| kinds.contains(&it.kind()))
    }

    /// Direct keyword child spelled `word`.
    pub(super) fn keyword(parent: &SyntaxNode, word: &str) -> Option<SyntaxToken> {
        parent
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|it| {
                it.kind() == SyntaxKind::KEYWORD && pascals_tokens::same_word(it.text(), word)
            })
    }
}

#[test]
fn assert_ast_is_object_safe() {
    fn _f(_: &dyn AstNode) {}
}
