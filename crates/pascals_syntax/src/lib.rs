// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! Syntax tree representation of Pascal-S.
//!
//! Parsing produces a lossless tree: every token of the input is a leaf, in input
//! order, and every grammar rule that matched is an interior node. The tree is
//! stored in `rowan`; typed views over it live in [`ast`].

mod parsing;
mod syntax_node;

pub mod ast;

#[cfg(test)]
mod tests;

use std::{marker::PhantomData, sync::Arc};

pub use crate::{
    ast::{AstChildren, AstNode},
    parsing::parse_tokens,
    syntax_node::{
        debug_tree, token_index, token_range, GreenNode, PascalSLanguage, SyntaxElement,
        SyntaxNode, SyntaxNodeChildren, SyntaxToken, SyntaxTreeBuilder,
    },
};
pub use pascals_parser::{Limit, SyntaxError, SyntaxKind, TopEntryPoint, T};
pub use pascals_tokens::{Token, TokenKind};
pub use rowan::{Direction, NodeOrToken, TextRange, TextSize, WalkEvent};

/// `Parse` is the result of parsing: a syntax tree together with the tokens it
/// was built from.
///
/// Note that we always produce a syntax tree; a failed parse yields a
/// [`SyntaxError`] instead of a `Parse`.
#[derive(Debug, PartialEq, Eq)]
pub struct Parse<T> {
    green: GreenNode,
    tokens: Arc<[Token]>,
    _ty: PhantomData<fn() -> T>,
}

impl<T> Clone for Parse<T> {
    fn clone(&self) -> Parse<T> {
        Parse {
            green: self.green.clone(),
            tokens: self.tokens.clone(),
            _ty: PhantomData,
        }
    }
}

impl<T> Parse<T> {
    fn new(green: GreenNode, tokens: &[Token]) -> Parse<T> {
        Parse {
            green,
            tokens: tokens.iter().filter(|token| !token.is_eof()).cloned().collect(),
            _ty: PhantomData,
        }
    }

    pub fn syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// The tokens the tree was built from, with their source lines.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The leaves of the tree in order, read back as tokens. Equal, lexeme by
    /// lexeme, to [`Parse::tokens`].
    pub fn leaf_tokens(&self) -> Vec<Token> {
        self.syntax_node()
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .filter_map(|token| {
                let kind = token.kind().token_kind()?;
                Some(Token::new(kind, token.text()))
            })
            .collect()
    }

    /// Indented listing of the tree, as produced by [`debug_tree`].
    pub fn debug_dump(&self) -> String {
        debug_tree(&self.syntax_node())
    }
}

impl<T: AstNode> Parse<T> {
    /// Converts this parse result into a parse result for an untyped syntax tree.
    pub fn to_syntax(self) -> Parse<SyntaxNode> {
        Parse {
            green: self.green,
            tokens: self.tokens,
            _ty: PhantomData,
        }
    }

    /// Gets the parsed syntax tree as a typed ast node.
    ///
    /// # Panics
    ///
    /// Panics if the root node cannot be casted into the typed ast node
    /// (e.g. if it's an `ERROR` node).
    pub fn tree(&self) -> T {
        T::cast(self.syntax_node()).unwrap()
    }
}

fn parse_as<T: AstNode>(
    entry: TopEntryPoint,
    tokens: &[Token],
    limit: &Limit,
) -> Result<Parse<T>, SyntaxError> {
    let green = parsing::parse_tokens_as(entry, tokens, limit)?;
    Ok(Parse::new(green, tokens))
}

impl ast::Program {
    pub fn parse(tokens: &[Token]) -> Result<Parse<ast::Program>, SyntaxError> {
        Self::parse_with_limit(tokens, &pascals_parser::DEFAULT_DEPTH_LIMIT)
    }

    pub fn parse_with_limit(
        tokens: &[Token],
        limit: &Limit,
    ) -> Result<Parse<ast::Program>, SyntaxError> {
        parse_as(TopEntryPoint::Program, tokens, limit)
    }
}

impl ast::Stmt {
    pub fn parse(tokens: &[Token]) -> Result<Parse<ast::Stmt>, SyntaxError> {
        parse_as(
            TopEntryPoint::Statement,
            tokens,
            &pascals_parser::DEFAULT_DEPTH_LIMIT,
        )
    }
}

impl ast::Expression {
    pub fn parse(tokens: &[Token]) -> Result<Parse<ast::Expression>, SyntaxError> {
        parse_as(
            TopEntryPoint::Expression,
            tokens,
            &pascals_parser::DEFAULT_DEPTH_LIMIT,
        )
    }
}
