// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! This module defines the concrete syntax tree of Pascal-S.
//!
//! The tree provides a single node type, `SyntaxNode`, and a basic traversal API
//! (parent, children, siblings). Leaves are tokens whose text is the lexeme.
//!
//! The *real* implementation is in the (language-agnostic) `rowan` crate, this
//! module just wraps its API.

use std::ops::Range;

use rowan::{GreenNodeBuilder, Language};

use crate::SyntaxKind;

pub use rowan::GreenNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PascalSLanguage {}
impl Language for PascalSLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        SyntaxKind::from(raw.0)
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind.into())
    }
}

pub type SyntaxNode = rowan::SyntaxNode<PascalSLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<PascalSLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<PascalSLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<PascalSLanguage>;

#[derive(Default)]
pub struct SyntaxTreeBuilder {
    inner: GreenNodeBuilder<'static>,
}

impl SyntaxTreeBuilder {
    pub fn finish(self) -> GreenNode {
        self.inner.finish()
    }

    pub fn token(&mut self, kind: SyntaxKind, text: &str) {
        let kind = PascalSLanguage::kind_to_raw(kind);
        self.inner.token(kind, text);
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        let kind = PascalSLanguage::kind_to_raw(kind);
        self.inner.start_node(kind);
    }

    pub fn finish_node(&mut self) {
        self.inner.finish_node();
    }
}

/// Position of `token` in the token stream the tree was built from.
pub fn token_index(token: &SyntaxToken) -> usize {
    let Some(root) = token.parent().and_then(|parent| parent.ancestors().last()) else {
        return 0;
    };
    root.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .position(|t| &t == token)
        .unwrap_or(0)
}

/// The token-stream positions covered by `node`. A node without tokens gets the
/// empty range at the first token that follows it.
pub fn token_range(node: &SyntaxNode) -> Range<usize> {
    match (node.first_token(), node.last_token()) {
        (Some(first), Some(last)) => token_index(&first)..token_index(&last) + 1,
        _ => {
            let start = node.text_range().start();
            let root = node.ancestors().last().unwrap_or_else(|| node.clone());
            let index = root
                .descendants_with_tokens()
                .filter_map(|element| element.into_token())
                .take_while(|t| t.text_range().start() < start)
                .count();
            index..index
        }
    }
}

/// Render `node` as an indented listing: one line per node with its rule label and
/// one line per token as `KIND(value)`.
pub fn debug_tree(node: &SyntaxNode) -> String {
    let mut res = String::new();
    let mut depth = 0usize;
    for event in node.preorder_with_tokens() {
        match event {
            rowan::WalkEvent::Enter(element) => {
                res.push_str(&"  ".repeat(depth));
                match element {
                    rowan::NodeOrToken::Node(node) => res.push_str(node.kind().label()),
                    rowan::NodeOrToken::Token(token) => {
                        res.push_str(&format!("{}({})", token.kind(), token.text()));
                    }
                }
                res.push('\n');
                depth += 1;
            }
            rowan::WalkEvent::Leave(_) => depth -= 1,
        }
    }
    res
}
