// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! A set of token patterns, used for FIRST sets of grammar rules.

use crate::{SyntaxKind, TokenPattern};

#[derive(Clone, Copy)]
pub(crate) struct TokenSet(&'static [TokenPattern]);

impl TokenSet {
    pub(crate) const fn new(patterns: &'static [TokenPattern]) -> TokenSet {
        TokenSet(patterns)
    }

    pub(crate) fn contains(&self, kind: SyntaxKind, text: &str) -> bool {
        self.0.iter().any(|pattern| pattern.matches(kind, text))
    }

    /// The members, written as in error messages.
    pub(crate) fn describe(&self) -> String {
        self.0
            .iter()
            .map(|pattern| pattern.to_string())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

#[test]
fn token_set_works_for_keywords() {
    use crate::T;
    const PRIMITIVES: TokenSet = TokenSet::new(&[T![integer], T![boolean], T![char]]);
    assert!(PRIMITIVES.contains(SyntaxKind::KEYWORD, "Integer"));
    assert!(!PRIMITIVES.contains(SyntaxKind::IDENTIFIER, "integer"));
    assert_eq!(
        PRIMITIVES.describe(),
        "KEYWORD(integer) or KEYWORD(boolean) or KEYWORD(char)"
    );
}
