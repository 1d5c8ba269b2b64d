// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use pascals_tokens::Token;

use crate::SyntaxKind;

/// Input for the parser: the token kinds and spellings, with the source line of each
/// token when known. Positions past the end read as `EOF`.
#[derive(Debug, Default)]
pub struct Input {
    kind: Vec<SyntaxKind>,
    text: Vec<String>,
    line: Vec<Option<u32>>,
}

impl Input {
    pub fn from_tokens(tokens: &[Token]) -> Input {
        let mut res = Input::default();
        for token in tokens.iter().filter(|token| !token.is_eof()) {
            res.push(token);
        }
        res
    }

    fn push(&mut self, token: &Token) {
        self.kind.push(SyntaxKind::from(token.kind()));
        self.text.push(token.text().to_string());
        self.line.push(token.line());
    }

    pub fn len(&self) -> usize {
        self.kind.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    pub(crate) fn kind(&self, idx: usize) -> SyntaxKind {
        self.kind.get(idx).copied().unwrap_or(SyntaxKind::EOF)
    }

    pub(crate) fn text(&self, idx: usize) -> &str {
        self.text.get(idx).map_or("", String::as_str)
    }

    pub(crate) fn line(&self, idx: usize) -> Option<u32> {
        self.line.get(idx).copied().flatten()
    }

    /// The token at `idx` as written in a token stream, or `end of input`.
    pub(crate) fn describe(&self, idx: usize) -> String {
        match self.kind(idx) {
            SyntaxKind::EOF => "end of input".to_string(),
            kind => format!("{}({})", kind, self.text(idx)),
        }
    }
}
