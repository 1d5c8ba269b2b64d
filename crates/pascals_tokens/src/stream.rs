// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use std::ops::Range;
use std::str::FromStr;

use thiserror::Error;

use crate::token::{Token, TokenKind};

/// Failure to read the persisted token form. Lines are counted from 1.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TokenStreamError {
    #[error("line {line}: expected `KIND(value)`, found `{text}`")]
    Malformed { line: usize, text: String },
    #[error("line {line}: unknown token kind `{kind}`")]
    UnknownKind { line: usize, kind: String },
}

/// Tokens read from their persisted form, together with the byte span each one
/// occupied in the text it was read from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    spans: Vec<Range<usize>>,
}

impl TokenStream {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn spans(&self) -> &[Range<usize>] {
        &self.spans
    }

    /// Span of token `index`. Past the end this is the empty span after the last token,
    /// which is where the end marker sits.
    pub fn span(&self, index: usize) -> Range<usize> {
        match self.spans.get(index) {
            Some(span) => span.clone(),
            None => {
                let end = self.spans.last().map_or(0, |span| span.end);
                end..end
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl FromStr for TokenStream {
    type Err = TokenStreamError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        read_token_stream(text)
    }
}

/// Read tokens written one per line as `KIND(value)`. Blank lines are skipped.
///
/// The value runs from the first `(` to the last `)` of the line, so lexemes that are
/// themselves parentheses, as in `LPARENTHESIS(()`, read back correctly.
pub fn read_token_stream(text: &str) -> Result<TokenStream, TokenStreamError> {
    let mut stream = TokenStream::default();
    let mut offset = 0;
    for (number, raw_line) in text.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += raw_line.len();
        let line = raw_line.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let start = line_start + (line.len() - line.trim_start().len());
        stream.tokens.push(read_token(trimmed, number + 1)?);
        stream.spans.push(start..start + trimmed.len());
    }
    Ok(stream)
}

fn read_token(text: &str, line: usize) -> Result<Token, TokenStreamError> {
    let malformed = || TokenStreamError::Malformed {
        line,
        text: text.to_string(),
    };
    let open = text.find('(').ok_or_else(malformed)?;
    let close = text.rfind(')').ok_or_else(malformed)?;
    if close < open || close + 1 != text.len() {
        return Err(malformed());
    }
    let tag = &text[..open];
    let kind = TokenKind::from_tag(tag).ok_or_else(|| TokenStreamError::UnknownKind {
        line,
        kind: tag.to_string(),
    })?;
    Ok(Token::new(kind, &text[open + 1..close]))
}

/// Write tokens in the persisted form, one per line. End markers are not written.
pub fn render_tokens<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a Token>,
{
    tokens
        .into_iter()
        .filter(|token| !token.is_eof())
        .map(|token| format!("{token}\n"))
        .collect()
}
