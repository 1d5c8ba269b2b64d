// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! A small reference scanner from Pascal-S source text to tokens.
//!
//! Production token streams come from the DFA-driven scanner and are read with
//! [`read_token_stream`](crate::read_token_stream). This scanner classifies lexemes the
//! same way and exists so that tests and the demo can start from source text.

use crate::token::{same_word, Token, TokenKind, KEYWORDS};

const ARITHMETIC_WORDS: &[&str] = &["bagi", "mod"];
const LOGICAL_WORDS: &[&str] = &["dan", "atau", "tidak"];

/// Scan `source` into tokens. Every token records its 1-based source line.
/// Characters that start no lexeme become `ERROR` tokens; scanning never fails.
pub fn scan(source: &str) -> Vec<Token> {
    let mut scanner = Scanner {
        source,
        pos: 0,
        line: 1,
        tokens: Vec::new(),
    };
    scanner.run();
    scanner.tokens
}

struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    tokens: Vec<Token>,
}

impl Scanner<'_> {
    fn rest(&self) -> &str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn push(&mut self, kind: TokenKind, len: usize) {
        let text = &self.source[self.pos..self.pos + len];
        self.tokens.push(Token::new(kind, text).with_line(self.line));
        self.pos += len;
    }

    fn run(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                '\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                c if c.is_whitespace() => self.pos += c.len_utf8(),
                '{' => self.comment(),
                c if c.is_ascii_alphabetic() || c == '_' => self.word(),
                c if c.is_ascii_digit() => self.number(),
                '\'' => self.quoted(),
                _ => self.symbol(c),
            }
        }
    }

    fn comment(&mut self) {
        let len = self.rest().find('}').map_or(self.rest().len(), |end| end + 1);
        self.line += self.rest()[..len].matches('\n').count() as u32;
        self.pos += len;
    }

    fn word(&mut self) {
        let rest = self.rest();
        // `selain-itu` and `turun-ke` are single reserved words.
        for keyword in KEYWORDS.iter().filter(|kw| kw.contains('-')) {
            if let Some(candidate) = rest.get(..keyword.len()) {
                let boundary = rest[keyword.len()..]
                    .chars()
                    .next()
                    .map_or(true, |c| !is_word_char(c));
                if boundary && same_word(candidate, keyword) {
                    self.push(TokenKind::Keyword, keyword.len());
                    return;
                }
            }
        }
        let len = rest.find(|c| !is_word_char(c)).unwrap_or(rest.len());
        let word = &rest[..len];
        let kind = if KEYWORDS.iter().any(|kw| same_word(kw, word)) {
            TokenKind::Keyword
        } else if ARITHMETIC_WORDS.iter().any(|w| same_word(w, word)) {
            TokenKind::ArithmeticOperator
        } else if LOGICAL_WORDS.iter().any(|w| same_word(w, word)) {
            TokenKind::LogicalOperator
        } else {
            TokenKind::Identifier
        };
        self.push(kind, len);
    }

    fn number(&mut self) {
        let bytes = self.rest().as_bytes();
        let digits_from = |mut i: usize| {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            i
        };
        let mut len = digits_from(0);
        if bytes.get(len) == Some(&b'.') && bytes.get(len + 1).is_some_and(u8::is_ascii_digit) {
            len = digits_from(len + 1);
        }
        if matches!(bytes.get(len), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(bytes.get(len + 1), Some(b'+' | b'-')));
            if bytes
                .get(len + 1 + sign)
                .is_some_and(u8::is_ascii_digit)
            {
                len = digits_from(len + 1 + sign);
            }
        }
        self.push(TokenKind::Number, len);
    }

    fn quoted(&mut self) {
        let rest = self.rest();
        let line_end = rest.find('\n').unwrap_or(rest.len());
        match rest[1..line_end].find('\'') {
            Some(close) => {
                let len = close + 2;
                let kind = if rest[1..len - 1].chars().count() <= 1 {
                    TokenKind::CharLiteral
                } else {
                    TokenKind::StringLiteral
                };
                self.push(kind, len);
            }
            None => self.push(TokenKind::Error, line_end),
        }
    }

    fn symbol(&mut self, c: char) {
        let second = self.peek_second();
        let (kind, len) = match (c, second) {
            (':', Some('=')) => (TokenKind::AssignOperator, 2),
            (':', _) => (TokenKind::Colon, 1),
            ('<', Some('=' | '>')) | ('>', Some('=')) => (TokenKind::RelationalOperator, 2),
            ('<' | '>' | '=', _) => (TokenKind::RelationalOperator, 1),
            ('.', Some('.')) => (TokenKind::RangeOperator, 2),
            ('.', _) => (TokenKind::Dot, 1),
            ('+' | '-' | '*' | '/', _) => (TokenKind::ArithmeticOperator, 1),
            (';', _) => (TokenKind::Semicolon, 1),
            (',', _) => (TokenKind::Comma, 1),
            ('(', _) => (TokenKind::LParenthesis, 1),
            (')', _) => (TokenKind::RParenthesis, 1),
            ('[', _) => (TokenKind::LBracket, 1),
            (']', _) => (TokenKind::RBracket, 1),
            _ => (TokenKind::Error, c.len_utf8()),
        };
        self.push(kind, len);
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
