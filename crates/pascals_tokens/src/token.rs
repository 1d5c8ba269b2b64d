// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Reserved words recognized by the scanner. Spellings are matched with [`same_word`].
pub const KEYWORDS: &[&str] = &[
    "program",
    "variabel",
    "mulai",
    "selesai",
    "jika",
    "maka",
    "selain-itu",
    "selama",
    "lakukan",
    "untuk",
    "ke",
    "turun-ke",
    "integer",
    "boolean",
    "char",
    "larik",
    "dari",
    "prosedur",
    "fungsi",
    "konstanta",
    "tipe",
    "true",
    "false",
    "ulangi",
    "sampai",
    "kasus",
    "rekaman",
    "writeln",
];

/// The tag carried by every lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    CharLiteral,
    StringLiteral,
    ArithmeticOperator,
    RelationalOperator,
    LogicalOperator,
    AssignOperator,
    Semicolon,
    Comma,
    Colon,
    Dot,
    LParenthesis,
    RParenthesis,
    LBracket,
    RBracket,
    RangeOperator,
    /// A lexeme the scanner could not classify, e.g. an unterminated quote.
    Error,
    /// End marker. Never persisted. Returned when looking past the last token.
    Eof,
}

impl TokenKind {
    /// Every kind that may appear in a persisted token stream.
    pub const PERSISTED: [TokenKind; 19] = [
        TokenKind::Keyword,
        TokenKind::Identifier,
        TokenKind::Number,
        TokenKind::CharLiteral,
        TokenKind::StringLiteral,
        TokenKind::ArithmeticOperator,
        TokenKind::RelationalOperator,
        TokenKind::LogicalOperator,
        TokenKind::AssignOperator,
        TokenKind::Semicolon,
        TokenKind::Comma,
        TokenKind::Colon,
        TokenKind::Dot,
        TokenKind::LParenthesis,
        TokenKind::RParenthesis,
        TokenKind::LBracket,
        TokenKind::RBracket,
        TokenKind::RangeOperator,
        TokenKind::Error,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::CharLiteral => "CHAR_LITERAL",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::ArithmeticOperator => "ARITHMETIC_OPERATOR",
            TokenKind::RelationalOperator => "RELATIONAL_OPERATOR",
            TokenKind::LogicalOperator => "LOGICAL_OPERATOR",
            TokenKind::AssignOperator => "ASSIGN_OPERATOR",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",
            TokenKind::Dot => "DOT",
            TokenKind::LParenthesis => "LPARENTHESIS",
            TokenKind::RParenthesis => "RPARENTHESIS",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::RangeOperator => "RANGE_OPERATOR",
            TokenKind::Error => "ERROR",
            TokenKind::Eof => "EOF",
        }
    }

    /// Inverse of [`TokenKind::tag`] for persisted kinds. `EOF` is not accepted.
    pub fn from_tag(tag: &str) -> Option<TokenKind> {
        TokenKind::PERSISTED
            .iter()
            .copied()
            .find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One lexeme. `line` is the source line when the scanner recorded it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    text: String,
    line: Option<u32>,
}

impl Token {
    pub fn new<T: Into<String>>(kind: TokenKind, text: T) -> Token {
        Token {
            kind,
            text: text.into(),
            line: None,
        }
    }

    pub fn with_line(mut self, line: u32) -> Token {
        self.line = Some(line);
        self
    }

    pub fn eof() -> Token {
        Token::new(TokenKind::Eof, "")
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && same_word(&self.text, word)
    }

    /// Same kind and lexeme. The line is ignored.
    pub fn same_lexeme(&self, other: &Token) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind.tag(), self.text)
    }
}

/// Compare two spellings of a reserved word, ignoring ASCII case and treating
/// `-` and `_` as the same character.
pub fn same_word(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .all(|(x, y)| fold_byte(x) == fold_byte(y))
}

/// The canonical spelling used to compare reserved words: lower case, `_` folded to `-`.
pub fn normalize_word(word: &str) -> String {
    word.chars()
        .map(|c| if c == '_' { '-' } else { c.to_ascii_lowercase() })
        .collect()
}

fn fold_byte(b: u8) -> u8 {
    if b == b'_' {
        b'-'
    } else {
        b.to_ascii_lowercase()
    }
}
