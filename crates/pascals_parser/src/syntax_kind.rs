// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! Defines [`SyntaxKind`], a fieldless enum of every token tag and grammar rule of
//! Pascal-S, and [`TokenPattern`], which the `T!` macro builds.

use std::fmt;

use pascals_tokens::{same_word, TokenKind};

/// The kind of a syntax element. Token kinds mirror [`TokenKind`]. Node kinds are
/// one per grammar rule and render as the rule label, e.g. `<if-statement>`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    EOF,
    // tokens
    KEYWORD,
    IDENTIFIER,
    NUMBER,
    CHAR_LITERAL,
    STRING_LITERAL,
    ARITHMETIC_OPERATOR,
    RELATIONAL_OPERATOR,
    LOGICAL_OPERATOR,
    ASSIGN_OPERATOR,
    SEMICOLON,
    COMMA,
    COLON,
    DOT,
    LPARENTHESIS,
    RPARENTHESIS,
    LBRACKET,
    RBRACKET,
    RANGE_OPERATOR,
    ERROR,
    // nodes
    PROGRAM,
    PROGRAM_HEADER,
    DECLARATION_PART,
    CONST_DECLARATION,
    CONST_DEFINITION,
    CONSTANT,
    TYPE_DECLARATION,
    TYPE_DEFINITION,
    VAR_DECLARATION,
    VAR_GROUP,
    IDENTIFIER_LIST,
    TYPE,
    ARRAY_TYPE,
    RANGE,
    RECORD_TYPE,
    FIELD_GROUP,
    PROCEDURE_DECLARATION,
    FUNCTION_DECLARATION,
    FORMAL_PARAMETER_LIST,
    PARAMETER_GROUP,
    COMPOUND_STATEMENT,
    STATEMENT_LIST,
    ASSIGNMENT_STATEMENT,
    PROCEDURE_CALL,
    PARAMETER_LIST,
    IF_STATEMENT,
    WHILE_STATEMENT,
    FOR_STATEMENT,
    REPEAT_STATEMENT,
    EXPRESSION,
    SIMPLE_EXPRESSION,
    TERM,
    FACTOR,
    VARIABLE,
    INDEX_ACCESS,
    FIELD_ACCESS,
    FUNCTION_CALL,
    RELATIONAL_OP,
    ADDITIVE_OP,
    MULTIPLICATIVE_OP,
    #[doc(hidden)]
    __LAST,
}

use self::SyntaxKind::*;

impl From<u16> for SyntaxKind {
    #[inline]
    fn from(d: u16) -> SyntaxKind {
        assert!(d <= (SyntaxKind::__LAST as u16));
        unsafe { std::mem::transmute::<u16, SyntaxKind>(d) }
    }
}

impl From<SyntaxKind> for u16 {
    #[inline]
    fn from(k: SyntaxKind) -> u16 {
        k as u16
    }
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> SyntaxKind {
        match kind {
            TokenKind::Keyword => KEYWORD,
            TokenKind::Identifier => IDENTIFIER,
            TokenKind::Number => NUMBER,
            TokenKind::CharLiteral => CHAR_LITERAL,
            TokenKind::StringLiteral => STRING_LITERAL,
            TokenKind::ArithmeticOperator => ARITHMETIC_OPERATOR,
            TokenKind::RelationalOperator => RELATIONAL_OPERATOR,
            TokenKind::LogicalOperator => LOGICAL_OPERATOR,
            TokenKind::AssignOperator => ASSIGN_OPERATOR,
            TokenKind::Semicolon => SEMICOLON,
            TokenKind::Comma => COMMA,
            TokenKind::Colon => COLON,
            TokenKind::Dot => DOT,
            TokenKind::LParenthesis => LPARENTHESIS,
            TokenKind::RParenthesis => RPARENTHESIS,
            TokenKind::LBracket => LBRACKET,
            TokenKind::RBracket => RBRACKET,
            TokenKind::RangeOperator => RANGE_OPERATOR,
            TokenKind::Error => ERROR,
            TokenKind::Eof => EOF,
        }
    }
}

impl SyntaxKind {
    #[inline]
    pub fn is_token(self) -> bool {
        self <= ERROR
    }

    #[inline]
    pub fn is_node(self) -> bool {
        self >= PROGRAM && self < __LAST
    }

    /// The token tag for token kinds, `None` for nodes.
    pub fn token_kind(self) -> Option<TokenKind> {
        TokenKind::PERSISTED
            .iter()
            .copied()
            .chain(std::iter::once(TokenKind::Eof))
            .find(|kind| SyntaxKind::from(*kind) == self)
    }

    /// The rule label for nodes, the token tag for tokens.
    pub fn label(self) -> &'static str {
        if let Some(kind) = self.token_kind() {
            return kind.tag();
        }
        match self {
            PROGRAM => "<program>",
            PROGRAM_HEADER => "<program-header>",
            DECLARATION_PART => "<declaration-part>",
            CONST_DECLARATION => "<const-declaration>",
            CONST_DEFINITION => "<const-definition>",
            CONSTANT => "<constant>",
            TYPE_DECLARATION => "<type-declaration>",
            TYPE_DEFINITION => "<type-definition>",
            VAR_DECLARATION => "<var-declaration>",
            VAR_GROUP => "<var-group>",
            IDENTIFIER_LIST => "<identifier-list>",
            TYPE => "<type>",
            ARRAY_TYPE => "<array-type>",
            RANGE => "<range>",
            RECORD_TYPE => "<record-type>",
            FIELD_GROUP => "<field-group>",
            PROCEDURE_DECLARATION => "<procedure-declaration>",
            FUNCTION_DECLARATION => "<function-declaration>",
            FORMAL_PARAMETER_LIST => "<formal-parameter-list>",
            PARAMETER_GROUP => "<parameter-group>",
            COMPOUND_STATEMENT => "<compound-statement>",
            STATEMENT_LIST => "<statement-list>",
            ASSIGNMENT_STATEMENT => "<assignment-statement>",
            PROCEDURE_CALL => "<procedure-call>",
            PARAMETER_LIST => "<parameter-list>",
            IF_STATEMENT => "<if-statement>",
            WHILE_STATEMENT => "<while-statement>",
            FOR_STATEMENT => "<for-statement>",
            REPEAT_STATEMENT => "<repeat-statement>",
            EXPRESSION => "<expression>",
            SIMPLE_EXPRESSION => "<simple-expression>",
            TERM => "<term>",
            FACTOR => "<factor>",
            VARIABLE => "<variable>",
            INDEX_ACCESS => "<index-access>",
            FIELD_ACCESS => "<field-access>",
            FUNCTION_CALL => "<function-call>",
            RELATIONAL_OP => "<relational-operator>",
            ADDITIVE_OP => "<additive-operator>",
            MULTIPLICATIVE_OP => "<multiplicative-operator>",
            _ => "<unknown>",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A token kind, optionally narrowed to one spelling. Keyword and word-operator
/// spellings compare with [`same_word`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenPattern {
    pub kind: SyntaxKind,
    pub text: Option<&'static str>,
}

impl TokenPattern {
    pub fn matches(&self, kind: SyntaxKind, text: &str) -> bool {
        self.kind == kind && self.text.map_or(true, |want| same_word(want, text))
    }
}

impl From<SyntaxKind> for TokenPattern {
    fn from(kind: SyntaxKind) -> TokenPattern {
        TokenPattern { kind, text: None }
    }
}

impl fmt::Display for TokenPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text {
            Some(text) => write!(f, "{}({})", self.kind, pascals_tokens::normalize_word(text)),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Build a [`TokenPattern`] from the spelling of a punctuation token, an operator,
/// or a reserved word. Hyphenated words are written with `_`, as in `T![selain_itu]`.
#[macro_export]
macro_rules! T {
    [;] => { $crate::T!(@kind SEMICOLON) };
    [,] => { $crate::T!(@kind COMMA) };
    [:] => { $crate::T!(@kind COLON) };
    [.] => { $crate::T!(@kind DOT) };
    [..] => { $crate::T!(@kind RANGE_OPERATOR) };
    [:=] => { $crate::T!(@kind ASSIGN_OPERATOR) };
    ['('] => { $crate::T!(@kind LPARENTHESIS) };
    [')'] => { $crate::T!(@kind RPARENTHESIS) };
    ['['] => { $crate::T!(@kind LBRACKET) };
    [']'] => { $crate::T!(@kind RBRACKET) };
    [=] => { $crate::T!(@op RELATIONAL_OPERATOR "=") };
    [<>] => { $crate::T!(@op RELATIONAL_OPERATOR "<>") };
    [<=] => { $crate::T!(@op RELATIONAL_OPERATOR "<=") };
    [>=] => { $crate::T!(@op RELATIONAL_OPERATOR ">=") };
    [<] => { $crate::T!(@op RELATIONAL_OPERATOR "<") };
    [>] => { $crate::T!(@op RELATIONAL_OPERATOR ">") };
    [+] => { $crate::T!(@op ARITHMETIC_OPERATOR "+") };
    [-] => { $crate::T!(@op ARITHMETIC_OPERATOR "-") };
    [*] => { $crate::T!(@op ARITHMETIC_OPERATOR "*") };
    [/] => { $crate::T!(@op ARITHMETIC_OPERATOR "/") };
    [bagi] => { $crate::T!(@op ARITHMETIC_OPERATOR "bagi") };
    [mod] => { $crate::T!(@op ARITHMETIC_OPERATOR "mod") };
    [dan] => { $crate::T!(@op LOGICAL_OPERATOR "dan") };
    [atau] => { $crate::T!(@op LOGICAL_OPERATOR "atau") };
    [tidak] => { $crate::T!(@op LOGICAL_OPERATOR "tidak") };
    [true] => { $crate::T!(@op KEYWORD "true") };
    [false] => { $crate::T!(@op KEYWORD "false") };
    (@kind $kind:ident) => {
        $crate::TokenPattern {
            kind: $crate::SyntaxKind::$kind,
            text: None,
        }
    };
    (@op $kind:ident $text:literal) => {
        $crate::TokenPattern {
            kind: $crate::SyntaxKind::$kind,
            text: Some($text),
        }
    };
    [$keyword:ident] => {
        $crate::TokenPattern {
            kind: $crate::SyntaxKind::KEYWORD,
            text: Some(stringify!($keyword)),
        }
    };
}
