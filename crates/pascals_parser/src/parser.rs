// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use limit::Limit;
use thiserror::Error;

use crate::{
    event::Event,
    input::Input,
    SyntaxKind::{self, EOF},
    TokenPattern, TokenSet,
};

/// The first grammar mismatch. Parsing stops here; nothing after it is recognized.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("{rule}: expected {expected} but found {found} at token {position}{}", on_line(.line))]
    Unexpected {
        expected: String,
        found: String,
        position: usize,
        line: Option<u32>,
        rule: SyntaxKind,
    },
    #[error("{rule}: nesting deeper than {limit} at token {position}{}", on_line(.line))]
    TooDeep {
        limit: usize,
        position: usize,
        line: Option<u32>,
        rule: SyntaxKind,
    },
}

fn on_line(line: &Option<u32>) -> String {
    line.map(|line| format!(" (line {line})"))
        .unwrap_or_default()
}

impl SyntaxError {
    /// Index of the offending token. Equal to the token count when input ran out.
    pub fn position(&self) -> usize {
        match self {
            SyntaxError::Unexpected { position, .. } | SyntaxError::TooDeep { position, .. } => {
                *position
            }
        }
    }

    pub fn line(&self) -> Option<u32> {
        match self {
            SyntaxError::Unexpected { line, .. } | SyntaxError::TooDeep { line, .. } => *line,
        }
    }

    /// The grammar rule that was being recognized.
    pub fn rule(&self) -> SyntaxKind {
        match self {
            SyntaxError::Unexpected { rule, .. } | SyntaxError::TooDeep { rule, .. } => *rule,
        }
    }
}

pub(crate) type ParseResult<T = CompletedMarker> = Result<T, SyntaxError>;

/// `Parser` produces a flat list of `Event`s.
/// They are converted to a tree structure in a separate pass.
///
/// Grammar functions start a node with [`Parser::start`], consume tokens, and
/// finish with [`Marker::complete`]. Any mismatch returns a [`SyntaxError`]
/// which the grammar propagates with `?`.
pub(crate) struct Parser<'t> {
    inp: &'t Input,
    pos: usize,
    events: Vec<Event>,
    /// Rules currently open, innermost last.
    rules: Vec<SyntaxKind>,
    last_completed: SyntaxKind,
    depth_limit: &'t Limit,
}

impl<'t> Parser<'t> {
    pub(super) fn new(inp: &'t Input, depth_limit: &'t Limit) -> Parser<'t> {
        Parser {
            inp,
            pos: 0,
            events: Vec::new(),
            rules: Vec::new(),
            last_completed: SyntaxKind::PROGRAM,
            depth_limit,
        }
    }

    pub(crate) fn finish(self) -> Vec<Event> {
        self.events
    }

    /// Returns the kind of the current token.
    /// If parser has already reached the end of input,
    /// the special `EOF` kind is returned.
    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Lookahead operation: returns the kind of the next nth token.
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.inp.kind(self.pos + n)
    }

    /// Checks if the current token matches `pattern`.
    pub(crate) fn at<P: Into<TokenPattern>>(&self, pattern: P) -> bool {
        self.nth_at(0, pattern)
    }

    pub(crate) fn nth_at<P: Into<TokenPattern>>(&self, n: usize, pattern: P) -> bool {
        pattern
            .into()
            .matches(self.nth(n), self.inp.text(self.pos + n))
    }

    /// Checks if the current token is in `ts`.
    pub(crate) fn at_ts(&self, ts: TokenSet) -> bool {
        ts.contains(self.current(), self.inp.text(self.pos))
    }

    /// Starts a new node of `kind`. Fails when the nesting limit is exceeded.
    pub(crate) fn start(&mut self, kind: SyntaxKind) -> ParseResult<Marker> {
        if self.depth_limit.check(self.rules.len() + 1).is_err() {
            return Err(SyntaxError::TooDeep {
                limit: self.depth_limit.inner(),
                position: self.pos,
                line: self.inp.line(self.pos),
                rule: kind,
            });
        }
        self.rules.push(kind);
        self.events.push(Event::Start { kind });
        Ok(Marker::new(kind))
    }

    /// Consume the next token if it matches `pattern`.
    pub(crate) fn eat<P: Into<TokenPattern>>(&mut self, pattern: P) -> bool {
        if !self.at(pattern) {
            return false;
        }
        self.do_bump();
        true
    }

    /// Consume the next token. Panics if the parser isn't currently at `pattern`;
    /// callers branch on the token first.
    pub(crate) fn bump<P: Into<TokenPattern>>(&mut self, pattern: P) {
        assert!(self.eat(pattern));
    }

    /// Advances the parser by one token, whatever it is.
    pub(crate) fn bump_any(&mut self) {
        if self.current() == EOF {
            return;
        }
        self.do_bump();
    }

    /// Consume the next token if it matches `pattern`, otherwise fail citing the
    /// pattern as the expectation.
    pub(crate) fn expect<P: Into<TokenPattern>>(&mut self, pattern: P) -> ParseResult<()> {
        let pattern = pattern.into();
        if self.eat(pattern) {
            return Ok(());
        }
        Err(self.error(pattern.to_string()))
    }

    /// Like [`Parser::expect`] for a choice of tokens.
    pub(crate) fn expect_ts(&mut self, ts: TokenSet) -> ParseResult<()> {
        if self.at_ts(ts) {
            self.do_bump();
            return Ok(());
        }
        Err(self.error(ts.describe()))
    }

    /// A mismatch at the current token. `expected` describes what would have been valid.
    pub(crate) fn error<T: Into<String>>(&self, expected: T) -> SyntaxError {
        SyntaxError::Unexpected {
            expected: expected.into(),
            found: self.inp.describe(self.pos),
            position: self.pos,
            line: self.inp.line(self.pos),
            rule: self.rules.last().copied().unwrap_or(self.last_completed),
        }
    }

    fn do_bump(&mut self) {
        let kind = self.current();
        self.pos += 1;
        self.events.push(Event::Token { kind });
    }
}

/// See [`Parser::start`].
pub(crate) struct Marker {
    kind: SyntaxKind,
}

impl Marker {
    fn new(kind: SyntaxKind) -> Marker {
        Marker { kind }
    }

    /// Finishes the syntax tree node and returns a `CompletedMarker`.
    pub(crate) fn complete(self, p: &mut Parser<'_>) -> CompletedMarker {
        let open = p.rules.pop();
        debug_assert_eq!(open, Some(self.kind));
        p.last_completed = self.kind;
        p.events.push(Event::Finish);
        CompletedMarker(())
    }
}

/// Proof that a node was finished.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CompletedMarker(());
