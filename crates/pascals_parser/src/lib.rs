// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! Parser for Pascal-S.
//!
//! The parser reads an [`Input`] built from tokens and produces an [`Output`], a
//! pre-order list of tree-building steps. Building an actual tree from the steps is
//! left to the `pascals_syntax` crate.

mod event;
mod grammar;
mod input;
mod output;
mod parser;
mod syntax_kind;
mod token_set;

#[cfg(test)]
mod tests;

pub(crate) use token_set::TokenSet;

pub use limit::Limit;

pub use crate::{
    input::Input,
    output::{Output, Step},
    parser::SyntaxError,
    syntax_kind::{SyntaxKind, TokenPattern},
};

/// Maximum number of simultaneously open grammar rules. A lone literal in an
/// expression already opens four, so this admits several dozen levels of
/// parenthesized or nested statements.
pub static DEFAULT_DEPTH_LIMIT: Limit = Limit::new(512);

/// Parse the whole of the input as a given syntactic construct.
/// [`TopEntryPoint::parse`] makes a guarantee that
///   * all input is consumed
///   * the result is a valid tree (there's one root node)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopEntryPoint {
    Program,
    Statement,
    Expression,
}

impl TopEntryPoint {
    pub fn parse(&self, input: &Input) -> Result<Output, SyntaxError> {
        self.parse_with_limit(input, &DEFAULT_DEPTH_LIMIT)
    }

    pub fn parse_with_limit(&self, input: &Input, limit: &Limit) -> Result<Output, SyntaxError> {
        let entry_point: fn(&'_ mut parser::Parser<'_>) -> Result<(), SyntaxError> = match self {
            TopEntryPoint::Program => grammar::entry::top::program,
            TopEntryPoint::Statement => grammar::entry::top::statement,
            TopEntryPoint::Expression => grammar::entry::top::expression,
        };
        let mut p = parser::Parser::new(input, limit);
        if let Err(err) = entry_point(&mut p) {
            tracing::debug!(%err, "parse failed");
            return Err(err);
        }
        let events = p.finish();
        let res = event::process(events);

        if cfg!(debug_assertions) {
            let mut depth = 0;
            let mut first = true;
            for step in res.iter() {
                assert!(depth > 0 || first);
                first = false;
                match step {
                    Step::Enter { .. } => depth += 1,
                    Step::Exit => depth -= 1,
                    Step::Token { .. } => (),
                }
            }
            assert!(!first, "no tree at all");
            assert_eq!(depth, 0, "unbalanced tree");
        }

        tracing::trace!(tokens = input.len(), steps = res.len(), "parsed {:?}", self);
        Ok(res)
    }
}
