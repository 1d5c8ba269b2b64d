// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! Bridging tokens to the parser and the parser output to a tree.

use pascals_parser::{Input, Limit, Output, Step, SyntaxError, TopEntryPoint};
use pascals_tokens::Token;

use crate::{syntax_node::GreenNode, SyntaxTreeBuilder};

pub fn parse_tokens(tokens: &[Token]) -> Result<GreenNode, SyntaxError> {
    parse_tokens_as(TopEntryPoint::Program, tokens, &pascals_parser::DEFAULT_DEPTH_LIMIT)
}

pub(crate) fn parse_tokens_as(
    entry: TopEntryPoint,
    tokens: &[Token],
    limit: &Limit,
) -> Result<GreenNode, SyntaxError> {
    let parser_input = Input::from_tokens(tokens);
    let parser_output = entry.parse_with_limit(&parser_input, limit)?;
    Ok(build_tree(tokens, &parser_output))
}

pub(crate) fn build_tree(tokens: &[Token], parser_output: &Output) -> GreenNode {
    let mut builder = SyntaxTreeBuilder::default();
    let mut lexemes = tokens.iter().filter(|token| !token.is_eof());
    for step in parser_output.iter() {
        match step {
            Step::Enter { kind } => builder.start_node(kind),
            Step::Token { kind } => {
                let text = lexemes.next().map_or("", Token::text);
                builder.token(kind, text);
            }
            Step::Exit => builder.finish_node(),
        }
    }
    builder.finish()
}
