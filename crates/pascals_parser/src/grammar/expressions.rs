// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

mod atom;

use super::*;

pub(super) use atom::variable;

const ADDITIVE_OPERATORS: TokenSet = TokenSet::new(&[T![+], T![-], T![atau]]);

const MULTIPLICATIVE_OPERATORS: TokenSet =
    TokenSet::new(&[T![*], T![/], T![bagi], T![mod], T![dan]]);

/// expression → simple-expression (relational-operator simple-expression)?
///
/// Every level of the expression grammar produces its own node, so a lone literal
/// is wrapped as `<expression>`, `<simple-expression>`, `<term>`, `<factor>`.
pub(crate) fn expression(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(EXPRESSION)?;
    simple_expression(p)?;
    if p.at(RELATIONAL_OPERATOR) {
        operator(p, RELATIONAL_OP)?;
        simple_expression(p)?;
    }
    Ok(m.complete(p))
}

fn simple_expression(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(SIMPLE_EXPRESSION)?;
    // Unary sign applies to the first term only.
    if p.at(T![+]) || p.at(T![-]) {
        p.bump_any();
    }
    term(p)?;
    while p.at_ts(ADDITIVE_OPERATORS) {
        operator(p, ADDITIVE_OP)?;
        term(p)?;
    }
    Ok(m.complete(p))
}

fn term(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(TERM)?;
    atom::factor(p)?;
    while p.at_ts(MULTIPLICATIVE_OPERATORS) {
        operator(p, MULTIPLICATIVE_OP)?;
        atom::factor(p)?;
    }
    Ok(m.complete(p))
}

fn operator(p: &mut Parser<'_>, kind: SyntaxKind) -> ParseResult {
    let m = p.start(kind)?;
    p.bump_any();
    Ok(m.complete(p))
}
