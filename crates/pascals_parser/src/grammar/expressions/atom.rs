// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use super::*;

pub(crate) const LITERAL_FIRST: TokenSet = TokenSet::new(&[
    T![@kind NUMBER],
    T![@kind CHAR_LITERAL],
    T![@kind STRING_LITERAL],
    T![true],
    T![false],
]);

pub(super) fn factor(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(FACTOR)?;
    if p.at_ts(LITERAL_FIRST) {
        p.bump_any();
    } else if p.at(IDENTIFIER) {
        if p.nth_at(1, T!['(']) {
            function_call(p)?;
        } else {
            variable(p)?;
        }
    } else if p.at(T!['(']) {
        p.bump(T!['(']);
        expression(p)?;
        p.expect(T![')'])?;
    } else if p.at(T![tidak]) {
        p.bump(T![tidak]);
        factor(p)?;
    } else {
        return Err(p.error("an expression"));
    }
    Ok(m.complete(p))
}

/// An identifier followed by any mix of `[e, ...]` and `.field` accessors.
pub(crate) fn variable(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(VARIABLE)?;
    p.expect(IDENTIFIER)?;
    loop {
        if p.at(T!['[']) {
            index_access(p)?;
        } else if p.at(T![.]) {
            field_access(p)?;
        } else {
            break;
        }
    }
    Ok(m.complete(p))
}

fn index_access(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(INDEX_ACCESS)?;
    p.bump(T!['[']);
    expression(p)?;
    while p.eat(T![,]) {
        expression(p)?;
    }
    p.expect(T![']'])?;
    Ok(m.complete(p))
}

fn field_access(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(FIELD_ACCESS)?;
    p.bump(T![.]);
    p.expect(IDENTIFIER)?;
    Ok(m.complete(p))
}

fn function_call(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(FUNCTION_CALL)?;
    p.bump(IDENTIFIER);
    params::parameter_list(p)?;
    Ok(m.complete(p))
}
