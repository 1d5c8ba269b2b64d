// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use super::*;

// a, b, c
pub(super) fn identifier_list(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(IDENTIFIER_LIST)?;
    p.expect(IDENTIFIER)?;
    while p.eat(T![,]) {
        p.expect(IDENTIFIER)?;
    }
    Ok(m.complete(p))
}

// Subprogram definition parameters: (a, b : integer; variabel c : char)
pub(super) fn formal_parameter_list(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(FORMAL_PARAMETER_LIST)?;
    p.bump(T!['(']);
    parameter_group(p)?;
    while p.eat(T![;]) {
        parameter_group(p)?;
    }
    p.expect(T![')'])?;
    Ok(m.complete(p))
}

// A leading `variabel` makes every name in the group a by-reference parameter.
fn parameter_group(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(PARAMETER_GROUP)?;
    p.eat(T![variabel]);
    identifier_list(p)?;
    p.expect(T![:])?;
    types::type_spec(p)?;
    Ok(m.complete(p))
}

// Call arguments: (e0, e1, ...). The list may be empty.
pub(super) fn parameter_list(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(PARAMETER_LIST)?;
    p.bump(T!['(']);
    if !p.at(T![')']) {
        expressions::expression(p)?;
        while p.eat(T![,]) {
            expressions::expression(p)?;
        }
    }
    p.expect(T![')'])?;
    Ok(m.complete(p))
}
