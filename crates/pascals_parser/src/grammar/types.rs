// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use super::*;

// `real` is not reserved. It reaches the parser as an identifier and resolves
// as a standard type name during analysis.
const PRIMITIVE_TYPES: TokenSet = TokenSet::new(&[T![integer], T![boolean], T![char]]);

const CONSTANT_LITERALS: TokenSet = TokenSet::new(&[
    T![@kind NUMBER],
    T![@kind CHAR_LITERAL],
    T![@kind STRING_LITERAL],
    T![true],
    T![false],
    T![@kind IDENTIFIER],
]);

const SIGNED_CONSTANTS: TokenSet = TokenSet::new(&[T![@kind NUMBER], T![@kind IDENTIFIER]]);

pub(super) fn type_spec(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(TYPE)?;
    if p.at(T![larik]) {
        array_type(p)?;
    } else if p.at(T![rekaman]) {
        record_type(p)?;
    } else if p.at_ts(PRIMITIVE_TYPES) || p.at(IDENTIFIER) {
        p.bump_any();
    } else {
        return Err(p.error("a type"));
    }
    Ok(m.complete(p))
}

// Bounds are constants, so nested `larik` in the element type gives
// multi-dimensional arrays.
fn array_type(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(ARRAY_TYPE)?;
    p.bump(T![larik]);
    p.expect(T!['['])?;
    range(p)?;
    p.expect(T![']'])?;
    p.expect(T![dari])?;
    type_spec(p)?;
    Ok(m.complete(p))
}

fn range(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(RANGE)?;
    constant(p)?;
    p.expect(T![..])?;
    constant(p)?;
    Ok(m.complete(p))
}

fn record_type(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(RECORD_TYPE)?;
    p.bump(T![rekaman]);
    if p.at(IDENTIFIER) {
        field_group(p)?;
        while p.eat(T![;]) {
            if p.at(T![selesai]) {
                break;
            }
            field_group(p)?;
        }
    }
    p.expect(T![selesai])?;
    Ok(m.complete(p))
}

fn field_group(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(FIELD_GROUP)?;
    params::identifier_list(p)?;
    p.expect(T![:])?;
    type_spec(p)?;
    Ok(m.complete(p))
}

pub(super) fn constant(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(CONSTANT)?;
    if p.at(T![+]) || p.at(T![-]) {
        p.bump_any();
        p.expect_ts(SIGNED_CONSTANTS)?;
    } else {
        p.expect_ts(CONSTANT_LITERALS)?;
    }
    Ok(m.complete(p))
}
