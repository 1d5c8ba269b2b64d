// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use super::*;

pub(super) fn program(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(PROGRAM)?;
    program_header(p)?;
    declaration_part(p)?;
    compound_statement(p)?;
    p.expect(T![.])?;
    // Nothing may follow the final `.`.
    super::expect_end(p)?;
    Ok(m.complete(p))
}

fn program_header(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(PROGRAM_HEADER)?;
    p.expect(T![program])?;
    p.expect(IDENTIFIER)?;
    p.expect(T![;])?;
    Ok(m.complete(p))
}

/// Declarations come in a fixed order: constants, types, variables, then
/// procedures and functions in any mix.
pub(super) fn declaration_part(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(DECLARATION_PART)?;
    while p.at(T![konstanta]) {
        const_declaration(p)?;
    }
    while p.at(T![tipe]) {
        type_declaration(p)?;
    }
    while p.at(T![variabel]) {
        var_declaration(p)?;
    }
    loop {
        if p.at(T![prosedur]) {
            procedure_declaration(p)?;
        } else if p.at(T![fungsi]) {
            function_declaration(p)?;
        } else {
            break;
        }
    }
    Ok(m.complete(p))
}

fn const_declaration(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(CONST_DECLARATION)?;
    p.bump(T![konstanta]);
    loop {
        const_definition(p)?;
        if !p.at(IDENTIFIER) {
            break;
        }
    }
    Ok(m.complete(p))
}

fn const_definition(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(CONST_DEFINITION)?;
    p.expect(IDENTIFIER)?;
    p.expect(T![=])?;
    types::constant(p)?;
    p.expect(T![;])?;
    Ok(m.complete(p))
}

fn type_declaration(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(TYPE_DECLARATION)?;
    p.bump(T![tipe]);
    loop {
        type_definition(p)?;
        if !p.at(IDENTIFIER) {
            break;
        }
    }
    Ok(m.complete(p))
}

fn type_definition(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(TYPE_DEFINITION)?;
    p.expect(IDENTIFIER)?;
    p.expect(T![=])?;
    types::type_spec(p)?;
    p.expect(T![;])?;
    Ok(m.complete(p))
}

fn var_declaration(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(VAR_DECLARATION)?;
    p.bump(T![variabel]);
    loop {
        var_group(p)?;
        if !p.at(IDENTIFIER) {
            break;
        }
    }
    Ok(m.complete(p))
}

fn var_group(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(VAR_GROUP)?;
    params::identifier_list(p)?;
    p.expect(T![:])?;
    types::type_spec(p)?;
    p.expect(T![;])?;
    Ok(m.complete(p))
}

fn procedure_declaration(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(PROCEDURE_DECLARATION)?;
    p.bump(T![prosedur]);
    p.expect(IDENTIFIER)?;
    if p.at(T!['(']) {
        params::formal_parameter_list(p)?;
    }
    p.expect(T![;])?;
    declaration_part(p)?;
    compound_statement(p)?;
    p.expect(T![;])?;
    Ok(m.complete(p))
}

fn function_declaration(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(FUNCTION_DECLARATION)?;
    p.bump(T![fungsi]);
    p.expect(IDENTIFIER)?;
    if p.at(T!['(']) {
        params::formal_parameter_list(p)?;
    }
    p.expect(T![:])?;
    types::type_spec(p)?;
    p.expect(T![;])?;
    declaration_part(p)?;
    compound_statement(p)?;
    p.expect(T![;])?;
    Ok(m.complete(p))
}

pub(super) fn compound_statement(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(COMPOUND_STATEMENT)?;
    p.expect(T![mulai])?;
    statement_list(p)?;
    p.expect(T![selesai])?;
    Ok(m.complete(p))
}

/// Statements separated by `;`. Empty statements produce no node, so
/// `mulai x := 1; selesai` is accepted.
fn statement_list(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(STATEMENT_LIST)?;
    opt_statement(p)?;
    while p.eat(T![;]) {
        opt_statement(p)?;
    }
    Ok(m.complete(p))
}

/// Parse one statement. Returns `None` for the empty statement.
pub(super) fn opt_statement(p: &mut Parser<'_>) -> ParseResult<Option<CompletedMarker>> {
    let done = if p.at(IDENTIFIER) {
        identifier_statement(p)?
    } else if p.at(T![mulai]) {
        compound_statement(p)?
    } else if p.at(T![jika]) {
        if_statement(p)?
    } else if p.at(T![selama]) {
        while_statement(p)?
    } else if p.at(T![untuk]) {
        for_statement(p)?
    } else if p.at(T![ulangi]) {
        repeat_statement(p)?
    } else if p.at(T![writeln]) {
        procedure_call(p)?
    } else {
        return Ok(None);
    };
    Ok(Some(done))
}

/// An identifier-led statement is routed by the token after the identifier.
fn identifier_statement(p: &mut Parser<'_>) -> ParseResult {
    match p.nth(1) {
        ASSIGN_OPERATOR | LBRACKET | DOT => {
            cov_mark::hit!(routed_to_assignment);
            assignment_statement(p)
        }
        LPARENTHESIS => {
            cov_mark::hit!(routed_to_call_with_arguments);
            procedure_call(p)
        }
        _ => {
            cov_mark::hit!(routed_to_bare_call);
            procedure_call(p)
        }
    }
}

fn assignment_statement(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(ASSIGNMENT_STATEMENT)?;
    expressions::variable(p)?;
    p.expect(T![:=])?;
    expressions::expression(p)?;
    Ok(m.complete(p))
}

fn procedure_call(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(PROCEDURE_CALL)?;
    // The callee is an identifier or the reserved `writeln`.
    p.bump_any();
    if p.at(T!['(']) {
        params::parameter_list(p)?;
    }
    Ok(m.complete(p))
}

fn if_statement(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(IF_STATEMENT)?;
    p.bump(T![jika]);
    expressions::expression(p)?;
    p.expect(T![maka])?;
    opt_statement(p)?;
    if p.eat(T![selain_itu]) {
        opt_statement(p)?;
    }
    Ok(m.complete(p))
}

fn while_statement(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(WHILE_STATEMENT)?;
    p.bump(T![selama]);
    expressions::expression(p)?;
    p.expect(T![lakukan])?;
    opt_statement(p)?;
    Ok(m.complete(p))
}

const FOR_DIRECTIONS: TokenSet = TokenSet::new(&[T![ke], T![turun_ke]]);

fn for_statement(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(FOR_STATEMENT)?;
    p.bump(T![untuk]);
    p.expect(IDENTIFIER)?;
    p.expect(T![:=])?;
    expressions::expression(p)?;
    p.expect_ts(FOR_DIRECTIONS)?;
    expressions::expression(p)?;
    p.expect(T![lakukan])?;
    opt_statement(p)?;
    Ok(m.complete(p))
}

fn repeat_statement(p: &mut Parser<'_>) -> ParseResult {
    let m = p.start(REPEAT_STATEMENT)?;
    p.bump(T![ulangi]);
    statement_list(p)?;
    p.expect(T![sampai])?;
    expressions::expression(p)?;
    Ok(m.complete(p))
}
