// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

// Build the decorated AST defined in asg.rs from the syntactic AST constructed in
// the crate pascals_syntax, filling the symbol table on the way.
//
// Declarations are processed in source order, so a name is visible from its
// declaration onwards. Every rule violation is recorded and analysis continues;
// the node that broke the rule is still built, with an `Undefined` type or a
// placeholder where nothing better exists.

use std::path::Path;

use pascals_source_file::{SourceError, SourceFile, SourceString, SourceTrait};
use pascals_syntax::ast::{self as synast, AstNode, BinaryOp, UnaryOp};
use pascals_syntax::{Parse, SyntaxKind, SyntaxToken};
use pascals_tokens::same_word;
use thiserror::Error;
use tracing::debug;

use crate::asg;
use crate::context::{with_scope, Context};
use crate::semantic_error::{SemanticErrorKind, SemanticErrorKind::*, SemanticErrorList};
use crate::symbols::{
    array_size, IsRef, ObjectClass, PoolValue, SymbolError, SymbolId, SymbolIdResult,
    SymbolTable, HEADER_SIZE,
};
use crate::types::{self, OperandRule, Type};

/// The outcome of analyzing one program.
#[derive(Clone, Debug)]
pub struct Analysis {
    program: asg::Program,
    symbol_table: SymbolTable,
    errors: SemanticErrorList,
    warnings: SemanticErrorList,
}

impl Analysis {
    pub fn program(&self) -> &asg::Program {
        &self.program
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    pub fn errors(&self) -> &SemanticErrorList {
        &self.errors
    }

    pub fn warnings(&self) -> &SemanticErrorList {
        &self.warnings
    }

    pub fn any_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.messages()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.messages()
    }
}

/// Analysis finished but recorded errors. The full analysis is kept so that the
/// table and the decorated AST can still be inspected.
#[derive(Clone, Debug, Error)]
#[error("semantic analysis found {} error(s)", .0.errors().len())]
pub struct AnalysisError(Box<Analysis>);

impl AnalysisError {
    pub fn analysis(&self) -> &Analysis {
        &self.0
    }

    pub fn into_analysis(self) -> Analysis {
        *self.0
    }
}

/// Analyze a parsed program. Warnings alone do not make this fail.
pub fn analyze(parse: &Parse<synast::Program>) -> Result<Analysis, AnalysisError> {
    analyze_program(&parse.tree())
}

pub fn analyze_program(program: &synast::Program) -> Result<Analysis, AnalysisError> {
    let analysis = run_analysis(program);
    if analysis.any_errors() {
        Err(AnalysisError(Box::new(analysis)))
    } else {
        Ok(analysis)
    }
}

fn run_analysis(program: &synast::Program) -> Analysis {
    let mut context = Context::new();
    let program = from_program(program, &mut context);
    let (symbol_table, errors, warnings) = context.into_parts();
    debug!(
        symbols = symbol_table.symbols().len(),
        blocks = symbol_table.blocks().len(),
        errors = errors.len(),
        warnings = warnings.len(),
        "analysis finished"
    );
    Analysis {
        program,
        symbol_table,
        errors,
        warnings,
    }
}

/// Syntax result and, when parsing succeeded, the analysis of a whole input.
pub struct ParseResult<T: SourceTrait> {
    syntax_result: T,
    analysis: Option<Analysis>,
}

impl<T: SourceTrait> ParseResult<T> {
    pub fn any_syntax_errors(&self) -> bool {
        self.syntax_result.any_parse_errors()
    }

    pub fn any_semantic_errors(&self) -> bool {
        self.analysis.as_ref().is_some_and(Analysis::any_errors)
    }

    pub fn any_errors(&self) -> bool {
        self.any_syntax_errors() || self.any_semantic_errors()
    }

    /// `None` when parsing stopped at a syntax error.
    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn take_analysis(self) -> Option<Analysis> {
        self.analysis
    }

    pub fn syntax_result(&self) -> &T {
        &self.syntax_result
    }

    /// Prints the syntax error, or else the semantic errors and warnings, against
    /// the source.
    pub fn print_errors(&self) {
        self.syntax_result.print_syntax_errors();
        if let Some(analysis) = &self.analysis {
            analysis.errors().print_errors(&self.syntax_result);
            analysis.warnings().print_errors(&self.syntax_result);
        }
    }
}

/// Scan, parse and analyze Pascal-S source text.
/// Fake file name is used for printing diagnostics.
pub fn parse_source_string<T: AsRef<str>>(
    source: T,
    fake_file_path: Option<&str>,
) -> ParseResult<SourceString> {
    analyze_source(pascals_source_file::parse_source_string(source, fake_file_path))
}

/// Parse and analyze tokens in the persisted `KIND(value)` form.
pub fn parse_token_string<T: AsRef<str>>(
    text: T,
    fake_file_path: Option<&str>,
) -> Result<ParseResult<SourceString>, SourceError> {
    Ok(analyze_source(pascals_source_file::parse_token_string(
        text,
        fake_file_path,
    )?))
}

/// Read, parse and analyze a token file.
pub fn parse_token_file<P: AsRef<Path>>(
    file_path: P,
) -> Result<ParseResult<SourceFile>, SourceError> {
    let parsed = pascals_source_file::parse_token_file(file_path, None::<&[&Path]>)?;
    Ok(analyze_source(parsed))
}

fn analyze_source<T: SourceTrait>(parsed_source: T) -> ParseResult<T> {
    // On a syntax error, do not continue with semantic analysis.
    let analysis = match parsed_source.syntax_ast() {
        Ok(parse) => Some(run_analysis(&parse.tree())),
        Err(_) => None,
    };
    ParseResult {
        syntax_result: parsed_source,
        analysis,
    }
}

//
// Diagnostics helpers
//

fn report<N: AstNode>(
    context: &mut Context,
    decoration: &mut asg::Decoration,
    kind: SemanticErrorKind,
    node: &N,
) {
    let kind = context.insert_error(kind, node);
    decoration.diagnostics.push(kind);
}

fn report_at(
    context: &mut Context,
    decoration: &mut asg::Decoration,
    kind: SemanticErrorKind,
    token: &SyntaxToken,
) {
    let kind = context.insert_error_at(kind, token);
    decoration.diagnostics.push(kind);
}

/// Bind `token` in the current scope, recording a duplicate on `decoration` too.
#[allow(clippy::too_many_arguments)]
fn declare<F>(
    context: &mut Context,
    decoration: &mut asg::Decoration,
    token: &SyntaxToken,
    class: ObjectClass,
    ty: Type,
    block: Option<crate::symbols::BlockId>,
    is_ref: IsRef,
    address: F,
) -> SymbolIdResult
where
    F: FnOnce(&mut Context) -> i64,
{
    let res = context.new_binding(token, class, ty, block, is_ref, address);
    if res.is_err() {
        decoration
            .diagnostics
            .push(DuplicateDeclaration(token.text().to_string()));
    }
    res
}

//
// Declarations
//

fn from_program(program: &synast::Program, context: &mut Context) -> asg::Program {
    let global = context.symbol_table().current_block();
    let mut decoration = asg::Decoration::new(Type::Void, 0);
    let name_token = program.header().and_then(|header| header.name());
    let name = name_token
        .as_ref()
        .map_or_else(String::new, |token| token.text().to_string());
    let symbol = match &name_token {
        Some(token) => declare(
            context,
            &mut decoration,
            token,
            ObjectClass::Program,
            Type::Void,
            Some(global),
            IsRef::False,
            |_| 0,
        ),
        None => Err(SymbolError::MissingBinding),
    };
    debug!(name, "program");

    context.replace_offset(HEADER_SIZE);
    let declarations = program
        .declaration_part()
        .map(|part| from_declaration_part(&part, context))
        .unwrap_or_default();
    let var_size = context.offset() - HEADER_SIZE;
    context.symbol_table_mut().set_var_size(global, var_size);

    let body = from_optional_compound(program.body(), context);
    asg::Program {
        name,
        symbol,
        block: global,
        declarations,
        body,
        decoration,
    }
}

fn from_declaration_part(
    part: &synast::DeclarationPart,
    context: &mut Context,
) -> Vec<asg::Declaration> {
    let mut declarations = Vec::new();
    for def in part.const_definitions() {
        if let Some(decl) = from_const_definition(&def, context) {
            declarations.push(asg::Declaration::Const(decl));
        }
    }
    for def in part.type_definitions() {
        if let Some(decl) = from_type_definition(&def, context) {
            declarations.push(asg::Declaration::Type(decl));
        }
    }
    for group in part.var_groups() {
        declarations.extend(from_var_group(&group, context).into_iter().map(asg::Declaration::Var));
    }
    for subprogram in part.subprograms() {
        if let Some(decl) = from_subprogram(&subprogram, context) {
            declarations.push(asg::Declaration::Subprogram(decl));
        }
    }
    declarations
}

fn from_const_definition(
    def: &synast::ConstDefinition,
    context: &mut Context,
) -> Option<asg::ConstDeclaration> {
    let name_token = def.name()?;
    let mut decoration = asg::Decoration::new(Type::Undefined, context.level());
    let value = match def.constant() {
        Some(constant) => eval_constant(&constant, context, &mut decoration),
        None => ConstValue::undefined(),
    };
    let ConstValue {
        ty,
        address,
        literal,
    } = value;
    decoration.ty = ty;
    decoration.address = Some(address);
    let symbol = declare(
        context,
        &mut decoration,
        &name_token,
        ObjectClass::Constant,
        ty,
        None,
        IsRef::False,
        |_| address,
    );
    Some(asg::ConstDeclaration {
        name: name_token.text().to_string(),
        symbol,
        value: literal,
        decoration,
    })
}

fn from_type_definition(
    def: &synast::TypeDefinition,
    context: &mut Context,
) -> Option<asg::TypeDeclaration> {
    let name_token = def.name()?;
    let mut decoration = asg::Decoration::new(Type::Undefined, context.level());
    let ty = resolve_optional_type(def.type_spec(), context, &mut decoration);
    decoration.ty = ty;
    let symbol = declare(
        context,
        &mut decoration,
        &name_token,
        ObjectClass::Type,
        ty,
        None,
        IsRef::False,
        |_| 0,
    );
    Some(asg::TypeDeclaration {
        name: name_token.text().to_string(),
        symbol,
        decoration,
    })
}

fn from_var_group(group: &synast::VarGroup, context: &mut Context) -> Vec<asg::VarDeclaration> {
    let mut type_decoration = asg::Decoration::new(Type::Undefined, context.level());
    let ty = resolve_optional_type(group.type_spec(), context, &mut type_decoration);
    let size = context.symbol_table().type_size(ty);
    let names: Vec<SyntaxToken> = group
        .identifier_list()
        .map(|list| list.names().collect())
        .unwrap_or_default();
    let mut res = Vec::with_capacity(names.len());
    for name_token in names {
        let mut decoration = asg::Decoration::new(ty, context.level());
        // Type errors belong to the group; record them on its first variable.
        if res.is_empty() {
            decoration.diagnostics.append(&mut type_decoration.diagnostics);
        }
        let symbol = declare(
            context,
            &mut decoration,
            &name_token,
            ObjectClass::Variable,
            ty,
            None,
            IsRef::False,
            |cx| cx.allocate(size, &name_token),
        );
        if let Ok(id) = symbol {
            decoration.address = Some(context.symbol_table()[id].address());
        }
        res.push(asg::VarDeclaration {
            name: name_token.text().to_string(),
            symbol,
            decoration,
        });
    }
    res
}

fn from_subprogram(
    subprogram: &synast::Subprogram,
    context: &mut Context,
) -> Option<asg::SubprogramDeclaration> {
    let name_token = subprogram.name()?;
    let name = name_token.text().to_string();
    let is_function = subprogram.is_function();
    let mut decoration = asg::Decoration::new(Type::Void, context.level());
    let class = if is_function {
        ObjectClass::Function
    } else {
        ObjectClass::Procedure
    };
    // The block exists before the entry so that the entry can point at it.
    let block = context.symbol_table_mut().enter_block();
    let symbol = declare(
        context,
        &mut decoration,
        &name_token,
        class,
        Type::Void,
        Some(block),
        IsRef::False,
        |_| 0,
    );
    debug!(name, class = class.name(), %block, "subprogram");

    let saved_offset = context.replace_offset(HEADER_SIZE);
    let (parameters, return_slot, declarations, body) = with_scope!(context, block, {
        let parameters = bind_parameters(subprogram.parameters(), context, &mut decoration);
        let param_size = context.offset() - HEADER_SIZE;
        context
            .symbol_table_mut()
            .set_params(block, parameters.last().copied(), param_size);

        let return_slot = if is_function {
            let ty = resolve_optional_type(subprogram.return_type(), context, &mut decoration);
            decoration.ty = ty;
            if let Ok(function) = symbol {
                context.symbol_table_mut().set_type(function, ty);
            }
            // Assigning to the function name stores the result here.
            let slot = declare(
                context,
                &mut decoration,
                &name_token,
                ObjectClass::Variable,
                ty,
                None,
                IsRef::False,
                |_| 0,
            )
            .ok();
            if let (Some(slot), Ok(function)) = (slot, symbol) {
                context.set_return_slot(slot, function);
            }
            slot
        } else {
            None
        };

        let declarations = subprogram
            .declaration_part()
            .map(|part| from_declaration_part(&part, context))
            .unwrap_or_default();
        let var_size = context.offset() - HEADER_SIZE - param_size;
        context.symbol_table_mut().set_var_size(block, var_size);
        let body = from_optional_compound(subprogram.body(), context);
        (parameters, return_slot, declarations, body)
    });
    context.replace_offset(saved_offset);

    let assigns_result = subprogram
        .body()
        .is_some_and(|body| any_assigns_to(body.statements(), &name));
    if is_function && !assigns_result {
        let warning = context.insert_warning(MissingReturnAssignment(name.clone()), subprogram);
        decoration.diagnostics.push(warning);
    }

    Some(asg::SubprogramDeclaration {
        name,
        symbol,
        is_function,
        block,
        parameters,
        return_slot,
        declarations,
        body,
        decoration,
    })
}

fn bind_parameters(
    list: Option<synast::FormalParameterList>,
    context: &mut Context,
    decoration: &mut asg::Decoration,
) -> Vec<SymbolId> {
    let mut parameters = Vec::new();
    let Some(list) = list else {
        return parameters;
    };
    for group in list.groups() {
        let ty = resolve_optional_type(group.type_spec(), context, decoration);
        let is_ref = group.is_var();
        // A reference parameter holds an address.
        let size = if is_ref {
            1
        } else {
            context.symbol_table().type_size(ty)
        };
        let names = group.identifier_list().into_iter().flat_map(|list| list.names());
        for name_token in names {
            let res = declare(
                context,
                decoration,
                &name_token,
                ObjectClass::Variable,
                ty,
                None,
                IsRef::from(is_ref),
                |cx| cx.allocate(size, &name_token),
            );
            if let Ok(id) = res {
                parameters.push(id);
            }
        }
    }
    parameters
}

// Does any statement, at any depth, assign directly to `name`?
fn any_assigns_to<I: IntoIterator<Item = synast::Stmt>>(stmts: I, name: &str) -> bool {
    stmts.into_iter().any(|stmt| assigns_to(&stmt, name))
}

fn assigns_to(stmt: &synast::Stmt, name: &str) -> bool {
    match stmt {
        synast::Stmt::Assignment(assign) => assign.target().is_some_and(|target| {
            target.accessors().next().is_none()
                && target
                    .name()
                    .is_some_and(|token| token.text().eq_ignore_ascii_case(name))
        }),
        synast::Stmt::If(stmt) => {
            stmt.then_branch().is_some_and(|s| assigns_to(&s, name))
                || stmt.else_branch().is_some_and(|s| assigns_to(&s, name))
        }
        synast::Stmt::While(stmt) => stmt.body().is_some_and(|s| assigns_to(&s, name)),
        synast::Stmt::For(stmt) => stmt.body().is_some_and(|s| assigns_to(&s, name)),
        synast::Stmt::Repeat(stmt) => any_assigns_to(stmt.statements(), name),
        synast::Stmt::Compound(stmt) => any_assigns_to(stmt.statements(), name),
        synast::Stmt::ProcedureCall(_) => false,
    }
}

//
// Constants
//

/// A folded constant: its type, the value stored in the table, and the literal.
struct ConstValue {
    ty: Type,
    address: i64,
    literal: asg::Literal,
}

impl ConstValue {
    fn undefined() -> ConstValue {
        ConstValue {
            ty: Type::Undefined,
            address: 0,
            literal: asg::Literal::Integer(0),
        }
    }
}

fn eval_constant(
    constant: &synast::Constant,
    context: &mut Context,
    decoration: &mut asg::Decoration,
) -> ConstValue {
    let Some(token) = constant.value() else {
        return ConstValue::undefined();
    };
    let literal = match token.kind() {
        SyntaxKind::IDENTIFIER => match constant_of_name(&token, context, decoration) {
            Some(literal) => literal,
            None => return ConstValue::undefined(),
        },
        _ => match literal_of_token(&token, context, decoration) {
            Some(literal) => literal,
            None => return ConstValue::undefined(),
        },
    };
    let literal = match constant.sign() {
        Some(sign) => match apply_sign(sign, literal) {
            Some(literal) => literal,
            None => {
                report(
                    context,
                    decoration,
                    SignedNonNumeric(token.text().to_string()),
                    constant,
                );
                return ConstValue::undefined();
            }
        },
        None => literal,
    };
    let address = store_constant(&literal, context);
    ConstValue {
        ty: literal.ty(),
        address,
        literal,
    }
}

// The value of a previously declared constant.
fn constant_of_name(
    token: &SyntaxToken,
    context: &mut Context,
    decoration: &mut asg::Decoration,
) -> Option<asg::Literal> {
    let Some(id) = context.find(token.text()) else {
        report_at(
            context,
            decoration,
            UndeclaredIdentifier(token.text().to_string()),
            token,
        );
        return None;
    };
    let symbol = &context.symbol_table()[id];
    if symbol.class() != ObjectClass::Constant {
        report_at(context, decoration, NotAConstant(token.text().to_string()), token);
        return None;
    }
    let address = symbol.address();
    let table = context.symbol_table();
    let pooled = usize::try_from(address).ok().and_then(|index| table.literal(index));
    match (symbol.ty(), pooled) {
        (Type::Integer, _) => Some(asg::Literal::Integer(address)),
        (Type::Boolean, _) => Some(asg::Literal::Boolean(address != 0)),
        (Type::Char, _) => Some(asg::Literal::Char(
            u32::try_from(address)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or('\0'),
        )),
        (Type::Real, Some(PoolValue::Real(value))) => Some(asg::Literal::Real(*value)),
        (Type::String, Some(PoolValue::String(value))) => Some(asg::Literal::String(value.clone())),
        // An erroneous constant; it was reported where it was declared.
        _ => None,
    }
}

// Negation and identity on numeric constants. `None` if the sign does not apply.
fn apply_sign(sign: UnaryOp, literal: asg::Literal) -> Option<asg::Literal> {
    match (sign, literal) {
        (UnaryOp::Plus, literal @ (asg::Literal::Integer(_) | asg::Literal::Real(_))) => {
            Some(literal)
        }
        (UnaryOp::Neg, asg::Literal::Integer(value)) => {
            value.checked_neg().map(asg::Literal::Integer)
        }
        (UnaryOp::Neg, asg::Literal::Real(value)) => Some(asg::Literal::Real(-value)),
        _ => None,
    }
}

// The table's `address` column: the value itself for ordinal constants, a pool
// index for reals and strings.
fn store_constant(literal: &asg::Literal, context: &mut Context) -> i64 {
    let pooled = match literal {
        asg::Literal::Integer(value) => return *value,
        asg::Literal::Char(value) => return i64::from(u32::from(*value)),
        asg::Literal::Boolean(value) => return i64::from(*value),
        asg::Literal::Real(value) => PoolValue::Real(*value),
        asg::Literal::String(value) => PoolValue::String(value.clone()),
    };
    let index = context.symbol_table_mut().add_literal(pooled);
    i64::try_from(index).unwrap_or(i64::MAX)
}

/// The value of a literal token: a number, a quoted char or string, or `true`
/// and `false`.
fn literal_of_token(
    token: &SyntaxToken,
    context: &mut Context,
    decoration: &mut asg::Decoration,
) -> Option<asg::Literal> {
    let text = token.text();
    match token.kind() {
        SyntaxKind::NUMBER => {
            let parsed = if text.contains(['.', 'e', 'E']) {
                text.parse::<f64>().ok().map(asg::Literal::Real)
            } else {
                text.parse::<i64>().ok().map(asg::Literal::Integer)
            };
            if parsed.is_none() {
                report_at(context, decoration, InvalidNumber(text.to_string()), token);
            }
            parsed
        }
        SyntaxKind::CHAR_LITERAL => Some(asg::Literal::Char(
            unquote(text).chars().next().unwrap_or('\0'),
        )),
        SyntaxKind::STRING_LITERAL => Some(asg::Literal::String(unquote(text))),
        SyntaxKind::KEYWORD if same_word(text, "true") => Some(asg::Literal::Boolean(true)),
        SyntaxKind::KEYWORD if same_word(text, "false") => Some(asg::Literal::Boolean(false)),
        _ => None,
    }
}

// Strip the surrounding quotes; a doubled quote inside stands for one.
fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(text);
    inner.replace("''", "'")
}

//
// Types
//

fn resolve_optional_type(
    spec: Option<synast::TypeSpec>,
    context: &mut Context,
    decoration: &mut asg::Decoration,
) -> Type {
    match spec {
        Some(spec) => resolve_type(&spec, context, decoration),
        None => Type::Undefined,
    }
}

fn resolve_type(
    spec: &synast::TypeSpec,
    context: &mut Context,
    decoration: &mut asg::Decoration,
) -> Type {
    match spec.kind() {
        Some(synast::TypeSpecKind::Named(token)) => resolve_type_name(&token, context, decoration),
        Some(synast::TypeSpecKind::Array(array)) => from_array_type(&array, context, decoration),
        Some(synast::TypeSpecKind::Record(record)) => {
            from_record_type(&record, context, decoration)
        }
        None => Type::Undefined,
    }
}

// A declared type name wins over a standard one of the same spelling.
fn resolve_type_name(
    token: &SyntaxToken,
    context: &mut Context,
    decoration: &mut asg::Decoration,
) -> Type {
    let name = token.text();
    if token.kind() == SyntaxKind::KEYWORD {
        return Type::standard(name).unwrap_or(Type::Undefined);
    }
    match context.find(name) {
        Some(id) => {
            let symbol = &context.symbol_table()[id];
            if symbol.class() == ObjectClass::Type {
                symbol.ty()
            } else {
                report_at(context, decoration, NotAType(name.to_string()), token);
                Type::Undefined
            }
        }
        None => match Type::standard(name) {
            Some(ty) => ty,
            None => {
                report_at(context, decoration, UnknownType(name.to_string()), token);
                Type::Undefined
            }
        },
    }
}

fn from_array_type(
    array: &synast::ArrayType,
    context: &mut Context,
    decoration: &mut asg::Decoration,
) -> Type {
    let range = array.range();
    let low = range.as_ref().and_then(|range| range.low());
    let high = range.as_ref().and_then(|range| range.high());
    let low_value = array_bound(low.as_ref(), context, decoration);
    let high_value = array_bound(high.as_ref(), context, decoration);
    let element_ty = match array.element_type() {
        Some(spec) => resolve_type(&spec, context, decoration),
        None => Type::Undefined,
    };
    let (Some((index_ty, low_value)), Some((_, high_value))) = (low_value, high_value) else {
        return Type::Undefined;
    };
    if low_value > high_value {
        let kind = InvertedBounds {
            low: low_value,
            high: high_value,
        };
        match &range {
            Some(range) => report(context, decoration, kind, range),
            None => report(context, decoration, kind, array),
        }
    }
    let element_size = context.symbol_table().type_size(element_ty);
    if array_size(low_value, high_value, element_size).is_none() {
        report(context, decoration, ArrayTooLarge, array);
    }
    let id = context
        .symbol_table_mut()
        .enter_array(index_ty, element_ty, low_value, high_value, element_size);
    Type::Array(id)
}

// An integer or char bound, with its type. `None` after an error.
fn array_bound(
    constant: Option<&synast::Constant>,
    context: &mut Context,
    decoration: &mut asg::Decoration,
) -> Option<(Type, i64)> {
    let constant = constant?;
    let value = eval_constant(constant, context, decoration);
    match value.ty {
        Type::Integer | Type::Char => Some((value.ty, value.address)),
        Type::Undefined => None,
        _ => {
            report(context, decoration, BoundNotOrdinal, constant);
            None
        }
    }
}

/// The fields live in a block of their own, one level deeper, at offsets from 0.
fn from_record_type(
    record: &synast::RecordType,
    context: &mut Context,
    decoration: &mut asg::Decoration,
) -> Type {
    let block = context.symbol_table_mut().enter_block();
    let saved_offset = context.replace_offset(0);
    with_scope!(context, block, {
        for group in record.field_groups() {
            let ty = resolve_optional_type(group.type_spec(), context, decoration);
            let size = context.symbol_table().type_size(ty);
            let names = group.identifier_list().into_iter().flat_map(|list| list.names());
            for name_token in names {
                let _ = declare(
                    context,
                    decoration,
                    &name_token,
                    ObjectClass::Field,
                    ty,
                    None,
                    IsRef::False,
                    |cx| cx.allocate(size, &name_token),
                );
            }
        }
    });
    let size = context.replace_offset(saved_offset);
    context.symbol_table_mut().set_var_size(block, size);
    Type::Record(block)
}

//
// Statements
//

fn from_optional_compound(
    compound: Option<synast::CompoundStatement>,
    context: &mut Context,
) -> asg::Block {
    match compound {
        Some(compound) => from_compound(&compound, context),
        None => asg::Block {
            statements: Vec::new(),
            decoration: asg::Decoration::new(Type::Void, context.level()),
        },
    }
}

fn from_compound(compound: &synast::CompoundStatement, context: &mut Context) -> asg::Block {
    asg::Block {
        statements: from_statements(compound.statements(), context),
        decoration: asg::Decoration::new(Type::Void, context.level()),
    }
}

fn from_statements<I: IntoIterator<Item = synast::Stmt>>(
    stmts: I,
    context: &mut Context,
) -> Vec<asg::Stmt> {
    stmts
        .into_iter()
        .map(|stmt| from_stmt(&stmt, context))
        .collect()
}

fn from_optional_stmt(stmt: Option<synast::Stmt>, context: &mut Context) -> Option<Box<asg::Stmt>> {
    stmt.map(|stmt| Box::new(from_stmt(&stmt, context)))
}

fn from_stmt(stmt: &synast::Stmt, context: &mut Context) -> asg::Stmt {
    match stmt {
        synast::Stmt::Assignment(assign) => asg::Stmt::Assign(from_assignment(assign, context)),
        synast::Stmt::ProcedureCall(call) => {
            let arguments: Vec<synast::Expression> = call
                .arguments()
                .map(|list| list.arguments().collect())
                .unwrap_or_default();
            asg::Stmt::ProcedureCall(from_call(call.name(), &arguments, call, false, context))
        }
        synast::Stmt::If(stmt) => {
            let mut decoration = asg::Decoration::new(Type::Void, context.level());
            let condition =
                check_condition(stmt.condition(), stmt, "jika", context, &mut decoration);
            let then_branch = from_optional_stmt(stmt.then_branch(), context);
            let else_branch = from_optional_stmt(stmt.else_branch(), context);
            asg::Stmt::If(asg::If {
                condition,
                then_branch,
                else_branch,
                decoration,
            })
        }
        synast::Stmt::While(stmt) => {
            let mut decoration = asg::Decoration::new(Type::Void, context.level());
            let condition =
                check_condition(stmt.condition(), stmt, "selama", context, &mut decoration);
            let body = from_optional_stmt(stmt.body(), context);
            asg::Stmt::While(asg::While {
                condition,
                body,
                decoration,
            })
        }
        synast::Stmt::For(stmt) => asg::Stmt::For(from_for(stmt, context)),
        synast::Stmt::Repeat(stmt) => {
            let mut decoration = asg::Decoration::new(Type::Void, context.level());
            let body = from_statements(stmt.statements(), context);
            let condition =
                check_condition(stmt.condition(), stmt, "ulangi", context, &mut decoration);
            asg::Stmt::Repeat(asg::Repeat {
                body,
                condition,
                decoration,
            })
        }
        synast::Stmt::Compound(compound) => asg::Stmt::Block(from_compound(compound, context)),
    }
}

fn from_assignment(assign: &synast::AssignmentStatement, context: &mut Context) -> asg::Assignment {
    let mut decoration = asg::Decoration::new(Type::Void, context.level());
    let target = match assign.target() {
        Some(variable) => from_variable(&variable, context),
        None => asg::TExpr::placeholder(context.level()),
    };
    let value = from_optional_expression(assign.value(), context);
    // An unresolved target has been reported already.
    if !target.is_lvalue() && !target.ty().is_undefined() {
        let name = assign.target().map(|t| t.text()).unwrap_or_default();
        report(context, &mut decoration, NotAssignable(name), assign);
    }
    if !types::compatible(target.ty(), value.ty()) {
        let kind = AssignmentMismatch {
            target: target.ty(),
            value: value.ty(),
        };
        report(context, &mut decoration, kind, assign);
    }
    decoration.ty = target.ty();
    asg::Assignment {
        target,
        value,
        decoration,
    }
}

// `what` names the statement in the message.
fn check_condition<N: AstNode>(
    expr: Option<synast::Expression>,
    stmt: &N,
    what: &'static str,
    context: &mut Context,
    decoration: &mut asg::Decoration,
) -> asg::TExpr {
    let texpr = from_optional_expression(expr.clone(), context);
    if !texpr.ty().is_boolean() {
        match &expr {
            Some(expr) => report(context, decoration, ConditionNotBoolean(what), expr),
            None => report(context, decoration, ConditionNotBoolean(what), stmt),
        }
    }
    texpr
}

fn from_for(stmt: &synast::ForStatement, context: &mut Context) -> asg::For {
    let mut decoration = asg::Decoration::new(Type::Void, context.level());
    let variable = match stmt.control() {
        Some(token) => {
            let variable = from_name(&token, stmt, context);
            let ty = variable.ty();
            if !variable.is_lvalue() && !ty.is_undefined() {
                let kind = NotAssignable(token.text().to_string());
                report_at(context, &mut decoration, kind, &token);
            } else if ty != Type::Integer && !ty.is_undefined() {
                report_at(context, &mut decoration, LoopVariableNotInteger(ty), &token);
            }
            variable
        }
        None => asg::TExpr::placeholder(context.level()),
    };
    let start = loop_bound(stmt.start(), context, &mut decoration);
    let end = loop_bound(stmt.end(), context, &mut decoration);
    let body = from_optional_stmt(stmt.body(), context);
    asg::For {
        variable,
        start,
        end,
        downto: stmt.is_downto(),
        body,
        decoration,
    }
}

fn loop_bound(
    expr: Option<synast::Expression>,
    context: &mut Context,
    decoration: &mut asg::Decoration,
) -> asg::TExpr {
    let bound = from_optional_expression(expr.clone(), context);
    if !types::compatible(Type::Integer, bound.ty()) {
        if let Some(expr) = &expr {
            report(context, decoration, LoopBoundNotInteger(bound.ty()), expr);
        }
    }
    bound
}

//
// Calls
//

/// Resolve and check a call. `in_expression` selects function-call rules:
/// procedures and the builtins, which produce no value, are rejected there.
fn from_call<N: AstNode>(
    name_token: Option<SyntaxToken>,
    arguments: &[synast::Expression],
    node: &N,
    in_expression: bool,
    context: &mut Context,
) -> asg::Call {
    let mut decoration = asg::Decoration::new(Type::Void, context.level());
    let typed_arguments: Vec<asg::TExpr> = arguments
        .iter()
        .map(|arg| from_expression(arg, context))
        .collect();
    let Some(name_token) = name_token else {
        return asg::Call {
            callee: asg::Callee::Unresolved(String::new()),
            arguments: typed_arguments,
            decoration,
        };
    };
    let name = name_token.text().to_string();
    let callee = match context.find(&name) {
        Some(id) => {
            // Inside a function, its name refers to the return slot.
            let id = context.function_of_slot(id).unwrap_or(id);
            let symbol = &context.symbol_table()[id];
            let (class, ty, block) = (symbol.class(), symbol.ty(), symbol.block());
            match (class, block) {
                (ObjectClass::Procedure, _) if in_expression => {
                    decoration.ty = Type::Undefined;
                    report(context, &mut decoration, ProcedureInExpression(name.clone()), node);
                    asg::Callee::User(id)
                }
                (ObjectClass::Procedure | ObjectClass::Function, Some(block)) => {
                    decoration.ty = ty;
                    let params = context.symbol_table().parameters(block);
                    check_arguments(
                        &name,
                        &params,
                        &typed_arguments,
                        arguments,
                        node,
                        context,
                        &mut decoration,
                    );
                    asg::Callee::User(id)
                }
                _ => {
                    decoration.ty = Type::Undefined;
                    report_at(context, &mut decoration, NotCallable(name.clone()), &name_token);
                    asg::Callee::Unresolved(name)
                }
            }
        }
        None => match asg::Builtin::from_name(&name) {
            Some(builtin) if in_expression => {
                decoration.ty = Type::Undefined;
                report(context, &mut decoration, ProcedureInExpression(name), node);
                asg::Callee::Builtin(builtin)
            }
            Some(builtin) => {
                if builtin.stores_arguments() {
                    for (position, (arg, syntax)) in
                        typed_arguments.iter().zip(arguments).enumerate()
                    {
                        if !arg.is_lvalue() && !arg.ty().is_undefined() {
                            let kind = ArgumentNotAssignable {
                                name: builtin.name().to_string(),
                                position: position + 1,
                            };
                            report(context, &mut decoration, kind, syntax);
                        }
                    }
                }
                asg::Callee::Builtin(builtin)
            }
            None => {
                decoration.ty = Type::Undefined;
                report_at(
                    context,
                    &mut decoration,
                    UndeclaredIdentifier(name.clone()),
                    &name_token,
                );
                asg::Callee::Unresolved(name)
            }
        },
    };
    asg::Call {
        callee,
        arguments: typed_arguments,
        decoration,
    }
}

fn check_arguments<N: AstNode>(
    name: &str,
    params: &[SymbolId],
    arguments: &[asg::TExpr],
    syntax: &[synast::Expression],
    node: &N,
    context: &mut Context,
    decoration: &mut asg::Decoration,
) {
    if params.len() != arguments.len() {
        let kind = ArgumentCount {
            name: name.to_string(),
            expected: params.len(),
            found: arguments.len(),
        };
        report(context, decoration, kind, node);
    }
    for (position, ((param, arg), arg_syntax)) in
        params.iter().zip(arguments).zip(syntax).enumerate()
    {
        let param = &context.symbol_table()[*param];
        let (expected, is_ref) = (param.ty(), param.is_ref());
        if !types::compatible(expected, arg.ty()) {
            let kind = ArgumentMismatch {
                name: name.to_string(),
                position: position + 1,
                expected,
                found: arg.ty(),
            };
            report(context, decoration, kind, arg_syntax);
        } else if is_ref && !arg.is_lvalue() && !arg.ty().is_undefined() {
            let kind = ArgumentNotAssignable {
                name: name.to_string(),
                position: position + 1,
            };
            report(context, decoration, kind, arg_syntax);
        }
    }
}

//
// Expressions
//

fn from_optional_expression(expr: Option<synast::Expression>, context: &mut Context) -> asg::TExpr {
    match expr {
        Some(expr) => from_expression(&expr, context),
        None => asg::TExpr::placeholder(context.level()),
    }
}

fn from_expression(expr: &synast::Expression, context: &mut Context) -> asg::TExpr {
    let left = match expr.lhs() {
        Some(lhs) => from_simple_expression(&lhs, context),
        None => return asg::TExpr::placeholder(context.level()),
    };
    let (Some(op_node), Some(rhs)) = (expr.op(), expr.rhs()) else {
        return left;
    };
    let right = from_simple_expression(&rhs, context);
    match op_node.op() {
        Some(op) => binary(op, left, right, expr, context),
        None => left,
    }
}

fn from_simple_expression(expr: &synast::SimpleExpression, context: &mut Context) -> asg::TExpr {
    let mut acc = match expr.first_term() {
        Some(term) => from_term(&term, context),
        None => return asg::TExpr::placeholder(context.level()),
    };
    // The sign binds to the first term only.
    if let Some(sign) = expr.sign() {
        acc = unary(sign, acc, expr, context);
    }
    for (op_node, term) in expr.rest() {
        let right = from_term(&term, context);
        if let Some(op) = op_node.op() {
            acc = binary(op, acc, right, &op_node, context);
        }
    }
    acc
}

fn from_term(term: &synast::Term, context: &mut Context) -> asg::TExpr {
    let mut acc = match term.first_factor() {
        Some(factor) => from_factor(&factor, context),
        None => return asg::TExpr::placeholder(context.level()),
    };
    for (op_node, factor) in term.rest() {
        let right = from_factor(&factor, context);
        if let Some(op) = op_node.op() {
            acc = binary(op, acc, right, &op_node, context);
        }
    }
    acc
}

fn from_factor(factor: &synast::Factor, context: &mut Context) -> asg::TExpr {
    match factor.kind() {
        Some(synast::FactorKind::Literal(token)) => {
            let mut decoration = asg::Decoration::new(Type::Undefined, context.level());
            let literal = literal_of_token(&token, context, &mut decoration)
                .unwrap_or(asg::Literal::Integer(0));
            if decoration.diagnostics.is_empty() {
                decoration.ty = literal.ty();
            }
            asg::TExpr::new(asg::Expr::Literal(literal), decoration)
        }
        Some(synast::FactorKind::Variable(variable)) => from_variable(&variable, context),
        Some(synast::FactorKind::Call(call)) => {
            let arguments: Vec<synast::Expression> = call
                .arguments()
                .map(|list| list.arguments().collect())
                .unwrap_or_default();
            let call = from_call(call.name(), &arguments, &call, true, context);
            call_expression(call)
        }
        Some(synast::FactorKind::Paren(expr)) => from_expression(&expr, context),
        Some(synast::FactorKind::Not(inner)) => {
            let operand = from_factor(&inner, context);
            unary(UnaryOp::Not, operand, factor, context)
        }
        None => asg::TExpr::placeholder(context.level()),
    }
}

fn call_expression(call: asg::Call) -> asg::TExpr {
    let decoration = call.decoration.clone();
    asg::TExpr::new(asg::Expr::Call(Box::new(call)), decoration)
}

fn binary<N: AstNode>(
    op: BinaryOp,
    left: asg::TExpr,
    right: asg::TExpr,
    node: &N,
    context: &mut Context,
) -> asg::TExpr {
    let mut decoration = asg::Decoration::new(Type::Undefined, context.level());
    match types::binary_op_type(op, left.ty(), right.ty()) {
        Ok(ty) => decoration.ty = ty,
        Err(OperandRule::Compatible) => {
            // Still a truth value.
            decoration.ty = Type::Boolean;
            let kind = IncompatibleOperands {
                lhs: left.ty(),
                rhs: right.ty(),
            };
            report(context, &mut decoration, kind, node);
        }
        Err(rule) => {
            let kind = InvalidOperands {
                op: op.to_string(),
                rule,
            };
            report(context, &mut decoration, kind, node);
        }
    }
    asg::TExpr::new(
        asg::Expr::Binary(asg::BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }),
        decoration,
    )
}

fn unary<N: AstNode>(
    op: UnaryOp,
    operand: asg::TExpr,
    node: &N,
    context: &mut Context,
) -> asg::TExpr {
    let mut decoration = asg::Decoration::new(Type::Undefined, context.level());
    match types::unary_op_type(op, operand.ty()) {
        Ok(ty) => decoration.ty = ty,
        Err(rule) => {
            let kind = InvalidOperands {
                op: op.to_string(),
                rule,
            };
            report(context, &mut decoration, kind, node);
        }
    }
    asg::TExpr::new(
        asg::Expr::Unary(asg::UnaryExpr {
            op,
            operand: Box::new(operand),
        }),
        decoration,
    )
}

// How a bare name in value position resolves.
enum NameUse {
    Value(asg::TExpr),
    // A parameterless function call.
    Call,
}

/// A name without selectors, as in a `for` control variable. `node` is the
/// statement it appears in.
fn from_name<N: AstNode>(token: &SyntaxToken, node: &N, context: &mut Context) -> asg::TExpr {
    match resolve_name(token, false, context) {
        NameUse::Value(texpr) => texpr,
        NameUse::Call => {
            call_expression(from_call(Some(token.clone()), &[], node, true, context))
        }
    }
}

fn resolve_name(token: &SyntaxToken, has_accessors: bool, context: &mut Context) -> NameUse {
    let name = token.text().to_string();
    let mut decoration = asg::Decoration::new(Type::Undefined, context.level());
    let variable = |symbol: SymbolIdResult, is_lvalue: bool, decoration: asg::Decoration| {
        NameUse::Value(asg::TExpr::new(
            asg::Expr::Variable(asg::VariableRef {
                name: name.clone(),
                symbol,
                accessors: Vec::new(),
                is_lvalue,
            }),
            decoration,
        ))
    };
    let Ok(id) = context.lookup_symbol(token) else {
        decoration
            .diagnostics
            .push(UndeclaredIdentifier(name.clone()));
        return variable(Err(SymbolError::MissingBinding), false, decoration);
    };
    let symbol = &context.symbol_table()[id];
    let (class, ty) = (symbol.class(), symbol.ty());
    let (level, address) = (symbol.level(), symbol.address());
    match class {
        ObjectClass::Variable => {
            decoration.ty = ty;
            decoration.level = level;
            decoration.address = Some(address);
            variable(Ok(id), true, decoration)
        }
        ObjectClass::Constant => {
            decoration.ty = ty;
            decoration.level = level;
            decoration.address = Some(address);
            variable(Ok(id), false, decoration)
        }
        ObjectClass::Function if !has_accessors => NameUse::Call,
        ObjectClass::Procedure => {
            report_at(context, &mut decoration, ProcedureInExpression(name.clone()), token);
            variable(Ok(id), false, decoration)
        }
        _ => {
            report_at(context, &mut decoration, NotAValue(name.clone()), token);
            variable(Ok(id), false, decoration)
        }
    }
}

fn from_variable(variable: &synast::Variable, context: &mut Context) -> asg::TExpr {
    let Some(token) = variable.name() else {
        return asg::TExpr::placeholder(context.level());
    };
    let accessors: Vec<synast::Accessor> = variable.accessors().collect();
    let mut texpr = match resolve_name(&token, !accessors.is_empty(), context) {
        NameUse::Value(texpr) => texpr,
        NameUse::Call => {
            return call_expression(from_call(Some(token), &[], variable, true, context));
        }
    };
    let asg::Expr::Variable(var) = &mut texpr.expression else {
        return texpr;
    };
    let mut ty = texpr.decoration.ty;
    let decoration = &mut texpr.decoration;
    for accessor in accessors {
        match accessor {
            synast::Accessor::Index(index) => {
                for expr in index.indices() {
                    let index_expr = from_expression(&expr, context);
                    if !types::compatible(Type::Integer, index_expr.ty()) {
                        report(context, decoration, IndexNotInteger(index_expr.ty()), &expr);
                    }
                    ty = match ty {
                        Type::Array(id) => context.symbol_table()[id].element_ty(),
                        Type::Undefined => Type::Undefined,
                        _ => {
                            report(context, decoration, NotAnArray(var.name.clone()), &index);
                            Type::Undefined
                        }
                    };
                    var.accessors.push(asg::Access::Index(index_expr));
                }
            }
            synast::Accessor::Field(field) => {
                let Some(field_token) = field.field() else {
                    continue;
                };
                let field_name = field_token.text().to_string();
                let symbol = match ty {
                    Type::Record(block) => {
                        match context.symbol_table().lookup_in_block(block, &field_name) {
                            Some(id) => Ok(id),
                            None => {
                                report_at(
                                    context,
                                    decoration,
                                    UnknownField(field_name.clone()),
                                    &field_token,
                                );
                                Err(SymbolError::MissingBinding)
                            }
                        }
                    }
                    Type::Undefined => Err(SymbolError::MissingBinding),
                    _ => {
                        report(context, decoration, NotARecord(var.name.clone()), &field);
                        Err(SymbolError::MissingBinding)
                    }
                };
                ty = match symbol {
                    Ok(id) => context.symbol_table()[id].ty(),
                    Err(_) => Type::Undefined,
                };
                var.accessors.push(asg::Access::Field {
                    name: field_name,
                    symbol,
                    ty,
                });
            }
        }
    }
    decoration.ty = ty;
    texpr
}
