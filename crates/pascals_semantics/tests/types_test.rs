// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use pascals_semantics::asg;
use pascals_semantics::syntax_to_semantics::parse_source_string;
use pascals_semantics::types::{self, Type};
use pascals_syntax::ast::{ArithOp, BinaryOp, LogicOp, RelOp, UnaryOp};

// Type of `expr` when passed to `writeln`, which accepts anything, plus the
// error messages.
fn expr_type(expr: &str) -> (Type, Vec<String>) {
    let code = format!(
        "program T; variabel i : integer; r : real; c : char; b : boolean; mulai writeln({expr}) selesai."
    );
    let analysis = parse_source_string(code, None)
        .take_analysis()
        .expect("no syntax errors");
    let ty = match analysis.program().body.statements.first() {
        Some(asg::Stmt::ProcedureCall(call)) => call.arguments[0].ty(),
        _ => unreachable!(),
    };
    (ty, analysis.error_messages())
}

#[test]
fn test_real_division_of_integers() {
    assert_eq!(expr_type("1 / 2"), (Type::Real, vec![]));
}

#[test]
fn test_real_division_of_mixed() {
    assert_eq!(expr_type("1.0 / 2"), (Type::Real, vec![]));
}

#[test]
fn test_integer_division() {
    assert_eq!(expr_type("5 bagi 2"), (Type::Integer, vec![]));
    assert_eq!(expr_type("i mod 3"), (Type::Integer, vec![]));
}

#[test]
fn test_integer_division_rejects_real() {
    let (ty, errors) = expr_type("5 bagi 2.0");
    assert_eq!(ty, Type::Undefined);
    assert_eq!(errors, vec!["operator 'bagi' requires integer operands"]);
}

#[test]
fn test_promotion() {
    assert_eq!(expr_type("i + 1").0, Type::Integer);
    assert_eq!(expr_type("i * r").0, Type::Real);
    assert_eq!(expr_type("c + 1").0, Type::Integer);
    assert_eq!(expr_type("-r").0, Type::Real);
}

#[test]
fn test_relational_is_boolean() {
    assert_eq!(expr_type("i < r"), (Type::Boolean, vec![]));
    assert_eq!(expr_type("c = 1"), (Type::Boolean, vec![]));
}

#[test]
fn test_relational_incompatible() {
    let (ty, errors) = expr_type("i = b");
    assert_eq!(ty, Type::Boolean);
    assert_eq!(
        errors,
        vec!["type mismatch in relational operation: integer and boolean"]
    );
}

#[test]
fn test_logical_operators() {
    assert_eq!(expr_type("b dan (i > 0)"), (Type::Boolean, vec![]));
    assert_eq!(expr_type("tidak b atau b"), (Type::Boolean, vec![]));
    let (_, errors) = expr_type("b atau 1");
    assert_eq!(errors, vec!["operator 'atau' requires boolean operands"]);
    let (_, errors) = expr_type("tidak i");
    assert_eq!(errors, vec!["operator 'tidak' requires boolean operands"]);
}

#[test]
fn test_arithmetic_on_boolean() {
    let (ty, errors) = expr_type("b + 1");
    assert_eq!(ty, Type::Undefined);
    assert_eq!(errors, vec!["operator '+' requires numeric operands"]);
}

#[test]
fn test_undefined_does_not_cascade() {
    // One error for the unknown name, none for the arithmetic on it.
    let (ty, errors) = expr_type("zz * 2 + 1");
    assert_eq!(ty, Type::Undefined);
    assert_eq!(errors, vec!["undeclared identifier 'zz'"]);
}

#[test]
fn test_literal_types() {
    assert_eq!(expr_type("'a'").0, Type::Char);
    assert_eq!(expr_type("'abc'").0, Type::String);
    assert_eq!(expr_type("true").0, Type::Boolean);
    assert_eq!(expr_type("2.5e3").0, Type::Real);
}

#[test]
fn test_compatible() {
    assert!(types::compatible(Type::Integer, Type::Real));
    assert!(types::compatible(Type::Char, Type::Integer));
    assert!(types::compatible(Type::Undefined, Type::Boolean));
    assert!(!types::compatible(Type::Char, Type::Real));
    assert!(!types::compatible(Type::Integer, Type::String));
    assert!(!types::compatible(Type::Boolean, Type::Integer));
}

#[test]
fn test_operator_tables() {
    let div = BinaryOp::Arith(ArithOp::Div);
    assert_eq!(types::binary_op_type(div, Type::Integer, Type::Integer), Ok(Type::Real));
    let lt = BinaryOp::Rel(RelOp::Lt);
    assert_eq!(types::binary_op_type(lt, Type::Char, Type::Integer), Ok(Type::Boolean));
    let and = BinaryOp::Logic(LogicOp::And);
    assert_eq!(
        types::binary_op_type(and, Type::Boolean, Type::Integer),
        Err(types::OperandRule::Boolean)
    );
    assert_eq!(types::unary_op_type(UnaryOp::Neg, Type::Integer), Ok(Type::Integer));
    assert_eq!(
        types::unary_op_type(UnaryOp::Not, Type::Real),
        Err(types::OperandRule::Boolean)
    );
}
