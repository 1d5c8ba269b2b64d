// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

// Types used to annotate the decorated AST and the symbol table.
// This file should include all code that decides which types go together. In
// particular compatibility and the result types of operators are implemented here.

use std::fmt;

use pascals_syntax::ast::{ArithOp, BinaryOp, UnaryOp};

use crate::symbols::{ArrayId, BlockId};

/// A resolved type. Composite types carry their descriptor: arrays point into the
/// array table and records at the block holding their fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Integer,
    Boolean,
    Char,
    Real,
    String,
    Array(ArrayId),
    Record(BlockId),
    // Undefined means a type that is erroneously non-existent. The prototypical
    // application is trying to resolve an unbound identifier.
    Undefined,
}

impl Type {
    /// Name of the base type kind, without the descriptor.
    pub fn name(&self) -> &'static str {
        match self {
            Type::Void => "void",
            Type::Integer => "integer",
            Type::Boolean => "boolean",
            Type::Char => "char",
            Type::Real => "real",
            Type::String => "string",
            Type::Array(_) => "array",
            Type::Record(_) => "record",
            Type::Undefined => "undefined",
        }
    }

    /// Index of the array descriptor or record block, if any.
    pub fn reference(&self) -> Option<usize> {
        match self {
            Type::Array(id) => Some(id.index()),
            Type::Record(id) => Some(id.index()),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Type::Undefined)
    }

    /// Integer, char and real take part in arithmetic.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Integer | Type::Char | Type::Real | Type::Undefined)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Integer | Type::Undefined)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Type::Boolean | Type::Undefined)
    }

    /// Resolve one of the standard type names. These are accepted as identifiers
    /// unless a declaration shadows them.
    pub fn standard(name: &str) -> Option<Type> {
        const STANDARD: [(&str, Type); 4] = [
            ("integer", Type::Integer),
            ("boolean", Type::Boolean),
            ("char", Type::Char),
            ("real", Type::Real),
        ];
        STANDARD
            .iter()
            .find(|(standard, _)| name.eq_ignore_ascii_case(standard))
            .map(|(_, ty)| *ty)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Two types are compatible if they are identical, if one is integer and the
/// other char or real, or if either is undefined.
pub fn compatible(ty1: Type, ty2: Type) -> bool {
    use Type::*;
    if ty1 == ty2 || ty1.is_undefined() || ty2.is_undefined() {
        return true;
    }
    matches!(
        (ty1, ty2),
        (Integer, Char) | (Char, Integer) | (Integer, Real) | (Real, Integer)
    )
}

/// The operand requirement an operator imposes. Returned when it is violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandRule {
    Numeric,
    Integer,
    Boolean,
    Compatible,
}

// promotion for + - *
fn promote_numeric(ty1: Type, ty2: Type) -> Type {
    if ty1.is_undefined() || ty2.is_undefined() {
        Type::Undefined
    } else if ty1 == Type::Real || ty2 == Type::Real {
        Type::Real
    } else {
        Type::Integer
    }
}

/// Result type of `lhs op rhs`, or the rule the operands break.
pub fn binary_op_type(op: BinaryOp, lhs: Type, rhs: Type) -> Result<Type, OperandRule> {
    match op {
        BinaryOp::Rel(_) => {
            if compatible(lhs, rhs) {
                Ok(Type::Boolean)
            } else {
                Err(OperandRule::Compatible)
            }
        }
        BinaryOp::Logic(_) => {
            if lhs.is_boolean() && rhs.is_boolean() {
                Ok(Type::Boolean)
            } else {
                Err(OperandRule::Boolean)
            }
        }
        BinaryOp::Arith(ArithOp::IntDiv | ArithOp::Mod) => {
            if lhs.is_integer() && rhs.is_integer() {
                Ok(Type::Integer)
            } else {
                Err(OperandRule::Integer)
            }
        }
        BinaryOp::Arith(arith) => {
            if !(lhs.is_numeric() && rhs.is_numeric()) {
                return Err(OperandRule::Numeric);
            }
            if arith == ArithOp::Div {
                Ok(Type::Real)
            } else {
                Ok(promote_numeric(lhs, rhs))
            }
        }
    }
}

/// Result type of `op operand`, or the rule the operand breaks.
pub fn unary_op_type(op: UnaryOp, operand: Type) -> Result<Type, OperandRule> {
    match op {
        UnaryOp::Plus | UnaryOp::Neg if operand.is_numeric() => Ok(operand),
        UnaryOp::Plus | UnaryOp::Neg => Err(OperandRule::Numeric),
        UnaryOp::Not if operand.is_boolean() => Ok(Type::Boolean),
        UnaryOp::Not => Err(OperandRule::Boolean),
    }
}
