// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! Defines a bunch of data-less enums for unary and binary operators.
//!
//! Types here don't know about AST, this allows re-using them for both the
//! syntax views and the decorated tree.

use std::fmt;

use pascals_tokens::same_word;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `+`
    Plus,
    /// `-`
    Neg,
    /// `tidak`
    Not,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Rel(RelOp),
    Arith(ArithOp),
    Logic(LogicOp),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RelOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    /// `/`, always real.
    Div,
    /// `bagi`
    IntDiv,
    Mod,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogicOp {
    /// `dan`
    And,
    /// `atau`
    Or,
}

impl UnaryOp {
    pub fn from_text(text: &str) -> Option<UnaryOp> {
        match text {
            "+" => Some(UnaryOp::Plus),
            "-" => Some(UnaryOp::Neg),
            _ if same_word(text, "tidak") => Some(UnaryOp::Not),
            _ => None,
        }
    }
}

impl BinaryOp {
    pub fn from_text(text: &str) -> Option<BinaryOp> {
        let op = match text {
            "=" => BinaryOp::Rel(RelOp::Eq),
            "<>" => BinaryOp::Rel(RelOp::Ne),
            "<" => BinaryOp::Rel(RelOp::Lt),
            "<=" => BinaryOp::Rel(RelOp::Le),
            ">" => BinaryOp::Rel(RelOp::Gt),
            ">=" => BinaryOp::Rel(RelOp::Ge),
            "+" => BinaryOp::Arith(ArithOp::Add),
            "-" => BinaryOp::Arith(ArithOp::Sub),
            "*" => BinaryOp::Arith(ArithOp::Mul),
            "/" => BinaryOp::Arith(ArithOp::Div),
            _ if same_word(text, "bagi") => BinaryOp::Arith(ArithOp::IntDiv),
            _ if same_word(text, "mod") => BinaryOp::Arith(ArithOp::Mod),
            _ if same_word(text, "dan") => BinaryOp::Logic(LogicOp::And),
            _ if same_word(text, "atau") => BinaryOp::Logic(LogicOp::Or),
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let res = match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "tidak",
        };
        f.write_str(res)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let res = match self {
            BinaryOp::Rel(RelOp::Eq) => "=",
            BinaryOp::Rel(RelOp::Ne) => "<>",
            BinaryOp::Rel(RelOp::Lt) => "<",
            BinaryOp::Rel(RelOp::Le) => "<=",
            BinaryOp::Rel(RelOp::Gt) => ">",
            BinaryOp::Rel(RelOp::Ge) => ">=",
            BinaryOp::Arith(ArithOp::Add) => "+",
            BinaryOp::Arith(ArithOp::Sub) => "-",
            BinaryOp::Arith(ArithOp::Mul) => "*",
            BinaryOp::Arith(ArithOp::Div) => "/",
            BinaryOp::Arith(ArithOp::IntDiv) => "bagi",
            BinaryOp::Arith(ArithOp::Mod) => "mod",
            BinaryOp::Logic(LogicOp::And) => "dan",
            BinaryOp::Logic(LogicOp::Or) => "atau",
        };
        f.write_str(res)
    }
}
