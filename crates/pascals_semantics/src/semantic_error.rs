// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Range;

use pascals_source_file::{ErrorTrait, SourceTrait};
use pascals_syntax::{token_index, token_range, SyntaxElement, TextRange};
use rowan::NodeOrToken;
use thiserror::Error;

use crate::types::{OperandRule, Type};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SemanticErrorKind {
    #[error("undeclared identifier '{0}'")]
    UndeclaredIdentifier(String),
    #[error("duplicate declaration of '{0}'")]
    DuplicateDeclaration(String),
    #[error("unknown type '{0}'")]
    UnknownType(String),
    #[error("'{0}' is not a type")]
    NotAType(String),
    #[error("'{0}' is not a constant")]
    NotAConstant(String),
    #[error("sign applied to non-numeric constant '{0}'")]
    SignedNonNumeric(String),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("array bound must be an integer or char constant")]
    BoundNotOrdinal,
    #[error("lower bound greater than upper bound ({low} .. {high})")]
    InvertedBounds { low: i64, high: i64 },
    #[error("array type is too large")]
    ArrayTooLarge,
    #[error("storage for '{0}' exceeds the addressable size")]
    StorageOverflow(String),
    #[error("type mismatch in assignment: cannot assign {value} to {target}")]
    AssignmentMismatch { target: Type, value: Type },
    #[error("'{0}' cannot be assigned to")]
    NotAssignable(String),
    #[error("'{0}' is not a value")]
    NotAValue(String),
    #[error("loop variable must be integer type, found {0}")]
    LoopVariableNotInteger(Type),
    #[error("loop bound must be integer, found {0}")]
    LoopBoundNotInteger(Type),
    #[error("{0} condition must be boolean type")]
    ConditionNotBoolean(&'static str),
    #[error("operator '{op}' requires {} operands", rule_name(.rule))]
    InvalidOperands { op: String, rule: OperandRule },
    #[error("type mismatch in relational operation: {lhs} and {rhs}")]
    IncompatibleOperands { lhs: Type, rhs: Type },
    #[error("array index must be integer, found {0}")]
    IndexNotInteger(Type),
    #[error("'{0}' is not an array")]
    NotAnArray(String),
    #[error("'{0}' is not a record")]
    NotARecord(String),
    #[error("record has no field '{0}'")]
    UnknownField(String),
    #[error("'{name}' expects {expected} argument(s) but got {found}")]
    ArgumentCount {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("argument {position} of '{name}' has type {found}, expected {expected}")]
    ArgumentMismatch {
        name: String,
        position: usize,
        expected: Type,
        found: Type,
    },
    #[error("argument {position} of '{name}' must be a variable")]
    ArgumentNotAssignable { name: String, position: usize },
    #[error("procedure '{0}' used in an expression")]
    ProcedureInExpression(String),
    #[error("'{0}' is not a procedure or function")]
    NotCallable(String),
    #[error("function '{0}' never assigns its return value")]
    MissingReturnAssignment(String),
}

fn rule_name(rule: &OperandRule) -> &'static str {
    match rule {
        OperandRule::Numeric => "numeric",
        OperandRule::Integer => "integer",
        OperandRule::Boolean => "boolean",
        OperandRule::Compatible => "compatible",
    }
}

/// A diagnostic attached to the syntax it is about.
#[derive(Clone, Debug)]
pub struct SemanticError {
    error_kind: SemanticErrorKind,
    element: SyntaxElement, // Includes span and api functions to retrieve text, etc.
}

impl SemanticError {
    pub fn new(error_kind: SemanticErrorKind, element: SyntaxElement) -> Self {
        Self {
            error_kind,
            element,
        }
    }

    pub fn kind(&self) -> &SemanticErrorKind {
        &self.error_kind
    }

    pub fn message(&self) -> String {
        self.error_kind.to_string()
    }

    /// Position in the concatenated lexemes of the tree.
    pub fn range(&self) -> TextRange {
        self.element.text_range()
    }

    /// Positions of the offending tokens in the token stream.
    pub fn token_range(&self) -> Range<usize> {
        match &self.element {
            NodeOrToken::Node(node) => token_range(node),
            NodeOrToken::Token(token) => {
                let index = token_index(token);
                index..index + 1
            }
        }
    }
}

impl ErrorTrait for SemanticError {
    fn message(&self) -> String {
        self.message()
    }

    fn token_range(&self) -> Range<usize> {
        self.token_range()
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens = self.token_range();
        write!(
            f,
            "{} (tokens {}..{})",
            self.error_kind, tokens.start, tokens.end
        )
    }
}

/// Diagnostics in the order they were found.
#[derive(Clone, Debug, Default)]
pub struct SemanticErrorList {
    list: Vec<SemanticError>,
}

impl std::ops::Deref for SemanticErrorList {
    type Target = Vec<SemanticError>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl SemanticErrorList {
    pub fn new() -> SemanticErrorList {
        SemanticErrorList::default()
    }

    pub(crate) fn insert(&mut self, error_kind: SemanticErrorKind, element: SyntaxElement) {
        self.list.push(SemanticError::new(error_kind, element));
    }

    /// The messages alone, in order.
    pub fn messages(&self) -> Vec<String> {
        self.list.iter().map(SemanticError::message).collect()
    }

    pub fn print_errors<S: SourceTrait>(&self, source: &S) {
        if !self.list.is_empty() {
            pascals_source_file::print_compiler_errors(&self.list, source);
        }
    }
}
