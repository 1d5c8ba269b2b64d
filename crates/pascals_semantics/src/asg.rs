// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! The decorated AST.
//!
//! Every node carries a [`Decoration`]: its resolved type, lexical level, address
//! where one applies, and the diagnostics raised while checking the node itself.
//! Nodes own their children. References to declared names are `SymbolId`s into the
//! [`SymbolTable`](crate::symbols::SymbolTable), never owning pointers.

use pascals_syntax::ast::{BinaryOp, UnaryOp};

use crate::semantic_error::SemanticErrorKind;
use crate::symbols::{BlockId, SymbolId, SymbolIdResult};
use crate::types::Type;

#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    pub ty: Type,
    pub level: usize,
    pub address: Option<i64>,
    pub diagnostics: Vec<SemanticErrorKind>,
}

impl Decoration {
    pub fn new(ty: Type, level: usize) -> Decoration {
        Decoration {
            ty,
            level,
            address: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_address(mut self, address: i64) -> Decoration {
        self.address = Some(address);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub name: String,
    pub symbol: SymbolIdResult,
    pub block: BlockId,
    pub declarations: Vec<Declaration>,
    pub body: Block,
    pub decoration: Decoration,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
    Const(ConstDeclaration),
    Type(TypeDeclaration),
    Var(VarDeclaration),
    Subprogram(SubprogramDeclaration),
}

impl Declaration {
    pub fn decoration(&self) -> &Decoration {
        match self {
            Declaration::Const(decl) => &decl.decoration,
            Declaration::Type(decl) => &decl.decoration,
            Declaration::Var(decl) => &decl.decoration,
            Declaration::Subprogram(decl) => &decl.decoration,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConstDeclaration {
    pub name: String,
    pub symbol: SymbolIdResult,
    pub value: Literal,
    pub decoration: Decoration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeDeclaration {
    pub name: String,
    pub symbol: SymbolIdResult,
    pub decoration: Decoration,
}

/// One declared variable. A group `a, b : integer` yields one per name.
#[derive(Clone, Debug, PartialEq)]
pub struct VarDeclaration {
    pub name: String,
    pub symbol: SymbolIdResult,
    pub decoration: Decoration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubprogramDeclaration {
    pub name: String,
    pub symbol: SymbolIdResult,
    pub is_function: bool,
    pub block: BlockId,
    pub parameters: Vec<SymbolId>,
    /// The implicit variable holding a function's result.
    pub return_slot: Option<SymbolId>,
    pub declarations: Vec<Declaration>,
    pub body: Block,
    pub decoration: Decoration,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Assign(Assignment),
    If(If),
    While(While),
    For(For),
    Repeat(Repeat),
    ProcedureCall(Call),
    Block(Block),
}

impl Stmt {
    pub fn decoration(&self) -> &Decoration {
        match self {
            Stmt::Assign(stmt) => &stmt.decoration,
            Stmt::If(stmt) => &stmt.decoration,
            Stmt::While(stmt) => &stmt.decoration,
            Stmt::For(stmt) => &stmt.decoration,
            Stmt::Repeat(stmt) => &stmt.decoration,
            Stmt::ProcedureCall(stmt) => &stmt.decoration,
            Stmt::Block(stmt) => &stmt.decoration,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub decoration: Decoration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub target: TExpr,
    pub value: TExpr,
    pub decoration: Decoration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct If {
    pub condition: TExpr,
    pub then_branch: Option<Box<Stmt>>,
    pub else_branch: Option<Box<Stmt>>,
    pub decoration: Decoration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct While {
    pub condition: TExpr,
    pub body: Option<Box<Stmt>>,
    pub decoration: Decoration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct For {
    pub variable: TExpr,
    pub start: TExpr,
    pub end: TExpr,
    pub downto: bool,
    pub body: Option<Box<Stmt>>,
    pub decoration: Decoration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Repeat {
    pub body: Vec<Stmt>,
    pub condition: TExpr,
    pub decoration: Decoration,
}

/// A call statement or a function call in an expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub callee: Callee,
    pub arguments: Vec<TExpr>,
    pub decoration: Decoration,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Callee {
    User(SymbolId),
    Builtin(Builtin),
    Unresolved(String),
}

/// Input and output routines known without a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Write,
    Writeln,
    Read,
    Readln,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Builtin> {
        const BUILTINS: [(&str, Builtin); 4] = [
            ("write", Builtin::Write),
            ("writeln", Builtin::Writeln),
            ("read", Builtin::Read),
            ("readln", Builtin::Readln),
        ];
        BUILTINS
            .iter()
            .find(|(builtin, _)| name.eq_ignore_ascii_case(builtin))
            .map(|(_, builtin)| *builtin)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Write => "write",
            Builtin::Writeln => "writeln",
            Builtin::Read => "read",
            Builtin::Readln => "readln",
        }
    }

    /// `read` and `readln` store into their arguments.
    pub fn stores_arguments(self) -> bool {
        matches!(self, Builtin::Read | Builtin::Readln)
    }
}

/// Typed expression
#[derive(Clone, Debug, PartialEq)]
pub struct TExpr {
    pub expression: Expr,
    pub decoration: Decoration,
}

impl TExpr {
    pub fn new(expression: Expr, decoration: Decoration) -> TExpr {
        TExpr {
            expression,
            decoration,
        }
    }

    pub fn ty(&self) -> Type {
        self.decoration.ty
    }

    /// True if the expression denotes storage that may be assigned.
    pub fn is_lvalue(&self) -> bool {
        matches!(&self.expression, Expr::Variable(var) if var.is_lvalue)
    }

    /// Stand-in for an expression that could not be built.
    pub fn placeholder(level: usize) -> TExpr {
        TExpr::new(
            Expr::Literal(Literal::Integer(0)),
            Decoration::new(Type::Integer, level),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Variable(VariableRef),
    Literal(Literal),
    Call(Box<Call>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<TExpr>,
    pub right: Box<TExpr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<TExpr>,
}

/// A name with its selectors, for example `v[i].x`.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableRef {
    pub name: String,
    pub symbol: SymbolIdResult,
    pub accessors: Vec<Access>,
    pub is_lvalue: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Access {
    /// One index; `a[i, j]` becomes two of these.
    Index(TExpr),
    Field {
        name: String,
        symbol: SymbolIdResult,
        ty: Type,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Integer(i64),
    Real(f64),
    Char(char),
    String(String),
    Boolean(bool),
}

impl Literal {
    pub fn ty(&self) -> Type {
        match self {
            Literal::Integer(_) => Type::Integer,
            Literal::Real(_) => Type::Real,
            Literal::Char(_) => Type::Char,
            Literal::String(_) => Type::String,
            Literal::Boolean(_) => Type::Boolean,
        }
    }
}
