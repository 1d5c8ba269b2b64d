// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! Accessors on the typed nodes, plus the sum types over alternatives.
//!
//! These methods should only do simple, shallow tasks related to the syntax of the node itself.

use crate::{
    ast::{self, operators::UnaryOp, support, AstChildren, AstNode, BinaryOp},
    SyntaxKind::{self, *},
    SyntaxNode, SyntaxToken,
};

/// Any statement. The empty statement has no node and never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Assignment(ast::AssignmentStatement),
    ProcedureCall(ast::ProcedureCall),
    If(ast::IfStatement),
    While(ast::WhileStatement),
    For(ast::ForStatement),
    Repeat(ast::RepeatStatement),
    Compound(ast::CompoundStatement),
}

impl AstNode for Stmt {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            ASSIGNMENT_STATEMENT
                | PROCEDURE_CALL
                | IF_STATEMENT
                | WHILE_STATEMENT
                | FOR_STATEMENT
                | REPEAT_STATEMENT
                | COMPOUND_STATEMENT
        )
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        let res = match syntax.kind() {
            ASSIGNMENT_STATEMENT => Stmt::Assignment(ast::AssignmentStatement { syntax }),
            PROCEDURE_CALL => Stmt::ProcedureCall(ast::ProcedureCall { syntax }),
            IF_STATEMENT => Stmt::If(ast::IfStatement { syntax }),
            WHILE_STATEMENT => Stmt::While(ast::WhileStatement { syntax }),
            FOR_STATEMENT => Stmt::For(ast::ForStatement { syntax }),
            REPEAT_STATEMENT => Stmt::Repeat(ast::RepeatStatement { syntax }),
            COMPOUND_STATEMENT => Stmt::Compound(ast::CompoundStatement { syntax }),
            _ => return None,
        };
        Some(res)
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Stmt::Assignment(it) => it.syntax(),
            Stmt::ProcedureCall(it) => it.syntax(),
            Stmt::If(it) => it.syntax(),
            Stmt::While(it) => it.syntax(),
            Stmt::For(it) => it.syntax(),
            Stmt::Repeat(it) => it.syntax(),
            Stmt::Compound(it) => it.syntax(),
        }
    }
}

/// A procedure or function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subprogram {
    Procedure(ast::ProcedureDeclaration),
    Function(ast::FunctionDeclaration),
}

impl AstNode for Subprogram {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, PROCEDURE_DECLARATION | FUNCTION_DECLARATION)
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        match syntax.kind() {
            PROCEDURE_DECLARATION => {
                Some(Subprogram::Procedure(ast::ProcedureDeclaration { syntax }))
            }
            FUNCTION_DECLARATION => Some(Subprogram::Function(ast::FunctionDeclaration { syntax })),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Subprogram::Procedure(it) => it.syntax(),
            Subprogram::Function(it) => it.syntax(),
        }
    }
}

impl Subprogram {
    pub fn name(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), IDENTIFIER)
    }

    pub fn parameters(&self) -> Option<ast::FormalParameterList> {
        support::child(self.syntax())
    }

    /// Declared result type. `None` for procedures.
    pub fn return_type(&self) -> Option<ast::TypeSpec> {
        match self {
            Subprogram::Procedure(_) => None,
            Subprogram::Function(it) => it.return_type(),
        }
    }

    pub fn declaration_part(&self) -> Option<ast::DeclarationPart> {
        support::child(self.syntax())
    }

    pub fn body(&self) -> Option<ast::CompoundStatement> {
        support::child(self.syntax())
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Subprogram::Function(_))
    }
}

/// One selector applied to a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Accessor {
    Index(ast::IndexAccess),
    Field(ast::FieldAccess),
}

impl AstNode for Accessor {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, INDEX_ACCESS | FIELD_ACCESS)
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        match syntax.kind() {
            INDEX_ACCESS => Some(Accessor::Index(ast::IndexAccess { syntax })),
            FIELD_ACCESS => Some(Accessor::Field(ast::FieldAccess { syntax })),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Accessor::Index(it) => it.syntax(),
            Accessor::Field(it) => it.syntax(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FactorKind {
    /// NUMBER, CHAR_LITERAL, STRING_LITERAL, `true` or `false`.
    Literal(SyntaxToken),
    Variable(ast::Variable),
    Call(ast::FunctionCall),
    Paren(ast::Expression),
    Not(ast::Factor),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSpecKind {
    /// A primitive keyword or a type identifier.
    Named(SyntaxToken),
    Array(ast::ArrayType),
    Record(ast::RecordType),
}

impl ast::Program {
    pub fn header(&self) -> Option<ast::ProgramHeader> {
        support::child(&self.syntax)
    }

    pub fn declaration_part(&self) -> Option<ast::DeclarationPart> {
        support::child(&self.syntax)
    }

    pub fn body(&self) -> Option<ast::CompoundStatement> {
        support::child(&self.syntax)
    }
}

impl ast::ProgramHeader {
    pub fn name(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, IDENTIFIER)
    }
}

impl ast::DeclarationPart {
    /// Definitions from every `konstanta` section, in order.
    pub fn const_definitions(&self) -> impl Iterator<Item = ast::ConstDefinition> {
        support::children::<ast::ConstDeclaration>(&self.syntax)
            .flat_map(|decl| support::children(decl.syntax()))
    }

    pub fn type_definitions(&self) -> impl Iterator<Item = ast::TypeDefinition> {
        support::children::<ast::TypeDeclaration>(&self.syntax)
            .flat_map(|decl| support::children(decl.syntax()))
    }

    pub fn var_groups(&self) -> impl Iterator<Item = ast::VarGroup> {
        support::children::<ast::VarDeclaration>(&self.syntax)
            .flat_map(|decl| support::children(decl.syntax()))
    }

    pub fn subprograms(&self) -> AstChildren<Subprogram> {
        support::children(&self.syntax)
    }
}

impl ast::ConstDefinition {
    pub fn name(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, IDENTIFIER)
    }

    pub fn constant(&self) -> Option<ast::Constant> {
        support::child(&self.syntax)
    }
}

impl ast::Constant {
    /// The leading sign, if any.
    pub fn sign(&self) -> Option<UnaryOp> {
        support::token(&self.syntax, ARITHMETIC_OPERATOR).and_then(|t| UnaryOp::from_text(t.text()))
    }

    /// The literal or identifier that carries the value.
    pub fn value(&self) -> Option<SyntaxToken> {
        self.syntax.last_token()
    }
}

impl ast::TypeDefinition {
    pub fn name(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, IDENTIFIER)
    }

    pub fn type_spec(&self) -> Option<ast::TypeSpec> {
        support::child(&self.syntax)
    }
}

impl ast::VarGroup {
    pub fn identifier_list(&self) -> Option<ast::IdentifierList> {
        support::child(&self.syntax)
    }

    pub fn type_spec(&self) -> Option<ast::TypeSpec> {
        support::child(&self.syntax)
    }
}

impl ast::IdentifierList {
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|it| it.kind() == IDENTIFIER)
    }
}

impl ast::TypeSpec {
    pub fn kind(&self) -> Option<TypeSpecKind> {
        if let Some(array) = support::child(&self.syntax) {
            return Some(TypeSpecKind::Array(array));
        }
        if let Some(record) = support::child(&self.syntax) {
            return Some(TypeSpecKind::Record(record));
        }
        support::token_of(&self.syntax, &[KEYWORD, IDENTIFIER]).map(TypeSpecKind::Named)
    }
}

impl ast::ArrayType {
    pub fn range(&self) -> Option<ast::Range> {
        support::child(&self.syntax)
    }

    pub fn element_type(&self) -> Option<ast::TypeSpec> {
        support::child(&self.syntax)
    }
}

impl ast::Range {
    pub fn low(&self) -> Option<ast::Constant> {
        support::children(&self.syntax).next()
    }

    pub fn high(&self) -> Option<ast::Constant> {
        support::children(&self.syntax).nth(1)
    }
}

impl ast::RecordType {
    pub fn field_groups(&self) -> AstChildren<ast::FieldGroup> {
        support::children(&self.syntax)
    }
}

impl ast::FieldGroup {
    pub fn identifier_list(&self) -> Option<ast::IdentifierList> {
        support::child(&self.syntax)
    }

    pub fn type_spec(&self) -> Option<ast::TypeSpec> {
        support::child(&self.syntax)
    }
}

impl ast::FunctionDeclaration {
    /// The type after the parameter list. Parameter groups hold their own
    /// types one level down, so the first direct `TYPE` child is the result.
    pub fn return_type(&self) -> Option<ast::TypeSpec> {
        support::child(&self.syntax)
    }
}

impl ast::FormalParameterList {
    pub fn groups(&self) -> AstChildren<ast::ParameterGroup> {
        support::children(&self.syntax)
    }
}

impl ast::ParameterGroup {
    /// True for `variabel` groups, which pass by reference.
    pub fn is_var(&self) -> bool {
        support::keyword(&self.syntax, "variabel").is_some()
    }

    pub fn identifier_list(&self) -> Option<ast::IdentifierList> {
        support::child(&self.syntax)
    }

    pub fn type_spec(&self) -> Option<ast::TypeSpec> {
        support::child(&self.syntax)
    }
}

impl ast::CompoundStatement {
    pub fn statement_list(&self) -> Option<ast::StatementList> {
        support::child(&self.syntax)
    }

    pub fn statements(&self) -> impl Iterator<Item = Stmt> {
        self.statement_list().into_iter().flat_map(|list| list.statements())
    }
}

impl ast::StatementList {
    pub fn statements(&self) -> AstChildren<Stmt> {
        support::children(&self.syntax)
    }
}

impl ast::AssignmentStatement {
    pub fn target(&self) -> Option<ast::Variable> {
        support::child(&self.syntax)
    }

    pub fn value(&self) -> Option<ast::Expression> {
        support::child(&self.syntax)
    }
}

impl ast::ProcedureCall {
    /// The callee: an identifier or the reserved `writeln`.
    pub fn name(&self) -> Option<SyntaxToken> {
        self.syntax.first_token()
    }

    pub fn arguments(&self) -> Option<ast::ParameterList> {
        support::child(&self.syntax)
    }
}

impl ast::ParameterList {
    pub fn arguments(&self) -> AstChildren<ast::Expression> {
        support::children(&self.syntax)
    }
}

impl ast::IfStatement {
    pub fn condition(&self) -> Option<ast::Expression> {
        support::child(&self.syntax)
    }

    fn else_keyword(&self) -> Option<SyntaxToken> {
        support::keyword(&self.syntax, "selain-itu")
    }

    pub fn has_else(&self) -> bool {
        self.else_keyword().is_some()
    }

    /// Either branch may be the empty statement, which has no node, so the
    /// branches are told apart by their position relative to `selain-itu`.
    pub fn then_branch(&self) -> Option<Stmt> {
        let split = self.else_keyword().map(|kw| kw.text_range().start());
        support::children::<Stmt>(&self.syntax)
            .find(|stmt| split.map_or(true, |at| stmt.syntax().text_range().start() < at))
    }

    pub fn else_branch(&self) -> Option<Stmt> {
        let at = self.else_keyword()?.text_range().start();
        support::children::<Stmt>(&self.syntax)
            .find(|stmt| stmt.syntax().text_range().start() >= at)
    }
}

impl ast::WhileStatement {
    pub fn condition(&self) -> Option<ast::Expression> {
        support::child(&self.syntax)
    }

    pub fn body(&self) -> Option<Stmt> {
        support::child(&self.syntax)
    }
}

impl ast::ForStatement {
    pub fn control(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, IDENTIFIER)
    }

    pub fn start(&self) -> Option<ast::Expression> {
        support::children(&self.syntax).next()
    }

    pub fn end(&self) -> Option<ast::Expression> {
        support::children(&self.syntax).nth(1)
    }

    /// True for `turun-ke` loops.
    pub fn is_downto(&self) -> bool {
        support::keyword(&self.syntax, "turun-ke").is_some()
    }

    pub fn body(&self) -> Option<Stmt> {
        support::child(&self.syntax)
    }
}

impl ast::RepeatStatement {
    pub fn statement_list(&self) -> Option<ast::StatementList> {
        support::child(&self.syntax)
    }

    pub fn statements(&self) -> impl Iterator<Item = Stmt> {
        self.statement_list().into_iter().flat_map(|list| list.statements())
    }

    pub fn condition(&self) -> Option<ast::Expression> {
        support::child(&self.syntax)
    }
}

impl ast::Expression {
    pub fn lhs(&self) -> Option<ast::SimpleExpression> {
        support::children(&self.syntax).next()
    }

    pub fn op(&self) -> Option<ast::RelationalOp> {
        support::child(&self.syntax)
    }

    pub fn rhs(&self) -> Option<ast::SimpleExpression> {
        support::children(&self.syntax).nth(1)
    }
}

/// Pairs each operator node with the operand that follows it.
fn operator_chain<O: AstNode, N: AstNode>(parent: &SyntaxNode) -> Vec<(O, N)> {
    let mut res = Vec::new();
    let mut pending: Option<O> = None;
    for child in parent.children() {
        if let Some(op) = O::cast(child.clone()) {
            pending = Some(op);
        } else if let Some(operand) = N::cast(child) {
            if let Some(op) = pending.take() {
                res.push((op, operand));
            }
        }
    }
    res
}

impl ast::SimpleExpression {
    /// The leading `+` or `-`, which applies to the first term only.
    pub fn sign(&self) -> Option<UnaryOp> {
        support::token(&self.syntax, ARITHMETIC_OPERATOR).and_then(|t| UnaryOp::from_text(t.text()))
    }

    pub fn first_term(&self) -> Option<ast::Term> {
        support::child(&self.syntax)
    }

    /// The `(operator, term)` pairs after the first term.
    pub fn rest(&self) -> Vec<(ast::AdditiveOp, ast::Term)> {
        operator_chain(&self.syntax)
    }
}

impl ast::Term {
    pub fn first_factor(&self) -> Option<ast::Factor> {
        support::child(&self.syntax)
    }

    pub fn rest(&self) -> Vec<(ast::MultiplicativeOp, ast::Factor)> {
        operator_chain(&self.syntax)
    }
}

impl ast::Factor {
    pub fn kind(&self) -> Option<FactorKind> {
        if let Some(node) = self.syntax.first_child() {
            return match node.kind() {
                VARIABLE => Some(FactorKind::Variable(ast::Variable { syntax: node })),
                FUNCTION_CALL => Some(FactorKind::Call(ast::FunctionCall { syntax: node })),
                EXPRESSION => Some(FactorKind::Paren(ast::Expression { syntax: node })),
                FACTOR => Some(FactorKind::Not(ast::Factor { syntax: node })),
                _ => None,
            };
        }
        self.syntax.first_token().map(FactorKind::Literal)
    }
}

impl ast::Variable {
    pub fn name(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, IDENTIFIER)
    }

    pub fn accessors(&self) -> AstChildren<Accessor> {
        support::children(&self.syntax)
    }
}

impl ast::IndexAccess {
    /// `a[i, j]` holds two indices and is read as `a[i][j]`.
    pub fn indices(&self) -> AstChildren<ast::Expression> {
        support::children(&self.syntax)
    }
}

impl ast::FieldAccess {
    pub fn field(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, IDENTIFIER)
    }
}

impl ast::FunctionCall {
    pub fn name(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, IDENTIFIER)
    }

    pub fn arguments(&self) -> Option<ast::ParameterList> {
        support::child(&self.syntax)
    }
}

macro_rules! operator_node {
    ($($name:ident),*) => {
        $(
            impl ast::$name {
                pub fn token(&self) -> Option<SyntaxToken> {
                    self.syntax.first_token()
                }

                pub fn op(&self) -> Option<BinaryOp> {
                    self.token().and_then(|t| BinaryOp::from_text(t.text()))
                }
            }
        )*
    };
}

operator_node!(RelationalOp, AdditiveOp, MultiplicativeOp);
