// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! One typed wrapper per grammar rule.

use crate::{
    ast::AstNode,
    SyntaxKind::{self, *},
    SyntaxNode,
};

macro_rules! ast_node {
    ($($(#[$attr:meta])* $name:ident => $kind:ident;)*) => {
        $(
            $(#[$attr])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $name {
                pub(crate) syntax: SyntaxNode,
            }

            impl AstNode for $name {
                fn can_cast(kind: SyntaxKind) -> bool {
                    kind == $kind
                }
                fn cast(syntax: SyntaxNode) -> Option<Self> {
                    if Self::can_cast(syntax.kind()) {
                        Some(Self { syntax })
                    } else {
                        None
                    }
                }
                fn syntax(&self) -> &SyntaxNode {
                    &self.syntax
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    std::fmt::Display::fmt(self.syntax(), f)
                }
            }
        )*
    };
}

ast_node! {
    /// The root of a whole-program parse.
    Program => PROGRAM;
    ProgramHeader => PROGRAM_HEADER;
    DeclarationPart => DECLARATION_PART;
    ConstDeclaration => CONST_DECLARATION;
    ConstDefinition => CONST_DEFINITION;
    /// A constant in a definition or an array bound.
    Constant => CONSTANT;
    TypeDeclaration => TYPE_DECLARATION;
    TypeDefinition => TYPE_DEFINITION;
    VarDeclaration => VAR_DECLARATION;
    VarGroup => VAR_GROUP;
    IdentifierList => IDENTIFIER_LIST;
    /// A type denoter. Named `TypeSpec` since `Type` is taken by the analyzer.
    TypeSpec => TYPE;
    ArrayType => ARRAY_TYPE;
    Range => RANGE;
    RecordType => RECORD_TYPE;
    FieldGroup => FIELD_GROUP;
    ProcedureDeclaration => PROCEDURE_DECLARATION;
    FunctionDeclaration => FUNCTION_DECLARATION;
    FormalParameterList => FORMAL_PARAMETER_LIST;
    ParameterGroup => PARAMETER_GROUP;
    CompoundStatement => COMPOUND_STATEMENT;
    StatementList => STATEMENT_LIST;
    AssignmentStatement => ASSIGNMENT_STATEMENT;
    ProcedureCall => PROCEDURE_CALL;
    /// Call arguments, possibly empty.
    ParameterList => PARAMETER_LIST;
    IfStatement => IF_STATEMENT;
    WhileStatement => WHILE_STATEMENT;
    ForStatement => FOR_STATEMENT;
    RepeatStatement => REPEAT_STATEMENT;
    Expression => EXPRESSION;
    SimpleExpression => SIMPLE_EXPRESSION;
    Term => TERM;
    Factor => FACTOR;
    Variable => VARIABLE;
    IndexAccess => INDEX_ACCESS;
    FieldAccess => FIELD_ACCESS;
    FunctionCall => FUNCTION_CALL;
    RelationalOp => RELATIONAL_OP;
    AdditiveOp => ADDITIVE_OP;
    MultiplicativeOp => MULTIPLICATIVE_OP;
}
