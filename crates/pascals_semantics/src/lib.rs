// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! Semantic analysis of Pascal-S.
//!
//! Walks the syntax tree built by `pascals_syntax`, fills the block-structured
//! [`SymbolTable`], checks types and declarations, and produces the decorated AST
//! in [`asg`]. Errors are collected, never fatal, so one pass reports them all.

pub mod asg;
pub mod context;
pub mod display;
pub mod semantic_error;
pub mod symbols;
pub mod syntax_to_semantics;
pub mod types;

pub use display::{render_program, render_symbol_table};
pub use semantic_error::{SemanticError, SemanticErrorKind, SemanticErrorList};
pub use symbols::{ObjectClass, SymbolTable};
pub use syntax_to_semantics::{
    analyze, analyze_program, parse_source_string, parse_token_file, parse_token_string,
    Analysis, AnalysisError, ParseResult,
};
pub use types::Type;
