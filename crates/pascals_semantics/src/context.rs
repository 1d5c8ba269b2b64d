// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use hashbrown::HashMap;
use pascals_syntax::{AstNode, NodeOrToken, SyntaxToken};

use crate::semantic_error::{SemanticErrorKind, SemanticErrorList};
use crate::symbols::{
    BlockId, IsRef, ObjectClass, SymbolError, SymbolId, SymbolIdResult, SymbolTable,
};
use crate::types::Type;

// Addresses are stored as `i64`.
const MAX_OFFSET: usize = i64::MAX as usize;

/// State threaded through the analysis: the symbol table, the diagnostics, and
/// the allocation offset of the block being filled.
#[derive(Clone, Debug)]
pub struct Context {
    symbol_table: SymbolTable,
    semantic_errors: SemanticErrorList,
    warnings: SemanticErrorList,
    offset: usize,
    // Return slot -> the function it belongs to.
    return_slots: HashMap<SymbolId, SymbolId>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Context {
        Context {
            symbol_table: SymbolTable::new(),
            semantic_errors: SemanticErrorList::new(),
            warnings: SemanticErrorList::new(),
            offset: 0,
            return_slots: HashMap::new(),
        }
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    pub(crate) fn symbol_table_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbol_table
    }

    pub fn errors(&self) -> &SemanticErrorList {
        &self.semantic_errors
    }

    pub fn warnings(&self) -> &SemanticErrorList {
        &self.warnings
    }

    pub(crate) fn into_parts(self) -> (SymbolTable, SemanticErrorList, SemanticErrorList) {
        (self.symbol_table, self.semantic_errors, self.warnings)
    }

    pub fn level(&self) -> usize {
        self.symbol_table.level()
    }

    /// Record an error on `node`. The kind is handed back for the node's decoration.
    pub(crate) fn insert_error<T: AstNode>(
        &mut self,
        error_kind: SemanticErrorKind,
        node: &T,
    ) -> SemanticErrorKind {
        self.semantic_errors
            .insert(error_kind.clone(), NodeOrToken::Node(node.syntax().clone()));
        error_kind
    }

    /// Like [`Context::insert_error`] for an error about a single token.
    pub(crate) fn insert_error_at(
        &mut self,
        error_kind: SemanticErrorKind,
        token: &SyntaxToken,
    ) -> SemanticErrorKind {
        self.semantic_errors
            .insert(error_kind.clone(), NodeOrToken::Token(token.clone()));
        error_kind
    }

    pub(crate) fn insert_warning<T: AstNode>(
        &mut self,
        warning_kind: SemanticErrorKind,
        node: &T,
    ) -> SemanticErrorKind {
        tracing::warn!("{warning_kind}");
        self.warnings
            .insert(warning_kind.clone(), NodeOrToken::Node(node.syntax().clone()));
        warning_kind
    }

    /// The innermost visible symbol named `name`, without reporting anything.
    pub(crate) fn find(&self, name: &str) -> Option<SymbolId> {
        self.symbol_table.lookup(name)
    }

    /// Resolve the name in `token`, recording an error if it is not declared.
    pub(crate) fn lookup_symbol(&mut self, token: &SyntaxToken) -> SymbolIdResult {
        match self.find(token.text()) {
            Some(id) => Ok(id),
            None => {
                let kind = SemanticErrorKind::UndeclaredIdentifier(token.text().to_string());
                self.insert_error_at(kind, token);
                Err(SymbolError::MissingBinding)
            }
        }
    }

    /// Bind the name in `token` in the current scope. A name already bound in
    /// this scope is reported and not entered; `address` is then never called.
    pub(crate) fn new_binding<F>(
        &mut self,
        token: &SyntaxToken,
        class: ObjectClass,
        ty: Type,
        block: Option<BlockId>,
        is_ref: IsRef,
        address: F,
    ) -> SymbolIdResult
    where
        F: FnOnce(&mut Context) -> i64,
    {
        let name = token.text();
        if self.symbol_table.lookup_in_current_scope(name).is_some() {
            let kind = SemanticErrorKind::DuplicateDeclaration(name.to_string());
            self.insert_error_at(kind, token);
            return Err(SymbolError::AlreadyBound);
        }
        let address = address(self);
        Ok(self
            .symbol_table
            .enter(name, class, ty, block, is_ref, address))
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// Set the allocation offset, returning the previous one.
    pub(crate) fn replace_offset(&mut self, offset: usize) -> usize {
        std::mem::replace(&mut self.offset, offset)
    }

    /// Reserve `size` cells at the current offset for `name`. If the block would
    /// outgrow the addressable range, report it and pin the offset at the limit.
    pub(crate) fn allocate(&mut self, size: usize, name: &SyntaxToken) -> i64 {
        let address = self.offset;
        match self.offset.checked_add(size).filter(|end| *end <= MAX_OFFSET) {
            Some(end) => self.offset = end,
            None => {
                let kind = SemanticErrorKind::StorageOverflow(name.text().to_string());
                self.insert_error_at(kind, name);
                self.offset = MAX_OFFSET;
            }
        }
        i64::try_from(address).unwrap_or(i64::MAX)
    }

    pub(crate) fn set_return_slot(&mut self, slot: SymbolId, function: SymbolId) {
        self.return_slots.insert(slot, function);
    }

    /// The function whose return slot is `slot`, if it is one.
    pub(crate) fn function_of_slot(&self, slot: SymbolId) -> Option<SymbolId> {
        self.return_slots.get(&slot).copied()
    }
}

/// Run `$body` with `$block` active one level deeper, then return to the
/// enclosing level. Evaluates to the value of `$body`.
macro_rules! with_scope {
    ($context:ident, $block:expr, $body:block) => {{
        $context.symbol_table_mut().enter_level($block);
        let res = $body;
        $context.symbol_table_mut().exit_level();
        res
    }};
}

pub(crate) use with_scope;
