// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! The block-structured symbol table.
//!
//! Three append-only tables: identifier entries (`Tab`), block descriptors (`Btab`)
//! and array descriptors (`Atab`). The entries of one scope form a chain through
//! their `link` field, rooted at the scope's block. The display maps each lexical
//! level to the block active at that level; `lookup` walks the chains of the
//! display from the current level down to level 0.
//!
//! Entries are never removed. A scope that has been exited is no longer searched,
//! but ids captured while it was active keep resolving.

use std::ops::Index;

use boolenum::BoolEnum;

use crate::types::Type;

/// Size of the activation-record header. Variables and parameters of programs and
/// subprograms are allocated after it.
pub const HEADER_SIZE: usize = 5;

/// Index into the identifier table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(usize);

/// Index into the block table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

/// Index into the array table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArrayId(usize);

macro_rules! table_index {
    ($($id:ident),*) => {
        $(
            impl $id {
                pub fn new(index: usize) -> $id {
                    $id(index)
                }

                pub fn index(self) -> usize {
                    self.0
                }
            }

            impl std::fmt::Display for $id {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

table_index!(SymbolId, BlockId, ArrayId);

/// What a name denotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    Constant,
    Variable,
    Type,
    Procedure,
    Function,
    Program,
    Field,
}

impl ObjectClass {
    pub fn name(self) -> &'static str {
        match self {
            ObjectClass::Constant => "constant",
            ObjectClass::Variable => "variable",
            ObjectClass::Type => "type",
            ObjectClass::Procedure => "procedure",
            ObjectClass::Function => "function",
            ObjectClass::Program => "program",
            ObjectClass::Field => "field",
        }
    }

    pub fn is_subprogram(self) -> bool {
        matches!(self, ObjectClass::Procedure | ObjectClass::Function)
    }
}

/// Whether a parameter is passed by reference (`variabel` parameters).
#[derive(BoolEnum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IsRef {
    True,
    False,
}

/// Why a name did not produce a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolError {
    MissingBinding,
    AlreadyBound,
}

pub type SymbolIdResult = Result<SymbolId, SymbolError>;

/// One identifier entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    name: String,
    link: Option<SymbolId>,
    class: ObjectClass,
    ty: Type,
    block: Option<BlockId>,
    is_ref: IsRef,
    level: usize,
    address: i64,
}

impl Symbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The previous entry of the same scope.
    pub fn link(&self) -> Option<SymbolId> {
        self.link
    }

    pub fn class(&self) -> ObjectClass {
        self.class
    }

    pub fn ty(&self) -> Type {
        self.ty
    }

    /// The block of a program, procedure or function.
    pub fn block(&self) -> Option<BlockId> {
        self.block
    }

    /// The `ref` column: the subprogram block, or else the type's descriptor.
    pub fn reference(&self) -> Option<usize> {
        self.block.map(BlockId::index).or(self.ty.reference())
    }

    pub fn is_ref(&self) -> bool {
        self.is_ref.into()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Storage offset for variables and fields; the value, or a literal-pool index,
    /// for constants.
    pub fn address(&self) -> i64 {
        self.address
    }
}

/// One block descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    last: Option<SymbolId>,
    last_param: Option<SymbolId>,
    param_size: usize,
    var_size: usize,
}

impl Block {
    /// Most recently declared entry; the head of the scope chain.
    pub fn last(&self) -> Option<SymbolId> {
        self.last
    }

    pub fn last_param(&self) -> Option<SymbolId> {
        self.last_param
    }

    pub fn param_size(&self) -> usize {
        self.param_size
    }

    pub fn var_size(&self) -> usize {
        self.var_size
    }
}

/// One array descriptor. `low <= high` always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayDescriptor {
    index_ty: Type,
    element_ty: Type,
    low: i64,
    high: i64,
    element_size: usize,
    size: usize,
}

impl ArrayDescriptor {
    pub fn index_ty(&self) -> Type {
        self.index_ty
    }

    pub fn element_ty(&self) -> Type {
        self.element_ty
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    pub fn element_size(&self) -> usize {
        self.element_size
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// A real or string constant value, stored out of line.
#[derive(Clone, Debug, PartialEq)]
pub enum PoolValue {
    Real(f64),
    String(String),
}

#[derive(Clone, Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    blocks: Vec<Block>,
    arrays: Vec<ArrayDescriptor>,
    display: Vec<BlockId>,
    level: usize,
    pool: Vec<PoolValue>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// A table holding only the global block, active at level 0.
    pub fn new() -> SymbolTable {
        SymbolTable {
            symbols: Vec::new(),
            blocks: vec![Block::default()],
            arrays: Vec::new(),
            display: vec![BlockId(0)],
            level: 0,
            pool: Vec::new(),
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn current_block(&self) -> BlockId {
        self.display[self.level]
    }

    /// Active block per lexical level, outermost first.
    pub fn display(&self) -> &[BlockId] {
        &self.display[..=self.level]
    }

    /// Append an entry to the current scope. Duplicates are not checked here.
    pub fn enter(
        &mut self,
        name: &str,
        class: ObjectClass,
        ty: Type,
        block: Option<BlockId>,
        is_ref: IsRef,
        address: i64,
    ) -> SymbolId {
        let id = SymbolId(self.symbols.len());
        let current = self.current_block();
        self.symbols.push(Symbol {
            name: name.to_string(),
            link: self.blocks[current.0].last,
            class,
            ty,
            block,
            is_ref,
            level: self.level,
            address,
        });
        self.blocks[current.0].last = Some(id);
        tracing::trace!(%id, name, class = class.name(), %ty, level = self.level, address, "enter");
        id
    }

    /// The innermost visible entry named `name`.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.display()
            .iter()
            .rev()
            .find_map(|block| self.lookup_in_block(*block, name))
    }

    pub fn lookup_in_current_scope(&self, name: &str) -> Option<SymbolId> {
        self.lookup_in_block(self.current_block(), name)
    }

    /// Search one scope chain, for example the fields of a record.
    pub fn lookup_in_block(&self, block: BlockId, name: &str) -> Option<SymbolId> {
        self.chain(block)
            .find(|id| self.symbols[id.0].name.eq_ignore_ascii_case(name))
    }

    /// Entries of `block`, most recent first.
    pub fn chain(&self, block: BlockId) -> Chain<'_> {
        Chain {
            table: self,
            next: self.blocks.get(block.0).and_then(|b| b.last),
        }
    }

    /// Parameters of a subprogram block, in declaration order.
    pub fn parameters(&self, block: BlockId) -> Vec<SymbolId> {
        let mut res: Vec<SymbolId> = Chain {
            table: self,
            next: self.blocks.get(block.0).and_then(|b| b.last_param),
        }
        .collect();
        res.reverse();
        res
    }

    /// Fields of a record block, in declaration order.
    pub fn fields(&self, block: BlockId) -> Vec<SymbolId> {
        let mut res: Vec<SymbolId> = self.chain(block).collect();
        res.reverse();
        res
    }

    /// Allocate a new, empty block without changing levels.
    pub fn enter_block(&mut self) -> BlockId {
        let id = BlockId(self.blocks.len());
        self.blocks.push(Block::default());
        id
    }

    /// Make `block` the active block one level deeper.
    pub fn enter_level(&mut self, block: BlockId) {
        self.level += 1;
        self.display.truncate(self.level);
        self.display.push(block);
        tracing::debug!(level = self.level, %block, "enter scope");
    }

    pub fn enter_level_with_block(&mut self) -> BlockId {
        let block = self.enter_block();
        self.enter_level(block);
        block
    }

    /// Return to the enclosing level. At level 0 this does nothing.
    pub fn exit_level(&mut self) {
        if self.level == 0 {
            return;
        }
        tracing::debug!(level = self.level, block = %self.current_block(), "exit scope");
        self.level -= 1;
        self.display.truncate(self.level + 1);
    }

    /// Register an array descriptor. Inverted bounds are swapped.
    pub fn enter_array(
        &mut self,
        index_ty: Type,
        element_ty: Type,
        low: i64,
        high: i64,
        element_size: usize,
    ) -> ArrayId {
        let (low, high) = if high < low { (high, low) } else { (low, high) };
        let id = ArrayId(self.arrays.len());
        self.arrays.push(ArrayDescriptor {
            index_ty,
            element_ty,
            low,
            high,
            element_size,
            size: array_size(low, high, element_size).unwrap_or(usize::MAX),
        });
        id
    }

    /// Storage cells taken by a value of type `ty`.
    ///
    /// An array too large to address reports `usize::MAX`.
    pub fn type_size(&self, ty: Type) -> usize {
        match ty {
            Type::Integer | Type::Boolean | Type::Char | Type::String | Type::Undefined => 1,
            Type::Real => 8,
            Type::Array(id) => self.arrays.get(id.0).map_or(0, |a| a.size),
            Type::Record(id) => self.blocks.get(id.0).map_or(0, |b| b.var_size),
            Type::Void => 0,
        }
    }

    pub(crate) fn set_type(&mut self, id: SymbolId, ty: Type) {
        if let Some(symbol) = self.symbols.get_mut(id.0) {
            symbol.ty = ty;
        }
    }

    pub(crate) fn set_params(&mut self, block: BlockId, last_param: Option<SymbolId>, size: usize) {
        if let Some(block) = self.blocks.get_mut(block.0) {
            block.last_param = last_param;
            block.param_size = size;
        }
    }

    pub(crate) fn set_var_size(&mut self, block: BlockId, size: usize) {
        if let Some(block) = self.blocks.get_mut(block.0) {
            block.var_size = size;
        }
    }

    /// Store a real or string constant and return its pool index.
    pub fn add_literal(&mut self, value: PoolValue) -> usize {
        self.pool.push(value);
        self.pool.len() - 1
    }

    pub fn literal(&self, index: usize) -> Option<&PoolValue> {
        self.pool.get(index)
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0)
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.0)
    }

    pub fn array(&self, id: ArrayId) -> Option<&ArrayDescriptor> {
        self.arrays.get(id.0)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn arrays(&self) -> &[ArrayDescriptor] {
        &self.arrays
    }

    pub fn pool(&self) -> &[PoolValue] {
        &self.pool
    }
}

impl Index<SymbolId> for SymbolTable {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }
}

impl Index<BlockId> for SymbolTable {
    type Output = Block;

    fn index(&self, id: BlockId) -> &Block {
        &self.blocks[id.0]
    }
}

impl Index<ArrayId> for SymbolTable {
    type Output = ArrayDescriptor;

    fn index(&self, id: ArrayId) -> &ArrayDescriptor {
        &self.arrays[id.0]
    }
}

/// Walks a scope chain through the `link` fields.
pub struct Chain<'a> {
    table: &'a SymbolTable,
    next: Option<SymbolId>,
}

impl Iterator for Chain<'_> {
    type Item = SymbolId;

    fn next(&mut self) -> Option<SymbolId> {
        let id = self.next?;
        self.next = self.table.symbols.get(id.0).and_then(|s| s.link);
        Some(id)
    }
}

/// Cells needed for `element_size * (high - low + 1)`, in either bound order.
/// `None` when the count or the total does not fit in `usize`.
pub fn array_size(low: i64, high: i64, element_size: usize) -> Option<usize> {
    let (low, high) = if high < low { (high, low) } else { (low, high) };
    let span = usize::try_from(high.checked_sub(low)?).ok()?;
    element_size.checked_mul(span.checked_add(1)?)
}
