// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! Text dumps of the symbol table and the decorated AST.

use std::fmt::Write;

use crate::asg::{self, Access, Callee, Declaration, Expr, Literal, Stmt, TExpr};
use crate::symbols::{SymbolIdResult, SymbolTable};
use crate::types::Type;

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// The four tables, one row per entry.
pub fn render_symbol_table(table: &SymbolTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tab");
    let _ = writeln!(
        out,
        "{:>4} {:<12} {:<10} {:<10} {:>4} {:>4} {:>4} {:>6} {:>5}",
        "idx", "name", "class", "type", "ref", "nrm", "lev", "adr", "link"
    );
    for (idx, symbol) in table.symbols().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4} {:<12} {:<10} {:<10} {:>4} {:>4} {:>4} {:>6} {:>5}",
            idx,
            symbol.name(),
            symbol.class().name(),
            symbol.ty().name(),
            or_dash(symbol.reference()),
            u8::from(!symbol.is_ref()),
            symbol.level(),
            symbol.address(),
            or_dash(symbol.link()),
        );
    }
    let _ = writeln!(out, "Btab");
    let _ = writeln!(
        out,
        "{:>4} {:>5} {:>5} {:>5} {:>5}",
        "idx", "last", "lpar", "psze", "vsze"
    );
    for (idx, block) in table.blocks().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4} {:>5} {:>5} {:>5} {:>5}",
            idx,
            or_dash(block.last()),
            or_dash(block.last_param()),
            block.param_size(),
            block.var_size(),
        );
    }
    let _ = writeln!(out, "Atab");
    let _ = writeln!(
        out,
        "{:>4} {:<8} {:<8} {:>5} {:>5} {:>5} {:>6}",
        "idx", "xtyp", "etyp", "low", "high", "elsz", "size"
    );
    for (idx, array) in table.arrays().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4} {:<8} {:<8} {:>5} {:>5} {:>5} {:>6}",
            idx,
            array.index_ty().name(),
            array.element_ty().name(),
            array.low(),
            array.high(),
            array.element_size(),
            array.size(),
        );
    }
    let display: Vec<String> = table.display().iter().map(|b| b.to_string()).collect();
    let _ = writeln!(out, "display: {}", display.join(" "));
    out
}

/// The decorated AST, one node per line, children indented by two spaces.
/// Errors recorded on a node follow it on lines starting with `!`.
pub fn render_program(program: &asg::Program, table: &SymbolTable) -> String {
    let mut printer = Printer {
        table,
        out: String::new(),
        depth: 0,
    };
    printer.program(program);
    printer.out
}

struct Printer<'a> {
    table: &'a SymbolTable,
    out: String,
    depth: usize,
}

fn type_label(ty: Type) -> String {
    match ty.reference() {
        Some(reference) => format!("{}({reference})", ty.name()),
        None => ty.name().to_string(),
    }
}

fn literal_label(literal: &Literal) -> String {
    match literal {
        Literal::Integer(value) => value.to_string(),
        Literal::Real(value) => format!("{value:?}"),
        Literal::Char(value) => format!("'{value}'"),
        Literal::String(value) => format!("'{value}'"),
        Literal::Boolean(value) => value.to_string(),
    }
}

impl Printer<'_> {
    fn line(&mut self, label: &str, decoration: &asg::Decoration) {
        let mut text = label.to_string();
        if decoration.ty != Type::Void {
            let _ = write!(text, " : {}", type_label(decoration.ty));
        }
        if let Some(address) = decoration.address {
            let _ = write!(text, " @{}:{address}", decoration.level);
        }
        let _ = writeln!(self.out, "{:indent$}{text}", "", indent = self.depth * 2);
        for diagnostic in &decoration.diagnostics {
            let _ = writeln!(
                self.out,
                "{:indent$}! {diagnostic}",
                "",
                indent = self.depth * 2 + 2
            );
        }
    }

    fn plain(&mut self, label: &str) {
        let _ = writeln!(self.out, "{:indent$}{label}", "", indent = self.depth * 2);
    }

    fn nested<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn symbol_name(&self, symbol: &SymbolIdResult, fallback: &str) -> String {
        match symbol {
            Ok(id) => self.table[*id].name().to_string(),
            Err(_) => format!("{fallback}?"),
        }
    }

    fn program(&mut self, program: &asg::Program) {
        let label = format!("program {} [block {}]", program.name, program.block);
        self.line(&label, &program.decoration);
        self.nested(|p| {
            p.declarations(&program.declarations);
            p.block(&program.body);
        });
    }

    fn declarations(&mut self, declarations: &[Declaration]) {
        for declaration in declarations {
            match declaration {
                Declaration::Const(decl) => {
                    let label = format!("const {} = {}", decl.name, literal_label(&decl.value));
                    self.line(&label, &decl.decoration);
                }
                Declaration::Type(decl) => {
                    self.line(&format!("type {}", decl.name), &decl.decoration)
                }
                Declaration::Var(decl) => {
                    self.line(&format!("var {}", decl.name), &decl.decoration)
                }
                Declaration::Subprogram(decl) => self.subprogram(decl),
            }
        }
    }

    fn subprogram(&mut self, decl: &asg::SubprogramDeclaration) {
        let kind = if decl.is_function { "function" } else { "procedure" };
        let label = format!("{kind} {} [block {}]", decl.name, decl.block);
        self.line(&label, &decl.decoration);
        self.nested(|p| {
            for param in &decl.parameters {
                let symbol = &p.table[*param];
                let mode = if symbol.is_ref() { "var param" } else { "param" };
                let label = format!(
                    "{mode} {} : {} @{}:{}",
                    symbol.name(),
                    type_label(symbol.ty()),
                    symbol.level(),
                    symbol.address()
                );
                p.plain(&label);
            }
            if let Some(slot) = decl.return_slot {
                let symbol = &p.table[slot];
                let label = format!(
                    "result {} : {} @{}:{}",
                    symbol.name(),
                    type_label(symbol.ty()),
                    symbol.level(),
                    symbol.address()
                );
                p.plain(&label);
            }
            p.declarations(&decl.declarations);
            p.block(&decl.body);
        });
    }

    fn block(&mut self, block: &asg::Block) {
        self.line("block", &block.decoration);
        self.nested(|p| {
            for stmt in &block.statements {
                p.stmt(stmt);
            }
        });
    }

    fn optional_stmt(&mut self, stmt: &Option<Box<Stmt>>) {
        match stmt {
            Some(stmt) => self.stmt(stmt),
            None => self.plain("empty"),
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign(assign) => {
                self.line("assign", &assign.decoration);
                self.nested(|p| {
                    p.expr(&assign.target);
                    p.expr(&assign.value);
                });
            }
            Stmt::If(stmt) => {
                self.line("if", &stmt.decoration);
                self.nested(|p| {
                    p.expr(&stmt.condition);
                    p.plain("then");
                    p.nested(|p| p.optional_stmt(&stmt.then_branch));
                    if stmt.else_branch.is_some() {
                        p.plain("else");
                        p.nested(|p| p.optional_stmt(&stmt.else_branch));
                    }
                });
            }
            Stmt::While(stmt) => {
                self.line("while", &stmt.decoration);
                self.nested(|p| {
                    p.expr(&stmt.condition);
                    p.optional_stmt(&stmt.body);
                });
            }
            Stmt::For(stmt) => {
                let label = if stmt.downto { "for downto" } else { "for to" };
                self.line(label, &stmt.decoration);
                self.nested(|p| {
                    p.expr(&stmt.variable);
                    p.expr(&stmt.start);
                    p.expr(&stmt.end);
                    p.optional_stmt(&stmt.body);
                });
            }
            Stmt::Repeat(stmt) => {
                self.line("repeat", &stmt.decoration);
                self.nested(|p| {
                    for inner in &stmt.body {
                        p.stmt(inner);
                    }
                    p.plain("until");
                    p.nested(|p| p.expr(&stmt.condition));
                });
            }
            Stmt::ProcedureCall(call) => self.call(call, &call.decoration),
            Stmt::Block(block) => self.block(block),
        }
    }

    fn call(&mut self, call: &asg::Call, decoration: &asg::Decoration) {
        let callee = match &call.callee {
            Callee::User(id) => self.table[*id].name().to_string(),
            Callee::Builtin(builtin) => builtin.name().to_string(),
            Callee::Unresolved(name) => format!("{name}?"),
        };
        self.line(&format!("call {callee}"), decoration);
        self.nested(|p| {
            for arg in &call.arguments {
                p.expr(arg);
            }
        });
    }

    fn expr(&mut self, texpr: &TExpr) {
        match &texpr.expression {
            Expr::Binary(binary) => {
                self.line(&format!("binary {}", binary.op), &texpr.decoration);
                self.nested(|p| {
                    p.expr(&binary.left);
                    p.expr(&binary.right);
                });
            }
            Expr::Unary(unary) => {
                self.line(&format!("unary {}", unary.op), &texpr.decoration);
                self.nested(|p| p.expr(&unary.operand));
            }
            Expr::Variable(var) => {
                let name = self.symbol_name(&var.symbol, &var.name);
                self.line(&format!("variable {name}"), &texpr.decoration);
                self.nested(|p| {
                    for access in &var.accessors {
                        match access {
                            Access::Index(index) => {
                                p.plain("index");
                                p.nested(|p| p.expr(index));
                            }
                            Access::Field { name, ty, .. } => {
                                p.plain(&format!("field {name} : {}", type_label(*ty)));
                            }
                        }
                    }
                });
            }
            Expr::Literal(literal) => {
                self.line(&format!("literal {}", literal_label(literal)), &texpr.decoration);
            }
            Expr::Call(call) => self.call(call, &texpr.decoration),
        }
    }
}
