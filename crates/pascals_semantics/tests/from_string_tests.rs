// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use pascals_semantics::asg;
use pascals_semantics::symbols::{ObjectClass, PoolValue, SymbolTable, HEADER_SIZE};
use pascals_semantics::syntax_to_semantics::{analyze, parse_source_string, Analysis};
use pascals_semantics::types::Type;
use pascals_syntax::ast;
use pascals_tokens::scan;

fn analyze_string(code: &str) -> Analysis {
    let result = parse_source_string(code, None);
    assert!(!result.any_syntax_errors(), "syntax error in test input");
    result.take_analysis().unwrap()
}

fn symbol<'a>(table: &'a SymbolTable, name: &str) -> &'a pascals_semantics::symbols::Symbol {
    &table[table.lookup(name).unwrap()]
}

const SCENARIO_A: &str = "program P; variabel x : integer; mulai x := 5 selesai.";

#[test]
fn test_scenario_a_assignment() {
    let analysis = analyze_string(SCENARIO_A);
    assert!(analysis.errors().is_empty());
    assert!(analysis.warnings().is_empty());
    let table = analysis.symbol_table();
    let variables: Vec<_> = table
        .symbols()
        .iter()
        .filter(|s| s.class() == ObjectClass::Variable)
        .collect();
    assert_eq!(variables.len(), 1);
    let x = variables[0];
    assert_eq!(x.name(), "x");
    assert_eq!(x.ty(), Type::Integer);
    assert_eq!(x.level(), 0);
    assert_eq!(x.address(), HEADER_SIZE as i64);

    let program = analysis.program();
    assert_eq!(program.name, "P");
    assert_eq!(program.body.statements.len(), 1);
    let assign = match &program.body.statements[0] {
        asg::Stmt::Assign(assign) => assign,
        _ => unreachable!(),
    };
    match &assign.target.expression {
        asg::Expr::Variable(var) => {
            assert_eq!(var.symbol, Ok(table.lookup("x").unwrap()));
            assert!(var.is_lvalue);
        }
        _ => unreachable!(),
    }
    assert_eq!(
        assign.value.expression,
        asg::Expr::Literal(asg::Literal::Integer(5))
    );
    assert_eq!(assign.value.ty(), Type::Integer);
    assert_eq!(assign.target.decoration.address, Some(5));
}

#[test]
fn test_scenario_a_through_parse() {
    let parse = ast::Program::parse(&scan(SCENARIO_A)).unwrap();
    let analysis = analyze(&parse).unwrap();
    assert_eq!(analysis.symbol_table()[analysis.program().block].var_size(), 1);
}

#[test]
fn test_scenario_b_string_to_integer() {
    let code = "program P; variabel x : integer; mulai x := 'abc' selesai.";
    let parse = ast::Program::parse(&scan(code)).unwrap();
    let err = analyze(&parse).unwrap_err();
    let analysis = err.analysis();
    assert_eq!(
        analysis.error_messages(),
        vec!["type mismatch in assignment: cannot assign string to integer"]
    );
    // The node is still built, and carries its diagnostic.
    match &analysis.program().body.statements[0] {
        asg::Stmt::Assign(assign) => {
            assert_eq!(assign.value.ty(), Type::String);
            assert_eq!(assign.decoration.diagnostics.len(), 1);
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_scenario_c_boolean_loop_variable() {
    let code = "program P; variabel i : boolean; mulai untuk i := 1 ke 10 lakukan i := true selesai.";
    let analysis = analyze_string(code);
    let errors = analysis.error_messages();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("loop variable must be integer type"));
}

#[test]
fn test_loop_bounds_and_downto() {
    let code = "program P; variabel i : integer; mulai untuk i := 10 turun-ke 'a' lakukan i := i selesai.";
    let analysis = analyze_string(code);
    assert!(analysis.errors().is_empty());
    match &analysis.program().body.statements[0] {
        asg::Stmt::For(stmt) => assert!(stmt.downto),
        _ => unreachable!(),
    }
    let code = "program P; variabel i : integer; mulai untuk i := 1 ke true lakukan i := i selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec!["loop bound must be integer, found boolean"]
    );
}

#[test]
fn test_conditions_must_be_boolean() {
    let code = "
program P;
variabel i : integer;
mulai
  jika i maka i := 1;
  selama i + 1 lakukan i := 2;
  ulangi i := 3 sampai 1 < 2
selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec![
            "jika condition must be boolean type",
            "selama condition must be boolean type",
        ]
    );
}

#[test]
fn test_duplicate_declaration_reported_once() {
    let code = "program P; variabel x : integer; x : real; mulai x := 1 selesai.";
    let analysis = analyze_string(code);
    assert_eq!(analysis.error_messages(), vec!["duplicate declaration of 'x'"]);
    let table = analysis.symbol_table();
    // The second `x` is not entered and takes no storage.
    assert_eq!(table.symbols().iter().filter(|s| s.name() == "x").count(), 1);
    assert_eq!(symbol(table, "x").ty(), Type::Integer);
    assert_eq!(table[analysis.program().block].var_size(), 1);
}

#[test]
fn test_duplicate_differs_only_in_case() {
    let code = "program P; variabel Nilai : integer; nilai : integer; mulai selesai.";
    let analysis = analyze_string(code);
    assert_eq!(analysis.error_messages(), vec!["duplicate declaration of 'nilai'"]);
}

#[test]
fn test_undeclared_identifier() {
    let code = "program P; mulai y := 1 selesai.";
    let analysis = analyze_string(code);
    assert_eq!(analysis.error_messages(), vec!["undeclared identifier 'y'"]);
    assert_eq!(analysis.errors()[0].token_range(), 4..5);
}

#[test]
fn test_storage_layout() {
    let code = "program P; variabel a, b : integer; r : real; c : char; mulai selesai.";
    let analysis = analyze_string(code);
    let table = analysis.symbol_table();
    assert_eq!(symbol(table, "a").address(), 5);
    assert_eq!(symbol(table, "b").address(), 6);
    assert_eq!(symbol(table, "r").address(), 7);
    assert_eq!(symbol(table, "c").address(), 15);
    assert_eq!(table[analysis.program().block].var_size(), 11);
}

#[test]
fn test_constants() {
    let code = "
program P;
konstanta maks = 10; minus = -maks; pi = 2.75; huruf = 'z'; salam = 'halo'; benar = true;
variabel x : integer;
mulai x := maks selesai.";
    let analysis = analyze_string(code);
    assert!(analysis.errors().is_empty());
    let table = analysis.symbol_table();
    let maks = symbol(table, "maks");
    assert_eq!(maks.class(), ObjectClass::Constant);
    assert_eq!((maks.ty(), maks.address()), (Type::Integer, 10));
    assert_eq!(symbol(table, "minus").address(), -10);
    assert_eq!(symbol(table, "huruf").address(), i64::from(u32::from('z')));
    assert_eq!(symbol(table, "benar").address(), 1);
    let pi = symbol(table, "pi");
    assert_eq!(pi.ty(), Type::Real);
    assert_eq!(table.literal(pi.address() as usize), Some(&PoolValue::Real(2.75)));
    let salam = symbol(table, "salam");
    assert_eq!(salam.ty(), Type::String);
    assert_eq!(
        table.literal(salam.address() as usize),
        Some(&PoolValue::String("halo".to_string()))
    );
    // A constant reads as a value but is not assignable.
    match &analysis.program().body.statements[0] {
        asg::Stmt::Assign(assign) => match &assign.value.expression {
            asg::Expr::Variable(var) => assert!(!var.is_lvalue),
            _ => unreachable!(),
        },
        _ => unreachable!(),
    }
}

#[test]
fn test_constant_errors() {
    let code = "program P; konstanta a = -'x'; b = c; k = 1; mulai k := 1 selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec![
            "sign applied to non-numeric constant ''x''",
            "undeclared identifier 'c'",
            "'k' cannot be assigned to",
        ]
    );
}

#[test]
fn test_array_types() {
    let code = "
program P;
konstanta n = 4;
tipe vektor = larik [1 .. n] dari real;
variabel v : vektor; m : larik ['a' .. 'c'] dari larik [0 .. 1] dari integer; i : integer;
mulai v[i] := 1; m['a', 1] := v[2] bagi 1 selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec!["operator 'bagi' requires integer operands"]
    );
    let table = analysis.symbol_table();
    let vektor = symbol(table, "vektor");
    assert_eq!(vektor.class(), ObjectClass::Type);
    let Type::Array(id) = vektor.ty() else {
        panic!("vektor is not an array")
    };
    let array = &table[id];
    assert_eq!((array.low(), array.high()), (1, 4));
    assert_eq!(array.element_ty(), Type::Real);
    assert_eq!(array.size(), 32);
    assert_eq!(symbol(table, "v").address(), 5);
    assert_eq!(symbol(table, "m").address(), 37);
    assert_eq!(table.type_size(symbol(table, "m").ty()), 6);
    assert_eq!(symbol(table, "i").address(), 43);
}

#[test]
fn test_inverted_array_bounds() {
    let code = "program P; variabel a : larik [5 .. 1] dari integer; mulai selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec!["lower bound greater than upper bound (5 .. 1)"]
    );
    let table = analysis.symbol_table();
    let array = &table.arrays()[0];
    assert_eq!((array.low(), array.high()), (1, 5));
}

#[test]
fn test_indexing_errors() {
    let code = "
program P;
variabel a : larik [1 .. 3] dari integer; x : integer;
mulai a[true] := 1; x[1] := 2 selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec!["array index must be integer, found boolean", "'x' is not an array"]
    );
}

#[test]
fn test_records() {
    let code = "
program P;
tipe titik = rekaman x, y : real; tag : char selesai;
variabel t : titik; n : integer;
mulai t.x := 1.5; t.tag := 'a'; t.z := 1; n.x := 2 selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec!["record has no field 'z'", "'n' is not a record"]
    );
    let table = analysis.symbol_table();
    let Type::Record(block) = symbol(table, "titik").ty() else {
        panic!("titik is not a record")
    };
    let fields: Vec<(&str, i64)> = table
        .fields(block)
        .into_iter()
        .map(|id| (table[id].name(), table[id].address()))
        .collect();
    assert_eq!(fields, vec![("x", 0), ("y", 8), ("tag", 16)]);
    assert_eq!(table[block].var_size(), 17);
    assert_eq!(table[table.fields(block)[0]].level(), 1);
    // Field names are not visible as variables.
    assert!(table.lookup("tag").is_none());
    assert_eq!(symbol(table, "n").address(), 5 + 17);
}

fn assigned_targets(analysis: &Analysis) -> Vec<&asg::TExpr> {
    analysis
        .program()
        .body
        .statements
        .iter()
        .map(|stmt| match stmt {
            asg::Stmt::Assign(assign) => &assign.target,
            _ => unreachable!(),
        })
        .collect()
}

fn accessor_count(texpr: &asg::TExpr) -> usize {
    match &texpr.expression {
        asg::Expr::Variable(var) => var.accessors.len(),
        _ => unreachable!(),
    }
}

#[test]
fn test_mixed_accessor_chains() {
    let code = "
program P;
tipe sel = rekaman f : larik [1 .. 3] dari char selesai;
variabel a : larik [1 .. 2] dari sel; v : sel;
  m : larik [1 .. 2] dari larik [1 .. 3] dari integer;
mulai
  a[1].f[2] := 'x';
  v.f[1] := 'y';
  m[1, 2] := 3;
  m[1][3] := 4;
  a.f := 1;
  v[1] := 'z'
selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec!["'a' is not a record", "'v' is not an array"]
    );
    let targets = assigned_targets(&analysis);
    let types: Vec<Type> = targets.iter().map(|target| target.ty()).collect();
    assert_eq!(
        types,
        vec![
            Type::Char,
            Type::Char,
            Type::Integer,
            Type::Integer,
            Type::Undefined,
            Type::Undefined
        ]
    );
    // `m[1, 2]` and `m[1][3]` both select through two array levels.
    assert_eq!(accessor_count(targets[2]), 2);
    assert_eq!(accessor_count(targets[3]), 2);
    assert_eq!(accessor_count(targets[0]), 3);
}

#[test]
fn test_oversized_array_is_reported() {
    let code = "program P; variabel a : larik [0 .. 9223372036854775807] dari real; mulai selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec![
            "array type is too large",
            "storage for 'a' exceeds the addressable size"
        ]
    );
    let table = analysis.symbol_table();
    assert_eq!(table.arrays()[0].size(), usize::MAX);
    assert_eq!(symbol(table, "a").address(), 5);
}

#[test]
fn test_storage_overflow_across_variables() {
    let code = "
program P;
variabel a, b : larik [0 .. 9223372036854775806] dari integer;
mulai selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec![
            "storage for 'a' exceeds the addressable size",
            "storage for 'b' exceeds the addressable size"
        ]
    );
    let table = analysis.symbol_table();
    assert_eq!(table.arrays()[0].size(), i64::MAX as usize);
    assert_eq!(symbol(table, "b").address(), i64::MAX);
}

#[test]
fn test_unknown_type_and_not_a_type() {
    let code = "program P; variabel x : integer; y : foo; z : x; mulai selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec!["unknown type 'foo'", "'x' is not a type"]
    );
    assert_eq!(symbol(analysis.symbol_table(), "y").ty(), Type::Undefined);
}

#[test]
fn test_standard_type_names_can_be_shadowed() {
    let code = "program P; tipe real = integer; variabel r : real; mulai r := 1 selesai.";
    let analysis = analyze_string(code);
    assert!(analysis.errors().is_empty());
    assert_eq!(symbol(analysis.symbol_table(), "r").ty(), Type::Integer);
}

#[test]
fn test_procedure_scopes_and_parameters() {
    let code = "
program P;
variabel g : integer;
prosedur tukar(variabel a, b : integer; r : real);
variabel tmp : integer;
mulai tmp := a; a := b; b := tmp; g := 0 selesai;
mulai tukar(g, g, 1) selesai.";
    let analysis = analyze_string(code);
    assert!(analysis.errors().is_empty(), "{:?}", analysis.error_messages());
    let table = analysis.symbol_table();
    let tukar = symbol(table, "tukar");
    assert_eq!(tukar.class(), ObjectClass::Procedure);
    assert_eq!(tukar.level(), 0);
    let block = tukar.block().unwrap();
    let params: Vec<&str> = table
        .parameters(block)
        .into_iter()
        .map(|id| table[id].name())
        .collect();
    assert_eq!(params, vec!["a", "b", "r"]);
    let a = &table[table.parameters(block)[0]];
    assert!(a.is_ref());
    assert_eq!((a.level(), a.address()), (1, 5));
    let r = &table[table.parameters(block)[2]];
    assert!(!r.is_ref());
    assert_eq!(r.address(), 7);
    let descriptor = &table[block];
    assert_eq!(descriptor.param_size(), 10);
    assert_eq!(descriptor.var_size(), 1);
    // Locals are gone once the procedure is closed.
    assert!(table.lookup("tmp").is_none());
    assert!(table.lookup("a").is_none());
    assert_eq!(table.level(), 0);
    // The global frame is unaffected by the procedure's storage.
    assert_eq!(table[analysis.program().block].var_size(), 1);
}

#[test]
fn test_call_checks() {
    let code = "
program P;
variabel x : integer; b : boolean;
prosedur p(variabel a : integer; c : char);
mulai a := 1 selesai;
mulai
  p(x);
  p(b, 'c');
  p(1, 'c');
  x := p(x, 'c');
  x(1)
selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec![
            "'p' expects 2 argument(s) but got 1",
            "argument 1 of 'p' has type boolean, expected integer",
            "argument 1 of 'p' must be a variable",
            "procedure 'p' used in an expression",
            "'x' is not a procedure or function",
        ]
    );
}

#[test]
fn test_builtins() {
    let code = "
program P;
variabel x : integer;
mulai writeln('x = ', x); write(x + 1); read(x); readln(x + 1); x := readln selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec![
            "argument 1 of 'readln' must be a variable",
            "undeclared identifier 'readln'",
        ]
    );
}

#[test]
fn test_function_return_and_recursion() {
    let code = "
program P;
variabel hasil : integer;
fungsi fakt(n : integer) : integer;
mulai
  jika n <= 1 maka fakt := 1
  selain-itu fakt := n * fakt(n - 1)
selesai;
mulai hasil := fakt(5) selesai.";
    let analysis = analyze_string(code);
    assert!(analysis.errors().is_empty(), "{:?}", analysis.error_messages());
    assert!(analysis.warnings().is_empty());
    let table = analysis.symbol_table();
    let fakt_id = table.lookup("fakt").unwrap();
    let fakt = &table[fakt_id];
    assert_eq!(fakt.class(), ObjectClass::Function);
    assert_eq!(fakt.ty(), Type::Integer);
    let decl = match &analysis.program().declarations[1] {
        asg::Declaration::Subprogram(decl) => decl,
        _ => unreachable!(),
    };
    let slot = decl.return_slot.unwrap();
    assert_eq!(table[slot].name(), "fakt");
    assert_eq!(table[slot].class(), ObjectClass::Variable);
    assert_eq!(table[slot].level(), 1);
    assert_eq!(table[slot].address(), 0);
    // The recursive call resolves to the function, not the slot.
    let calls = find_calls(&decl.body.statements);
    assert_eq!(calls, vec![asg::Callee::User(fakt_id)]);
    match &analysis.program().body.statements[0] {
        asg::Stmt::Assign(assign) => assert_eq!(assign.value.ty(), Type::Integer),
        _ => unreachable!(),
    }
}

fn find_calls(stmts: &[asg::Stmt]) -> Vec<asg::Callee> {
    fn in_expr(expr: &asg::TExpr, out: &mut Vec<asg::Callee>) {
        match &expr.expression {
            asg::Expr::Call(call) => {
                out.push(call.callee.clone());
                call.arguments.iter().for_each(|arg| in_expr(arg, out));
            }
            asg::Expr::Binary(binary) => {
                in_expr(&binary.left, out);
                in_expr(&binary.right, out);
            }
            asg::Expr::Unary(unary) => in_expr(&unary.operand, out),
            _ => (),
        }
    }
    fn in_stmt(stmt: &asg::Stmt, out: &mut Vec<asg::Callee>) {
        match stmt {
            asg::Stmt::Assign(assign) => in_expr(&assign.value, out),
            asg::Stmt::If(stmt) => {
                in_expr(&stmt.condition, out);
                stmt.then_branch.iter().for_each(|s| in_stmt(s, out));
                stmt.else_branch.iter().for_each(|s| in_stmt(s, out));
            }
            asg::Stmt::Block(block) => block.statements.iter().for_each(|s| in_stmt(s, out)),
            _ => (),
        }
    }
    let mut out = Vec::new();
    stmts.iter().for_each(|s| in_stmt(s, &mut out));
    out
}

#[test]
fn test_missing_return_assignment_is_a_warning() {
    let code = "
program P;
fungsi f(n : integer) : integer;
mulai n := n + 1 selesai;
mulai writeln(f(1)) selesai.";
    let parse = ast::Program::parse(&scan(code)).unwrap();
    let analysis = analyze(&parse).unwrap();
    assert_eq!(
        analysis.warning_messages(),
        vec!["function 'f' never assigns its return value"]
    );
}

// A function and an outer variable sharing one name.
#[test]
fn test_function_name_same_as_outer_variable() {
    // Same scope: the function is a duplicate.
    let code = "
program P;
variabel f : integer;
fungsi f : integer;
mulai f := 1 selesai;
mulai f := 2 selesai.";
    let analysis = analyze_string(code);
    assert_eq!(analysis.error_messages(), vec!["duplicate declaration of 'f'"]);
    assert_eq!(symbol(analysis.symbol_table(), "f").class(), ObjectClass::Variable);

    // Enclosing scope: the outer variable is shadowed inside the function by the
    // return slot, and outside it the name means the variable again.
    let code = "
program P;
prosedur luar;
variabel g : integer;
  fungsi g : integer;
  mulai g := 1 selesai;
mulai g := 2 selesai;
mulai luar selesai.";
    let analysis = analyze_string(code);
    assert_eq!(analysis.error_messages(), vec!["duplicate declaration of 'g'"]);

    let code = "
program P;
variabel g : boolean;
prosedur luar;
  fungsi g : integer;
  mulai g := 1 selesai;
mulai writeln(g + 1) selesai;
mulai g := true selesai.";
    let analysis = analyze_string(code);
    assert!(analysis.errors().is_empty(), "{:?}", analysis.error_messages());
    let table = analysis.symbol_table();
    assert_eq!(symbol(table, "g").ty(), Type::Boolean);
    let functions: Vec<_> = table
        .symbols()
        .iter()
        .filter(|s| s.name() == "g" && s.class() == ObjectClass::Function)
        .collect();
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].level(), 1);
}

#[test]
fn test_parameter_named_like_function() {
    let code = "
program P;
fungsi f(f : integer) : integer;
mulai f := 1 selesai;
mulai writeln(f(1)) selesai.";
    let analysis = analyze_string(code);
    assert_eq!(analysis.error_messages(), vec!["duplicate declaration of 'f'"]);
}

#[test]
fn test_function_call_outside_body_is_not_assignable() {
    let code = "
program P;
fungsi f : integer;
mulai f := 1 selesai;
mulai f := 2 selesai.";
    let analysis = analyze_string(code);
    assert_eq!(analysis.error_messages(), vec!["'f' cannot be assigned to"]);
}

#[test]
fn test_var_argument_must_be_variable() {
    let code = "
program P;
konstanta k = 1;
variabel v : larik [1 .. 2] dari integer;
prosedur inc(variabel a : integer);
mulai a := a + 1 selesai;
mulai inc(v[1]); inc(k) selesai.";
    let analysis = analyze_string(code);
    assert_eq!(
        analysis.error_messages(),
        vec!["argument 1 of 'inc' must be a variable"]
    );
}

#[test]
fn test_nested_levels() {
    let code = "
program P;
prosedur a;
  prosedur b;
  variabel x : integer;
  mulai x := 1 selesai;
mulai b selesai;
mulai a selesai.";
    let analysis = analyze_string(code);
    assert!(analysis.errors().is_empty());
    let table = analysis.symbol_table();
    let x = table.symbols().iter().find(|s| s.name() == "x").unwrap();
    assert_eq!(x.level(), 2);
    assert_eq!(x.address(), 5);
    let b = table.symbols().iter().find(|s| s.name() == "b").unwrap();
    assert_eq!(b.level(), 1);
    // `b` is not visible from the program body.
    assert!(table.lookup("b").is_none());
}

#[test]
fn test_errors_do_not_stop_analysis() {
    let code = "
program P;
variabel x : integer;
mulai
  x := true;
  y := 1;
  x := 'ab'
selesai.";
    let analysis = analyze_string(code);
    assert_eq!(analysis.errors().len(), 3);
    assert_eq!(analysis.program().body.statements.len(), 3);
}

#[test]
fn test_syntax_error_skips_analysis() {
    let result = parse_source_string("program P; mulai x := selesai.", None);
    assert!(result.any_syntax_errors());
    assert!(result.analysis().is_none());
    assert!(result.any_errors());
}
