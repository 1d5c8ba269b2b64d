// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use expect_test::expect;
use pascals_tokens::scan;

use crate::ast::{self, AstNode, FactorKind, Stmt, TypeSpecKind};

fn parse_program(src: &str) -> crate::Parse<ast::Program> {
    ast::Program::parse(&scan(src)).unwrap()
}

#[test]
fn leaves_reproduce_the_tokens() {
    let src = "program P; variabel a : larik [1 .. 3] dari char; mulai a[1] := 'x'; writeln(a[1]) selesai.";
    let tokens = scan(src);
    let parse = ast::Program::parse(&tokens).unwrap();
    let expected: Vec<_> = tokens.into_iter().filter(|t| !t.is_eof()).collect();
    let leaves = parse.leaf_tokens();
    assert_eq!(leaves.len(), expected.len());
    assert!(leaves.iter().zip(&expected).all(|(a, b)| a.same_lexeme(b)));
}

#[test]
fn scenario_a_tree() {
    let parse = parse_program("program P; variabel x : integer; mulai x := 5 selesai.");
    expect![[r#"
        <program>
          <program-header>
            KEYWORD(program)
            IDENTIFIER(P)
            SEMICOLON(;)
          <declaration-part>
            <var-declaration>
              KEYWORD(variabel)
              <var-group>
                <identifier-list>
                  IDENTIFIER(x)
                COLON(:)
                <type>
                  KEYWORD(integer)
                SEMICOLON(;)
          <compound-statement>
            KEYWORD(mulai)
            <statement-list>
              <assignment-statement>
                <variable>
                  IDENTIFIER(x)
                ASSIGN_OPERATOR(:=)
                <expression>
                  <simple-expression>
                    <term>
                      <factor>
                        NUMBER(5)
            KEYWORD(selesai)
          DOT(.)
    "#]]
    .assert_eq(&parse.debug_dump());
}

#[test]
fn typed_declarations() {
    let parse = parse_program(
        "program P; konstanta n = -10; tipe r = rekaman a, b : integer selesai; \
         variabel v : larik [1 .. n] dari r; \
         fungsi f(variabel x : integer; y : char) : boolean; mulai f := true selesai; \
         mulai selesai.",
    );
    let program = parse.tree();
    assert_eq!(program.header().unwrap().name().unwrap().text(), "P");
    let decls = program.declaration_part().unwrap();

    let konst = decls.const_definitions().next().unwrap();
    assert_eq!(konst.name().unwrap().text(), "n");
    let value = konst.constant().unwrap();
    assert_eq!(value.sign(), Some(ast::UnaryOp::Neg));
    assert_eq!(value.value().unwrap().text(), "10");

    let record = decls.type_definitions().next().unwrap();
    let Some(TypeSpecKind::Record(record)) = record.type_spec().unwrap().kind() else {
        panic!("expected a record type");
    };
    let fields: Vec<_> = record
        .field_groups()
        .flat_map(|group| group.identifier_list().unwrap().names())
        .map(|t| t.text().to_string())
        .collect();
    assert_eq!(fields, ["a", "b"]);

    let group = decls.var_groups().next().unwrap();
    let Some(TypeSpecKind::Array(array)) = group.type_spec().unwrap().kind() else {
        panic!("expected an array type");
    };
    let range = array.range().unwrap();
    assert_eq!(range.low().unwrap().text(), "1");
    assert_eq!(range.high().unwrap().text(), "n");

    let sub = decls.subprograms().next().unwrap();
    assert!(sub.is_function());
    assert_eq!(sub.return_type().unwrap().text(), "boolean");
    let groups: Vec<_> = sub.parameters().unwrap().groups().collect();
    assert!(groups[0].is_var());
    assert!(!groups[1].is_var());
}

#[test]
fn if_branches_split_on_else() {
    let parse = ast::Stmt::parse(&scan("jika a maka selain-itu b := 1")).unwrap();
    let Stmt::If(stmt) = parse.tree() else {
        panic!("expected an if statement");
    };
    assert!(stmt.has_else());
    assert!(stmt.then_branch().is_none());
    assert_eq!(stmt.else_branch().unwrap().text(), "b:=1");
}

#[test]
fn downto_loop() {
    let parse = ast::Stmt::parse(&scan("untuk i := 10 turun-ke 1 lakukan p")).unwrap();
    let Stmt::For(stmt) = parse.tree() else {
        panic!("expected a for statement");
    };
    assert!(stmt.is_downto());
    assert_eq!(stmt.start().unwrap().text(), "10");
    assert_eq!(stmt.end().unwrap().text(), "1");
    assert!(matches!(stmt.body(), Some(Stmt::ProcedureCall(_))));
}

#[test]
fn expression_operator_chains() {
    let parse = ast::Expression::parse(&scan("-a + f(1) * 2 atau tidak b")).unwrap();
    let expr = parse.tree();
    assert!(expr.op().is_none());
    let simple = expr.lhs().unwrap();
    assert_eq!(simple.sign(), Some(ast::UnaryOp::Neg));
    let rest = simple.rest();
    let ops: Vec<_> = rest.iter().map(|(op, _)| op.op().unwrap().to_string()).collect();
    assert_eq!(ops, ["+", "atau"]);

    let (_, product) = &rest[0];
    let Some(FactorKind::Call(call)) = product.first_factor().unwrap().kind() else {
        panic!("expected a call");
    };
    assert_eq!(call.name().unwrap().text(), "f");
    assert_eq!(call.arguments().unwrap().arguments().count(), 1);

    let (_, negated) = &rest[1];
    assert!(matches!(
        negated.first_factor().unwrap().kind(),
        Some(FactorKind::Not(_))
    ));
}

#[test]
fn token_positions() {
    let parse = parse_program("program P; mulai x := 5 selesai.");
    let root = parse.syntax_node();
    let assign = root
        .descendants()
        .find_map(ast::AssignmentStatement::cast)
        .unwrap();
    assert_eq!(crate::token_range(assign.syntax()), 4..7);
    let five = assign.value().unwrap().syntax().first_token().unwrap();
    assert_eq!(crate::token_index(&five), 6);
    assert_eq!(parse.tokens()[6].line(), Some(1));
}

#[test]
fn syntax_error_is_returned() {
    let err = ast::Program::parse(&scan("program P; mulai x := 5 selesai")).unwrap_err();
    assert_eq!(err.position(), 8);
}
