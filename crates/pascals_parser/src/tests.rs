// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use super::*;

use expect_test::{expect, Expect};
use pascals_tokens::{scan, Token};
use std::fmt::Write;

fn render(output: &Output, tokens: &[Token]) -> String {
    let mut res = String::new();
    let mut depth = 0;
    let mut next_token = tokens.iter();
    for step in output.iter() {
        match step {
            Step::Enter { kind } => {
                let _ = writeln!(res, "{:indent$}{kind}", "", indent = depth * 2);
                depth += 1;
            }
            Step::Token { .. } => {
                if let Some(token) = next_token.next() {
                    let _ = writeln!(res, "{:indent$}{token}", "", indent = depth * 2);
                }
            }
            Step::Exit => depth -= 1,
        }
    }
    res
}

fn check(entry: TopEntryPoint, src: &str, expect: Expect) {
    let tokens = scan(src);
    let input = Input::from_tokens(&tokens);
    let actual = match entry.parse(&input) {
        Ok(output) => render(&output, &tokens),
        Err(err) => format!("error: {err}\n"),
    };
    expect.assert_eq(&actual);
}

fn parse_ok(entry: TopEntryPoint, src: &str) -> Output {
    let tokens = scan(src);
    entry.parse(&Input::from_tokens(&tokens)).unwrap()
}

#[test]
fn division_expression() {
    check(
        TopEntryPoint::Expression,
        "1 / 2",
        expect![[r#"
            <expression>
              <simple-expression>
                <term>
                  <factor>
                    NUMBER(1)
                  <multiplicative-operator>
                    ARITHMETIC_OPERATOR(/)
                  <factor>
                    NUMBER(2)
        "#]],
    );
}

#[test]
fn call_with_arguments() {
    check(
        TopEntryPoint::Statement,
        "p(x, 1)",
        expect![[r#"
            <procedure-call>
              IDENTIFIER(p)
              <parameter-list>
                LPARENTHESIS(()
                <expression>
                  <simple-expression>
                    <term>
                      <factor>
                        <variable>
                          IDENTIFIER(x)
                COMMA(,)
                <expression>
                  <simple-expression>
                    <term>
                      <factor>
                        NUMBER(1)
                RPARENTHESIS())
        "#]],
    );
}

#[test]
fn chained_accessors_and_sign() {
    check(
        TopEntryPoint::Statement,
        "a[i].f := -b",
        expect![[r#"
            <assignment-statement>
              <variable>
                IDENTIFIER(a)
                <index-access>
                  LBRACKET([)
                  <expression>
                    <simple-expression>
                      <term>
                        <factor>
                          <variable>
                            IDENTIFIER(i)
                  RBRACKET(])
                <field-access>
                  DOT(.)
                  IDENTIFIER(f)
              ASSIGN_OPERATOR(:=)
              <expression>
                <simple-expression>
                  ARITHMETIC_OPERATOR(-)
                  <term>
                    <factor>
                      <variable>
                        IDENTIFIER(b)
        "#]],
    );
}

#[test]
fn bare_procedure_call() {
    cov_mark::check!(routed_to_bare_call);
    check(
        TopEntryPoint::Statement,
        "tulis",
        expect![[r#"
            <procedure-call>
              IDENTIFIER(tulis)
        "#]],
    );
}

#[test]
fn indexed_target_routes_to_assignment() {
    cov_mark::check!(routed_to_assignment);
    parse_ok(TopEntryPoint::Statement, "a[1] := 2");
}

#[test]
fn parenthesis_routes_to_call() {
    cov_mark::check!(routed_to_call_with_arguments);
    parse_ok(TopEntryPoint::Statement, "writeln2(a, b)");
}

#[test]
fn writeln_keyword_is_a_call() {
    check(
        TopEntryPoint::Statement,
        "writeln()",
        expect![[r#"
            <procedure-call>
              KEYWORD(writeln)
              <parameter-list>
                LPARENTHESIS(()
                RPARENTHESIS())
        "#]],
    );
}

#[test]
fn missing_final_dot() {
    check(
        TopEntryPoint::Program,
        "program P; mulai x := 5 selesai",
        expect![[r#"
            error: <program>: expected DOT but found end of input at token 8
        "#]],
    );
}

#[test]
fn missing_expression() {
    check(
        TopEntryPoint::Program,
        "program P; mulai x := selesai.",
        expect![[r#"
            error: <factor>: expected an expression but found KEYWORD(selesai) at token 6 (line 1)
        "#]],
    );
}

#[test]
fn tokens_after_final_dot() {
    check(
        TopEntryPoint::Program,
        "program P; mulai selesai. x",
        expect![[r#"
            error: <program>: expected end of input but found IDENTIFIER(x) at token 6 (line 1)
        "#]],
    );
}

#[test]
fn declarations_out_of_order() {
    check(
        TopEntryPoint::Program,
        "program P; prosedur q; mulai selesai; variabel x : integer; mulai selesai.",
        expect![[r#"
            error: <compound-statement>: expected KEYWORD(mulai) but found KEYWORD(variabel) at token 9 (line 1)
        "#]],
    );
}

#[test]
fn bad_for_direction() {
    check(
        TopEntryPoint::Statement,
        "untuk i := 1 sampai 10 lakukan x := 1",
        expect![[r#"
            error: <for-statement>: expected KEYWORD(ke) or KEYWORD(turun-ke) but found KEYWORD(sampai) at token 4 (line 1)
        "#]],
    );
}

#[test]
fn depth_limit() {
    let tokens = scan("1");
    let input = Input::from_tokens(&tokens);
    let err = TopEntryPoint::Expression
        .parse_with_limit(&input, &Limit::new(3))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "<factor>: nesting deeper than 3 at token 0 (line 1)"
    );
    assert_eq!(err.rule(), SyntaxKind::FACTOR);
    assert_eq!(err.position(), 0);
}

#[test]
fn deeply_nested_parentheses_fail_cleanly() {
    let src = format!("{}1{}", "(".repeat(400), ")".repeat(400));
    let tokens = scan(&src);
    let err = TopEntryPoint::Expression
        .parse(&Input::from_tokens(&tokens))
        .unwrap_err();
    assert!(matches!(err, SyntaxError::TooDeep { limit: 512, .. }));
}

#[test]
fn empty_statements_are_skipped() {
    let output = parse_ok(TopEntryPoint::Program, "program P; mulai ; x := 1; selesai.");
    let statements = output
        .iter()
        .filter(|step| {
            matches!(
                step,
                Step::Enter {
                    kind: SyntaxKind::ASSIGNMENT_STATEMENT
                }
            )
        })
        .count();
    assert_eq!(statements, 1);
}

#[test]
fn full_program_parses() {
    let src = "
program Contoh;
konstanta maks = 10; minus = -maks;
tipe vektor = larik [1 .. maks] dari integer;
     titik = rekaman x, y : real; label : char selesai;
variabel v : vektor; t : titik; i, total : integer;
prosedur tukar(variabel a, b : integer);
variabel tmp : integer;
mulai tmp := a; a := b; b := tmp selesai;
fungsi kuadrat(n : integer) : integer;
mulai kuadrat := n * n selesai;
mulai
  total := 0;
  untuk i := 1 ke maks lakukan
    mulai v[i] := kuadrat(i); total := total + v[i] selesai;
  jika (total > 100) dan tidak (total = 0) maka writeln('besar') selain-itu writeln('kecil');
  selama i > 0 lakukan i := i - 1;
  ulangi i := i + 1 sampai i >= 10;
  t.x := 1.5
selesai.
";
    parse_ok(TopEntryPoint::Program, src);
}

#[test]
fn syntax_kind_labels() {
    assert_eq!(SyntaxKind::IF_STATEMENT.to_string(), "<if-statement>");
    assert_eq!(SyntaxKind::RANGE_OPERATOR.to_string(), "RANGE_OPERATOR");
    assert!(SyntaxKind::EOF.is_token());
    assert!(SyntaxKind::MULTIPLICATIVE_OP.is_node());
    assert!(!SyntaxKind::__LAST.is_node());
    let raw: u16 = SyntaxKind::VARIABLE.into();
    assert_eq!(SyntaxKind::from(raw), SyntaxKind::VARIABLE);
}
