// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use super::*;

use expect_test::{expect, Expect};
use std::fmt::Write;

fn check_reading(src: &str, expect: Expect) {
    let stream = read_token_stream(src).unwrap();
    let actual = stream
        .tokens()
        .iter()
        .zip(stream.spans())
        .fold(String::new(), |mut output, (token, span)| {
            let _ = writeln!(output, "{:?} {:?} {:?}", token.kind(), token.text(), span);
            output
        });
    expect.assert_eq(&actual)
}

#[test]
fn smoke_test() {
    check_reading(
        "KEYWORD(program)\nIDENTIFIER(Hello)\nSEMICOLON(;)\n",
        expect![[r#"
            Keyword "program" 0..16
            Identifier "Hello" 17..34
            Semicolon ";" 35..47
        "#]],
    )
}

#[test]
fn parenthesis_lexemes() {
    check_reading(
        "LPARENTHESIS(()\nRPARENTHESIS())\nCHAR_LITERAL('(')\n",
        expect![[r#"
            LParenthesis "(" 0..15
            RParenthesis ")" 16..31
            CharLiteral "'('" 32..49
        "#]],
    )
}

#[test]
fn blank_lines_and_indentation() {
    check_reading(
        "\n  NUMBER(42)  \r\n\nSTRING_LITERAL('a b')\n",
        expect![[r#"
            Number "42" 3..13
            StringLiteral "'a b'" 18..39
        "#]],
    )
}

#[test]
fn malformed_line() {
    let err = read_token_stream("KEYWORD(mulai)\nSEMICOLON;\n").unwrap_err();
    assert_eq!(
        err,
        TokenStreamError::Malformed {
            line: 2,
            text: "SEMICOLON;".to_string()
        }
    );
    assert_eq!(
        err.to_string(),
        "line 2: expected `KIND(value)`, found `SEMICOLON;`"
    );
}

#[test]
fn trailing_text_is_malformed() {
    let err = read_token_stream("NUMBER(1) x\n").unwrap_err();
    assert!(matches!(err, TokenStreamError::Malformed { line: 1, .. }));
}

#[test]
fn unknown_kind() {
    let err = read_token_stream("OPERATOR(+)").unwrap_err();
    assert_eq!(
        err,
        TokenStreamError::UnknownKind {
            line: 1,
            kind: "OPERATOR".to_string()
        }
    );
}

#[test]
fn end_marker_is_not_persisted() {
    assert!(TokenKind::from_tag("EOF").is_none());
    let tokens = [Token::new(TokenKind::Dot, "."), Token::eof()];
    assert_eq!(render_tokens(&tokens), "DOT(.)\n");
}

#[test]
fn render_then_read() {
    let tokens = vec![
        Token::new(TokenKind::Keyword, "mulai"),
        Token::new(TokenKind::Identifier, "x"),
        Token::new(TokenKind::AssignOperator, ":="),
        Token::new(TokenKind::StringLiteral, "'abc'"),
        Token::new(TokenKind::Keyword, "selesai"),
        Token::new(TokenKind::Dot, "."),
    ];
    let text = render_tokens(&tokens);
    let stream: TokenStream = text.parse().unwrap();
    assert_eq!(stream.into_tokens(), tokens);
}

#[test]
fn span_past_the_end() {
    let stream = read_token_stream("DOT(.)\n").unwrap();
    assert_eq!(stream.span(0), 0..6);
    assert_eq!(stream.span(1), 6..6);
}

#[test]
fn keyword_spelling() {
    let token = Token::new(TokenKind::Keyword, "Turun_Ke");
    assert!(token.is_keyword("turun-ke"));
    assert!(!token.is_keyword("ke"));
    assert!(!Token::new(TokenKind::Identifier, "mulai").is_keyword("mulai"));
    assert_eq!(normalize_word("SELAIN_ITU"), "selain-itu");
    assert!(KEYWORDS.iter().any(|kw| same_word(kw, "REKAMAN")));
}

#[test]
fn display_form() {
    let token = Token::new(TokenKind::RelationalOperator, "<>").with_line(3);
    assert_eq!(token.to_string(), "RELATIONAL_OPERATOR(<>)");
    assert_eq!(token.line(), Some(3));
    assert!(token.same_lexeme(&Token::new(TokenKind::RelationalOperator, "<>")));
}

fn check_scanning(src: &str, expect: Expect) {
    let actual = scan(src)
        .iter()
        .fold(String::new(), |mut output, token| {
            let _ = writeln!(output, "{} {:?}", token, token.line());
            output
        });
    expect.assert_eq(&actual)
}

#[test]
fn scan_small_program() {
    check_scanning(
        "program P;\nvariabel x : integer;\nmulai x := 5 selesai.",
        expect![[r#"
            KEYWORD(program) Some(1)
            IDENTIFIER(P) Some(1)
            SEMICOLON(;) Some(1)
            KEYWORD(variabel) Some(2)
            IDENTIFIER(x) Some(2)
            COLON(:) Some(2)
            KEYWORD(integer) Some(2)
            SEMICOLON(;) Some(2)
            KEYWORD(mulai) Some(3)
            IDENTIFIER(x) Some(3)
            ASSIGN_OPERATOR(:=) Some(3)
            NUMBER(5) Some(3)
            KEYWORD(selesai) Some(3)
            DOT(.) Some(3)
        "#]],
    )
}

#[test]
fn scan_operators_and_literals() {
    check_scanning(
        "a[1..10] <> 'abc' { note } 'c' 2.5e3 bagi DAN selain-itu turun_ke x-1",
        expect![[r#"
            IDENTIFIER(a) Some(1)
            LBRACKET([) Some(1)
            NUMBER(1) Some(1)
            RANGE_OPERATOR(..) Some(1)
            NUMBER(10) Some(1)
            RBRACKET(]) Some(1)
            RELATIONAL_OPERATOR(<>) Some(1)
            STRING_LITERAL('abc') Some(1)
            CHAR_LITERAL('c') Some(1)
            NUMBER(2.5e3) Some(1)
            ARITHMETIC_OPERATOR(bagi) Some(1)
            LOGICAL_OPERATOR(DAN) Some(1)
            KEYWORD(selain-itu) Some(1)
            KEYWORD(turun_ke) Some(1)
            IDENTIFIER(x) Some(1)
            ARITHMETIC_OPERATOR(-) Some(1)
            NUMBER(1) Some(1)
        "#]],
    )
}

#[test]
fn scan_unterminated_quote() {
    let tokens = scan("x := 'oops\ny");
    assert_eq!(tokens[2].kind(), TokenKind::Error);
    assert_eq!(tokens[2].text(), "'oops");
    assert_eq!(tokens[3].line(), Some(2));
}
