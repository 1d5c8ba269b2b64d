// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use expect_test::{expect, Expect};
use pascals_semantics::syntax_to_semantics::parse_source_string;
use pascals_semantics::{render_program, render_symbol_table};

fn check(code: &str, table: Expect, program: Expect) {
    let analysis = parse_source_string(code, None).take_analysis().unwrap();
    table.assert_eq(&render_symbol_table(analysis.symbol_table()));
    program.assert_eq(&render_program(
        analysis.program(),
        analysis.symbol_table(),
    ));
}

#[test]
fn single_assignment() {
    check(
        "program P; variabel x : integer; mulai x := 5 selesai.",
        expect![[r#"
            Tab
             idx name         class      type        ref  nrm  lev    adr  link
               0 P            program    void          0    1    0      0     -
               1 x            variable   integer       -    1    0      5     0
            Btab
             idx  last  lpar  psze  vsze
               0     1     -     0     1
            Atab
             idx xtyp     etyp       low  high  elsz   size
            display: 0
        "#]],
        expect![[r#"
            program P [block 0]
              var x : integer @0:5
              block
                assign : integer
                  variable x : integer @0:5
                  literal 5 : integer
        "#]],
    );
}

#[test]
fn procedure_with_array_argument() {
    check(
        "
program Q;
konstanta n = 2;
variabel a : larik [1 .. n] dari integer;
prosedur p(variabel y : integer);
mulai y := y + 1 selesai;
mulai p(a[1]) selesai.",
        expect![[r#"
            Tab
             idx name         class      type        ref  nrm  lev    adr  link
               0 Q            program    void          0    1    0      0     -
               1 n            constant   integer       -    1    0      2     0
               2 a            variable   array         0    1    0      5     1
               3 p            procedure  void          1    1    0      0     2
               4 y            variable   integer       -    0    1      5     -
            Btab
             idx  last  lpar  psze  vsze
               0     3     -     0     2
               1     4     4     1     0
            Atab
             idx xtyp     etyp       low  high  elsz   size
               0 integer  integer      1     2     1      2
            display: 0
        "#]],
        expect![[r#"
            program Q [block 0]
              const n = 2 : integer @0:2
              var a : array(0) @0:5
              procedure p [block 1]
                var param y : integer @1:5
                block
                  assign : integer
                    variable y : integer @1:5
                    binary + : integer
                      variable y : integer @1:5
                      literal 1 : integer
              block
                call p
                  variable a : integer @0:5
                    index
                      literal 1 : integer
        "#]],
    );
}

#[test]
fn diagnostics_follow_their_node() {
    check(
        "program P; variabel x : integer; mulai x := 'abc' selesai.",
        expect![[r#"
            Tab
             idx name         class      type        ref  nrm  lev    adr  link
               0 P            program    void          0    1    0      0     -
               1 x            variable   integer       -    1    0      5     0
            Btab
             idx  last  lpar  psze  vsze
               0     1     -     0     1
            Atab
             idx xtyp     etyp       low  high  elsz   size
            display: 0
        "#]],
        expect![[r#"
            program P [block 0]
              var x : integer @0:5
              block
                assign : integer
                  ! type mismatch in assignment: cannot assign string to integer
                  variable x : integer @0:5
                  literal 'abc' : string
        "#]],
    );
}
