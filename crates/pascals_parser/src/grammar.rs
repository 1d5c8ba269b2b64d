// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! This is the actual "grammar" of Pascal-S.
//!
//! Each function in this module and its children corresponds
//! to a production of the formal grammar. Submodules roughly
//! correspond to different *areas* of the grammar. By convention,
//! each submodule starts with `use super::*` import and exports
//! "public" productions via `pub(super)`.
//!
//! Every production returns a `ParseResult`. The grammar is LL(1), so the
//! first mismatch is final and is propagated with `?` all the way out.
//!
//! Coding convention: rules that always produce a node start with
//! `p.start(KIND)?` and the caller has already checked the first token when the
//! rule begins with a keyword. Rules named `opt_*` may produce nothing.

mod expressions;
mod items;
mod params;
mod types;

use crate::{
    parser::{CompletedMarker, ParseResult, Parser},
    SyntaxKind::{self, *},
    TokenSet, T,
};

pub(crate) mod entry {
    use super::*;

    pub(crate) mod top {
        use super::*;

        pub(crate) fn program(p: &mut Parser<'_>) -> ParseResult<()> {
            items::program(p)?;
            Ok(())
        }

        pub(crate) fn statement(p: &mut Parser<'_>) -> ParseResult<()> {
            if items::opt_statement(p)?.is_none() {
                return Err(p.error("a statement"));
            }
            expect_end(p)
        }

        pub(crate) fn expression(p: &mut Parser<'_>) -> ParseResult<()> {
            expressions::expression(p)?;
            expect_end(p)
        }
    }
}

fn expect_end(p: &mut Parser<'_>) -> ParseResult<()> {
    if p.at(EOF) {
        Ok(())
    } else {
        Err(p.error("end of input"))
    }
}
