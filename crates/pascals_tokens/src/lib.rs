// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! Tokens consumed by the Pascal-S parser.
//!
//! Source text is scanned by a separate tool, which hands over an ordered list of
//! tagged lexemes. The persisted form holds one token per line, written as `KIND(value)`.
//! This crate models those tokens and reads and writes the textual form. The
//! [`scan`] function is a small stand-in for the real scanner, used by tests and demos.

mod scan;
mod stream;
mod token;

#[cfg(test)]
mod tests;

pub use crate::{
    scan::scan,
    stream::{read_token_stream, render_tokens, TokenStream, TokenStreamError},
    token::{normalize_word, same_word, Token, TokenKind, KEYWORDS},
};
