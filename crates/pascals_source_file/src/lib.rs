// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

//! Management of Pascal-S input for parsing and semantic analysis. The main `struct` here
//! is `SourceFile` which contains the path to a token file and the tree produced by the
//! parser. `SourceString` does the same for input that did not come from a file.
//!
//! `report_error` formats error messages using the external crate `ariadne`.

mod api;
mod source_file;


pub use source_file::{
    get_file_search_paths_from_env, ErrorTrait, ParsedSource, SourceError, SourceFile,
    SourceString, SourceTrait, TOKEN_PATH_VAR,
};

pub use api::{
    inner_print_compiler_errors, parse_source_string, parse_token_file, parse_token_string,
    print_compiler_errors, report_error, token_span,
};
