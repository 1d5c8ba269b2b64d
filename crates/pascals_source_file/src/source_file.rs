// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::ops::Range;
use std::path::{Path, PathBuf};

use pascals_syntax::{ast, Parse, SyntaxError};
use pascals_tokens::TokenStreamError;
use thiserror::Error;

use crate::api::inner_print_compiler_errors;

/// A parsed program, or the syntax error that stopped the parse.
pub type ParsedSource = Result<Parse<ast::Program>, SyntaxError>;

/// Environment variable listing directories searched for relative token-file paths.
pub const TOKEN_PATH_VAR: &str = "PASCALS_TOKEN_PATH";

/// Failure to obtain tokens at all. Syntax errors are not reported this way; they
/// are kept in the [`ParsedSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unable to read token file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Tokens {
        path: PathBuf,
        #[source]
        source: TokenStreamError,
    },
}

pub trait ErrorTrait {
    /// Return a message describing the error.
    fn message(&self) -> String;

    /// Return the positions, in the token stream, of the tokens the error is about.
    fn token_range(&self) -> Range<usize>;
}

impl ErrorTrait for SyntaxError {
    fn message(&self) -> String {
        self.to_string()
    }

    fn token_range(&self) -> Range<usize> {
        self.position()..self.position() + 1
    }
}

pub trait SourceTrait {
    /// Return `true` if parsing stopped at a syntax error.
    fn any_parse_errors(&self) -> bool {
        self.syntax_ast().is_err()
    }

    fn syntax_ast(&self) -> &ParsedSource;

    fn file_path(&self) -> PathBuf;

    /// The text diagnostics are displayed against.
    fn source(&self) -> &str;

    /// Byte span in [`SourceTrait::source`] of each token, in stream order.
    fn spans(&self) -> &[Range<usize>];

    fn print_syntax_errors(&self) {
        if let Err(err) = self.syntax_ast() {
            inner_print_compiler_errors(
                std::slice::from_ref(err),
                &self.file_path(),
                self.source(),
                self.spans(),
            );
        }
    }
}

/// A token file and its parse.
#[derive(Clone, Debug)]
pub struct SourceFile {
    file_path: PathBuf,
    source: String,
    spans: Vec<Range<usize>>,
    syntax_ast: ParsedSource,
}

impl SourceTrait for SourceFile {
    fn syntax_ast(&self) -> &ParsedSource {
        &self.syntax_ast
    }

    fn file_path(&self) -> PathBuf {
        self.file_path.clone()
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn spans(&self) -> &[Range<usize>] {
        &self.spans
    }
}

impl SourceFile {
    pub fn new<F: AsRef<Path>>(
        file_path: F,
        source: String,
        spans: Vec<Range<usize>>,
        syntax_ast: ParsedSource,
    ) -> SourceFile {
        SourceFile {
            file_path: file_path.as_ref().to_owned(),
            source,
            spans,
            syntax_ast,
        }
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }
}

/// Structure for managing input with no associated file. `fake_file_path` contains
/// something like "no file" and is only used when printing diagnostics.
#[derive(Clone, Debug)]
pub struct SourceString {
    pub(crate) fake_file_path: PathBuf,
    pub(crate) source: String,
    pub(crate) spans: Vec<Range<usize>>,
    pub(crate) syntax_ast: ParsedSource,
}

impl SourceTrait for SourceString {
    fn syntax_ast(&self) -> &ParsedSource {
        &self.syntax_ast
    }

    fn file_path(&self) -> PathBuf {
        self.fake_file_path.clone()
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn spans(&self) -> &[Range<usize>] {
        &self.spans
    }
}

impl SourceString {
    pub fn new<T: AsRef<str>, P: AsRef<Path>>(
        source: T,
        fake_file_path: P,
        spans: Vec<Range<usize>>,
        syntax_ast: ParsedSource,
    ) -> SourceString {
        SourceString {
            source: source.as_ref().to_owned(),
            fake_file_path: fake_file_path.as_ref().to_owned(),
            spans,
            syntax_ast,
        }
    }

    pub fn fake_file_path(&self) -> &PathBuf {
        &self.fake_file_path
    }
}

/// Read the environment variable `PASCALS_TOKEN_PATH` and return a list of directory
/// paths to search for token files.
pub fn get_file_search_paths_from_env() -> Option<Vec<PathBuf>> {
    env::var_os(TOKEN_PATH_VAR).map(|paths| env::split_paths(&paths).collect())
}

/// Try to find `file_path`, possibly by expanding with paths in `search_path_list`.
/// Return successfully expanded path, or return input if expansion fails.
///
/// 1) If `file_path` is absolute, return `file_path`.
/// 2) Else, iterate through any (directory) paths in `search_path_list`,
///    joining `file_path` to each directory path. Return the first full path that
///    exists, if one exists, on the filesystem.
/// 3) Else search in the same way the path list given in `PASCALS_TOKEN_PATH`.
/// 4) Else, finding an existing full file path failed. Return the input `file_path`.
pub(crate) fn resolve_file_path<T: AsRef<Path>, P: AsRef<Path>>(
    file_path: T,
    search_path_list: Option<&[P]>,
) -> PathBuf {
    let file_path = PathBuf::from(file_path.as_ref());
    if file_path.is_absolute() {
        return file_path;
    }
    let try_path = |dir: &Path| {
        let full_path = dir.join(&file_path);
        full_path.is_file().then_some(full_path)
    };

    if let Some(paths) = search_path_list {
        for path in paths {
            if let Some(full_path) = try_path(path.as_ref()) {
                return full_path;
            }
        }
    } else if let Some(paths) = get_file_search_paths_from_env() {
        for path in paths {
            if let Some(full_path) = try_path(path.as_ref()) {
                return full_path;
            }
        }
    }
    file_path
}
