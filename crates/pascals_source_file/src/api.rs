// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use pascals_syntax::ast;
use pascals_tokens::{read_token_stream, scan};

use crate::source_file::{
    resolve_file_path, ErrorTrait, SourceError, SourceFile, SourceString, SourceTrait,
};

const NO_FILE: &str = "no file";

/// Read and parse the token file `file_path`. Relative paths are looked up in
/// `search_path_list`, or else in the directories named by `PASCALS_TOKEN_PATH`.
pub fn parse_token_file<T: AsRef<Path>, P: AsRef<Path>>(
    file_path: T,
    search_path_list: Option<&[P]>,
) -> Result<SourceFile, SourceError> {
    let full_path = resolve_file_path(file_path, search_path_list);
    let text = fs::read_to_string(&full_path).map_err(|source| SourceError::Io {
        path: full_path.clone(),
        source,
    })?;
    let stream = read_token_stream(&text).map_err(|source| SourceError::Tokens {
        path: full_path.clone(),
        source,
    })?;
    let syntax_ast = ast::Program::parse(stream.tokens());
    let spans = stream.spans().to_vec();
    Ok(SourceFile::new(full_path, text, spans, syntax_ast))
}

/// Parse tokens written in the persisted `KIND(value)` form. The fake file path is
/// used for printing diagnostics.
pub fn parse_token_string<T: AsRef<str>>(
    text: T,
    fake_file_path: Option<&str>,
) -> Result<SourceString, SourceError> {
    let fake_file_path = PathBuf::from(fake_file_path.unwrap_or(NO_FILE));
    let stream = read_token_stream(text.as_ref()).map_err(|source| SourceError::Tokens {
        path: fake_file_path.clone(),
        source,
    })?;
    let syntax_ast = ast::Program::parse(stream.tokens());
    Ok(SourceString::new(
        text,
        fake_file_path,
        stream.spans().to_vec(),
        syntax_ast,
    ))
}

/// Scan and parse Pascal-S source text. Each token's diagnostic span is its whole
/// source line.
pub fn parse_source_string<T: AsRef<str>>(source: T, fake_file_path: Option<&str>) -> SourceString {
    let source = source.as_ref();
    let tokens = scan(source);
    let lines = line_spans(source);
    let spans = tokens
        .iter()
        .filter(|token| !token.is_eof())
        .map(|token| {
            token
                .line()
                .and_then(|line| (line as usize).checked_sub(1))
                .and_then(|index| lines.get(index).cloned())
                .unwrap_or(source.len()..source.len())
        })
        .collect();
    let syntax_ast = ast::Program::parse(&tokens);
    SourceString::new(
        source,
        fake_file_path.unwrap_or(NO_FILE),
        spans,
        syntax_ast,
    )
}

fn line_spans(source: &str) -> Vec<Range<usize>> {
    let mut res = Vec::new();
    let mut offset = 0;
    for raw_line in source.split_inclusive('\n') {
        let line = raw_line.trim_end_matches(['\n', '\r']);
        res.push(offset..offset + line.len());
        offset += raw_line.len();
    }
    res
}

/// Byte span covering the tokens in `tokens`. An empty range, or one that runs past
/// the last token, points at the token where it starts or else at the end of the text.
pub fn token_span(spans: &[Range<usize>], tokens: Range<usize>, source_len: usize) -> Range<usize> {
    let at = |index: usize| {
        spans
            .get(index)
            .cloned()
            .unwrap_or(source_len..source_len)
    };
    if tokens.end <= tokens.start {
        return at(tokens.start);
    }
    let first = at(tokens.start);
    let last = at(tokens.end - 1);
    first.start..last.end.max(first.start)
}

/// Print the errors in `source`, whose text and spans the source object holds.
pub fn print_compiler_errors<T: ErrorTrait, S: SourceTrait>(errors: &[T], source: &S) {
    inner_print_compiler_errors(errors, &source.file_path(), source.source(), source.spans());
}

pub fn inner_print_compiler_errors<T: ErrorTrait>(
    errors: &[T],
    file_path: &Path,
    source: &str,
    spans: &[Range<usize>],
) {
    for err in errors.iter() {
        let span = token_span(spans, err.token_range(), source.len());
        report_error(&err.message(), &span, file_path, source);
        eprintln!();
    }
}

pub fn report_error(message: &str, span: &Range<usize>, file_path: &Path, source: &str) {
    let file_path_str = file_path.as_os_str().to_string_lossy();
    let file_path_str = file_path_str.as_ref();
    let mut colors = ColorGenerator::new();
    let a = colors.next();

    let report = Report::build(ReportKind::Error, (file_path_str, span.clone()))
        .with_message(message)
        .with_label(
            Label::new((file_path_str, span.clone()))
                .with_message("Near this point")
                .with_color(a),
        )
        .finish();
    if report
        .eprint((file_path_str, Source::from(source)))
        .is_err()
    {
        eprintln!("{}: {message}", file_path.display());
    }
}
