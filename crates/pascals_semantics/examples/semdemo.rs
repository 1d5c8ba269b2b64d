// Copyright contributors to the pascals-frontend project
// SPDX-License-Identifier: Apache-2.0

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use pascals_semantics::syntax_to_semantics::{self, ParseResult};
use pascals_semantics::{render_program, render_symbol_table};
use pascals_source_file::SourceTrait;
use pascals_tokens::{read_token_stream, render_tokens, scan};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "semdemo")]
#[command(about = "Demo of the Pascal-S front end that prints tokens, trees or tables to stdout.")]
#[command(long_about = "
Demo of the Pascal-S front end that prints tokens, trees or tables to stdout.

Commands are `tokens`, `parse`, `semantic`, `symbols`.
Input is a token file in the `KIND(value)` form, or Pascal-S text with `--source`.
`tokens` prints the token stream. `parse` prints the parse tree.
`semantic` prints the decorated AST. `symbols` prints the symbol table.
Set RUST_LOG=debug to trace the analysis.
")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

// `value_name` expects bare word, not flag.
#[derive(Subcommand)]
enum Commands {
    /// Print the token stream
    Tokens {
        #[arg(value_name = "FILENAME")]
        /// file name to read
        file_name: PathBuf,
        /// The file holds Pascal-S text rather than tokens
        #[arg(long)]
        source: bool,
    },

    /// Print the parse tree
    Parse {
        #[arg(value_name = "FILENAME")]
        file_name: PathBuf,
        #[arg(long)]
        source: bool,
    },

    /// Print the decorated AST and any diagnostics
    Semantic {
        #[arg(value_name = "FILENAME")]
        file_name: PathBuf,
        #[arg(long)]
        source: bool,
    },

    /// Print the symbol table
    Symbols {
        #[arg(value_name = "FILENAME")]
        file_name: PathBuf,
        #[arg(long)]
        source: bool,
    },
}

#[derive(Clone, Copy)]
enum Output {
    Tree,
    Asg,
    Table,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let (file_name, source, output) = match &cli.command {
        Some(Commands::Tokens { file_name, source }) => return print_tokens(file_name, *source),
        Some(Commands::Parse { file_name, source }) => (file_name, *source, Output::Tree),
        Some(Commands::Semantic { file_name, source }) => (file_name, *source, Output::Asg),
        Some(Commands::Symbols { file_name, source }) => (file_name, *source, Output::Table),
        None => {
            println!("Commands are tokens, parse, semantic, and symbols");
            return ExitCode::SUCCESS;
        }
    };

    if source {
        let Some(text) = read_file(file_name) else {
            return ExitCode::FAILURE;
        };
        let path = file_name.to_string_lossy();
        report(syntax_to_semantics::parse_source_string(text, Some(&path)), output)
    } else {
        match syntax_to_semantics::parse_token_file(file_name) {
            Ok(result) => report(result, output),
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        }
    }
}

fn report<T: SourceTrait>(result: ParseResult<T>, output: Output) -> ExitCode {
    let parsed = result.syntax_result().syntax_ast();
    match (output, parsed, result.analysis()) {
        (Output::Tree, Ok(parse), _) => print!("{}", parse.debug_dump()),
        (Output::Asg, _, Some(analysis)) => {
            print!(
                "{}",
                render_program(analysis.program(), analysis.symbol_table())
            );
        }
        (Output::Table, _, Some(analysis)) => {
            print!("{}", render_symbol_table(analysis.symbol_table()))
        }
        _ => (),
    }
    result.print_errors();
    if result.any_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_tokens(file_name: &Path, source: bool) -> ExitCode {
    let Some(text) = read_file(file_name) else {
        return ExitCode::FAILURE;
    };
    if source {
        print!("{}", render_tokens(&scan(&text)));
        return ExitCode::SUCCESS;
    }
    match read_token_stream(&text) {
        Ok(stream) => {
            print!("{}", render_tokens(stream.tokens()));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}: {err}", file_name.display());
            ExitCode::FAILURE
        }
    }
}

fn read_file(file_name: &Path) -> Option<String> {
    match fs::read_to_string(file_name) {
        Ok(text) => Some(text),
        Err(err) => {
            eprintln!("unable to read {}: {err}", file_name.display());
            None
        }
    }
}
