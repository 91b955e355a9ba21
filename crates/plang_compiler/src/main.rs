mod cli;
mod compiler;

#[cfg(test)]
mod tests;

use clap::Parser as _;
use cli::{Cli, Command, Emit};
use compiler::Compilation;
use plang_session::diagnostics::PrettyDiagnosticEmitter;
use plang_session::sourcemap::Source;
use plang_session::Session;

#[derive(thiserror::Error, Debug)]
enum CompilerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("error serializing output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("errors while checking")]
    HadErrors,
}

type CompilerResult<T> = Result<T, CompilerError>;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> CompilerResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check {
            input,
            source,
            emit,
        } => {
            let source = if source {
                Source::new("<unnamed>", input)
            } else {
                let text = std::fs::read_to_string(&input)?;
                Source::new(input.as_str(), text).with_path(&input)
            };

            println!("checking file {}...\n", source.name);

            let mut session = Session::new(PrettyDiagnosticEmitter::new(cli.color.into()));
            let (result, compilation) = compiler::check_source(&mut session, source);

            if let Some(emit) = emit {
                println!("{}", emit_json(&compilation, emit)?);
            }

            print_summary(&compilation);

            result
        }
    }
}

fn emit_json(compilation: &Compilation, emit: Emit) -> CompilerResult<String> {
    let json = match emit {
        Emit::Tokens => serde_json::to_string_pretty(&compilation.tokens)?,
        Emit::Lexemes => serde_json::to_string_pretty(&compilation.lexemes)?,
        Emit::Symbols => {
            let tables: Vec<_> = compilation.program.symbol_tables().collect();
            serde_json::to_string_pretty(&tables)?
        }
        Emit::Ast => serde_json::to_string_pretty(&compilation.program)?,
        Emit::Errors => {
            let errors = &compilation.errors;
            serde_json::to_string_pretty(&serde_json::json!({
                "lexical": errors.lexical,
                "syntactic": errors.syntactic,
                "semantic": errors.semantic,
            }))?
        }
    };

    Ok(json)
}

fn print_summary(compilation: &Compilation) {
    let errors = compilation.errors.counts();

    println!(
        "lexical analysis: {} tokens, {} errors",
        compilation.tokens.tokens().len(),
        errors.lexical
    );
    println!(
        "syntax analysis: {} functions, {} errors",
        compilation.program.functions.len(),
        errors.syntactic
    );
    println!("semantic analysis: {} errors", errors.semantic);

    if errors.total() == 0 {
        println!("\nno errors found");
    }
}
