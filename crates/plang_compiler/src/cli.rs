use clap::{Parser, Subcommand, ValueEnum};
use plang_session::diagnostics::termcolor::ColorChoice;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// When to color diagnostics.
    #[arg(long, value_enum, global = true, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Lex, parse and type check a program.
    Check {
        /// The input file.
        input: String,

        /// Whether the given input should be used directly as the source instead
        /// of as the source file path.
        #[clap(long, short, action)]
        source: bool,

        /// Print an intermediate result to stdout as JSON.
        #[arg(short, long, value_enum)]
        emit: Option<Emit>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// The token stream, ending in `EOF`.
    Tokens,
    /// Deduplicated identifiers and constants.
    Lexemes,
    /// One symbol table per function.
    Symbols,
    /// The syntax tree, with inferred types.
    Ast,
    /// Every error record, grouped by stage.
    Errors,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}
