use plang_frontend::ast::Program;
use plang_frontend::{LexemeTables, LexerError, ParseError, TokenStream};
use plang_middle::SemanticError;
use plang_session::diagnostics::DiagnosticEmitter;
use plang_session::sourcemap::Source;
use plang_session::Session;

use crate::{CompilerError, CompilerResult};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCounts {
    pub lexical: usize,
    pub syntactic: usize,
    pub semantic: usize,
}

impl ErrorCounts {
    pub fn total(self) -> usize {
        self.lexical + self.syntactic + self.semantic
    }
}

/// The error records of each stage, kept after they have been reported.
#[derive(Debug, Default)]
pub struct ErrorRecords {
    pub lexical: Vec<LexerError>,
    pub syntactic: Vec<ParseError>,
    pub semantic: Vec<SemanticError>,
}

impl ErrorRecords {
    pub fn counts(&self) -> ErrorCounts {
        ErrorCounts {
            lexical: self.lexical.len(),
            syntactic: self.syntactic.len(),
            semantic: self.semantic.len(),
        }
    }
}

/// Everything produced while checking one source.
pub struct Compilation {
    pub tokens: TokenStream,
    pub lexemes: LexemeTables,
    pub program: Program,

    pub errors: ErrorRecords,
}

/// Runs every stage to completion, each on the full output of the previous
/// one, and reports all errors to the session.
pub fn check_source<D: DiagnosticEmitter>(
    session: &mut Session<D>,
    source: Source,
) -> (CompilerResult<()>, Compilation) {
    let text = source.source.clone();
    let source_id = session.sources.insert(source);

    let mut errors = ErrorRecords::default();
    let mut had_errors = false;

    let (tokens, lexer_errors, lexemes) = plang_frontend::lex_with_tables(&text);
    had_errors |= session.report_all(lexer_errors.clone(), &source_id).is_err();
    errors.lexical = lexer_errors;

    let (mut program, parse_errors) = plang_frontend::parse(tokens.clone());
    had_errors |= session.report_all(parse_errors.clone(), &source_id).is_err();
    errors.syntactic = parse_errors;

    let semantic_errors = plang_middle::analyze(&mut program.functions);
    had_errors |= session.report_all(semantic_errors.clone(), &source_id).is_err();
    errors.semantic = semantic_errors;

    let result = if had_errors {
        Err(CompilerError::HadErrors)
    } else {
        Ok(())
    };

    let compilation = Compilation {
        tokens,
        lexemes,
        program,

        errors,
    };

    (result, compilation)
}
