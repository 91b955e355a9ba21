use crate::sourcemap::SourceMap;
use plang_diagnostic::termcolor::{ColorChoice, StandardStream};

pub use plang_diagnostic::*;

pub mod prelude {
    pub use super::{Diagnostic, IntoDiagnostic};
    pub use crate::sourcemap::SourceId;
    pub use plang_diagnostic::{Severity, SnippetKind};

    pub type Snippet = plang_diagnostic::Snippet<crate::sourcemap::SourceMap>;
}

pub type Diagnostic = plang_diagnostic::Diagnostic<SourceMap>;

pub trait DiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap);
}

impl DiagnosticEmitter for Vec<Diagnostic> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, _sources: &SourceMap) {
        self.push(diagnostic);
    }
}

#[derive(Debug)]
pub struct PrettyDiagnosticEmitter {
    pub stream: StandardStream,
    pub config: Config,
}

impl PrettyDiagnosticEmitter {
    pub fn new(color_choice: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stderr(color_choice),
            config: Config::default(),
        }
    }
}

impl Default for PrettyDiagnosticEmitter {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

impl DiagnosticEmitter for PrettyDiagnosticEmitter {
    /// # Panics
    ///
    /// Panics if the diagnostic cannot be written to stderr.
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap) {
        diagnostic
            .write_to_stream(sources, &self.config, &mut self.stream)
            .expect("failed to emit diagnostic");
    }
}

pub trait IntoDiagnostic<Context: ?Sized> {
    fn into_diagnostic(self, cx: &Context) -> Diagnostic;
}

impl IntoDiagnostic<()> for Diagnostic {
    fn into_diagnostic(self, _cx: &()) -> Diagnostic {
        self
    }
}
