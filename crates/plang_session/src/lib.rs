pub mod diagnostics;
pub mod sourcemap;

use diagnostics::*;
use sourcemap::SourceMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorsEmitted;

/// Owns the loaded sources and the sink that diagnostics are reported to.
pub struct Session<D: DiagnosticEmitter> {
    pub sources: SourceMap,
    pub diagnostics: D,
}

impl<D: DiagnosticEmitter> Session<D> {
    pub fn new(diagnostics: D) -> Self {
        Self {
            sources: SourceMap::default(),
            diagnostics,
        }
    }

    pub fn report<Context>(
        &mut self,
        diagnostic: impl IntoDiagnostic<Context>,
        cx: &Context,
    ) -> Result<(), ErrorsEmitted> {
        let diagnostic = diagnostic.into_diagnostic(cx);
        let severity = diagnostic.severity;

        self.diagnostics.emit_diagnostic(diagnostic, &self.sources);

        if severity < Severity::Error {
            Ok(())
        } else {
            Err(ErrorsEmitted)
        }
    }

    /// Reports every diagnostic, even after the first error.
    pub fn report_all<Context, I>(&mut self, diagnostics: I, cx: &Context) -> Result<(), ErrorsEmitted>
    where
        I: IntoIterator,
        I::Item: IntoDiagnostic<Context>,
    {
        let mut had_error = false;

        for diagnostic in diagnostics {
            had_error |= self.report(diagnostic, cx).is_err();
        }

        if !had_error {
            Ok(())
        } else {
            Err(ErrorsEmitted)
        }
    }
}
