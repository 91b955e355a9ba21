mod render;
pub mod sources;

use derive_where::derive_where;
pub use termcolor;
use termcolor::{Color, ColorSpec};

use self::sources::Sources;

/// A report about a single problem, pointing at one or more source lines.
#[derive_where(Debug, Clone)]
pub struct Diagnostic<S: Sources> {
    pub severity: Severity,

    pub message: Option<String>,
    pub id: Option<String>,

    pub snippets: Vec<Snippet<S>>,
}

impl<S: Sources> Diagnostic<S> {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            message: None,
            id: None,
            snippets: vec![],
        }
    }

    pub fn warning() -> Self {
        Self::new(Severity::Warning)
    }

    pub fn error() -> Self {
        Self::new(Severity::Error)
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_snippet(mut self, snippet: Snippet<S>) -> Self {
        self.snippets.push(snippet);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// A labelled source line. Lines are one-indexed, matching the line numbers
/// carried by tokens and error records.
#[derive_where(Debug, Clone)]
pub struct Snippet<S: Sources> {
    label: String,
    kind: SnippetKind,

    source_id: S::SourceId,
    line: usize,
}

impl<S: Sources> Snippet<S> {
    pub fn new(
        kind: SnippetKind,
        label: impl Into<String>,
        source_id: S::SourceId,
        line: usize,
    ) -> Self {
        Self {
            label: label.into(),
            kind,

            source_id,
            line,
        }
    }

    pub fn primary(label: impl Into<String>, source_id: S::SourceId, line: usize) -> Self {
        Self::new(SnippetKind::Primary, label, source_id, line)
    }

    pub fn secondary(label: impl Into<String>, source_id: S::SourceId, line: usize) -> Self {
        Self::new(SnippetKind::Secondary, label, source_id, line)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SnippetKind {
    Primary,
    Secondary,
}

#[derive(Debug)]
pub struct Config {
    /// Lines of source shown above and below each snippet.
    pub context_size: usize,

    pub error_color: ColorSpec,
    pub warning_color: ColorSpec,

    pub emphasis: ColorSpec,
    pub subtle: ColorSpec,

    pub gutter: &'static str,

    pub underline: &'static str,
    pub underline_after: &'static str,
}

impl Default for Config {
    fn default() -> Self {
        let mut error_color = ColorSpec::new();
        error_color.set_fg(Some(Color::Red));
        error_color.set_bold(true);

        let mut warning_color = ColorSpec::new();
        warning_color.set_fg(Some(Color::Yellow));
        warning_color.set_bold(true);

        let mut subtle = ColorSpec::new();
        subtle.set_italic(true);
        subtle.set_dimmed(true);

        let mut emphasis = ColorSpec::new();
        emphasis.set_bold(true);

        Self {
            context_size: 2,

            error_color,
            warning_color,
            emphasis,
            subtle,

            gutter: "│",

            underline: "^",
            underline_after: "  ",
        }
    }
}
