use std::collections::HashMap;
use std::io;
use std::ops::Range;

use termcolor::{ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use super::sources::{Cached, Source, Sources};
use super::{Config, Diagnostic, Severity, SnippetKind};

const TAB: &str = "    ";

impl<S: Sources> Diagnostic<S> {
    pub fn write_to_stream(
        &self,
        sources: &S,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            sources,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor, S: Sources> {
    diagnostic: &'a Diagnostic<S>,
    sources: &'a S,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<'a, W: WriteColor, S: Sources> DiagnosticWriter<'_, 'a, W, S> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        let source_datas = self.snippets_by_source();

        if source_datas.is_empty() {
            writeln!(self.stream)?;
        }

        for source_data in source_datas {
            let num_lines = source_data.source.num_lines();
            let context_size = self.config.context_size;

            let groups = get_overlapping_groups(source_data.snippets, |s| {
                s.line_index.saturating_sub(context_size)
                    ..(s.line_index + 1 + context_size).min(num_lines)
            });

            for (snippets, lines) in groups {
                self.draw_group(source_data.source, &snippets, lines)?;
            }
        }

        Ok(())
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.stream.set_color(self.get_primary_color())?;

        if let Some(id) = &self.diagnostic.id {
            write!(self.stream, "[{id}] ")?;
        }

        write!(self.stream, "{}:", self.diagnostic.severity.as_str())?;

        self.stream.reset()?;

        match &self.diagnostic.message {
            Some(message) => writeln!(self.stream, " {message}")?,
            None => writeln!(self.stream)?,
        }

        Ok(())
    }

    fn draw_group(
        &mut self,
        source: &Cached<S::Source>,
        snippets: &[SnippetData],
        lines: Range<usize>,
    ) -> io::Result<()> {
        let line_num_width = 1 + lines.end.max(1).ilog10() as usize;

        // all groups have at least one snippet
        let first_line = snippets[0].line_index + 1;

        self.stream.set_color(&self.config.subtle)?;
        write!(self.stream, "In {}:{first_line}", source.name_str())?;

        if let Some(path) = source.path() {
            write!(self.stream, " ({}:{first_line})", path.display())?;
        }

        writeln!(self.stream)?;
        self.stream.reset()?;

        for line in lines {
            let Some(line_str) = source.line_str(line) else {
                break;
            };
            let line_str = line_str.replace('\t', TAB);

            self.draw_gutter(Some(line + 1), line_num_width)?;
            writeln!(self.stream, "{line_str}")?;

            for snippet in snippets.iter().filter(|s| s.line_index == line) {
                self.draw_gutter(None, line_num_width)?;
                self.draw_underline(&line_str, snippet)?;
            }
        }

        writeln!(self.stream)?;

        Ok(())
    }

    fn draw_underline(&mut self, line_str: &str, snippet: &SnippetData) -> io::Result<()> {
        let trimmed = line_str.trim_start();
        let indent = &line_str[..line_str.len() - trimmed.len()];
        let offset = indent.width();
        let width = trimmed.trim_end().width().max(1);

        write!(self.stream, "{:<offset$}", "")?;

        self.stream
            .set_color(self.get_snippet_color(snippet.kind))?;

        for _ in 0..width {
            write!(self.stream, "{}", self.config.underline)?;
        }

        writeln!(
            self.stream,
            "{}{}",
            self.config.underline_after, snippet.label
        )?;

        self.stream.reset()
    }

    fn draw_gutter(&mut self, line: Option<usize>, line_num_width: usize) -> io::Result<()> {
        self.stream.set_color(&self.config.subtle)?;

        if let Some(line) = line {
            write!(self.stream, "{line:>width$}", width = line_num_width)?;
        } else {
            write!(self.stream, "{:>width$}", "", width = line_num_width)?;
        }

        write!(self.stream, " {} ", self.config.gutter)?;

        self.stream.reset()?;

        Ok(())
    }

    /// Snippets grouped per source, in order of first appearance.
    fn snippets_by_source(&self) -> Vec<SourceData<'a, S>> {
        let mut source_datas: Vec<SourceData<'a, S>> = vec![];
        let mut positions = HashMap::new();

        for snippet in &self.diagnostic.snippets {
            let Some(source) = self.sources.get_source(snippet.source_id) else {
                continue;
            };

            let position = *positions.entry(snippet.source_id).or_insert_with(|| {
                source_datas.push(SourceData {
                    source,
                    snippets: vec![],
                });
                source_datas.len() - 1
            });

            source_datas[position].snippets.push(SnippetData {
                label: &snippet.label,
                kind: snippet.kind,

                line_index: snippet.line.saturating_sub(1),
            });
        }

        source_datas
    }

    fn get_primary_color(&self) -> &'a ColorSpec {
        match self.diagnostic.severity {
            Severity::Warning => &self.config.warning_color,
            Severity::Error => &self.config.error_color,
        }
    }

    fn get_snippet_color(&self, kind: SnippetKind) -> &'a ColorSpec {
        match kind {
            SnippetKind::Primary => self.get_primary_color(),
            SnippetKind::Secondary => &self.config.emphasis,
        }
    }
}

struct SourceData<'a, S: Sources> {
    source: &'a Cached<S::Source>,
    snippets: Vec<SnippetData<'a>>,
}

#[derive(Clone)]
struct SnippetData<'a> {
    label: &'a str,
    kind: SnippetKind,

    line_index: usize,
}

fn get_overlapping_groups<T, F>(mut items: Vec<T>, get_range: F) -> Vec<(Vec<T>, Range<usize>)>
where
    F: Fn(&T) -> Range<usize>,
{
    items.sort_by_key(|item| get_range(item).start);

    let mut groups = vec![];

    let mut group = vec![];
    let mut group_start = 0;
    let mut group_end = 0;

    for item in items {
        let range = get_range(&item);

        if range.start > group_end || group.is_empty() {
            if !group.is_empty() {
                groups.push((std::mem::take(&mut group), group_start..group_end));
            }

            group_start = range.start;
        }

        group_end = group_end.max(range.end);
        group.push(item);
    }

    if !group.is_empty() {
        groups.push((group, group_start..group_end));
    }

    groups
}
