use std::fmt;
use std::hash::Hash;
use std::path::Path;

pub trait Sources {
    type SourceId: Copy + Eq + Hash + fmt::Debug;
    type Source: Source;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>>;
}

pub trait Source {
    fn name_str(&self) -> &str;
    fn path(&self) -> Option<&Path>;

    fn source_str(&self) -> &str;
}

impl<S: Source> Sources for Vec<Cached<S>> {
    type SourceId = usize;
    type Source = S;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>> {
        self.get(id)
    }
}

impl Source for (String, String) {
    fn name_str(&self) -> &str {
        &self.0
    }

    fn path(&self) -> Option<&Path> {
        None
    }

    fn source_str(&self) -> &str {
        &self.1
    }
}

/// A source with its line breaks precomputed.
#[derive(Debug, Clone)]
pub struct Cached<S: Source> {
    source: S,
    line_breaks: Vec<usize>,
}

impl<S: Source> Cached<S> {
    pub fn new(source: S) -> Self {
        let source_str = source.source_str();
        let line_breaks = source_str
            .char_indices()
            .filter_map(|(i, ch)| (ch == '\n').then_some(i))
            .collect();

        Self {
            source,
            line_breaks,
        }
    }

    pub fn line_to_byte(&self, line: usize) -> Option<usize> {
        if line == 0 {
            Some(0)
        } else {
            self.line_breaks.get(line - 1).map(|&byte| byte + 1)
        }
    }

    /// Text of the zero-indexed line `index`, without its line terminator.
    pub fn line_str(&self, index: usize) -> Option<&str> {
        let start = self.line_to_byte(index)?;
        let end = self
            .line_to_byte(index + 1)
            .unwrap_or(self.source_str().len());

        let s = &self.source_str()[start..end];
        let s = s.strip_suffix('\n').unwrap_or(s);
        let s = s.strip_suffix('\r').unwrap_or(s);

        Some(s)
    }

    pub fn num_lines(&self) -> usize {
        1 + self.line_breaks.len()
    }
}

impl<S: Source> Source for Cached<S> {
    fn name_str(&self) -> &str {
        self.source.name_str()
    }

    fn path(&self) -> Option<&Path> {
        self.source.path()
    }

    fn source_str(&self) -> &str {
        self.source.source_str()
    }
}

#[cfg(test)]
mod tests {
    use super::Cached;

    fn cached_str(s: impl Into<String>) -> Cached<(String, String)> {
        Cached::new(("sample".to_owned(), s.into()))
    }

    #[test]
    fn test_line_to_byte() {
        let cached = cached_str("");
        assert_eq!(cached.line_to_byte(0), Some(0));
        assert_eq!(cached.line_to_byte(1), None);

        let cached = cached_str("x\n");
        assert_eq!(cached.line_to_byte(0), Some(0));
        assert_eq!(cached.line_to_byte(1), Some(2));
        assert_eq!(cached.line_to_byte(2), None);

        let cached = cached_str("\nx");
        assert_eq!(cached.line_to_byte(0), Some(0));
        assert_eq!(cached.line_to_byte(1), Some(1));
        assert_eq!(cached.line_to_byte(2), None);
    }

    #[test]
    fn test_line_str() {
        let cached = cached_str("");
        assert_eq!(cached.line_str(0), Some(""));
        assert_eq!(cached.line_str(1), None);

        let cached = cached_str("\n");
        assert_eq!(cached.line_str(0), Some(""));
        assert_eq!(cached.line_str(1), Some(""));
        assert_eq!(cached.line_str(2), None);

        let cached = cached_str("let x: int;\r\nx = 1;");
        assert_eq!(cached.line_str(0), Some("let x: int;"));
        assert_eq!(cached.line_str(1), Some("x = 1;"));
        assert_eq!(cached.line_str(2), None);
    }

    #[test]
    fn test_num_lines() {
        assert_eq!(cached_str("").num_lines(), 1);
        assert_eq!(cached_str("a\nb\n").num_lines(), 3);
    }
}
