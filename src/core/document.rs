// document module - the line indexed text shown on the canvas
use super::error::Result;
use super::selection::LineRange;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn from_string(content: &str) -> Self {
        let mut lines: Vec<String> = content
            .split('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();

        // A trailing newline does not start another line
        if lines.len() > 1 && lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        Self { lines }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "document loaded");
        Ok(Self::from_string(&content))
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    // 1-based lookup; None for lines with no rendered counterpart
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().enumerate().map(|(idx, line)| (idx + 1, line.as_str()))
    }

    // Width of the gutter numbers, at least three columns like the editor margin
    pub fn gutter_width(&self) -> usize {
        self.line_count().to_string().len().max(3)
    }

    /// Inclusive slice of the document joined with `\n`. Lines past the end are dropped.
    pub fn slice(&self, range: LineRange) -> String {
        (range.start..=range.end)
            .map_while(|number| self.line(number))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
