//! Flat, line-normalised view of one source file.
//!
//! Every line has its trailing whitespace stripped and lines are joined with
//! `\n`, so the scanner can make a single forward pass over one buffer while
//! still knowing where each line starts.

/// The normalised text of one file plus a line-start index.
#[derive(Debug, Clone, Default)]
pub struct SourceText {
    text: String,
    line_starts: Vec<usize>,
}

impl SourceText {
    /// Build from raw file contents. Handles both `\n` and `\r\n` endings.
    pub fn new(raw: &str) -> Self {
        Self::from_lines(raw.lines())
    }

    /// Build from already-split lines.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut text = String::new();
        let mut line_starts = Vec::new();

        for line in lines {
            if !line_starts.is_empty() {
                text.push('\n');
            }
            line_starts.push(text.len());
            text.push_str(line.trim_end());
        }

        Self { text, line_starts }
    }

    /// The whole normalised buffer.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Iterate over the normalised lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        (0..self.line_starts.len()).map(|i| self.line(i))
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 1-based line number containing byte `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset).max(1)
    }

    fn line(&self, index: usize) -> &str {
        let start = self.line_starts[index];
        let end = self
            .line_starts
            .get(index + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        &self.text[start..end]
    }
}
