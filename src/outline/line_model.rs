/// Canonicalise line endings and non-breaking spaces.
///
/// `\r\n` and lone `\r` become `\n`; U+00A0 becomes an ordinary space.
pub fn normalize_input(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\u{00A0}', " ")
}

/// A single line of user content. Never contains a newline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogicalLine {
    text: String,
}

impl LogicalLine {
    fn new(text: &str) -> Self {
        debug_assert!(!text.contains('\n'));
        Self {
            text: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// An ordered outline. A line's position (1-based) is its number.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutlineText {
    lines: Vec<LogicalLine>,
}

impl OutlineText {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Parse a storage string. Each `\n`-separated segment becomes one line
    /// verbatim; the empty string yields zero lines.
    pub fn parse(storage: &str) -> Self {
        if storage.is_empty() {
            return Self::new();
        }

        let normalized = normalize_input(storage);
        Self {
            lines: normalized.split('\n').map(LogicalLine::new).collect(),
        }
    }

    /// Build an outline from line texts. Embedded newlines start new lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outline = Self::new();
        for line in lines {
            outline.push(line.as_ref());
        }
        outline
    }

    /// Append `text` as one or more lines.
    pub fn push(&mut self, text: &str) {
        let normalized = normalize_input(text);
        self.lines
            .extend(normalized.split('\n').map(LogicalLine::new));
    }

    pub fn lines(&self) -> &[LogicalLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The persisted projection: lines joined by `\n`, no numbering.
    pub fn to_storage(&self) -> String {
        self.lines
            .iter()
            .map(LogicalLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let outline = OutlineText::parse("");
        assert!(outline.is_empty());
        assert_eq!(outline.to_storage(), "");
    }

    #[test]
    fn test_parse_keeps_lines_verbatim() {
        let outline = OutlineText::parse("  first \n\nthird");
        let texts: Vec<&str> = outline.lines().iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["  first ", "", "third"]);
    }

    #[test]
    fn test_parse_normalizes_line_endings() {
        let outline = OutlineText::parse("a\r\nb\rc");
        assert_eq!(outline.line_count(), 3);
        assert_eq!(outline.to_storage(), "a\nb\nc");
    }

    #[test]
    fn test_parse_replaces_nbsp() {
        let outline = OutlineText::parse("a\u{00A0}b");
        assert_eq!(outline.lines()[0].text(), "a b");
    }

    #[test]
    fn test_trailing_newline_is_an_empty_line() {
        let outline = OutlineText::parse("a\n");
        assert_eq!(outline.line_count(), 2);
        assert_eq!(outline.to_storage(), "a\n");
    }

    #[test]
    fn test_from_lines_splits_embedded_newlines() {
        let outline = OutlineText::from_lines(["one", "two\nthree"]);
        assert_eq!(outline.line_count(), 3);
        assert_eq!(outline.lines()[2].text(), "three");
    }
}
