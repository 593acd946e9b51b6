use super::bullet::parse_bullet;
use super::line_model::OutlineText;

/// Project an outline into the edit form: every line gets `"{n}. "`.
///
/// An empty outline renders as a single empty bullet so there is always a
/// numbered line to type into.
pub fn render(outline: &OutlineText) -> String {
    if outline.is_empty() {
        return "1. ".to_string();
    }

    outline
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}. {}", i + 1, line.text()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip numbering back out of an edit-form string.
///
/// Only a prefix at the very start of a line is removed; lines without one
/// pass through untouched.
pub fn normalize(edit: &str) -> String {
    edit.split('\n')
        .map(|line| match parse_bullet(line) {
            Some(bullet) => bullet.body(line),
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line prepared for read-only display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub position: usize,
    pub text: String,
}

/// Number logical lines for display. Independent of the edit-form numbering.
pub fn display_lines(outline: &OutlineText) -> Vec<DisplayLine> {
    outline
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| DisplayLine {
            position: i + 1,
            text: line.text().to_string(),
        })
        .collect()
}

/// Display lines as text, numbers right-aligned to the widest one.
pub fn format_display(outline: &OutlineText) -> String {
    let lines = display_lines(outline);
    let width = lines.len().to_string().len();

    lines
        .iter()
        .map(|line| format!("{:>width$}. {}", line.position, line.text, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_numbers_lines() {
        let outline = OutlineText::parse("alpha\nbeta");
        assert_eq!(render(&outline), "1. alpha\n2. beta");
    }

    #[test]
    fn test_render_empty_seeds_first_bullet() {
        assert_eq!(render(&OutlineText::parse("")), "1. ");
    }

    #[test]
    fn test_normalize_strips_prefixes() {
        assert_eq!(normalize("1. alpha\n2. beta"), "alpha\nbeta");
    }

    #[test]
    fn test_normalize_leaves_inner_numbers() {
        assert_eq!(normalize("1. costs 3. or 4."), "costs 3. or 4.");
    }

    #[test]
    fn test_normalize_only_first_prefix() {
        assert_eq!(normalize("1. 2. nested"), "2. nested");
    }

    #[test]
    fn test_normalize_passes_unprefixed_lines() {
        assert_eq!(normalize("1. a\nplain\n  3.b"), "a\nplain\nb");
    }

    #[test]
    fn test_round_trip_with_tricky_lines() {
        let outline = OutlineText::from_lines(["", " leading", "3. looks numbered", "\tx", "7."]);
        assert_eq!(normalize(&render(&outline)), outline.to_storage());
    }

    #[test]
    fn test_format_display_aligns_numbers() {
        let outline = OutlineText::from_lines((1..=10).map(|i| format!("item {i}")));
        let shown = format_display(&outline);
        let lines: Vec<&str> = shown.lines().collect();
        assert_eq!(lines[0], " 1. item 1");
        assert_eq!(lines[9], "10. item 10");
    }

    #[test]
    fn test_display_lines_positions() {
        let lines = display_lines(&OutlineText::parse("a\nb"));
        assert_eq!(lines[1], DisplayLine { position: 2, text: "b".to_string() });
    }
}
