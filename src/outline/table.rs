use unicode_width::UnicodeWidthStr;

pub fn is_tabular(text: &str) -> bool {
    text.contains('\t')
}

/// Lay out tab-separated rows as space-padded columns.
///
/// Widths are measured in terminal cells, so wide characters line up in a
/// monospaced view. Rows with fewer cells simply stop early. A single
/// trailing newline is kept as-is rather than becoming a padded empty row.
pub fn align_columns(text: &str, gap: usize) -> String {
    let (body, trailing_newline) = match text.strip_suffix('\n') {
        Some(body) => (body, true),
        None => (text, false),
    };

    let rows: Vec<Vec<&str>> = body.split('\n').map(|row| row.split('\t').collect()).collect();

    let mut widths: Vec<usize> = Vec::new();
    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            let width = cell.width();
            match widths.get_mut(col) {
                Some(max) => *max = (*max).max(width),
                None => widths.push(width),
            }
        }
    }

    let separator = " ".repeat(gap);
    let mut out = rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(col, cell)| {
                    let padding = widths[col] - cell.width();
                    format!("{cell}{}", " ".repeat(padding))
                })
                .collect::<Vec<_>>()
                .join(&separator)
        })
        .collect::<Vec<_>>()
        .join("\n");

    if trailing_newline {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_tabular() {
        assert!(is_tabular("a\tb"));
        assert!(!is_tabular("a  b"));
    }

    #[test]
    fn test_align_basic_table() {
        let aligned = align_columns("Name\tRole\nAda\tEng\nBo\tPM", 2);
        assert_eq!(aligned, "Name  Role\nAda   Eng \nBo    PM  ");
    }

    #[test]
    fn test_align_ragged_rows() {
        let aligned = align_columns("a\tbb\tccc\ndddd", 1);
        assert_eq!(aligned, "a    bb ccc\ndddd");
    }

    #[test]
    fn test_align_keeps_trailing_newline() {
        let aligned = align_columns("x\ty\n", 2);
        assert_eq!(aligned, "x  y\n");
    }

    #[test]
    fn test_align_wide_characters() {
        // each CJK character is two cells wide
        let aligned = align_columns("名前\tx\nab\ty", 1);
        let lines: Vec<&str> = aligned.split('\n').collect();
        assert_eq!(lines[0], "名前 x");
        assert_eq!(lines[1], "ab   y");
        assert_eq!(lines[0].width(), lines[1].width());
    }

    #[test]
    fn test_align_empty_cells() {
        let aligned = align_columns("\tb\na\t", 2);
        assert_eq!(aligned, "   b\na   ");
    }
}
