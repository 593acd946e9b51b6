use regex::Regex;
use std::sync::OnceLock;

/// A leading `"{n}. "` numbering prefix found at the start of a line.
///
/// Offsets are byte offsets into the line the bullet was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bullet {
    /// The number as written. Digit runs too long for `u64` saturate.
    pub number: u64,
    pub digits_start: usize,
    pub digits_end: usize,
    /// Byte offset just past the prefix, including the optional separator.
    pub end: usize,
}

fn bullet_pattern() -> &'static Regex {
    static BULLET_REGEX: OnceLock<Regex> = OnceLock::new();
    // ASCII digits only: `\d` would also accept other scripts' numerals.
    BULLET_REGEX.get_or_init(|| Regex::new(r"^(\s*)([0-9]+)\.(\s?)").expect("valid bullet regex"))
}

/// Parse the numbering prefix at the start of `line`, if there is one.
///
/// `line` must be a single line; callers split on `\n` first.
pub fn parse_bullet(line: &str) -> Option<Bullet> {
    let caps = bullet_pattern().captures(line)?;
    let digits = caps.get(2)?;
    let whole = caps.get(0)?;

    Some(Bullet {
        number: digits.as_str().parse::<u64>().unwrap_or(u64::MAX),
        digits_start: digits.start(),
        digits_end: digits.end(),
        end: whole.end(),
    })
}

impl Bullet {
    /// Everything after the prefix.
    pub fn body<'a>(&self, line: &'a str) -> &'a str {
        &line[self.end..]
    }

    /// True when nothing but whitespace follows the prefix, i.e. the user
    /// is sitting on a fresh bullet.
    pub fn is_empty_in(&self, line: &str) -> bool {
        self.body(line).trim().is_empty()
    }

    /// Rewrite the number, leaving indentation, the dot and the separator as they were.
    pub fn renumbered(&self, line: &str, number: u64) -> String {
        let mut out = String::with_capacity(line.len() + 4);
        out.push_str(&line[..self.digits_start]);
        out.push_str(&number.to_string());
        out.push_str(&line[self.digits_end..]);
        out
    }

    /// Number of characters the digit run occupies.
    pub fn digit_count(&self) -> usize {
        self.digits_end - self.digits_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_bullet() {
        let bullet = parse_bullet("12. hello").unwrap();
        assert_eq!(bullet.number, 12);
        assert_eq!(bullet.digits_start, 0);
        assert_eq!(bullet.digits_end, 2);
        assert_eq!(bullet.end, 4);
        assert_eq!(bullet.body("12. hello"), "hello");
    }

    #[test]
    fn test_separator_is_optional() {
        let bullet = parse_bullet("3.x").unwrap();
        assert_eq!(bullet.number, 3);
        assert_eq!(bullet.body("3.x"), "x");
    }

    #[test]
    fn test_separator_consumes_only_one_space() {
        let line = "1.   indented";
        let bullet = parse_bullet(line).unwrap();
        assert_eq!(bullet.body(line), "  indented");
    }

    #[test]
    fn test_leading_whitespace_allowed() {
        let line = "  7. x";
        let bullet = parse_bullet(line).unwrap();
        assert_eq!(bullet.number, 7);
        assert_eq!(bullet.digits_start, 2);
        assert_eq!(bullet.renumbered(line, 10), "  10. x");
    }

    #[test]
    fn test_not_a_bullet() {
        assert!(parse_bullet("hello 1. world").is_none());
        assert!(parse_bullet("1 hello").is_none());
        assert!(parse_bullet(". hello").is_none());
        assert!(parse_bullet("").is_none());
        // Arabic-Indic digits are not numbering
        assert!(parse_bullet("\u{0661}. x").is_none());
    }

    #[test]
    fn test_empty_bullet_detection() {
        let line = "4.   ";
        assert!(parse_bullet(line).unwrap().is_empty_in(line));
        let line = "4. a";
        assert!(!parse_bullet(line).unwrap().is_empty_in(line));
        let line = "4.";
        assert!(parse_bullet(line).unwrap().is_empty_in(line));
    }

    #[test]
    fn test_renumber_preserves_missing_separator() {
        let line = "9.tight";
        let bullet = parse_bullet(line).unwrap();
        assert_eq!(bullet.renumbered(line, 2), "2.tight");
    }

    #[test]
    fn test_huge_number_saturates() {
        let bullet = parse_bullet("99999999999999999999999. x").unwrap();
        assert_eq!(bullet.number, u64::MAX);
        assert_eq!(bullet.digit_count(), 23);
    }
}
