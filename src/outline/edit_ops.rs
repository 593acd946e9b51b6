use super::bullet::parse_bullet;
use super::line_model::normalize_input;
use super::table;
use tracing::debug;

/// Replacement text plus the cursor to apply once that text is committed.
///
/// `cursor` is a character offset into `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub text: String,
    pub cursor: usize,
}

/// A character-offset selection. `start == end` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Ordered and clamped to `len` characters.
    fn clamped(self, len: usize) -> (usize, usize) {
        let (start, end) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        (start.min(len), end.min(len))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteOptions {
    /// Spaces between aligned columns of a tabular paste.
    pub column_gap: usize,
}

impl Default for PasteOptions {
    fn default() -> Self {
        Self { column_gap: 2 }
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the `chars`-th character, or `text.len()` past the end.
pub fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
}

fn current_line_start(before: &str) -> usize {
    before.rfind('\n').map_or(0, |i| i + 1)
}

/// Plain Enter: split the line at the cursor and open the next bullet.
///
/// When the current line carries a number `k` the new line is `k + 1`;
/// otherwise it is numbered by document position.
pub fn continue_on_enter(text: &str, cursor: usize) -> EditOutcome {
    let (before, after) = text.split_at(byte_offset(text, cursor));
    let current = &before[current_line_start(before)..];

    let next = match parse_bullet(current) {
        Some(bullet) => bullet.number.saturating_add(1),
        None => before.split('\n').count() as u64 + 1,
    };
    let prefix = format!("\n{next}. ");

    let mut out = String::with_capacity(text.len() + prefix.len());
    out.push_str(before);
    out.push_str(&prefix);
    out.push_str(after);

    debug!(next, cursor, "enter continuation");

    EditOutcome {
        text: out,
        cursor: char_len(before) + char_len(&prefix),
    }
}

/// Renumber after a deletion has been applied. `text` must already be the
/// post-deletion value.
///
/// Returns `None` when every numbered line already matches its position, so
/// callers can leave the text and cursor alone. The cursor is carried over
/// to the rewritten text, shifted by any change in digit count before it.
pub fn renumber_after_backspace(text: &str, cursor: usize) -> Option<EditOutcome> {
    let lines: Vec<&str> = text.split('\n').collect();

    let out_of_sync = lines.iter().enumerate().any(|(i, line)| {
        parse_bullet(line).is_some_and(|bullet| bullet.number != i as u64 + 1)
    });
    if !out_of_sync {
        return None;
    }

    let mut rewritten = Vec::with_capacity(lines.len());
    let mut old_start = 0;
    let mut new_start = 0;
    let mut new_cursor = None;

    for (i, line) in lines.iter().enumerate() {
        let position = i as u64 + 1;
        let bullet = parse_bullet(line);
        let new_line = match bullet {
            Some(bullet) => bullet.renumbered(line, position),
            None => line.to_string(),
        };

        let old_len = char_len(line);
        let new_len = char_len(&new_line);

        if new_cursor.is_none() && cursor <= old_start + old_len {
            let column = cursor - old_start;
            let mapped = match bullet {
                Some(bullet) => {
                    let digits_start = char_len(&line[..bullet.digits_start]);
                    let digits_end = digits_start + bullet.digit_count();
                    if column >= digits_end {
                        column + new_len - old_len
                    } else {
                        column.min(digits_start + position.to_string().len())
                    }
                }
                None => column,
            };
            new_cursor = Some(new_start + mapped);
        }

        old_start += old_len + 1;
        new_start += new_len + 1;
        rewritten.push(new_line);
    }

    let text = rewritten.join("\n");
    let cursor = new_cursor.unwrap_or_else(|| char_len(&text));

    debug!(lines = rewritten.len(), cursor, "renumbered");

    Some(EditOutcome { text, cursor })
}

/// Renumber without cursor tracking.
pub fn renumber(text: &str) -> Option<String> {
    renumber_after_backspace(text, 0).map(|outcome| outcome.text)
}

/// Ingest a clipboard payload in place of the default paste.
///
/// Tabular payloads are aligned into columns first. If the caret sits on an
/// empty bullet the payload becomes a run of numbered lines starting at that
/// bullet's number; otherwise it is spliced in verbatim over the selection.
/// A missing selection means "at the end". Returns `None` for an empty
/// payload.
pub fn ingest_paste(
    text: &str,
    pasted: &str,
    selection: Option<Selection>,
    options: PasteOptions,
) -> Option<EditOutcome> {
    let pasted = normalize_input(pasted);
    if pasted.is_empty() {
        return None;
    }

    let tabular = table::is_tabular(&pasted);
    let block = if tabular {
        table::align_columns(&pasted, options.column_gap)
    } else {
        pasted
    };

    let total = char_len(text);
    let (start, end) = selection
        .unwrap_or(Selection::caret(total))
        .clamped(total);
    let before = &text[..byte_offset(text, start)];
    let after = &text[byte_offset(text, end)..];

    let line_start = current_line_start(before);
    let current = &before[line_start..];

    let outcome = match parse_bullet(current).filter(|bullet| bullet.is_empty_in(current)) {
        Some(bullet) => {
            let head = &before[..line_start];
            let numbered = number_block(&block, bullet.number);
            debug!(tabular, start_number = bullet.number, "paste onto empty bullet");
            EditOutcome {
                text: format!("{head}{numbered}{after}"),
                cursor: char_len(head) + char_len(&numbered),
            }
        }
        None => {
            debug!(tabular, start, end, "paste at selection");
            EditOutcome {
                text: format!("{before}{block}{after}"),
                cursor: start + char_len(&block),
            }
        }
    };

    Some(outcome)
}

/// Number each line of `block` from `start`, padding numbers to equal width.
fn number_block(block: &str, start: u64) -> String {
    let mut lines: Vec<&str> = block.split('\n').collect();
    if lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }

    let last = start.saturating_add(lines.len() as u64 - 1);
    let width = last.to_string().len();

    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let number = start.saturating_add(i as u64);
            format!("{number:>width$}. {line}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
