use crate::session::CursorPosition;
use crossterm::{
    cursor, execute,
    style::{Attribute, SetAttribute},
    terminal::{Clear, ClearType, size},
};
use std::io::{self, Write, stdout};
use unicode_width::UnicodeWidthChar;

#[derive(Clone)]
pub struct RenderParams<'a> {
    pub header: &'a str,
    pub status_message: &'a str,
}

/// Draws the edit form into the terminal. Line 0 is the header, the last
/// terminal row is the status line, everything between is text.
pub struct View {
    last_lines: Vec<String>,
    last_header: Option<String>,
    last_status: Option<String>,
    last_terminal_size: (u16, u16),
    scroll_offset: usize,
    horizontal_scroll: usize,
    needs_full_redraw: bool,
    tab_stop: usize,
    show_whitespace: bool,
}

impl View {
    pub fn new() -> Self {
        Self {
            last_lines: Vec::new(),
            last_header: None,
            last_status: None,
            last_terminal_size: (0, 0),
            scroll_offset: 0,
            horizontal_scroll: 0,
            needs_full_redraw: true,
            tab_stop: 4,
            show_whitespace: false,
        }
    }

    fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))
    }

    fn move_cursor(&self, line: usize, column: usize) -> io::Result<()> {
        execute!(stdout(), cursor::MoveTo(column as u16, line as u16))
    }

    fn text_rows(height: u16) -> usize {
        (height as usize).saturating_sub(2)
    }

    /// Draw header, text and status. The terminal cursor is left alone;
    /// see [`View::place_cursor`].
    pub fn render(&mut self, text: &str, params: &RenderParams<'_>) -> io::Result<()> {
        let (width, height) = size()?;

        if self.last_terminal_size != (width, height) {
            self.needs_full_redraw = true;
            self.last_terminal_size = (width, height);
        }

        if self.needs_full_redraw {
            self.clear_screen()?;
            self.needs_full_redraw = false;
            self.last_lines.clear();
            self.last_header = None;
            self.last_status = None;
        }

        if self.last_header.as_deref() != Some(params.header) {
            self.move_cursor(0, 0)?;
            execute!(stdout(), Clear(ClearType::CurrentLine))?;
            print!(
                "{}{}{}",
                SetAttribute(Attribute::Reverse),
                clip(params.header, width as usize),
                SetAttribute(Attribute::Reset)
            );
            self.last_header = Some(params.header.to_string());
        }

        self.render_lines(text)?;

        if self.last_status.as_deref() != Some(params.status_message) {
            self.move_cursor(height.saturating_sub(1) as usize, 0)?;
            execute!(stdout(), Clear(ClearType::CurrentLine))?;
            print!("{}", clip(params.status_message, width as usize));
            self.last_status = Some(params.status_message.to_string());
        }

        stdout().flush()
    }

    fn render_lines(&mut self, text: &str) -> io::Result<()> {
        let (width, height) = self.last_terminal_size;
        let rows = Self::text_rows(height);
        let doc_lines: Vec<&str> = text.split('\n').collect();

        let visible_lines: Vec<String> = (0..rows)
            .map(|i| {
                doc_lines
                    .get(self.scroll_offset + i)
                    .map(|line| self.visible_segment(line, width as usize))
                    .unwrap_or_default()
            })
            .collect();

        // Only redraw changed lines
        for (i, line) in visible_lines.iter().enumerate() {
            if self.last_lines.get(i) != Some(line) {
                self.move_cursor(i + 1, 0)?;
                execute!(stdout(), Clear(ClearType::CurrentLine))?;
                print!("{line}");
            }
        }

        self.last_lines = visible_lines;
        Ok(())
    }

    /// Position the terminal cursor on the committed text, scrolling if the
    /// cursor left the visible area.
    pub fn place_cursor(&mut self, text: &str, cursor: usize) -> io::Result<()> {
        let position = CursorPosition::locate(text, cursor);
        let line = text.split('\n').nth(position.line).unwrap_or_default();
        let display_column = self.calculate_display_column(line, position.column);

        if self.adjust_scroll(position.line, display_column) {
            self.render_lines(text)?;
        }

        let screen_line = position.line - self.scroll_offset + 1;
        let screen_column = display_column - self.horizontal_scroll;
        self.move_cursor(screen_line, screen_column)?;
        stdout().flush()
    }

    pub fn force_redraw(&mut self) {
        self.needs_full_redraw = true;
    }

    pub fn set_tab_stop(&mut self, tab_stop: usize) {
        if self.tab_stop != tab_stop {
            self.tab_stop = tab_stop;
            self.needs_full_redraw = true;
        }
    }

    pub fn set_show_whitespace(&mut self, show: bool) {
        if self.show_whitespace != show {
            self.show_whitespace = show;
            self.needs_full_redraw = true;
        }
    }

    /// Returns true when the scroll position changed.
    fn adjust_scroll(&mut self, cursor_line: usize, display_column: usize) -> bool {
        let (width, height) = self.last_terminal_size;
        let rows = Self::text_rows(height).max(1);
        let width = (width as usize).max(1);
        let before = (self.scroll_offset, self.horizontal_scroll);

        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + rows {
            self.scroll_offset = cursor_line - rows + 1;
        }

        if display_column < self.horizontal_scroll {
            self.horizontal_scroll = display_column;
        } else if display_column >= self.horizontal_scroll + width {
            self.horizontal_scroll = display_column - width + 1;
        }

        before != (self.scroll_offset, self.horizontal_scroll)
    }

    /// The part of `line` inside the horizontal window, tabs expanded.
    fn visible_segment(&self, line: &str, width: usize) -> String {
        let mut out = String::new();
        let mut column = 0;
        let window_end = self.horizontal_scroll + width;

        for ch in line.chars() {
            let (rendered, cells) = match ch {
                '\t' => {
                    let cells = self.tab_stop - column % self.tab_stop;
                    let fill = if self.show_whitespace { "→" } else { " " };
                    (format!("{fill}{}", " ".repeat(cells - 1)), cells)
                }
                ' ' if self.show_whitespace => ("·".to_string(), 1),
                c => (c.to_string(), c.width().unwrap_or(1)),
            };

            let start = column.max(self.horizontal_scroll);
            let end = (column + cells).min(window_end);
            if start == column && end == column + cells {
                out.push_str(&rendered);
            } else if start < end {
                // Cut by a window edge: keep the cells so the row stays aligned
                out.push_str(&" ".repeat(end - start));
            }
            column += cells;
            if column >= window_end {
                break;
            }
        }

        out
    }

    /// Convert logical character position to display column position
    /// Accounts for tab expansion and Unicode character widths
    fn calculate_display_column(&self, text: &str, logical_pos: usize) -> usize {
        let mut display_col = 0;

        for ch in text.chars().take(logical_pos) {
            match ch {
                '\t' => {
                    display_col = ((display_col / self.tab_stop) + 1) * self.tab_stop;
                }
                c => {
                    display_col += c.width().unwrap_or(1);
                }
            }
        }
        display_col
    }
}

fn clip(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(1);
            used <= width
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_display_column() {
        let view = View::new();

        assert_eq!(view.calculate_display_column("1. abc", 0), 0);
        assert_eq!(view.calculate_display_column("1. abc", 3), 3);

        // Tabs jump to the next stop (default tab_stop = 4)
        assert_eq!(view.calculate_display_column("a\tb", 2), 4);
        assert_eq!(view.calculate_display_column("abcd\t", 5), 8);

        // Wide characters take two cells
        assert_eq!(view.calculate_display_column("1. 名前", 4), 5);
        assert_eq!(view.calculate_display_column("1. 名前", 5), 7);
    }

    #[test]
    fn test_visible_segment_expands_tabs() {
        let view = View::new();
        assert_eq!(view.visible_segment("a\tb", 80), "a   b");
    }

    #[test]
    fn test_visible_segment_clips_to_width() {
        let view = View::new();
        assert_eq!(view.visible_segment("1. Name  Role", 6), "1. Nam");
    }

    #[test]
    fn test_visible_segment_respects_horizontal_scroll() {
        let mut view = View::new();
        view.horizontal_scroll = 3;
        assert_eq!(view.visible_segment("1. Name", 3), "Nam");
    }

    #[test]
    fn test_visible_segment_pads_glyph_cut_by_left_edge() {
        let mut view = View::new();
        view.horizontal_scroll = 1;
        assert_eq!(view.visible_segment("名x", 80), " x");

        // The tab spans columns 2..4; only column 3 is inside the window
        view.horizontal_scroll = 3;
        assert_eq!(view.visible_segment("ab\tc", 80), " c");
        assert_eq!(
            view.visible_segment("ab\tc", 80).len(),
            view.calculate_display_column("ab\tc", 4) - view.horizontal_scroll
        );
    }

    #[test]
    fn test_visible_segment_pads_glyph_cut_by_right_edge() {
        let view = View::new();
        assert_eq!(view.visible_segment("a名", 2), "a ");
    }

    #[test]
    fn test_visible_segment_shows_whitespace() {
        let mut view = View::new();
        view.set_show_whitespace(true);
        assert_eq!(view.visible_segment("1. a\tb", 80), "1.·a→   b");
    }

    #[test]
    fn test_adjust_scroll_follows_cursor() {
        let mut view = View::new();
        view.last_terminal_size = (10, 5); // three text rows

        assert!(!view.adjust_scroll(2, 0));
        assert!(view.adjust_scroll(5, 0));
        assert_eq!(view.scroll_offset, 3);
        assert!(view.adjust_scroll(1, 12));
        assert_eq!(view.scroll_offset, 1);
        assert_eq!(view.horizontal_scroll, 3);
    }

    #[test]
    fn test_clip_by_display_width() {
        assert_eq!(clip("名前abc", 5), "名前a");
        assert_eq!(clip("short", 80), "short");
    }
}
