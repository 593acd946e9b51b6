use crate::outline::{
    self, DisplayLine, EditOutcome, OutlineText, PasteOptions, Selection, edit_ops::byte_offset,
    edit_ops::char_len,
};
use tracing::{debug, info};

/// Keys the session reacts to. Anything else is the host's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

/// Line/column of a character offset, both 0-based, column in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

impl CursorPosition {
    pub fn locate(text: &str, offset: usize) -> Self {
        let before = &text[..byte_offset(text, offset)];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        Self {
            line,
            column: char_len(&before[line_start..]),
        }
    }

    /// Character offset of this position, with the column clamped to the line.
    pub fn to_offset(self, text: &str) -> usize {
        let mut offset = 0;
        for (i, line) in text.split('\n').enumerate() {
            let len = char_len(line);
            if i == self.line {
                return offset + self.column.min(len);
            }
            offset += len + 1;
        }
        char_len(text)
    }
}

/// One open editing session over a single document.
///
/// Mutations replace the text immediately; the resulting cursor is held as
/// pending until the host calls [`EditSession::commit`] after drawing the
/// new text.
pub struct EditSession {
    persisted: String,
    text: String,
    cursor: usize,
    pending_cursor: Option<usize>,
    /// Fixed end of the selection; the cursor is the moving end.
    anchor: Option<usize>,
    options: PasteOptions,
}

impl EditSession {
    pub fn open(storage: &str, options: PasteOptions) -> Self {
        let outline = OutlineText::parse(storage);
        let text = outline::render(&outline);
        let cursor = first_line_end(&text);

        info!(lines = outline.line_count(), "edit session opened");

        Self {
            persisted: outline.to_storage(),
            text,
            cursor,
            pending_cursor: None,
            anchor: None,
            options,
        }
    }

    /// The edit-form string.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The committed cursor, clamped to the current text.
    pub fn cursor(&self) -> usize {
        self.cursor.min(char_len(&self.text))
    }

    pub fn cursor_position(&self) -> CursorPosition {
        CursorPosition::locate(&self.text, self.cursor())
    }

    pub fn has_pending_cursor(&self) -> bool {
        self.pending_cursor.is_some()
    }

    /// Apply the pending cursor. Call once the new text is on screen.
    pub fn commit(&mut self) -> usize {
        if let Some(cursor) = self.pending_cursor.take() {
            self.cursor = cursor;
        }
        self.cursor()
    }

    /// The selected range, ordered. `None` when nothing is selected.
    pub fn selection(&self) -> Option<Selection> {
        let cursor = self.cursor();
        let anchor = self.anchor?.min(char_len(&self.text));
        (anchor != cursor).then(|| Selection::new(anchor.min(cursor), anchor.max(cursor)))
    }

    /// Select from `selection.start` to `selection.end`; the cursor goes to the end.
    pub fn select(&mut self, selection: Selection) {
        self.commit();
        let len = char_len(&self.text);
        self.anchor = Some(selection.start.min(len));
        self.cursor = selection.end.min(len);
    }

    /// Handle a key press. Returns true when the text changed.
    pub fn key_down(&mut self, input: KeyInput) -> bool {
        // The host has had its chance to draw; a still-pending cursor is current.
        self.commit();

        match input.key {
            Key::Enter if !input.shift => {
                let at = self.edit_point();
                let outcome = outline::continue_on_enter(&self.text, at);
                self.apply(outcome);
                true
            }
            Key::Enter => {
                let at = self.edit_point();
                self.insert_str(at, "\n");
                true
            }
            Key::Char(c) => {
                let at = self.edit_point();
                self.insert_str(at, c.encode_utf8(&mut [0; 4]));
                true
            }
            Key::Backspace => {
                if let Some(start) = self.take_selection() {
                    self.after_deletion(start);
                    return true;
                }
                let cursor = self.cursor();
                if cursor == 0 {
                    return false;
                }
                self.remove_range(cursor - 1, cursor);
                self.after_deletion(cursor - 1);
                true
            }
            Key::Delete => {
                if let Some(start) = self.take_selection() {
                    self.after_deletion(start);
                    return true;
                }
                let cursor = self.cursor();
                if cursor >= char_len(&self.text) {
                    return false;
                }
                self.remove_range(cursor, cursor + 1);
                self.after_deletion(cursor);
                true
            }
            Key::Left | Key::Right | Key::Up | Key::Down | Key::Home | Key::End => {
                self.move_cursor(input);
                false
            }
        }
    }

    /// Arrow/Home/End movement. With shift held the selection grows or shrinks.
    fn move_cursor(&mut self, input: KeyInput) {
        if input.shift {
            let cursor = self.cursor();
            self.anchor.get_or_insert(cursor);
        } else {
            self.anchor = None;
        }

        match input.key {
            Key::Left => {
                self.cursor = self.cursor().saturating_sub(1);
            }
            Key::Right => {
                self.cursor = (self.cursor() + 1).min(char_len(&self.text));
            }
            Key::Up | Key::Down => {
                let position = self.cursor_position();
                let line_count = self.text.split('\n').count();
                let line = match input.key {
                    Key::Up => position.line.saturating_sub(1),
                    _ => (position.line + 1).min(line_count - 1),
                };
                self.cursor = CursorPosition { line, ..position }.to_offset(&self.text);
            }
            Key::Home => {
                let position = self.cursor_position();
                self.cursor = CursorPosition { column: 0, ..position }.to_offset(&self.text);
            }
            Key::End => {
                let position = self.cursor_position();
                self.cursor = CursorPosition {
                    column: usize::MAX,
                    ..position
                }
                .to_offset(&self.text);
            }
            Key::Char(_) | Key::Enter | Key::Backspace | Key::Delete => {}
        }
    }

    /// Paste in place of the default insertion. An empty payload does nothing.
    /// `None` for the selection means the read failed; the paste goes to the end.
    pub fn paste(&mut self, payload: &str, selection: Option<Selection>) -> bool {
        self.commit();

        match outline::ingest_paste(&self.text, payload, selection, self.options) {
            Some(outcome) => {
                self.anchor = None;
                self.apply(outcome);
                true
            }
            None => false,
        }
    }

    /// Paste over the selection, or at the caret when nothing is selected.
    pub fn paste_at_cursor(&mut self, payload: &str) -> bool {
        self.commit();
        let target = self
            .selection()
            .unwrap_or_else(|| Selection::caret(self.cursor()));
        self.paste(payload, Some(target))
    }

    pub fn storage_form(&self) -> String {
        outline::normalize(&self.text)
    }

    pub fn is_modified(&self) -> bool {
        self.storage_form() != self.persisted
    }

    /// The storage string to hand to persistence. It becomes the new baseline.
    pub fn save(&mut self) -> String {
        let storage = self.storage_form();
        info!(bytes = storage.len(), "edit session saved");
        self.persisted = storage.clone();
        storage
    }

    /// Drop all edits since the last save.
    pub fn cancel(&mut self) {
        let outline = OutlineText::parse(&self.persisted);
        self.text = outline::render(&outline);
        self.cursor = first_line_end(&self.text);
        self.pending_cursor = None;
        self.anchor = None;
        info!("edit session cancelled");
    }

    /// Logical lines of the current content, for read-only rendering.
    pub fn display_lines(&self) -> Vec<DisplayLine> {
        outline::display_lines(&OutlineText::parse(&self.storage_form()))
    }

    fn apply(&mut self, outcome: EditOutcome) {
        self.text = outcome.text;
        self.pending_cursor = Some(outcome.cursor);
    }

    fn insert_str(&mut self, at: usize, s: &str) {
        self.text.insert_str(byte_offset(&self.text, at), s);
        self.pending_cursor = Some(at + char_len(s));
    }

    /// Where typed input lands: the start of the selection, which is removed
    /// first, or the cursor.
    fn edit_point(&mut self) -> usize {
        match self.take_selection() {
            Some(start) => start,
            None => self.cursor(),
        }
    }

    /// Remove the selected text and return where it began.
    fn take_selection(&mut self) -> Option<usize> {
        let selection = self.selection();
        self.anchor = None;
        let selection = selection?;
        self.remove_range(selection.start, selection.end);
        debug!(start = selection.start, end = selection.end, "selection removed");
        Some(selection.start)
    }

    fn remove_range(&mut self, start: usize, end: usize) {
        let start_byte = byte_offset(&self.text, start);
        let end_byte = byte_offset(&self.text, end);
        self.text.replace_range(start_byte..end_byte, "");
    }

    /// Inspect the text as it is now, after the deletion has landed.
    fn after_deletion(&mut self, cursor: usize) {
        match outline::renumber_after_backspace(&self.text, cursor) {
            Some(outcome) => self.apply(outcome),
            None => {
                debug!(cursor, "numbering in sync");
                self.pending_cursor = Some(cursor);
            }
        }
    }
}

fn first_line_end(text: &str) -> usize {
    char_len(text.split('\n').next().unwrap_or_default())
}
