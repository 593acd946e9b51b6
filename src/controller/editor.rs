use crate::clipboard;
use crate::config::RcConfig;
use crate::controller::key_handler::{Action, KeyHandler};
use crate::error::Result;
use crate::session::EditSession;
use crate::view::{RenderParams, View};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use std::fs;
use std::io::{self, ErrorKind, Write, stdout};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const HELP_STATUS: &str = "Ctrl+S save | Ctrl+V paste | Esc revert | Ctrl+Q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct EditorController {
    session: EditSession,
    view: View,
    path: PathBuf,
    status_message: String,
    quit_armed: bool,
}

impl EditorController {
    /// Open `path` for editing. A missing file is an empty document.
    pub fn open(path: PathBuf, config: &RcConfig) -> Result<Self> {
        let storage = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        let mut view = View::new();
        view.set_tab_stop(config.tab_stop);
        view.set_show_whitespace(config.show_whitespace);

        Ok(Self {
            session: EditSession::open(&storage, config.paste_options()),
            view,
            path,
            status_message: HELP_STATUS.to_string(),
            quit_armed: false,
        })
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run(mut self) -> Result<()> {
        let _terminal = TerminalGuard::enter()?;
        self.run_loop()
    }

    fn run_loop(&mut self) -> Result<()> {
        loop {
            let header = self.header();
            let params = RenderParams {
                header: &header,
                status_message: &self.status_message,
            };
            self.view.render(self.session.text(), &params)?;

            // The new text is on screen; only now may the cursor move onto it
            let cursor = self.session.commit();
            self.view.place_cursor(self.session.text(), cursor)?;

            let flow = match event::read()? {
                Event::Key(key_event) => match KeyHandler::parse_key(&key_event) {
                    Some(action) => self.handle_action(action),
                    None => Flow::Continue,
                },
                Event::Paste(payload) => {
                    self.paste(&payload);
                    Flow::Continue
                }
                Event::Resize(..) => {
                    self.view.force_redraw();
                    Flow::Continue
                }
                _ => Flow::Continue,
            };

            if flow == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    pub fn handle_action(&mut self, action: Action) -> Flow {
        if action != Action::Quit {
            self.quit_armed = false;
        }

        match action {
            Action::Edit(input) => {
                self.session.key_down(input);
                if let Some(selection) = self.session.selection() {
                    let count = selection.end - selection.start;
                    self.status_message = format!("{count} characters selected");
                }
            }
            Action::PasteClipboard => match clipboard::read_text() {
                Ok(text) => self.paste(&text),
                Err(e) => {
                    warn!(error = %e, "clipboard read failed");
                    self.status_message = format!("Error: {e}");
                }
            },
            Action::Save => match self.save() {
                Ok(bytes) => {
                    self.status_message = format!("\"{}\" {bytes} bytes written", self.display_filename());
                }
                Err(e) => {
                    warn!(error = %e, "save failed");
                    self.status_message = format!("Error: could not save: {e}");
                }
            },
            Action::Cancel => {
                self.session.cancel();
                self.status_message = "Reverted to last save".to_string();
            }
            Action::Redraw => self.view.force_redraw(),
            Action::Quit => {
                if self.session.is_modified() && !self.quit_armed {
                    self.quit_armed = true;
                    self.status_message =
                        "Unsaved changes: Ctrl+S to save, Ctrl+Q again to discard".to_string();
                } else {
                    return Flow::Quit;
                }
            }
        }

        Flow::Continue
    }

    /// Ingest a paste; an empty payload leaves everything as it was.
    pub fn paste(&mut self, payload: &str) {
        if self.session.paste_at_cursor(payload) {
            self.status_message = format!("{} lines pasted", payload.lines().count());
        } else {
            self.status_message = "Nothing to paste".to_string();
        }
    }

    fn save(&mut self) -> Result<usize> {
        let storage = self.session.save();
        fs::write(&self.path, &storage)?;
        info!(bytes = storage.len(), "note written");
        Ok(storage.len())
    }

    fn header(&self) -> String {
        let modified = if self.session.is_modified() { " [+]" } else { "" };
        format!(" {}{modified}", self.display_filename())
    }

    fn display_filename(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("[No Name]")
    }
}

/// Raw mode plus the screen modes the editor switches on. Dropping it puts
/// the terminal back, also when setup stops half way.
struct TerminalGuard {
    enhanced: bool,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self { enhanced: false };
        execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste)?;

        // Needed for the terminal to tell Shift+Enter apart from Enter
        if supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
            guard.enhanced = true;
        }
        debug!(enhanced = guard.enhanced, "terminal ready");

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal(&mut stdout(), self.enhanced) {
            warn!(error = %e, "terminal restore failed");
        }
    }
}

/// Every step is attempted; raw mode is left even if a screen reset fails.
fn restore_terminal(out: &mut impl Write, enhanced: bool) -> io::Result<()> {
    let flags = if enhanced {
        execute!(out, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let screen = execute!(out, DisableBracketedPaste, LeaveAlternateScreen);
    disable_raw_mode()?;
    flags.and(screen)
}
