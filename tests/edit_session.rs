use outline_notes::{EditSession, Key, KeyInput, PasteOptions, Selection};

fn press(session: &mut EditSession, key: Key) {
    session.key_down(KeyInput::new(key));
    session.commit();
}

fn type_str(session: &mut EditSession, s: &str) {
    for c in s.chars() {
        press(session, Key::Char(c));
    }
}

#[test]
fn test_meeting_notes_lifecycle() {
    let mut session = EditSession::open("", PasteOptions::default());
    assert_eq!(session.text(), "1. ");

    type_str(&mut session, "Review budget");
    press(&mut session, Key::Enter);
    type_str(&mut session, "Assign owners");
    press(&mut session, Key::Enter);
    assert!(session.paste_at_cursor("Name\tTask\nAda\tSlides"));
    session.commit();

    assert_eq!(
        session.text(),
        "1. Review budget\n2. Assign owners\n3. Name  Task  \n4. Ada   Slides"
    );

    let stored = session.save();
    assert_eq!(stored, "Review budget\nAssign owners\nName  Task  \nAda   Slides");

    // Reopening the stored note gives back the same edit form
    let reopened = EditSession::open(&stored, PasteOptions::default());
    assert_eq!(reopened.text(), session.text());
}

#[test]
fn test_plain_paste_waits_for_next_backspace() {
    let mut session = EditSession::open("a\nb", PasteOptions::default());
    assert_eq!(session.cursor(), 4);

    session.paste("x\ny", Some(Selection::caret(4)));
    assert_eq!(session.text(), "1. ax\ny\n2. b");
    assert_eq!(session.commit(), 7);

    // "2. b" now sits on line 3 but stays untouched until a deletion
    press(&mut session, Key::Backspace);
    assert_eq!(session.text(), "1. ax\n\n3. b");
    assert_eq!(session.cursor(), 6);
}

#[test]
fn test_deleting_a_digit_renumbers_from_post_deletion_text() {
    let mut session = EditSession::open("a\nb\nc", PasteOptions::default());
    press(&mut session, Key::Down);
    press(&mut session, Key::Home);
    press(&mut session, Key::Right);

    // Removing the "2" leaves ". b", which is no longer numbered
    press(&mut session, Key::Backspace);
    assert_eq!(session.text(), "1. a\n. b\n3. c");
    assert_eq!(session.cursor(), 5);

    // Typing a wrong digit back in is repaired by the next deletion
    type_str(&mut session, "77");
    press(&mut session, Key::Backspace);
    assert_eq!(session.text(), "1. a\n2. b\n3. c");
}

#[test]
fn test_cancel_discards_session_edits() {
    let mut session = EditSession::open("keep", PasteOptions::default());
    press(&mut session, Key::Enter);
    type_str(&mut session, "scratch");
    assert!(session.is_modified());

    session.cancel();
    assert_eq!(session.text(), "1. keep");
    assert_eq!(session.storage_form(), "keep");
}

#[test]
fn test_column_gap_option_applies_to_paste() {
    let mut session = EditSession::open("", PasteOptions { column_gap: 1 });
    session.paste_at_cursor("a\tb\ncc\td");
    assert_eq!(session.text(), "1. a  b\n2. cc d");
}

#[test]
fn test_display_lines_for_read_only_view() {
    let session = EditSession::open("one\n\nthree", PasteOptions::default());
    let lines = session.display_lines();
    let rendered: Vec<(usize, &str)> =
        lines.iter().map(|l| (l.position, l.text.as_str())).collect();
    assert_eq!(rendered, vec![(1, "one"), (2, ""), (3, "three")]);
}
