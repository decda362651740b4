// tests/editing.rs
use vedit::editor::render::STATUS;
use vedit::editor::{Editor, Mode, Position, Text};
use vedit::terminal::{CursorShape, Event, Key, Recorder, Size};
use vedit::text::Str;

fn editor(content: &str) -> Editor {
    Editor::new(Text::from_content("notes.txt", Str::new(content)), Size::new(8, 30))
}

fn press(editor: &mut Editor, keys: &[Key]) {
    for &key in keys {
        editor.handle_event(Event::Key(key));
    }
}

fn typed(keys: &str) -> Vec<Key> {
    keys.chars().map(Key::Char).collect()
}

#[test]
fn append_at_line_end_then_leave_insert() {
    let mut ed = editor("abc\ndef");
    press(&mut ed, &typed("lla"));
    press(&mut ed, &[Key::Char('X'), Key::Escape]);

    let snapshot = ed.snapshot();
    assert_eq!(snapshot.lines, vec!["abcX", "def"]);
    assert_eq!(snapshot.mode, Mode::Normal);
    assert_eq!(snapshot.cursor, Position::new(0, 3));
}

#[test]
fn word_motion_skips_double_spaces() {
    let mut ed = editor("ab cd  ef");
    press(&mut ed, &typed("w"));
    assert_eq!(ed.window().cursor(), Position::new(0, 3));
    press(&mut ed, &typed("w"));
    assert_eq!(ed.window().cursor(), Position::new(0, 7));
    press(&mut ed, &typed("b"));
    assert_eq!(ed.window().cursor(), Position::new(0, 3));
    press(&mut ed, &typed("e"));
    assert_eq!(ed.window().cursor(), Position::new(0, 4));
}

#[test]
fn cut_and_put_back_restores_text() {
    let content = "first line\nsecond line\nthird line";
    let original: Vec<&str> = content.lines().collect();
    // (keys to reach the anchor, select key, keys to extend)
    let cases = [
        ("", "v", "e"),      // one line, characters
        ("lll", "v", "jjh"), // three lines, characters
        ("j", "V", ""),      // one line, whole
        ("", "V", "j"),      // two lines, whole
    ];
    for (to_anchor, select, extend) in cases {
        let mut ed = editor(content);
        press(&mut ed, &typed(to_anchor));
        press(&mut ed, &typed(select));
        press(&mut ed, &typed(extend));
        press(&mut ed, &typed("d"));
        assert_ne!(ed.snapshot().lines, original, "{} {} {}", to_anchor, select, extend);
        press(&mut ed, &typed("P"));
        assert_eq!(ed.snapshot().lines, original, "{} {} {}", to_anchor, select, extend);
    }
}

#[test]
fn clipboard_remembers_its_shape() {
    let mut ed = editor("alpha\nbeta");
    press(&mut ed, &typed("Vy"));
    press(&mut ed, &[Key::Escape]);
    press(&mut ed, &typed("lvly"));
    press(&mut ed, &[Key::Escape]);

    let clipboard = ed.snapshot().clipboard.expect("clipboard filled");
    assert_eq!(clipboard.lines, vec!["lp"]);

    // pasted as characters even though we are not selecting any more
    press(&mut ed, &typed("jP"));
    assert_eq!(ed.snapshot().lines, vec!["alpha", "belpta"]);
}

#[test]
fn cursor_stays_inside_text() {
    let mut ed = editor("short\nlonger line\nx");
    press(&mut ed, &typed("j$"));
    assert_eq!(ed.window().cursor(), Position::new(1, 10));
    press(&mut ed, &typed("j"));
    assert_eq!(ed.window().cursor(), Position::new(2, 0));
    press(&mut ed, &[Key::PageDown, Key::Down, Key::End]);
    assert_eq!(ed.window().cursor(), Position::new(2, 0));
    press(&mut ed, &[Key::PageUp, Key::Up, Key::Home]);
    assert_eq!(ed.window().cursor(), Position::new(0, 0));
}

#[test]
fn render_shows_mode_and_position() {
    let mut ed = editor("abc\ndef");
    let mut screen = Recorder::new(Size::new(8, 30));
    press(&mut ed, &typed("jli"));
    ed.render(&mut screen).unwrap();

    let rows = screen.rows();
    assert_eq!(rows[0], "    1 abc");
    assert_eq!(rows[1], "    2 def");
    assert_eq!(rows[2], "~");
    assert_eq!(rows[7], "  I  | 2:2 | notes.txt");
    assert_eq!(screen.cursor(), (1, 7));
    assert_eq!(screen.last_cursor_shape(), Some(CursorShape::Bar));
}

#[test]
fn scrolling_follows_the_cursor() {
    let content = (1..=40).map(|n| format!("line {}", n)).collect::<Vec<_>>().join("\n");
    let mut ed = editor(&content);
    let mut screen = Recorder::new(Size::new(8, 30));
    press(&mut ed, &typed("G"));
    ed.render(&mut screen).unwrap();

    // 7 text rows: lines 34..=40 are visible
    assert_eq!(screen.row_text(0), "   34 line 34");
    assert_eq!(screen.row_text(6), "   40 line 40");
    assert_eq!(screen.cursor(), (6, 6));
}

#[test]
fn resize_redraws_at_the_new_size() {
    let content = (1..=40).map(|n| format!("line {}", n)).collect::<Vec<_>>().join("\n");
    let mut ed = editor(&content);
    let mut screen = Recorder::new(Size::new(8, 30));
    press(&mut ed, &typed("G"));
    ed.render(&mut screen).unwrap();
    assert_eq!(screen.row_text(7), "  N  | 40:1 | notes.txt");

    ed.handle_event(Event::Resize(Size::new(12, 30)));
    screen.resize(Size::new(12, 30));
    ed.render(&mut screen).unwrap();

    let rows = screen.rows();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0], "   34 line 34");
    assert_eq!(rows[6], "   40 line 40");
    assert_eq!(rows[7], "~");
    assert_eq!(rows[11], "  N  | 40:1 | notes.txt");
    assert_eq!(screen.foreground(), Some(STATUS.foreground));
    assert_eq!(screen.cursor(), (6, 6));
}
