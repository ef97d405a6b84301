use super::*;
use crate::config::{Preselect, PreviewSource, StatusBarSource};
use crate::terminal::borders::BOX_ASCII;
use crate::testing::{xterm_table, ScriptedTerminal};

const DOWN: &[u8] = b"\x1bOB";
const END: &[u8] = b"\x1bOF";
const ENTER: &[u8] = b"\r";
const ESCAPE: &[u8] = b"\x1b";

fn menu(entries: &[&str], options: MenuOptions) -> TerminalMenu {
    TerminalMenu::new(entries.iter().copied(), options)
        .expect("menu")
        .with_capabilities(xterm_table())
        .with_box_chars(BOX_ASCII)
}

fn fruit() -> [&'static str; 3] {
    ["apple", "banana", "cherry"]
}

#[test]
fn arrow_keys_then_enter_pick_an_entry() {
    let mut menu = menu(&fruit(), MenuOptions::default());
    let mut term = ScriptedTerminal::new(40, 10).key(DOWN).key(b"j").key(ENTER);
    let picked = menu.run(&mut term).expect("run");
    assert_eq!(picked, Some(Selection::Single(2)));
    assert_eq!(menu.chosen_accept_key(), Some("enter"));
}

#[test]
fn shortcut_key_accepts_without_accept_key() {
    let mut menu = menu(&["[a] apple", "[b] banana"], MenuOptions::default());
    let mut term = ScriptedTerminal::new(40, 10).key(b"b");
    assert_eq!(menu.run(&mut term).expect("run"), Some(Selection::Single(1)));
    assert_eq!(menu.chosen_accept_key(), None);
}

#[test]
fn multi_select_collects_sorted_indices() {
    let options = MenuOptions {
        multi_select: true,
        ..MenuOptions::default()
    };
    let mut menu = menu(&fruit(), options);
    let mut term = ScriptedTerminal::new(40, 10)
        .key(b"j")
        .key(b"j")
        .key(b" ")
        .key(b"k")
        .key(b"k")
        .key(b"\t")
        .key(ENTER);
    assert_eq!(
        menu.run(&mut term).expect("run"),
        Some(Selection::Multiple(vec![0, 2]))
    );
}

#[test]
fn multi_select_accept_leaves_unvisited_cursor_entry_out() {
    let options = MenuOptions {
        multi_select: true,
        multi_select_select_on_accept: false,
        ..MenuOptions::default()
    };
    let mut menu = menu(&fruit(), options);
    let mut term = ScriptedTerminal::new(40, 10)
        .key(b" ")
        .key(DOWN)
        .key(DOWN)
        .key(b" ")
        .key(b"k")
        .key(ENTER);
    assert_eq!(
        menu.run(&mut term).expect("run"),
        Some(Selection::Multiple(vec![0, 2]))
    );
}

#[test]
fn multi_select_keeps_preselection_when_accepting_elsewhere() {
    let options = MenuOptions {
        multi_select: true,
        multi_select_select_on_accept: false,
        preselected_entries: vec![Preselect::Text("banana".into())],
        ..MenuOptions::default()
    };
    let mut menu = menu(&fruit(), options);
    let mut term = ScriptedTerminal::new(40, 10).key(ENTER);
    assert_eq!(
        menu.run(&mut term).expect("run"),
        Some(Selection::Multiple(vec![1]))
    );
}

#[test]
fn search_narrows_entries_before_accepting() {
    let mut menu = menu(&fruit(), MenuOptions::default());
    let mut term = ScriptedTerminal::new(40, 10).key(b"/").typed("an").key(ENTER);
    assert_eq!(menu.run(&mut term).expect("run"), Some(Selection::Single(1)));
    assert!(term.output_text().contains("/an"));
}

#[test]
fn escape_and_interrupt_return_nothing() {
    let mut menu = menu(&fruit(), MenuOptions::default());
    let mut term = ScriptedTerminal::new(40, 10).key(ESCAPE);
    assert_eq!(menu.run(&mut term).expect("run"), None);

    let mut term = ScriptedTerminal::new(40, 10).interrupt();
    assert_eq!(menu.run(&mut term).expect("run"), None);
    assert_eq!(menu.chosen_accept_key(), None);
}

#[test]
fn terminal_modes_are_entered_and_restored() {
    let mut menu = menu(&fruit(), MenuOptions::default());
    let mut term = ScriptedTerminal::new(40, 10).key(ENTER);
    menu.run(&mut term).expect("run");
    let output = term.output_text();
    assert!(output.starts_with("\x1b[?1h\x1b=\x1b[?25l"));
    assert!(output.ends_with("\x1b[?12l\x1b[?25h\x1b[?1l\x1b>"));
}

#[test]
fn clear_screen_wraps_the_session() {
    let options = MenuOptions {
        clear_screen: true,
        ..MenuOptions::default()
    };
    let mut menu = menu(&fruit(), options);
    let mut term = ScriptedTerminal::new(40, 10).key(ENTER);
    menu.run(&mut term).expect("run");
    let output = term.output_text();
    assert!(output.starts_with("\x1b[?1h\x1b=\x1b[?25l\x1b[H\x1b[2J"));
    assert!(output.ends_with("\x1b[?1l\x1b>\x1b[H\x1b[2J"));
}

#[test]
fn cursor_index_sets_the_starting_entry() {
    let options = MenuOptions {
        cursor_index: Some(2),
        ..MenuOptions::default()
    };
    let mut menu = menu(&fruit(), options);
    let mut term = ScriptedTerminal::new(40, 10).key(ENTER);
    assert_eq!(menu.run(&mut term).expect("run"), Some(Selection::Single(2)));
}

#[test]
fn resize_shrinks_viewport_and_keeps_cursor_reachable() {
    let entries: Vec<String> = (0..12).map(|n| format!("entry {n}")).collect();
    let mut menu = TerminalMenu::new(&entries, MenuOptions::default())
        .expect("menu")
        .with_capabilities(xterm_table());
    let mut term = ScriptedTerminal::new(40, 20)
        .resize(30, 4)
        .key(END)
        .key(ENTER);
    assert_eq!(menu.run(&mut term).expect("run"), Some(Selection::Single(11)));
    assert!(term.output_text().contains("entry 11"));
}

#[test]
fn title_status_and_preview_are_painted() {
    let options = MenuOptions {
        title: Some("Pick a fruit".into()),
        status_bar: Some(StatusBarSource::Text("hint line".into())),
        preview: Some(PreviewSource::Function(Arc::new(|entry: &str| {
            Ok::<_, anyhow::Error>(format!("about {entry}"))
        }))),
        ..MenuOptions::default()
    };
    let mut menu = menu(&fruit(), options);
    let mut term = ScriptedTerminal::new(40, 24).key(DOWN).key(ENTER);
    assert_eq!(menu.run(&mut term).expect("run"), Some(Selection::Single(1)));
    let output = term.output_text();
    assert!(output.contains("Pick a fruit"));
    assert!(output.contains("hint line"));
    assert!(output.contains("about apple"));
    assert!(output.contains("about banana"));
}

#[test]
fn each_run_starts_without_a_search() {
    let mut menu = menu(&fruit(), MenuOptions::default());
    let mut term = ScriptedTerminal::new(40, 10).key(b"/").typed("ch");
    assert_eq!(menu.run(&mut term).expect("run"), None);

    let mut term = ScriptedTerminal::new(40, 10).key(ENTER);
    assert_eq!(menu.run(&mut term).expect("run"), Some(Selection::Single(0)));
}

#[test]
fn construction_rejects_bad_input() {
    let empty: [&str; 0] = [];
    let err = TerminalMenu::new(empty, MenuOptions::default()).err();
    assert!(matches!(err, Some(MenuError::NoEntries)));

    let options = MenuOptions {
        cursor_index: Some(5),
        ..MenuOptions::default()
    };
    let err = TerminalMenu::new(fruit(), options).err();
    assert!(matches!(
        err,
        Some(MenuError::CursorIndexOutOfRange { index: 5, count: 3 })
    ));

    let options = MenuOptions {
        multi_select: true,
        preselected_entries: vec![Preselect::Text("durian".into())],
        ..MenuOptions::default()
    };
    let err = TerminalMenu::new(fruit(), options).err();
    assert!(matches!(err, Some(MenuError::UnknownMenuEntry(_))));
}

#[test]
fn entries_expose_parsed_fields() {
    let menu = menu(&["[x] exit|quit"], MenuOptions::default());
    let entry = &menu.entries()[0];
    assert_eq!(entry.display_text, "exit");
    assert_eq!(entry.shortcut_key, Some('x'));
    assert_eq!(entry.preview_argument(), "quit");
    assert_eq!(Selection::Single(3).indices(), vec![3]);
}
