use multiclip::clipboard::{ClipboardAccess, ClipboardError, shared};
use multiclip::history::HistoryStore;
use multiclip::menu::{Menu, MenuAction, MenuItem};
use multiclip::persistence::HistoryFile;
use multiclip::poll::poll_once;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Default)]
struct MemoryClipboard {
    text: Option<String>,
}

impl ClipboardAccess for MemoryClipboard {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        Ok(self.text.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text = Some(text.to_string());
        Ok(())
    }
}

fn copy(clipboard: &multiclip::clipboard::SharedClipboard, text: &str) {
    clipboard.lock().write_text(text).unwrap();
}

#[test]
fn copies_are_recorded_most_recent_first_and_bounded() {
    let store = HistoryStore::default();
    let clipboard = shared(MemoryClipboard::default());

    for text in ["one", "two", "three", "four", "five", "six"] {
        copy(&clipboard, text);
        assert!(poll_once(&store, &clipboard).unwrap());
    }

    assert_eq!(store.snapshot(), vec!["six", "five", "four", "three", "two"]);
}

#[test]
fn recopying_an_older_value_moves_it_to_the_front() {
    let store = HistoryStore::default();
    let clipboard = shared(MemoryClipboard::default());

    for text in ["a", "b", "a"] {
        copy(&clipboard, text);
        poll_once(&store, &clipboard).unwrap();
    }

    assert_eq!(store.snapshot(), vec!["a", "b"]);
}

#[test]
fn activating_a_menu_entry_copies_without_reordering() {
    let store = HistoryStore::default();
    let clipboard = shared(MemoryClipboard::default());
    for text in ["x", "y", "z"] {
        copy(&clipboard, text);
        poll_once(&store, &clipboard).unwrap();
    }

    let menu = Menu::build(&store.snapshot(), 50);
    let index = menu.entry_position(3).unwrap();
    let Some(MenuAction::Copy(text)) = menu.action(index) else {
        panic!("entry row should copy");
    };
    assert_eq!(text, "x");

    store.set_and_record(&mut **clipboard.lock(), &text).unwrap();
    assert!(!poll_once(&store, &clipboard).unwrap());
    assert_eq!(clipboard.lock().read_text().unwrap().as_deref(), Some("x"));
    assert_eq!(store.snapshot(), vec!["z", "y", "x"]);
}

#[test]
fn clearing_shows_placeholder_and_keeps_current_clipboard_out() {
    let store = HistoryStore::default();
    let clipboard = shared(MemoryClipboard::default());
    copy(&clipboard, "kept on clipboard");
    poll_once(&store, &clipboard).unwrap();

    store.clear();
    assert!(!poll_once(&store, &clipboard).unwrap());

    let menu = Menu::build(&store.snapshot(), 50);
    assert_eq!(menu.items()[0], MenuItem::Placeholder);
    assert_eq!(menu.entry_count(), 0);
}

#[test]
fn history_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");

    {
        let store = HistoryStore::default().with_file(HistoryFile::new(&path));
        store.insert("first");
        store.insert("second");
    }

    let json = std::fs::read_to_string(&path).unwrap();
    let saved: Vec<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(saved, vec!["second", "first"]);

    let store = HistoryStore::default().with_file(HistoryFile::new(&path));
    assert_eq!(store.snapshot(), vec!["second", "first"]);
}

#[test]
fn corrupt_history_file_starts_empty_and_is_repaired() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = HistoryStore::default().with_file(HistoryFile::new(&path));
    assert!(store.is_empty());

    store.insert("fresh");
    let saved: Vec<String> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, vec!["fresh"]);
}

#[test]
fn concurrent_writers_and_readers_keep_history_consistent() {
    let store = Arc::new(HistoryStore::default());

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..200 {
                    store.insert(&format!("w{}-{}", w, i % 7));
                    if i % 50 == 0 {
                        store.clear();
                    }
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..2)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..500 {
                    let snapshot = store.snapshot();
                    assert!(snapshot.len() <= store.capacity());
                    let mut unique = snapshot.clone();
                    unique.sort();
                    unique.dedup();
                    assert_eq!(unique.len(), snapshot.len());
                    assert!(snapshot.iter().all(|entry| !entry.is_empty()));
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    let snapshot = store.snapshot();
    assert!(snapshot.len() <= 5);
}
