use crate::clipboard::{ClipboardAccess, ClipboardError};
use crate::persistence::HistoryFile;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Default number of entries kept in history.
pub const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Default)]
struct HistoryState {
    /// Entries, most recent first.
    entries: Vec<String>,
    /// Text most recently inserted or written back to the clipboard by us.
    last_observed: Option<String>,
    /// Bumped on every mutation, used to order snapshot writes.
    generation: u64,
}

/// Bounded, deduplicating clipboard history shared between tasks.
///
/// Reads go through [`HistoryStore::snapshot`] and take the shared side of the lock,
/// mutations take the exclusive side. Snapshots are written to the history file
/// after the lock is released.
#[derive(Debug)]
pub struct HistoryStore {
    state: RwLock<HistoryState>,
    capacity: usize,
    max_entry_chars: Option<usize>,
    file: Option<HistoryFile>,
    /// Generation of the last snapshot successfully written to `file`.
    written: Mutex<u64>,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryStore {
    /// Creates an empty in-memory history holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            state: RwLock::new(HistoryState::default()),
            capacity: capacity.max(1),
            max_entry_chars: None,
            file: None,
            written: Mutex::new(0),
        }
    }

    /// Rejects candidate text longer than `max_chars` characters (after trimming).
    pub fn with_max_entry_chars(mut self, max_chars: Option<usize>) -> Self {
        self.max_entry_chars = max_chars;
        self
    }

    /// Hydrates the history from `file` and persists every later mutation to it.
    pub fn with_file(mut self, file: HistoryFile) -> Self {
        let entries = file.load();
        if !entries.is_empty() {
            info!("Loaded {} history entries from {:?}", entries.len(), file.path());
        }
        self.restore(entries);
        self.file = Some(file);
        self
    }

    /// Replaces the history with `entries` (most recent first) without persisting.
    ///
    /// The input is treated as untrusted: values are trimmed, blank, duplicate and
    /// over-long values are dropped and the result is cut to capacity.
    pub fn restore(&self, entries: Vec<String>) {
        let mut restored: Vec<String> = Vec::with_capacity(self.capacity);
        for entry in entries {
            let Some(text) = self.normalize(&entry) else {
                continue;
            };
            if restored.iter().any(|existing| existing == text) {
                continue;
            }
            restored.push(text.to_string());
            if restored.len() == self.capacity {
                break;
            }
        }

        let mut state = self.state.write();
        state.entries = restored;
        state.generation += 1;
    }

    /// Records text observed on the clipboard.
    ///
    /// Returns `true` when the history changed. Blank text, over-long text and text
    /// equal to the last observed value are ignored. Text already present is moved
    /// to the front instead of being duplicated.
    pub fn insert(&self, text: &str) -> bool {
        let Some(text) = self.normalize(text) else {
            return false;
        };

        let (generation, snapshot) = {
            let mut state = self.state.write();
            if state.last_observed.as_deref() == Some(text) {
                return false;
            }

            if let Some(position) = state.entries.iter().position(|entry| entry == text) {
                state.entries.remove(position);
            }
            state.entries.insert(0, text.to_string());
            state.entries.truncate(self.capacity);
            state.last_observed = Some(text.to_string());
            state.generation += 1;

            (state.generation, state.entries.clone())
        };

        debug!("Recorded clipboard entry ({} chars)", text.chars().count());
        self.persist(generation, &snapshot);
        true
    }

    /// Returns an independent copy of the entries, most recent first.
    pub fn snapshot(&self) -> Vec<String> {
        self.state.read().entries.clone()
    }

    /// Removes every entry. The last observed value is kept so the text still on
    /// the clipboard is not recorded again right after clearing.
    pub fn clear(&self) {
        let generation = {
            let mut state = self.state.write();
            state.entries.clear();
            state.generation += 1;
            state.generation
        };

        info!("Cleared clipboard history");
        self.persist(generation, &[]);
    }

    /// Writes `text` to the clipboard and marks it as observed so the next poll does
    /// not record it again. History order is left untouched.
    pub fn set_and_record(
        &self,
        clipboard: &mut dyn ClipboardAccess,
        text: &str,
    ) -> Result<(), ClipboardError> {
        let text = text.trim();
        let previous = self.state.write().last_observed.replace(text.to_string());

        if let Err(e) = clipboard.write_text(text) {
            let mut state = self.state.write();
            if state.last_observed.as_deref() == Some(text) {
                state.last_observed = previous;
            }
            return Err(e);
        }

        debug!("Copied history entry back to clipboard");
        Ok(())
    }

    /// Writes the current snapshot to the history file, if any.
    pub fn flush(&self) {
        let (generation, snapshot) = {
            let state = self.state.read();
            (state.generation, state.entries.clone())
        };
        self.persist(generation, &snapshot);
    }

    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The text most recently recorded or copied back by this process.
    pub fn last_observed(&self) -> Option<String> {
        self.state.read().last_observed.clone()
    }

    /// Trims `text` and checks it against the acceptance rules.
    fn normalize<'a>(&self, text: &'a str) -> Option<&'a str> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Some(max_chars) = self.max_entry_chars
            && text.chars().count() > max_chars
        {
            return None;
        }
        Some(text)
    }

    fn persist(&self, generation: u64, snapshot: &[String]) {
        let Some(file) = &self.file else {
            return;
        };

        let mut written = self.written.lock();
        // a newer snapshot is already on disk
        if generation < *written {
            return;
        }

        match file.save(snapshot) {
            Ok(()) => *written = generation,
            Err(e) => warn!("Failed to save history to {:?}: {}", file.path(), e),
        }
    }
}
