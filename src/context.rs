use crate::clipboard::SharedClipboard;
use crate::config::Config;
use crate::history::HistoryStore;
use crate::persistence::HistoryFile;
use crate::shutdown::Shutdown;
use std::fmt;
use std::sync::Arc;

/// Everything the tasks share, built once at startup and cloned into each task.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub store: Arc<HistoryStore>,
    /// `None` when the system clipboard could not be opened.
    pub clipboard: Option<SharedClipboard>,
    pub shutdown: Shutdown,
}

impl AppContext {
    /// Builds the history store described by `config` and hydrates it from the
    /// history file.
    pub fn new(config: Config, clipboard: Option<SharedClipboard>) -> Self {
        let mut store =
            HistoryStore::new(config.capacity()).with_max_entry_chars(config.max_entry_chars);
        if let Some(path) = config.history_file_path() {
            store = store.with_file(HistoryFile::new(path));
        }

        Self::with_store(config, store, clipboard)
    }

    pub fn with_store(
        config: Config,
        store: HistoryStore,
        clipboard: Option<SharedClipboard>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            clipboard,
            shutdown: Shutdown::new(),
        }
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("clipboard", &self.clipboard.is_some())
            .field("shutdown", &self.shutdown)
            .finish()
    }
}
