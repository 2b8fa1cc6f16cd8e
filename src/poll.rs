use crate::clipboard::{ClipboardError, SharedClipboard};
use crate::context::AppContext;
use crate::history::HistoryStore;
use crate::menu::Menu;
use crate::shutdown::ShutdownSignal;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

/// The two periodic tasks: clipboard watching and menu refreshing.
#[derive(Debug)]
pub struct PollLoop {
    watcher: Option<JoinHandle<()>>,
    refresher: JoinHandle<()>,
}

impl PollLoop {
    /// Spawns both tasks. Rebuilt menus are handed to `publish`, which returns
    /// `false` once nobody is listening anymore.
    ///
    /// Without a clipboard only the menu refresh runs.
    pub fn spawn<F>(context: &AppContext, publish: F) -> Self
    where
        F: FnMut(Menu) -> bool + Send + 'static,
    {
        let watcher = context.clipboard.as_ref().map(|clipboard| {
            tokio::spawn(watch_clipboard(
                Arc::clone(&context.store),
                Arc::clone(clipboard),
                context.config.poll_interval(),
                context.shutdown.subscribe(),
            ))
        });

        let refresher = tokio::spawn(refresh_menu(
            Arc::clone(&context.store),
            context.config.display_width(),
            context.config.menu_refresh_interval(),
            context.shutdown.subscribe(),
            publish,
        ));

        Self { watcher, refresher }
    }

    /// Waits for both tasks to finish. Call after triggering shutdown.
    pub async fn join(self) {
        if let Some(watcher) = self.watcher
            && let Err(e) = watcher.await
        {
            warn!("Clipboard watcher ended abnormally: {}", e);
        }
        if let Err(e) = self.refresher.await {
            warn!("Menu refresher ended abnormally: {}", e);
        }
    }
}

/// Reads the clipboard once and records its text. Returns whether history changed.
///
/// The clipboard stays locked until the text is recorded, so a copy-back through
/// [`HistoryStore::set_and_record`] cannot land between the read and the insert.
pub fn poll_once(store: &HistoryStore, clipboard: &SharedClipboard) -> Result<bool, ClipboardError> {
    let mut clipboard = clipboard.lock();
    let text = clipboard.read_text()?;
    Ok(text.is_some_and(|text| !text.is_empty() && store.insert(&text)))
}

/// Samples the clipboard every `period` until shutdown.
///
/// Each sample runs on the blocking pool; a failed or panicking sample is logged
/// and the next tick carries on.
pub async fn watch_clipboard(
    store: Arc<HistoryStore>,
    clipboard: SharedClipboard,
    period: Duration,
    mut shutdown: ShutdownSignal,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!("Clipboard monitoring started");

    loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                break;
            }

            _ = ticker.tick() => {
                let store = Arc::clone(&store);
                let clipboard = Arc::clone(&clipboard);
                match tokio::task::spawn_blocking(move || poll_once(&store, &clipboard)).await {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => debug!("Clipboard read failed: {}", e),
                    Err(e) => warn!("Clipboard sample aborted: {}", e),
                }
            }
        }
    }

    info!("Clipboard monitoring stopped");
}

/// Rebuilds the menu from history every `period` until shutdown.
///
/// Publishes only when the history changed since the last published menu.
pub async fn refresh_menu<F>(
    store: Arc<HistoryStore>,
    display_width: usize,
    period: Duration,
    mut shutdown: ShutdownSignal,
    mut publish: F,
) where
    F: FnMut(Menu) -> bool,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut published: Option<Vec<String>> = None;

    loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                break;
            }

            _ = ticker.tick() => {
                let snapshot = store.snapshot();
                if published.as_ref() != Some(&snapshot) {
                    match panic::catch_unwind(AssertUnwindSafe(|| Menu::build(&snapshot, display_width))) {
                        Ok(menu) => {
                            if !publish(menu) {
                                break;
                            }
                            published = Some(snapshot);
                        }
                        Err(_) => warn!("Menu rebuild failed, retrying on next tick"),
                    }
                }
            }
        }
    }

    debug!("Menu refresh stopped");
}
