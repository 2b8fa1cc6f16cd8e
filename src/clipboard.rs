use parking_lot::Mutex;
use std::sync::{Arc, mpsc};
use std::thread;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The clipboard could not be opened or its worker is gone.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    /// A single read or write failed.
    #[error("clipboard operation failed: {0}")]
    Operation(String),
}

/// Text access to the OS clipboard.
pub trait ClipboardAccess: Send {
    /// Returns the current clipboard text, or `None` when it holds no text.
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError>;

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard handle shared between the poll loop and the UI.
pub type SharedClipboard = Arc<Mutex<Box<dyn ClipboardAccess>>>;

/// Wraps any clipboard implementation into a [`SharedClipboard`].
pub fn shared(clipboard: impl ClipboardAccess + 'static) -> SharedClipboard {
    Arc::new(Mutex::new(Box::new(clipboard)))
}

enum Request {
    Read(mpsc::Sender<Result<Option<String>, ClipboardError>>),
    Write(String, mpsc::Sender<Result<(), ClipboardError>>),
}

/// System clipboard backed by arboard.
///
/// The arboard handle lives on its own thread for the lifetime of the process, so
/// text we write stays owned by us on platforms where the owner must stay alive.
/// The thread exits when every handle is dropped.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    requests: mpsc::Sender<Request>,
}

impl SystemClipboard {
    /// Opens the system clipboard. Fails once if the platform has no usable clipboard.
    pub fn spawn() -> Result<Self, ClipboardError> {
        let (requests, request_rx) = mpsc::channel::<Request>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), ClipboardError>>();

        thread::Builder::new()
            .name("clipboard".to_string())
            .spawn(move || {
                let mut clipboard = match arboard::Clipboard::new() {
                    Ok(clipboard) => {
                        let _ = ready_tx.send(Ok(()));
                        clipboard
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(ClipboardError::Unavailable(e.to_string())));
                        return;
                    }
                };

                for request in request_rx {
                    match request {
                        Request::Read(reply) => {
                            let result = match clipboard.get_text() {
                                Ok(text) => Ok(Some(text)),
                                Err(arboard::Error::ContentNotAvailable) => Ok(None),
                                Err(e) => Err(ClipboardError::Operation(e.to_string())),
                            };
                            let _ = reply.send(result);
                        }
                        Request::Write(text, reply) => {
                            let result = clipboard
                                .set_text(text)
                                .map_err(|e| ClipboardError::Operation(e.to_string()));
                            let _ = reply.send(result);
                        }
                    }
                }
                debug!("Clipboard worker stopped");
            })
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        ready_rx
            .recv()
            .map_err(|_| ClipboardError::Unavailable("clipboard worker exited".to_string()))??;

        Ok(Self { requests })
    }

    fn call<T>(
        &self,
        request: impl FnOnce(mpsc::Sender<Result<T, ClipboardError>>) -> Request,
    ) -> Result<T, ClipboardError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.requests
            .send(request(reply_tx))
            .map_err(|_| ClipboardError::Unavailable("clipboard worker exited".to_string()))?;
        reply_rx
            .recv()
            .map_err(|_| ClipboardError::Unavailable("clipboard worker exited".to_string()))?
    }
}

impl ClipboardAccess for SystemClipboard {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        self.call(Request::Read)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.call(|reply| Request::Write(text.to_string(), reply))
    }
}
