use crate::{
    context::AppContext,
    event::{AppEvent, Event, EventHandler},
    list_view_state::ListViewState,
    menu::{Menu, MenuAction},
    poll::PollLoop,
    shutdown::termination_signal,
};
use ratatui::{
    DefaultTerminal,
    crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// How long informational status messages stay in the footer.
const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Message shown in the footer.
#[derive(Debug, Clone)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
    /// Informational messages expire, errors stay until replaced.
    expires_at: Option<Instant>,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
            expires_at: Some(Instant::now() + STATUS_TTL),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
            expires_at: None,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Application.
#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub help_visible: bool,
    pub events: EventHandler,
    pub context: AppContext,
    pub menu: Menu,
    pub selection: ListViewState,
    pub status: Option<Status>,
}

impl App {
    /// Constructs a new instance of [`App`].
    ///
    /// `clipboard_error` is shown in the footer when the clipboard could not be opened.
    pub fn new(context: AppContext, clipboard_error: Option<String>) -> Self {
        let menu = Menu::build(&context.store.snapshot(), context.config.display_width());
        let mut selection = ListViewState::new();
        selection.sync(&menu);

        Self {
            running: true,
            help_visible: false,
            events: EventHandler::new(),
            context,
            menu,
            selection,
            status: clipboard_error.map(|e| Status::error(format!("{} - history capture disabled", e))),
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let menu_events = self.events.sender();
        let poll_loop = PollLoop::spawn(&self.context, move |menu| {
            menu_events.send(Event::App(AppEvent::MenuRefreshed(menu))).is_ok()
        });

        let signal_events = self.events.sender();
        let mut signal_shutdown = self.context.shutdown.subscribe();
        tokio::spawn(async move {
            tokio::select! {
                _ = termination_signal() => {
                    let _ = signal_events.send(Event::App(AppEvent::Quit));
                }
                _ = signal_shutdown.cancelled() => {}
            }
        });

        info!("MultiClip started");
        let result = self.event_loop(&mut terminal).await;

        self.context.shutdown.trigger();
        poll_loop.join().await;
        self.context.store.flush();
        info!("MultiClip stopped");

        result
    }

    async fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        while self.running && !self.context.shutdown.is_triggered() {
            terminal.draw(|frame| frame.render_widget(&*self, frame.area()))?;
            match self.events.next().await? {
                Event::Tick => self.tick(),
                Event::Crossterm(event) => {
                    if let CrosstermEvent::Key(key_event) = event
                        && key_event.kind == KeyEventKind::Press
                    {
                        self.handle_key_events(key_event);
                    }
                }
                Event::App(app_event) => self.handle_app_event(app_event),
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers == KeyModifiers::CONTROL => {
                self.events.send(AppEvent::Quit)
            }
            KeyCode::Esc => self.events.send(AppEvent::Cancel),
            KeyCode::Char('h') | KeyCode::Char('?') => self.events.send(AppEvent::ToggleHelp),
            _ if self.help_visible => {}
            KeyCode::Up | KeyCode::Char('k') => self.events.send(AppEvent::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => self.events.send(AppEvent::MoveDown),
            KeyCode::Enter | KeyCode::Char(' ') => self.events.send(AppEvent::Confirm),
            KeyCode::Char('c') => self.events.send(AppEvent::ClearHistory),
            KeyCode::Char('q') => self.events.send(AppEvent::Quit),
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(number) = c.to_digit(10) {
                    self.events.send(AppEvent::ActivateEntry(number as usize))
                }
            }
            _ => {}
        }
    }

    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Quit => self.quit(),
            AppEvent::Cancel => {
                if self.help_visible {
                    self.help_visible = false;
                } else {
                    self.quit();
                }
            }
            AppEvent::ToggleHelp => self.help_visible = !self.help_visible,
            AppEvent::MoveUp => self.selection.move_up(&self.menu),
            AppEvent::MoveDown => self.selection.move_down(&self.menu),
            AppEvent::Confirm => {
                if let Some(action) = self.menu.action(self.selection.selected_index()) {
                    self.perform(action);
                }
            }
            AppEvent::ActivateEntry(number) => {
                if let Some(index) = self.menu.entry_position(number) {
                    self.selection.select(&self.menu, index);
                    if let Some(action) = self.menu.action(index) {
                        self.perform(action);
                    }
                }
            }
            AppEvent::ClearHistory => self.perform(MenuAction::ClearHistory),
            AppEvent::MenuRefreshed(menu) => self.set_menu(menu),
            AppEvent::CopyFinished(result) => {
                self.status = Some(match result {
                    Ok(()) => Status::info("Copied to clipboard"),
                    Err(e) => Status::error(e),
                });
            }
            AppEvent::HistoryCleared => {
                self.rebuild_menu();
                self.status = Some(Status::info("History cleared"));
            }
        }
    }

    /// Carries out a menu action.
    ///
    /// Clipboard and file work runs on the blocking pool; the result comes back as
    /// an [`AppEvent`].
    pub fn perform(&mut self, action: MenuAction) {
        match action {
            MenuAction::Copy(text) => self.copy_back(text),
            MenuAction::ClearHistory => {
                let store = Arc::clone(&self.context.store);
                let events = self.events.sender();
                tokio::task::spawn_blocking(move || {
                    store.clear();
                    let _ = events.send(Event::App(AppEvent::HistoryCleared));
                });
            }
            MenuAction::Quit => self.quit(),
        }
    }

    fn copy_back(&mut self, text: String) {
        let Some(clipboard) = &self.context.clipboard else {
            self.status = Some(Status::error("Clipboard unavailable"));
            return;
        };

        let store = Arc::clone(&self.context.store);
        let clipboard = Arc::clone(clipboard);
        let events = self.events.sender();
        tokio::task::spawn_blocking(move || {
            let result = store
                .set_and_record(&mut **clipboard.lock(), &text)
                .map_err(|e| {
                    warn!("Failed to copy entry back to clipboard: {}", e);
                    e.to_string()
                });
            let _ = events.send(Event::App(AppEvent::CopyFinished(result)));
        });
    }

    fn rebuild_menu(&mut self) {
        let menu = Menu::build(&self.context.store.snapshot(), self.context.config.display_width());
        self.set_menu(menu);
    }

    fn set_menu(&mut self, menu: Menu) {
        self.menu = menu;
        self.selection.sync(&self.menu);
    }

    /// Handles the tick event of the terminal.
    ///
    /// Expires informational status messages.
    pub fn tick(&mut self) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.is_expired(Instant::now()))
        {
            self.status = None;
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
