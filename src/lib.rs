pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod context;
pub mod event;
pub mod history;
pub mod list_view_state;
pub mod logging;
pub mod menu;
pub mod persistence;
pub mod poll;
pub mod shutdown;
pub mod ui;
pub mod version;

shadow_rs::shadow!(build);
