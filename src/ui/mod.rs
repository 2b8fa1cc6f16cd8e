pub mod colors;
mod popups;

use crate::app::{App, StatusKind};
use crate::menu::MenuItem;
use colors::{
    BAR_BG, ENTRY_NUMBER_FG, KEY_HINT_FG, MENU_BORDER_FG, MESSAGE_ERROR_FG, MESSAGE_INFO_FG, PLACEHOLDER_FG,
    RIGHT_ARROW, SELECTION_BG, SELECTION_FG, SEPARATOR_FG, WHITE_COLOR,
};
pub use popups::popup_area;
use popups::{HELP_SIZE, render_help_popup};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

const KEY_HINTS: &str = "Enter:Copy  1-9:Pick  c:Clear  h:Help  q:Quit";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [top, middle, bottom] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        // Title
        let title_middle = Line::from(" MultiClip ").centered();
        let title_right = Line::from(format!("v{}", env!("CARGO_PKG_VERSION")))
            .right_aligned()
            .style(Style::default().fg(WHITE_COLOR));
        Block::default()
            .title_bottom(title_middle)
            .title_bottom(title_right)
            .style(Style::default().bg(BAR_BG))
            .render(top, buf);

        self.render_menu(middle, buf);
        self.render_footer(bottom, buf);

        if self.help_visible {
            let (w, h) = HELP_SIZE;
            render_help_popup(popup_area(area, w, h), buf);
        }
    }
}

impl App {
    fn render_menu(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Line::from(" History ").left_aligned())
            .title(
                Line::from(format!(
                    " {}/{} ",
                    self.menu.entry_count(),
                    self.context.store.capacity()
                ))
                .right_aligned(),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(MENU_BORDER_FG));

        let inner = block.inner(area);
        self.selection.set_viewport_height(inner.height as usize);

        let separator_width = inner.width.saturating_sub(RIGHT_ARROW.chars().count() as u16) as usize;
        let items: Vec<ListItem> = self
            .menu
            .items()
            .iter()
            .map(|item| ListItem::new(menu_line(item, separator_width)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_symbol(RIGHT_ARROW)
            .highlight_spacing(ratatui::widgets::HighlightSpacing::Always)
            .highlight_style(
                Style::default()
                    .bg(SELECTION_BG)
                    .fg(SELECTION_FG)
                    .add_modifier(Modifier::BOLD),
            );

        let mut state = ListState::default().with_offset(self.selection.viewport_offset());
        if self.menu.is_selectable(self.selection.selected_index()) {
            state.select(Some(self.selection.selected_index()));
        }
        StatefulWidget::render(list, area, buf, &mut state);
    }

    fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let left = match &self.status {
            Some(status) => {
                let fg = match status.kind {
                    StatusKind::Info => MESSAGE_INFO_FG,
                    StatusKind::Error => MESSAGE_ERROR_FG,
                };
                Line::from(format!(" {}", status.message)).style(Style::default().fg(fg))
            }
            None => Line::from(format!(" {}", KEY_HINTS)).style(Style::default().fg(KEY_HINT_FG)),
        };

        Block::default()
            .title_bottom(left.left_aligned())
            .style(Style::default().bg(BAR_BG))
            .render(area, buf);
    }
}

fn menu_line(item: &MenuItem, separator_width: usize) -> Line<'static> {
    match item {
        MenuItem::Entry { number, label, .. } => Line::from(vec![
            Span::styled(format!("{}. ", number), Style::default().fg(ENTRY_NUMBER_FG)),
            Span::raw(label.clone()),
        ]),
        MenuItem::Placeholder => Line::from(item.title()).style(
            Style::default()
                .fg(PLACEHOLDER_FG)
                .add_modifier(Modifier::ITALIC),
        ),
        MenuItem::Separator => Line::from("─".repeat(separator_width)).style(Style::default().fg(SEPARATOR_FG)),
        MenuItem::ClearHistory | MenuItem::Quit => Line::from(item.title()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::context::AppContext;
    use crate::history::HistoryStore;

    fn rendered(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn app_with(entries: &[&str]) -> App {
        let store = HistoryStore::default();
        for entry in entries.iter().rev() {
            store.insert(entry);
        }
        App::new(AppContext::with_store(Config::default(), store, None), None)
    }

    #[tokio::test]
    async fn test_renders_entries_and_count() {
        let app = app_with(&["alpha", "beta"]);
        let screen = rendered(&app, 60, 12);

        assert!(screen.contains("MultiClip"));
        assert!(screen.contains("1. alpha"));
        assert!(screen.contains("2. beta"));
        assert!(screen.contains("Clear History"));
        assert!(screen.contains(" 2/5 "));
    }

    #[tokio::test]
    async fn test_renders_placeholder_when_empty() {
        let app = app_with(&[]);
        let screen = rendered(&app, 60, 12);
        assert!(screen.contains("No clipboard history"));
        assert!(screen.contains("Quit"));
    }

    #[tokio::test]
    async fn test_footer_shows_clipboard_error() {
        let context = AppContext::with_store(Config::default(), HistoryStore::default(), None);
        let app = App::new(context, Some("no display".to_string()));
        let screen = rendered(&app, 80, 12);
        assert!(screen.contains("no display"));
    }

    #[tokio::test]
    async fn test_help_popup_rendered_when_visible() {
        let mut app = app_with(&[]);
        assert!(!rendered(&app, 60, 24).contains("Toggle help"));
        app.help_visible = true;
        assert!(rendered(&app, 60, 24).contains("Toggle help"));
    }
}
