use crate::ui::colors::{HELP_BG, HELP_BORDER_FG, HELP_HEADER_FG};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget},
};

/// Width and height of the help popup.
pub const HELP_SIZE: (u16, u16) = (44, 16);

/// Calculates a centered popup area within the given rect.
///
/// The popup will be centered with at least 2 characters margin on all sides.
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let min_margin = 2;

    let max_width = area.width.saturating_sub(2 * min_margin);
    let max_height = area.height.saturating_sub(2 * min_margin);

    let popup_width = width.min(max_width);
    let popup_height = height.min(max_height);

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x,
        y,
        width: popup_width,
        height: popup_height,
    }
}

fn header(text: &str) -> Line<'_> {
    Line::from(text).style(
        Style::default()
            .fg(HELP_HEADER_FG)
            .add_modifier(Modifier::BOLD),
    )
}

pub(super) fn render_help_popup(area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);

    let help_text = vec![
        header("History"),
        Line::from("Up/Down, k/j  Navigate"),
        Line::from("Enter/Space   Activate row"),
        Line::from("1-9           Copy entry back"),
        Line::from("c             Clear history"),
        Line::from(""),
        header("General"),
        Line::from("h/?           Toggle help"),
        Line::from("Esc           Close help / Quit"),
        Line::from("q, Ctrl-C     Quit"),
    ];

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(HELP_BORDER_FG))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(HELP_BG));

    Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = popup_area(area, 44, 16);
        assert_eq!(popup, Rect::new(28, 12, 44, 16));
    }

    #[test]
    fn test_popup_keeps_margin_on_small_area() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = popup_area(area, 44, 16);
        assert_eq!(popup.width, 16);
        assert_eq!(popup.height, 6);
        assert_eq!((popup.x, popup.y), (2, 2));
    }
}
