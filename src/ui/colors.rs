use ratatui::style::Color;

/// Symbol used to indicate the selected row.
pub const RIGHT_ARROW: &str = "▶ ";

/// Common colors
pub const GRAY_COLOR: Color = Color::Indexed(237);
pub const BLACK_COLOR: Color = Color::Indexed(234);
pub const WHITE_COLOR: Color = Color::White;

// Title and footer
pub const BAR_BG: Color = GRAY_COLOR;
pub const KEY_HINT_FG: Color = Color::Gray;

// Menu
pub const MENU_BORDER_FG: Color = Color::Indexed(108);
pub const ENTRY_NUMBER_FG: Color = Color::Yellow;
pub const PLACEHOLDER_FG: Color = Color::DarkGray;
pub const SEPARATOR_FG: Color = Color::DarkGray;
pub const SELECTION_BG: Color = Color::LightBlue;
pub const SELECTION_FG: Color = BLACK_COLOR;

// Help
pub const HELP_BG: Color = Color::Blue;
pub const HELP_BORDER_FG: Color = Color::White;
pub const HELP_HEADER_FG: Color = Color::Yellow;

// Messages
pub const MESSAGE_INFO_FG: Color = Color::Green;
pub const MESSAGE_ERROR_FG: Color = Color::Red;
