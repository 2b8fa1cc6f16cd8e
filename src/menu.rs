//! Menu rows derived from a history snapshot.

/// Default maximum label width, in characters.
pub const DEFAULT_DISPLAY_WIDTH: usize = 50;
/// Shown instead of entries when the history is empty.
pub const EMPTY_PLACEHOLDER: &str = "No clipboard history";

const ELLIPSIS: &str = "...";

/// A single row of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    /// A history entry. `number` starts at 1 for the most recent entry.
    Entry {
        number: usize,
        label: String,
        text: String,
    },
    /// Disabled row shown when there is no history.
    Placeholder,
    Separator,
    ClearHistory,
    Quit,
}

impl MenuItem {
    pub fn is_selectable(&self) -> bool {
        !matches!(self, MenuItem::Placeholder | MenuItem::Separator)
    }

    /// Text shown for this row.
    pub fn title(&self) -> String {
        match self {
            MenuItem::Entry { number, label, .. } => format!("{}. {}", number, label),
            MenuItem::Placeholder => EMPTY_PLACEHOLDER.to_string(),
            MenuItem::Separator => String::new(),
            MenuItem::ClearHistory => "Clear History".to_string(),
            MenuItem::Quit => "Quit".to_string(),
        }
    }
}

/// What activating a menu row does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Copy the entry text back to the clipboard.
    Copy(String),
    ClearHistory,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Default for Menu {
    fn default() -> Self {
        Self::build(&[], DEFAULT_DISPLAY_WIDTH)
    }
}

impl Menu {
    /// Builds the menu for `snapshot` (most recent first).
    pub fn build(snapshot: &[String], display_width: usize) -> Self {
        let mut items: Vec<MenuItem> = snapshot
            .iter()
            .enumerate()
            .map(|(i, text)| MenuItem::Entry {
                number: i + 1,
                label: display_label(text, display_width),
                text: text.clone(),
            })
            .collect();

        if items.is_empty() {
            items.push(MenuItem::Placeholder);
        }
        items.push(MenuItem::Separator);
        items.push(MenuItem::ClearHistory);
        items.push(MenuItem::Quit);

        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of history entries in the menu.
    pub fn entry_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, MenuItem::Entry { .. }))
            .count()
    }

    pub fn is_selectable(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(MenuItem::is_selectable)
    }

    /// The action behind the row at `index`, if that row can be activated.
    pub fn action(&self, index: usize) -> Option<MenuAction> {
        match self.items.get(index)? {
            MenuItem::Entry { text, .. } => Some(MenuAction::Copy(text.clone())),
            MenuItem::ClearHistory => Some(MenuAction::ClearHistory),
            MenuItem::Quit => Some(MenuAction::Quit),
            MenuItem::Placeholder | MenuItem::Separator => None,
        }
    }

    /// Row index of the entry labelled with `number`.
    pub fn entry_position(&self, number: usize) -> Option<usize> {
        self.items
            .iter()
            .position(|item| matches!(item, MenuItem::Entry { number: n, .. } if *n == number))
    }
}

/// Shortens `text` to at most `width` characters for display, replacing line
/// breaks and tabs with spaces.
pub fn display_label(text: &str, width: usize) -> String {
    let width = width.max(ELLIPSIS.len() + 1);

    let shortened: String = if text.chars().count() > width {
        text.chars()
            .take(width - ELLIPSIS.len())
            .chain(ELLIPSIS.chars())
            .collect()
    } else {
        text.to_string()
    };

    shortened
        .chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect()
}
