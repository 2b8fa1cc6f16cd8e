use crate::menu::Menu;
use std::cell::Cell;

/// Cursor over the menu rows.
///
/// Only selectable rows can hold the cursor; movement wraps around and skips
/// placeholders and separators. Keeps a viewport offset so long menus scroll.
#[derive(Debug, Default)]
pub struct ListViewState {
    /// Currently selected row index.
    selected_index: usize,
    /// First visible row.
    viewport_offset: usize,
    /// Total number of rows.
    item_count: usize,
    /// Last rendered viewport height. Set in UI rendering, needs interior mutability.
    viewport_height: Cell<usize>,
}

impl ListViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn viewport_offset(&self) -> usize {
        self.viewport_offset
    }

    /// Sets the viewport height (called from UI rendering).
    pub fn set_viewport_height(&self, height: usize) {
        self.viewport_height.set(height);
    }

    /// Adopts a rebuilt menu, keeping the cursor on the same row index when it is
    /// still selectable and moving it to the next selectable row otherwise.
    pub fn sync(&mut self, menu: &Menu) {
        self.item_count = menu.len();
        if self.item_count == 0 {
            self.selected_index = 0;
            self.viewport_offset = 0;
            return;
        }

        self.selected_index = self.selected_index.min(self.item_count - 1);
        if !menu.is_selectable(self.selected_index) {
            self.step(menu, true);
        }
        self.adjust_viewport();
    }

    /// Moves to the previous selectable row, wrapping to the end.
    pub fn move_up(&mut self, menu: &Menu) {
        self.step(menu, false);
        self.adjust_viewport();
    }

    /// Moves to the next selectable row, wrapping to the start.
    pub fn move_down(&mut self, menu: &Menu) {
        self.step(menu, true);
        self.adjust_viewport();
    }

    /// Selects `index` if that row is selectable.
    pub fn select(&mut self, menu: &Menu, index: usize) {
        if menu.is_selectable(index) {
            self.selected_index = index;
            self.adjust_viewport();
        }
    }

    fn step(&mut self, menu: &Menu, forward: bool) {
        let count = menu.len();
        if count == 0 {
            return;
        }

        let mut index = self.selected_index.min(count - 1);
        for _ in 0..count {
            index = if forward {
                (index + 1) % count
            } else if index == 0 {
                count - 1
            } else {
                index - 1
            };
            if menu.is_selectable(index) {
                self.selected_index = index;
                return;
            }
        }
    }

    /// Adjusts the viewport offset to keep the selected row visible.
    fn adjust_viewport(&mut self) {
        if self.item_count == 0 {
            self.viewport_offset = 0;
            return;
        }

        let viewport_height = self.viewport_height.get();
        if viewport_height == 0 {
            return;
        }

        if self.selected_index < self.viewport_offset {
            self.viewport_offset = self.selected_index;
        }

        let bottom_threshold = self.viewport_offset + viewport_height.saturating_sub(1);
        if self.selected_index > bottom_threshold {
            self.viewport_offset = self.selected_index + 1 - viewport_height;
        }

        let max_offset = self.item_count.saturating_sub(viewport_height);
        self.viewport_offset = self.viewport_offset.min(max_offset);
    }
}
