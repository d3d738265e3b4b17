//! List navigation utilities for TUI screens.

use ratatui::widgets::ListState;

/// Extension trait for `ListState` that provides the navigation patterns
/// shared by the survey list, the results browser, and the builder.
pub trait ListStateExt {
    /// Move selection up by one item, staying at the first item.
    fn move_up(&mut self, total_items: usize);

    /// Move selection down by one item, staying at the last item.
    fn move_down(&mut self, total_items: usize);

    /// Move to the first item in the list.
    fn select_first_item(&mut self, total_items: usize);

    /// Move to the last item in the list.
    fn select_last_item(&mut self, total_items: usize);

    /// Get the currently selected index, initializing to 0 if none selected.
    fn selected_or_first(&mut self, total_items: usize) -> Option<usize>;
}

impl ListStateExt for ListState {
    fn move_up(&mut self, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.selected().unwrap_or(0);
        self.select(Some(current.saturating_sub(1)));
    }

    fn move_down(&mut self, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.selected().unwrap_or(0);
        self.select(Some((current + 1).min(total_items - 1)));
    }

    fn select_first_item(&mut self, total_items: usize) {
        if total_items > 0 {
            self.select(Some(0));
        }
    }

    fn select_last_item(&mut self, total_items: usize) {
        if total_items > 0 {
            self.select(Some(total_items - 1));
        }
    }

    fn selected_or_first(&mut self, total_items: usize) -> Option<usize> {
        if total_items == 0 {
            return None;
        }
        if self.selected().is_none() {
            self.select(Some(0));
        }
        self.selected()
    }
}
