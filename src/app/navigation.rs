use crate::app::{AppState, RowPosition};

impl AppState {
    pub fn move_cursor(&mut self, delta_row: isize) {
        let last_row = self.row_count().saturating_sub(1);
        let new_row = (self.selected_row as isize + delta_row).max(0) as usize;

        self.selected_row = new_row.min(last_row);
        self.handle_scrolling();
    }

    pub fn handle_scrolling(&mut self) {
        let visible_rows = self.visible_rows.max(1);

        if self.selected_row < self.start_row {
            self.start_row = self.selected_row;
        } else if self.selected_row >= self.start_row + visible_rows {
            self.start_row = self.selected_row + 1 - visible_rows;
        }
    }

    pub fn jump_to_first_row(&mut self) {
        self.selected_row = 0;
        self.handle_scrolling();
        self.add_notification("Jumped to first row");
    }

    pub fn jump_to_last_row(&mut self) {
        self.selected_row = self.row_count().saturating_sub(1);
        self.handle_scrolling();
        self.add_notification("Jumped to last row");
    }

    pub fn next_view(&mut self) {
        if self.views.is_empty() {
            return;
        }
        self.switch_view((self.current_view + 1) % self.views.len());
    }

    pub fn prev_view(&mut self) {
        if self.views.is_empty() {
            return;
        }
        self.switch_view((self.current_view + self.views.len() - 1) % self.views.len());
    }

    fn switch_view(&mut self, index: usize) {
        if index == self.current_view {
            return;
        }

        self.view_positions[self.current_view] = RowPosition {
            selected: self.selected_row,
            start: self.start_row,
        };

        let position = self.view_positions[index];
        self.current_view = index;
        self.selected_row = position.selected;
        self.start_row = position.start;

        if let Some(view) = self.current() {
            let message = format!(
                "{} - pattern {}, {} periods",
                view.spec.title,
                view.filtered.pattern,
                view.filtered.period_count()
            );
            self.add_notification(message);
        }
    }
}
