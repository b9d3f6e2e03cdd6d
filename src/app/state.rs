use std::path::PathBuf;

use crate::export::IDENTIFIER_HEADER;
use crate::pipeline::RenderedView;
use crate::utils::truncate_to_width;

pub const IDENTIFIER_COLUMN_WIDTH: usize = 40;
pub const PERIOD_COLUMN_WIDTH: usize = 16;

/// Scroll position of one view, kept while switching tabs.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct RowPosition {
    pub selected: usize,
    pub start: usize,
}

pub struct AppState {
    pub views: Vec<RenderedView>,
    pub file_path: PathBuf,
    pub current_view: usize,
    pub selected_row: usize, // 0-based row of the filtered table
    pub start_row: usize,
    pub visible_rows: usize,
    pub view_positions: Vec<RowPosition>,
    pub should_quit: bool,
    pub g_pressed: bool, // Track if 'g' was pressed for 'gg' command
    pub status_message: String,
}

impl AppState {
    pub fn new(views: Vec<RenderedView>, file_path: PathBuf) -> Self {
        let view_positions = vec![RowPosition::default(); views.len()];

        Self {
            views,
            file_path,
            current_view: 0,
            selected_row: 0,
            start_row: 0,
            visible_rows: 30, // Adjusted to the window on first draw
            view_positions,
            should_quit: false,
            g_pressed: false,
            status_message: String::new(),
        }
    }

    pub fn current(&self) -> Option<&RenderedView> {
        self.views.get(self.current_view)
    }

    pub fn row_count(&self) -> usize {
        self.current().map_or(0, |view| view.filtered.table.height)
    }

    pub fn column_count(&self) -> usize {
        self.current().map_or(0, |view| view.filtered.table.width)
    }

    pub fn get_column_width(&self, col: usize) -> usize {
        if col == 0 {
            IDENTIFIER_COLUMN_WIDTH
        } else {
            PERIOD_COLUMN_WIDTH
        }
    }

    /// Header captions: the identifier caption, then each period label.
    pub fn header_cells(&self) -> Vec<String> {
        let Some(view) = self.current() else {
            return Vec::new();
        };

        std::iter::once(IDENTIFIER_HEADER.to_string())
            .chain(view.filtered.labels.iter().cloned())
            .enumerate()
            .map(|(col, caption)| truncate_to_width(&caption, self.get_column_width(col)))
            .collect()
    }

    /// Presented value of a cell, cut to its column width.
    pub fn get_cell_content(&self, row: usize, col: usize) -> String {
        self.current()
            .map(|view| {
                let content = view.filtered.presented(row, col).to_string();
                truncate_to_width(&content, self.get_column_width(col))
            })
            .unwrap_or_default()
    }

    pub fn add_notification(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }
}
