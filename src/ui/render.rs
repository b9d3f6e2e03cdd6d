use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::{io, time::Duration};

use crate::app::AppState;
use crate::ui::handlers::handle_key_event;
use crate::utils::display_width;

pub fn run_app(mut app_state: AppState) -> Result<()> {
    let mut terminal = setup_terminal()?;

    // Main event loop
    let result = (|| -> Result<()> {
        while !app_state.should_quit {
            terminal.draw(|f| ui(f, &mut app_state))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        handle_key_event(&mut app_state, key);
                    }
                }
            }
        }
        Ok(())
    })();

    restore_terminal(&mut terminal)?;

    result
}

/// Setup the terminal for the application
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn ui(f: &mut Frame, app_state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar and view tabs
            Constraint::Min(1),    // Filtered table
            Constraint::Length(1), // Status bar
        ])
        .split(f.size());

    draw_title_with_tabs(f, app_state, chunks[0]);

    // Header row and borders take three lines
    app_state.visible_rows = (chunks[1].height as usize).saturating_sub(3).max(1);
    app_state.handle_scrolling();
    draw_table(f, app_state, chunks[1]);

    draw_status_bar(f, app_state, chunks[2]);
}

fn draw_table(f: &mut Frame, app_state: &AppState, area: Rect) {
    let Some(view) = app_state.current() else {
        let empty = Paragraph::new("No views to preview").block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    };

    let columns = app_state.column_count();
    let mut constraints = Vec::with_capacity(columns + 1);
    constraints.push(Constraint::Length(5)); // Row number width
    for col in 0..columns {
        constraints.push(Constraint::Length(app_state.get_column_width(col) as u16));
    }

    let header_style = Style::default().bg(Color::DarkGray).fg(Color::Gray);
    let data_style = Style::default().fg(Color::Green);

    let mut header_cells = Vec::with_capacity(columns + 1);
    header_cells.push(Cell::from("").style(header_style));
    header_cells.extend(
        app_state
            .header_cells()
            .into_iter()
            .map(|caption| Cell::from(caption).style(header_style)),
    );
    let header = Row::new(header_cells).height(1);

    let end_row = (app_state.start_row + app_state.visible_rows).min(app_state.row_count());
    let rows = (app_state.start_row..end_row).map(|row| {
        let mut cells = Vec::with_capacity(columns + 1);
        cells.push(Cell::from((row + 1).to_string()).style(header_style));

        for col in 0..columns {
            let content = app_state.get_cell_content(row, col);
            let style = if row == app_state.selected_row {
                Style::default().bg(Color::White).fg(Color::Black)
            } else if col > 0 && view.filtered.presented(row, col).as_number().is_some() {
                data_style
            } else {
                Style::default()
            };
            cells.push(Cell::from(content).style(style));
        }

        Row::new(cells)
    });

    let title = format!(" {} - {} ", view.spec.title, view.filtered.labels.join(", "));
    let table = Table::new(std::iter::once(header).chain(rows))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightCyan))
                .title(title),
        )
        .widths(&constraints);

    f.render_widget(table, area);
}

fn draw_title_with_tabs(f: &mut Frame, app_state: &AppState, area: Rect) {
    let file_name = app_state
        .file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("Untitled");

    let title_content = format!(" {} ", file_name);
    let title_width = (display_width(&title_content) as u16).min(area.width * 2 / 3);

    let horizontal_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(title_width), Constraint::Min(0)])
        .split(area);

    let title_widget =
        Paragraph::new(title_content).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(title_widget, horizontal_layout[0]);

    let mut tab_constraints: Vec<Constraint> = app_state
        .views
        .iter()
        .map(|view| Constraint::Length(display_width(&view.spec.title) as u16 + 2))
        .collect();
    tab_constraints.push(Constraint::Min(0)); // Filler space

    let tab_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(tab_constraints)
        .split(horizontal_layout[1]);

    for (index, view) in app_state.views.iter().enumerate() {
        let style = if index == app_state.current_view {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        } else {
            Style::default()
        };

        let tab_widget = Paragraph::new(view.spec.title.clone())
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(tab_widget, tab_layout[index]);
    }
}

fn draw_status_bar(f: &mut Frame, app_state: &AppState, area: Rect) {
    let status = if app_state.status_message.is_empty() {
        format!(
            " Row {}/{} | j/k=move gg/G=first/last row [ ]/Tab=prev/next view q=quit",
            app_state.selected_row + 1,
            app_state.row_count()
        )
    } else {
        format!(" {}", app_state.status_message)
    };

    let status_widget = Paragraph::new(status).alignment(Alignment::Left);
    f.render_widget(status_widget, area);
}
