//! Pure view/render functions for the table browser.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! frame, and never mutate state or return effects. Only the rows inside the
//! visible window are rendered; the off-screen remainder is represented by
//! the window's padding values, which drive the scrollbar proportions.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::state::AppState;
use crate::text::{company_city, format_phone, truncate_with_ellipsis};

/// Fixed chrome above and below the table body:
/// title, search input, column header, status line.
const CHROME_HEIGHT: u16 = 4;

/// Width reserved for the scrollbar on the right side of the body.
const SCROLLBAR_WIDTH: u16 = 1;

/// Spinner frames for the loading indicator.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Slow the spinner relative to the tick rate.
const SPINNER_SPEED_DIVISOR: usize = 4;

/// Height available to the table body for a given terminal height.
///
/// The reducer uses this to settle the viewport before the window recompute,
/// so layout knowledge stays in one place.
pub fn body_height(terminal_height: u16) -> usize {
    terminal_height.saturating_sub(CHROME_HEIGHT) as usize
}

/// Renders the entire TUI to the frame.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Search input
            Constraint::Length(1), // Column header
            Constraint::Min(1),    // Table body
            Constraint::Length(1), // Status line
        ])
        .split(area);

    render_title(state, frame, chunks[0]);
    render_search(state, frame, chunks[1]);

    let columns = column_layout(chunks[2].width.saturating_sub(SCROLLBAR_WIDTH));
    render_header(frame, chunks[2], &columns);
    render_body(state, frame, chunks[3], &columns);
    render_status_line(state, frame, chunks[4]);
}

fn render_title(state: &AppState, frame: &mut Frame, area: Rect) {
    let counts = match state.loader.total_users() {
        Some(total) => format!("{} of {} users", state.loader.len(), total),
        None => String::new(),
    };

    let title = Line::from(vec![
        Span::styled(" Users", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(counts, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_search(state: &AppState, frame: &mut Frame, area: Rect) {
    let search = &state.search;
    let mut spans = vec![Span::styled(" > ", Style::default().fg(Color::DarkGray))];

    if search.text.is_empty() && !search.focused {
        spans.push(Span::styled(
            "Search users",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            search.text.clone(),
            Style::default().fg(Color::Cyan),
        ));
    }
    if search.focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Column areas for one row of the table.
fn column_layout(width: u16) -> Vec<(u16, u16)> {
    let area = Rect::new(0, 0, width, 1);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22), // Name
            Constraint::Percentage(32), // Email
            Constraint::Length(17),     // Phone
            Constraint::Min(16),        // Company (City)
        ])
        .split(area);
    chunks.iter().map(|c| (c.x, c.width)).collect()
}

const COLUMN_TITLES: [&str; 4] = ["Name", "Email", "Phone", "Company (City)"];

fn render_header(frame: &mut Frame, area: Rect, columns: &[(u16, u16)]) {
    let style = Style::default()
        .fg(Color::White)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD);

    // Paint the full-width band first so gaps between columns are filled too.
    frame.render_widget(
        Paragraph::new(Line::default()).style(style),
        area,
    );

    let buf = frame.buffer_mut();
    for (title, &(x, width)) in COLUMN_TITLES.iter().zip(columns) {
        let text = truncate_with_ellipsis(title, cell_budget(width));
        buf.set_string(area.x + x + 1, area.y, text, style);
    }
}

fn render_body(state: &AppState, frame: &mut Frame, area: Rect, columns: &[(u16, u16)]) {
    let window = state.window();
    let row_height = state.ui.row_height;
    let loaded = state.loader.len();

    for index in window.start..window.end {
        // Position relative to the viewport; overscanned rows fall outside
        // and are clipped here.
        let top = index * row_height;
        let Some(relative) = top.checked_sub(state.scroll.offset) else {
            continue;
        };
        if relative >= area.height as usize {
            continue;
        }
        let y = area.y + relative as u16;

        if index < loaded {
            render_user_row(state, frame, area, columns, index, y);
        } else {
            render_loading_row(state, frame, area, y);
        }
    }

    frame.render_widget(
        BodyScrollbar {
            content_height: state.content_height(),
            viewport: state.scroll.viewport,
            offset: state.scroll.offset,
        },
        area,
    );
}

fn render_user_row(
    state: &AppState,
    frame: &mut Frame,
    area: Rect,
    columns: &[(u16, u16)],
    index: usize,
    y: u16,
) {
    let user = &state.loader.users()[index];
    let cells = [
        user.name.clone(),
        user.email.clone(),
        format_phone(&user.phone),
        company_city(user),
    ];

    let style = if index % 2 == 1 {
        Style::default().fg(Color::Gray)
    } else {
        Style::default()
    };

    let buf = frame.buffer_mut();
    for (cell, &(x, width)) in cells.iter().zip(columns) {
        let text = truncate_with_ellipsis(cell, cell_budget(width));
        buf.set_string(area.x + x + 1, y, text, style);
    }
}

/// The placeholder slot at the tail of the list while more pages may exist.
fn render_loading_row(state: &AppState, frame: &mut Frame, area: Rect, y: u16) {
    let spinner_idx = (state.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len();
    let line = Line::from(vec![
        Span::styled(
            SPINNER_FRAMES[spinner_idx],
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(" Loading...", Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center);

    let row_area = Rect::new(area.x, y, area.width.saturating_sub(SCROLLBAR_WIDTH), 1);
    frame.render_widget(Paragraph::new(line), row_area);
}

/// Cell text budget inside a column: one leading pad, one trailing gap.
fn cell_budget(column_width: u16) -> usize {
    column_width.saturating_sub(2) as usize
}

fn render_status_line(state: &AppState, frame: &mut Frame, area: Rect) {
    let spans: Vec<Span> = if state.search.focused {
        vec![
            Span::styled(" Esc", Style::default().fg(Color::DarkGray)),
            Span::raw(" done  "),
            Span::styled("typing", Style::default().fg(Color::DarkGray)),
            Span::raw(" edits search"),
        ]
    } else if state.loader.is_loading() {
        let spinner_idx = (state.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len();
        vec![
            Span::raw(" "),
            Span::styled(
                SPINNER_FRAMES[spinner_idx],
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!(" Loading page {}...", state.loader.next_page()),
                Style::default().fg(Color::Yellow),
            ),
        ]
    } else if let Some(error) = state.loader.last_error() {
        vec![
            Span::styled(format!(" ✗ {error}"), Style::default().fg(Color::Red)),
            Span::raw("  scroll down to retry  "),
            Span::styled("q", Style::default().fg(Color::DarkGray)),
            Span::raw(" quit"),
        ]
    } else if !state.loader.has_more() {
        vec![
            Span::styled(
                format!(" All {} users loaded", state.loader.len()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  "),
            Span::styled("q", Style::default().fg(Color::DarkGray)),
            Span::raw(" quit"),
        ]
    } else {
        vec![
            Span::styled(" ↑↓", Style::default().fg(Color::DarkGray)),
            Span::raw(" scroll  "),
            Span::styled("/", Style::default().fg(Color::DarkGray)),
            Span::raw(" search  "),
            Span::styled("q", Style::default().fg(Color::DarkGray)),
            Span::raw(" quit"),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Scrollbar for the table body, proportioned from the full content height
/// so the windowed rendering is invisible to the user.
struct BodyScrollbar {
    content_height: usize,
    viewport: usize,
    offset: usize,
}

impl Widget for BodyScrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.content_height <= self.viewport || area.height == 0 {
            return;
        }

        let track = area.height as usize;
        let max_offset = self.content_height - self.viewport;

        let thumb_len = (track * self.viewport / self.content_height).clamp(1, track);
        let available = track - thumb_len;
        let thumb_start = (self.offset * available / max_offset.max(1)).min(available);

        let x = area.x + area.width.saturating_sub(1);
        for row in 0..track {
            let symbol = if row >= thumb_start && row < thumb_start + thumb_len {
                "█"
            } else {
                "│"
            };
            buf.set_string(x, area.y + row as u16, symbol, Style::default().fg(Color::DarkGray));
        }
    }
}
