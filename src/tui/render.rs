use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{Severity, TuiApp};
use super::wrap::{cursor_position, wrap};

const TITLE: &str = "gpush Terminal Interface";

const INSTRUCTIONS: [&str; 3] = [
    "Enter your commit message below:",
    "Press ENTER to commit and push",
    "Press ESC to cancel",
];

const PROCESSING: &str = "Processing...";

/// Widest the panel gets, in columns.
const PANEL_MAX_WIDTH: u16 = 70;
const PANEL_HEIGHT: u16 = 10;
/// Rows reserved around the panel for the title and status lines.
const PANEL_MARGIN_ROWS: u16 = 6;
/// Horizontal inset of the instructions and message field.
const FIELD_INSET: u16 = 3;
const FIELD_HEIGHT: u16 = 4;
/// Gap between the character counter and the right border.
const COUNTER_MARGIN: u16 = 4;

/// Screen regions for one frame, clipped to the frame area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PanelLayout {
    pub(super) title: Rect,
    pub(super) panel: Rect,
    pub(super) instructions: Rect,
    pub(super) field: Rect,
    pub(super) counter_row: Rect,
    pub(super) status: Rect,
}

impl PanelLayout {
    /// Derive the layout from the current terminal size.
    pub(super) fn new(area: Rect) -> Self {
        let panel_width = PANEL_MAX_WIDTH.min(area.width.saturating_sub(4));
        let panel_x = area.x + (area.width - panel_width) / 2;
        let panel_y = area.y + area.height.saturating_sub(PANEL_HEIGHT + PANEL_MARGIN_ROWS) / 2;
        let inner_width = panel_width.saturating_sub(FIELD_INSET * 2);

        let title = if panel_y >= area.y + 2 {
            Rect::new(area.x, panel_y - 2, area.width, 1)
        } else {
            Rect::default()
        };

        let rect = |x: u16, y: u16, width: u16, height: u16| {
            Rect::new(x, y, width, height).intersection(area)
        };

        Self {
            title,
            panel: rect(panel_x, panel_y, panel_width, PANEL_HEIGHT),
            instructions: rect(panel_x + FIELD_INSET, panel_y + 1, inner_width, 3),
            field: rect(panel_x + FIELD_INSET, panel_y + 4, inner_width, FIELD_HEIGHT),
            counter_row: rect(panel_x + 1, panel_y + PANEL_HEIGHT - 2, panel_width.saturating_sub(2), 1),
            status: rect(area.x, panel_y + PANEL_HEIGHT + 1, area.width, 1),
        }
    }

    /// Characters the visible message field can hold.
    pub(super) fn capacity(&self) -> usize {
        self.field.width as usize * self.field.height as usize
    }
}

/// Draw the UI. Returns the message field capacity for the next key.
pub(super) fn draw_ui(f: &mut Frame, app: &TuiApp) -> usize {
    let area = f.area();
    f.render_widget(Clear, area);

    let layout = PanelLayout::new(area);

    draw_title(f, layout.title);
    draw_panel(f, layout.panel);
    draw_instructions(f, layout.instructions);
    draw_field(f, layout.field, app);
    draw_counter(f, layout.counter_row, app.buffer.chars().count());
    draw_status(f, layout.status, app);

    layout.capacity()
}

fn draw_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn draw_panel(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Commit Message ")
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    f.render_widget(block, area);
}

fn draw_instructions(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = INSTRUCTIONS
        .iter()
        .map(|text| Line::from(Span::styled(*text, Style::default().fg(Color::Yellow))))
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

/// Draw the dotted message field with the wrapped buffer on top and place
/// the cursor after the last character.
fn draw_field(f: &mut Frame, area: Rect, app: &TuiApp) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let text_style = Style::default().fg(Color::White);
    let dot_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::DIM);

    let wrapped = wrap(&app.buffer, width);
    let lines: Vec<Line> = (0..height)
        .map(|row| {
            let text = wrapped.get(row).map(String::as_str).unwrap_or("");
            let fill = width.saturating_sub(text.chars().count());
            Line::from(vec![
                Span::styled(text.to_string(), text_style),
                Span::styled(".".repeat(fill), dot_style),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);

    let (row, col) = cursor_position(&wrapped, width);
    if row < height && col < width && !app.processing {
        f.set_cursor_position((area.x + col as u16, area.y + row as u16));
    }
}

fn draw_counter(f: &mut Frame, area: Rect, count: usize) {
    if area.width <= COUNTER_MARGIN {
        return;
    }
    let counter = Paragraph::new(Line::from(Span::styled(
        format!("Characters: {}", count),
        Style::default().fg(Color::Cyan),
    )))
    .alignment(Alignment::Right);
    // Keep a gap to the right border
    let inner = Rect::new(area.x, area.y, area.width - (COUNTER_MARGIN - 1), area.height);
    f.render_widget(counter, inner);
}

fn draw_status(f: &mut Frame, area: Rect, app: &TuiApp) {
    let span = if app.processing {
        Span::styled(
            PROCESSING,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
        )
    } else if !app.status.is_empty() {
        Span::styled(app.status.text.as_str(), Style::default().fg(severity_color(app.status.severity)))
    } else {
        return;
    };

    f.render_widget(Paragraph::new(Line::from(span)).alignment(Alignment::Center), area);
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Neutral => Color::White,
        Severity::Success => Color::Green,
        Severity::Failure => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Status;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn render(app: &TuiApp, width: u16, height: u16) -> (Terminal<TestBackend>, usize) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut capacity = 0;
        terminal
            .draw(|f| {
                capacity = draw_ui(f, app);
            })
            .unwrap();
        (terminal, capacity)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        let width = buf.area.width;
        (0..width)
            .map(|x| buf.content[(y * width + x) as usize].symbol())
            .collect()
    }

    /// Cells `from..to` of row `y`.
    fn cells(terminal: &Terminal<TestBackend>, y: u16, from: u16, to: u16) -> String {
        let buf = terminal.backend().buffer();
        let width = buf.area.width;
        (from..to)
            .map(|x| buf.content[(y * width + x) as usize].symbol())
            .collect()
    }

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buf = terminal.backend().buffer();
        (0..buf.area.height).map(|y| row_text(buf, y)).collect()
    }

    #[test]
    fn test_layout_on_standard_terminal() {
        let layout = PanelLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.panel, Rect::new(5, 4, 70, 10));
        assert_eq!(layout.title, Rect::new(0, 2, 80, 1));
        assert_eq!(layout.field, Rect::new(8, 8, 64, 4));
        assert_eq!(layout.status, Rect::new(0, 15, 80, 1));
        assert_eq!(layout.capacity(), 256);
    }

    #[test]
    fn test_layout_narrow_terminal_shrinks_panel() {
        let layout = PanelLayout::new(Rect::new(0, 0, 40, 24));
        assert_eq!(layout.panel.width, 36);
        assert_eq!(layout.field.width, 30);
        assert_eq!(layout.capacity(), 120);
    }

    #[test]
    fn test_layout_clipped_to_tiny_terminal() {
        let area = Rect::new(0, 0, 5, 3);
        let layout = PanelLayout::new(area);
        for rect in [layout.panel, layout.field, layout.instructions, layout.counter_row, layout.status] {
            assert_eq!(rect.intersection(area), rect);
        }
        assert_eq!(layout.title, Rect::default());
        assert_eq!(layout.capacity(), 0);
    }

    #[test]
    fn test_draw_empty_frame() {
        let app = TuiApp::new();
        let (mut terminal, capacity) = render(&app, 80, 24);
        let rows = screen(&terminal);

        assert_eq!(capacity, 256);
        assert!(rows[2].contains(TITLE));
        assert!(rows[4].contains(" Commit Message "));
        assert!(rows[5].contains(INSTRUCTIONS[0]));
        assert!(rows[7].contains(INSTRUCTIONS[2]));
        assert_eq!(cells(&terminal, 8, 8, 72), ".".repeat(64));
        assert!(rows[12].contains("Characters: 0"));
        assert!(rows[15].trim().is_empty());

        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!((cursor.x, cursor.y), (8, 8));
    }

    #[test]
    fn test_draw_wrapped_message_and_cursor() {
        let mut app = TuiApp::new();
        app.buffer = format!("{} tail", "x".repeat(60));
        let (mut terminal, _) = render(&app, 80, 24);
        let rows = screen(&terminal);

        assert_eq!(cells(&terminal, 8, 8, 72), format!("{}....", "x".repeat(60)));
        assert_eq!(cells(&terminal, 9, 8, 16), "tail....");
        assert!(rows[12].contains("Characters: 65"));

        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!((cursor.x, cursor.y), (12, 9));
    }

    #[test]
    fn test_draw_status_and_processing() {
        let mut app = TuiApp::new();
        app.status = Status::failure("Please enter a commit message!");
        let (terminal, _) = render(&app, 80, 24);
        assert!(screen(&terminal)[15].contains("Please enter a commit message!"));

        app.processing = true;
        let (terminal, _) = render(&app, 80, 24);
        let rows = screen(&terminal);
        assert!(rows[15].contains(PROCESSING));
        assert!(!rows[15].contains("Please enter"));
    }

    #[test]
    fn test_draw_tiny_terminal_does_not_panic() {
        let mut app = TuiApp::new();
        app.buffer = "some message".to_string();
        app.status = Status::success("done");
        for (w, h) in [(1, 1), (3, 2), (8, 5), (12, 9), (20, 12)] {
            render(&app, w, h);
        }
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(severity_color(Severity::Neutral), Color::White);
        assert_eq!(severity_color(Severity::Success), Color::Green);
        assert_eq!(severity_color(Severity::Failure), Color::Red);
    }
}
