//! The latency overlay.
//!
//! ```text
//! ╭──────────-─x─╮
//! │    37 ms     │
//! │   1.1.1.1    │
//! ╰──────────────╯
//! ```

use ratatui::{
    layout::{Alignment, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

/// Draw the overlay (or the minimized chip) on top of whatever is below.
pub fn render(frame: &mut Frame, app: &App) {
    let rect = app.overlay_rect();
    if rect.is_empty() {
        return;
    }

    frame.render_widget(Clear, rect);

    if app.minimized {
        render_chip(frame, app, rect);
    } else {
        render_box(frame, app, rect);
    }
}

fn render_box(frame: &mut Frame, app: &App, rect: Rect) {
    let theme = &app.theme;
    let surface = Style::default().bg(theme.surface);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(surface.fg(theme.border))
        .style(surface);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let lines = vec![
        Line::from(Span::styled(app.sample.label(), theme.sample_style(&app.sample))),
        Line::from(Span::styled(app.target.as_str(), theme.muted)),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).style(surface),
        inner,
    );

    let button_style = theme.button.bg(theme.surface);
    for (pos, glyph) in [(app.minimize_button(), "-"), (app.close_button(), "x")] {
        if let Some(Position { x, y }) = pos {
            frame.render_widget(Paragraph::new(glyph).style(button_style), Rect::new(x, y, 1, 1));
        }
    }
}

fn render_chip(frame: &mut Frame, app: &App, rect: Rect) {
    let theme = &app.theme;
    let style = theme.sample_style(&app.sample).bg(theme.surface);
    frame.render_widget(Paragraph::new(app.chip_label()).style(style), rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{CLOSE_OFFSET, MINIMIZE_OFFSET, OVERLAY_HEIGHT, OVERLAY_WIDTH};
    use crate::data::{ProbeError, Sample, SampleCell};
    use crate::ui::Theme;
    use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};
    use std::time::Duration;

    fn draw(app: &mut App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|frame| {
                app.set_bounds(frame.area());
                render(frame, app);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buffer: &Buffer, rect: Rect, row: u16) -> String {
        (rect.x..rect.right()).map(|x| buffer[(x, row)].symbol()).collect()
    }

    fn app_with(sample: Sample) -> App {
        let cell = SampleCell::new();
        cell.publish(sample);
        let mut app = App::with_theme(cell, "1.1.1.1", Theme::dark());
        app.refresh();
        app
    }

    #[test]
    fn test_renders_latency_in_ramp_color() {
        let mut app = app_with(Sample::Latency(Duration::from_millis(37)));
        let buffer = draw(&mut app);
        let rect = app.overlay_rect();
        assert_eq!((rect.width, rect.height), (OVERLAY_WIDTH, OVERLAY_HEIGHT));

        let text = row_text(&buffer, rect, rect.y + 1);
        assert!(text.contains("37 ms"), "got {text:?}");

        let x = rect.x + text.chars().position(|c| c == '3').unwrap() as u16;
        assert_eq!(buffer[(x, rect.y + 1)].fg, Color::Rgb(0, 255, 0));
        assert!(row_text(&buffer, rect, rect.y + 2).contains("1.1.1.1"));
    }

    #[test]
    fn test_renders_buttons() {
        let mut app = app_with(Sample::Pending);
        let buffer = draw(&mut app);
        let rect = app.overlay_rect();
        assert_eq!(buffer[(rect.x + MINIMIZE_OFFSET, rect.y)].symbol(), "-");
        assert_eq!(buffer[(rect.x + CLOSE_OFFSET, rect.y)].symbol(), "x");
    }

    #[test]
    fn test_renders_error() {
        let mut app = app_with(Sample::Failure(ProbeError::MissingMarker));
        let buffer = draw(&mut app);
        let rect = app.overlay_rect();
        assert!(row_text(&buffer, rect, rect.y + 1).contains("Error"));
    }

    #[test]
    fn test_renders_chip_when_minimized() {
        let mut app = app_with(Sample::Latency(Duration::from_millis(250)));
        app.toggle_minimized();
        let buffer = draw(&mut app);
        let rect = app.overlay_rect();
        assert_eq!(rect.height, 1);
        assert!(row_text(&buffer, rect, rect.y).contains("250 ms"));
        assert_eq!(buffer[(rect.x + 1, rect.y)].fg, Color::Rgb(255, 0, 0));
    }
}
