//! Overlay state: position, drag, minimize, and the sample being shown.

use ratatui::layout::{Position, Rect};
use ratatui::text::Line;

use crate::data::{Sample, SampleCell};
use crate::ui::Theme;

/// Overlay footprint in terminal cells, borders included.
pub const OVERLAY_WIDTH: u16 = 16;
pub const OVERLAY_HEIGHT: u16 = 4;

/// Column offsets of the buttons on the overlay's top border.
pub const MINIMIZE_OFFSET: u16 = 11;
pub const CLOSE_OFFSET: u16 = 13;

/// What sits under a given terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Close,
    Minimize,
    /// Anywhere else on the overlay (or the minimized chip).
    Body,
    Outside,
}

/// Offset between the pointer and the overlay origin while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Grab {
    dx: u16,
    dy: u16,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub minimized: bool,

    cell: SampleCell,
    /// Sample currently on screen.
    pub sample: Sample,
    seen_generation: u64,

    /// Host line shown under the latency.
    pub target: String,

    /// Top-left corner; `None` until placed, which pins the overlay to the
    /// top-right of the terminal.
    position: Option<Position>,
    bounds: Rect,
    grab: Option<Grab>,

    pub theme: Theme,
}

impl App {
    pub fn new(cell: SampleCell, target: impl Into<String>) -> Self {
        Self::with_theme(cell, target, Theme::auto_detect())
    }

    pub fn with_theme(cell: SampleCell, target: impl Into<String>, theme: Theme) -> Self {
        Self {
            running: true,
            minimized: false,
            cell,
            sample: Sample::Pending,
            seen_generation: 0,
            target: target.into(),
            position: None,
            bounds: Rect::default(),
            grab: None,
            theme,
        }
    }

    /// Pull the latest sample if the sampler has published since last time.
    ///
    /// Returns true when the overlay needs a redraw.
    pub fn refresh(&mut self) -> bool {
        if self.cell.generation() == self.seen_generation {
            return false;
        }
        let (sample, generation) = self.cell.snapshot();
        self.sample = sample;
        self.seen_generation = generation;
        true
    }

    /// Record the terminal area. Keeps the overlay inside it.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Size of whatever is currently shown (full overlay or chip).
    fn size(&self) -> (u16, u16) {
        if self.minimized {
            (Line::from(self.chip_label()).width() as u16, 1)
        } else {
            (OVERLAY_WIDTH, OVERLAY_HEIGHT)
        }
    }

    /// Text of the minimized chip.
    pub fn chip_label(&self) -> String {
        format!(" [{}] ", self.sample.label())
    }

    /// Where the overlay (or chip) is drawn, clamped to the terminal.
    pub fn overlay_rect(&self) -> Rect {
        let (width, height) = self.size();
        let width = width.min(self.bounds.width);
        let height = height.min(self.bounds.height);
        let max_x = self.bounds.x + self.bounds.width - width;
        let max_y = self.bounds.y + self.bounds.height - height;

        let origin = self.position.unwrap_or(Position::new(
            (self.bounds.x + self.bounds.width).saturating_sub(OVERLAY_WIDTH + 1),
            self.bounds.y + 1,
        ));

        Rect::new(
            origin.x.clamp(self.bounds.x, max_x),
            origin.y.clamp(self.bounds.y, max_y),
            width,
            height,
        )
    }

    pub fn minimize_button(&self) -> Option<Position> {
        self.button(MINIMIZE_OFFSET)
    }

    pub fn close_button(&self) -> Option<Position> {
        self.button(CLOSE_OFFSET)
    }

    fn button(&self, offset: u16) -> Option<Position> {
        if self.minimized {
            return None;
        }
        let rect = self.overlay_rect();
        (offset < rect.width).then(|| Position::new(rect.x + offset, rect.y))
    }

    /// Classify a terminal cell.
    pub fn hit_test(&self, column: u16, row: u16) -> Hit {
        let pos = Position::new(column, row);
        if self.close_button() == Some(pos) {
            Hit::Close
        } else if self.minimize_button() == Some(pos) {
            Hit::Minimize
        } else if self.overlay_rect().contains(pos) {
            Hit::Body
        } else {
            Hit::Outside
        }
    }

    /// Start dragging with the pointer at `(column, row)` on the overlay.
    pub fn begin_drag(&mut self, column: u16, row: u16) {
        let rect = self.overlay_rect();
        self.grab = Some(Grab {
            dx: column.saturating_sub(rect.x),
            dy: row.saturating_sub(rect.y),
        });
        self.position = Some(rect.as_position());
    }

    /// Follow the pointer. No-op unless a drag is in progress.
    pub fn drag_to(&mut self, column: u16, row: u16) {
        if let Some(grab) = self.grab {
            self.move_to(column.saturating_sub(grab.dx), row.saturating_sub(grab.dy));
        }
    }

    pub fn end_drag(&mut self) {
        self.grab = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    /// Move by a relative offset, staying inside the terminal.
    pub fn nudge(&mut self, dx: i32, dy: i32) {
        let rect = self.overlay_rect();
        let x = (rect.x as i32 + dx).clamp(0, u16::MAX as i32) as u16;
        let y = (rect.y as i32 + dy).clamp(0, u16::MAX as i32) as u16;
        self.move_to(x, y);
    }

    fn move_to(&mut self, x: u16, y: u16) {
        self.position = Some(Position::new(x, y));
        // Store the clamped origin so a later resize starts from where the
        // overlay was actually drawn.
        self.position = Some(self.overlay_rect().as_position());
    }

    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
        self.grab = None;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
