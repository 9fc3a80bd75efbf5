//! Theme configuration for the overlay.
//!
//! Supports light and dark themes with automatic terminal detection. The
//! latency text itself is always colored by [`color_of`]; the theme only
//! covers the chrome around it.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{color_of, Sample};

/// Color and style theme for the overlay.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Overlay background.
    pub surface: Color,
    /// Color for the overlay border.
    pub border: Color,
    /// Style for the minimize and close buttons.
    pub button: Style,
    /// Style for secondary text (host line, pending indicator).
    pub muted: Style,
    /// Style for a failed probe.
    pub error: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            surface: Color::Black,
            border: Color::DarkGray,
            button: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::Gray),
            error: Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    ///
    /// The surface stays black so the green end of the latency ramp stays
    /// readable; only the chrome changes.
    pub fn light() -> Self {
        Self {
            surface: Color::Black,
            border: Color::Gray,
            button: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::Gray),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            border_type: BorderType::Plain,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for the latency text.
    pub fn sample_style(&self, sample: &Sample) -> Style {
        match sample {
            Sample::Pending => self.muted,
            Sample::Latency(_) => {
                let ms = sample.millis().unwrap_or(0).min(i64::MAX as u64) as i64;
                Style::default().fg(color_of(ms).into()).add_modifier(Modifier::BOLD)
            }
            Sample::Failure(_) => self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ProbeError;
    use std::time::Duration;

    #[test]
    fn test_latency_style_uses_color_ramp() {
        let theme = Theme::dark();
        let style = theme.sample_style(&Sample::Latency(Duration::from_millis(70)));
        assert_eq!(style.fg, Some(Color::Rgb(255, 255, 0)));
    }

    #[test]
    fn test_failure_and_pending_styles() {
        let theme = Theme::dark();
        assert_eq!(theme.sample_style(&Sample::Failure(ProbeError::MissingMarker)), theme.error);
        assert_eq!(theme.sample_style(&Sample::Pending), theme.muted);
    }
}
