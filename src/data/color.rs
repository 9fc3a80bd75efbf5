//! Latency to color mapping.
//!
//! Colors are interpolated channel by channel between fixed stops, so the
//! text fades from green through yellow and light red to bold red as the
//! round-trip time grows.

use ratatui::style::Color;

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend from `self` toward `other`; `t` is clamped to `[0, 1]`.
    ///
    /// Channels are truncated toward zero.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + t * (b as f32 - a as f32)) as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// One point of the color ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorStop {
    pub threshold_ms: i64,
    pub color: Rgb,
}

pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub const LIGHT_RED: Rgb = Rgb::new(255, 128, 128);
pub const BOLD_RED: Rgb = Rgb::new(255, 0, 0);

/// Ordered ramp. Thresholds must be strictly increasing after the first pair.
pub const COLOR_STOPS: [ColorStop; 5] = [
    ColorStop { threshold_ms: 0, color: GREEN },
    ColorStop { threshold_ms: 50, color: GREEN },
    ColorStop { threshold_ms: 70, color: YELLOW },
    ColorStop { threshold_ms: 100, color: LIGHT_RED },
    ColorStop { threshold_ms: 200, color: BOLD_RED },
];

/// Color for a latency in milliseconds.
///
/// Negative input is floored to 0. Anything past the last stop gets the
/// last stop's color.
pub fn color_of(ms: i64) -> Rgb {
    let ms = ms.max(0);

    for pair in COLOR_STOPS.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if ms >= lo.threshold_ms && ms <= hi.threshold_ms {
            let span = (hi.threshold_ms - lo.threshold_ms) as f32;
            let t = (ms - lo.threshold_ms) as f32 / span;
            return lo.color.lerp(hi.color, t);
        }
    }

    COLOR_STOPS[COLOR_STOPS.len() - 1].color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_points() {
        assert_eq!(color_of(0), GREEN);
        assert_eq!(color_of(50), GREEN);
        assert_eq!(color_of(70), YELLOW);
        assert_eq!(color_of(100), LIGHT_RED);
        assert_eq!(color_of(200), BOLD_RED);
    }

    #[test]
    fn test_beyond_last_stop_is_bold_red() {
        assert_eq!(color_of(201), BOLD_RED);
        assert_eq!(color_of(10_000), color_of(200));
        assert_eq!(color_of(i64::MAX), BOLD_RED);
    }

    #[test]
    fn test_negative_is_floored() {
        assert_eq!(color_of(-40), color_of(0));
        assert_eq!(color_of(i64::MIN), GREEN);
    }

    #[test]
    fn test_midpoint_between_green_and_yellow() {
        let mid = color_of(60);
        assert!(mid.r > GREEN.r && mid.r < YELLOW.r);
        assert_eq!(mid, Rgb::new(127, 255, 0));
    }

    #[test]
    fn test_red_channel_monotonic_through_yellow_band() {
        let reds: Vec<u8> = (50..=70).map(|ms| color_of(ms).r).collect();
        assert!(reds.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_light_red_to_bold_red_fades_green_and_blue() {
        let c = color_of(150);
        assert_eq!(c.r, 255);
        assert_eq!(c.g, 64);
        assert_eq!(c.b, 64);
    }

    #[test]
    fn test_deterministic_over_range() {
        for ms in 0..=500 {
            assert_eq!(color_of(ms), color_of(ms));
        }
    }

    #[test]
    fn test_into_ratatui_color() {
        let color: Color = YELLOW.into();
        assert_eq!(color, Color::Rgb(255, 255, 0));
    }
}
