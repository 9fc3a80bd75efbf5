//! Latency samples and everything derived from them.
//!
//! ## Submodules
//!
//! - [`sample`]: The [`Sample`] value and the [`ProbeError`] taxonomy
//! - [`color`]: Piecewise-linear mapping from milliseconds to an RGB color
//! - [`cell`]: The shared latest-sample slot ([`SampleCell`])
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "500ms", "1s")
//!
//! ## Data Flow
//!
//! ```text
//! LatencySource::measure()
//!        │
//!        ▼
//!   Sample (Latency | Failure)
//!        │
//!        ▼
//! SampleCell::publish() ──▶ SampleCell::latest() ──▶ color_of() ──▶ overlay
//! ```

pub mod cell;
pub mod color;
pub mod duration;
pub mod sample;

pub use cell::SampleCell;
pub use color::{color_of, ColorStop, Rgb, COLOR_STOPS};
pub use sample::{ProbeError, Sample};
