//! # pingwatch
//!
//! A small always-on-top terminal overlay that probes network latency in the
//! background and shows the latest round-trip time as colored text.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  sampler thread                    UI thread                 │
//! │  ┌──────────────┐                  ┌──────────┐   ┌────────┐ │
//! │  │   sampler    │   ┌──────────┐   │   app    │──▶│   ui   │ │
//! │  │ (probe loop) │──▶│SampleCell│──▶│ (state)  │   │(render)│ │
//! │  └──────┬───────┘   └──────────┘   └────▲─────┘   └────────┘ │
//! │         │                               │                    │
//! │         ▼                            events                  │
//! │  ┌──────────────┐                  (keys, mouse)             │
//! │  │    source    │◀── PingSource | any LatencySource          │
//! │  └──────────────┘                                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: The [`LatencySource`] trait and the [`PingSource`]
//!   implementation that scrapes the system `ping` utility
//! - **[`sampler`]**: The cancellable background loop that publishes samples
//! - **[`data`]**: [`Sample`], the shared [`SampleCell`], and the
//!   latency-to-color ramp ([`color_of`])
//! - **[`app`]**, **[`events`]**, **[`ui`]**: Overlay state, input handling
//!   (drag, minimize, close), and ratatui rendering
//! - **[`config`]**: Layered settings (defaults, file, environment, flags)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Overlay pinging 1.1.1.1 every 500ms
//! pingwatch
//!
//! # Different host, slower cadence, log to a file
//! pingwatch --host 9.9.9.9 --interval 2s --log-file pingwatch.log
//!
//! # One probe, JSON on stdout
//! pingwatch --once
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use pingwatch::{PingSource, Sampler, SamplerConfig, SampleCell};
//!
//! let cell = SampleCell::new();
//! let source = Arc::new(PingSource::new("1.1.1.1"));
//! let sampler = Sampler::spawn(source, cell.clone(), SamplerConfig::default()).unwrap();
//!
//! std::thread::sleep(std::time::Duration::from_secs(2));
//! println!("latest: {}", cell.latest().label());
//!
//! sampler.shutdown().unwrap();
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod sampler;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::{Overrides, Settings};
pub use data::{color_of, ProbeError, Rgb, Sample, SampleCell};
pub use sampler::{Sampler, SamplerConfig, SamplerHandle};
pub use source::{parse_ping_output, LatencySource, PingSource};
