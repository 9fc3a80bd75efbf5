//! Terminal rendering.
//!
//! - [`overlay`]: The latency box, its buttons, and the minimized chip
//! - [`theme`]: Light and dark chrome

pub mod overlay;
pub mod theme;

pub use overlay::render;
pub use theme::Theme;
