//! Latency source abstraction.
//!
//! The sampler loop only knows how to ask a [`LatencySource`] for one
//! round-trip time. Scraping the system `ping` utility ([`PingSource`]) is one
//! implementation; a raw ICMP socket or a TCP connect timer can be dropped in
//! without touching the sampler or the overlay.

mod parse;
mod ping;

pub use parse::parse_ping_output;
pub use ping::{PingSource, DEFAULT_HOST, DEFAULT_TIMEOUT};

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::data::ProbeError;

/// Something that can measure one round-trip time.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use async_trait::async_trait;
/// use pingwatch::{LatencySource, ProbeError};
///
/// #[derive(Debug)]
/// struct Fixed(Duration);
///
/// #[async_trait]
/// impl LatencySource for Fixed {
///     async fn measure(&self) -> Result<Duration, ProbeError> {
///         Ok(self.0)
///     }
///
///     fn description(&self) -> &str {
///         "fixed"
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let rtt = Fixed(Duration::from_millis(8)).measure().await.unwrap();
/// assert_eq!(rtt.as_millis(), 8);
/// # });
/// ```
#[async_trait]
pub trait LatencySource: Send + Sync + Debug {
    /// Run one probe and return its round-trip time.
    ///
    /// Every failure is local to this call; the sampler will call again on
    /// its next cycle.
    async fn measure(&self) -> Result<Duration, ProbeError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used in log lines and in the `--once` output.
    fn description(&self) -> &str;
}
