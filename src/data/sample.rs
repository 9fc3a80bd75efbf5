//! The latest-sample value and the ways a probe can fail.

use std::time::Duration;

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::duration::format_millis;

/// Everything that can go wrong during one probe cycle.
///
/// All variants collapse into [`Sample::Failure`]; none of them stop the
/// sampler, the next cycle simply tries again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The probe process could not be started.
    #[error("failed to launch probe: {0}")]
    Launch(String),

    /// The probe started but its output could not be collected.
    #[error("failed to read probe output: {0}")]
    Io(String),

    /// The probe did not finish within the configured timeout.
    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    /// The output had no `time=...ms` section (host unreachable, request timed out).
    #[error("no round-trip time in probe output")]
    MissingMarker,

    /// The text between the markers was not a usable number.
    #[error("invalid round-trip time: {0:?}")]
    Parse(String),
}

/// The most recent latency measurement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Sample {
    /// No probe has completed yet.
    #[default]
    Pending,
    /// Round-trip time reported by the last probe.
    Latency(Duration),
    /// The last probe failed.
    Failure(ProbeError),
}

impl Sample {
    /// Build a sample from the outcome of one probe.
    pub fn from_probe(result: Result<Duration, ProbeError>) -> Self {
        match result {
            Ok(rtt) => Sample::Latency(rtt),
            Err(e) => Sample::Failure(e),
        }
    }

    /// Whole milliseconds, if this sample carries a latency.
    pub fn millis(&self) -> Option<u64> {
        match self {
            Sample::Latency(rtt) => Some(rtt.as_millis().min(u64::MAX as u128) as u64),
            _ => None,
        }
    }

    /// Text shown on the overlay.
    pub fn label(&self) -> String {
        match self {
            Sample::Pending => "...".to_string(),
            Sample::Latency(rtt) => format_millis(*rtt),
            Sample::Failure(_) => "Error".to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Sample::Failure(_))
    }

    fn status(&self) -> &'static str {
        match self {
            Sample::Pending => "pending",
            Sample::Latency(_) => "ok",
            Sample::Failure(_) => "error",
        }
    }
}

/// Flat JSON shape used by `--once`.
#[derive(Serialize)]
struct SampleRecord {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Serialize for Sample {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let error = match self {
            Sample::Failure(e) => Some(e.to_string()),
            _ => None,
        };
        SampleRecord {
            status: self.status(),
            ms: self.millis(),
            error,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(Sample::default(), Sample::Pending);
        assert_eq!(Sample::default().label(), "...");
    }

    #[test]
    fn test_latency_label_and_millis() {
        let sample = Sample::Latency(Duration::from_millis(37));
        assert_eq!(sample.millis(), Some(37));
        assert_eq!(sample.label(), "37 ms");
    }

    #[test]
    fn test_failure_label() {
        let sample = Sample::from_probe(Err(ProbeError::MissingMarker));
        assert!(sample.is_failure());
        assert_eq!(sample.millis(), None);
        assert_eq!(sample.label(), "Error");
    }

    #[test]
    fn test_serialize_latency() {
        let json = serde_json::to_value(Sample::Latency(Duration::from_millis(12))).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "ok", "ms": 12 }));
    }

    #[test]
    fn test_serialize_failure() {
        let json = serde_json::to_value(Sample::Failure(ProbeError::MissingMarker)).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "no round-trip time in probe output");
        assert!(json.get("ms").is_none());
    }
}
