//! The shared latest-sample slot.

use std::sync::Arc;

use parking_lot::Mutex;

use super::Sample;

#[derive(Debug, Default)]
struct Slot {
    sample: Sample,
    generation: u64,
}

/// Holds exactly one live [`Sample`], written by the sampler and read by the
/// overlay.
///
/// Cloning the cell clones the handle, not the sample. The lock is only held
/// while a sample is copied in or out.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pingwatch::{Sample, SampleCell};
///
/// let cell = SampleCell::new();
/// assert_eq!(cell.latest(), Sample::Pending);
///
/// cell.publish(Sample::Latency(Duration::from_millis(21)));
/// assert_eq!(cell.latest().millis(), Some(21));
/// assert_eq!(cell.generation(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SampleCell {
    inner: Arc<Mutex<Slot>>,
}

impl SampleCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current sample and bump the publish counter.
    pub fn publish(&self, sample: Sample) {
        let mut slot = self.inner.lock();
        slot.sample = sample;
        slot.generation = slot.generation.wrapping_add(1);
    }

    /// Copy of the current sample.
    pub fn latest(&self) -> Sample {
        self.inner.lock().sample.clone()
    }

    /// Number of samples published so far. Readers compare this against the
    /// value they last rendered to decide whether a redraw is due.
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    /// Current sample together with its generation, read under one lock.
    pub fn snapshot(&self) -> (Sample, u64) {
        let slot = self.inner.lock();
        (slot.sample.clone(), slot.generation)
    }
}
