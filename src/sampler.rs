//! Background probe loop.
//!
//! The sampler owns one OS thread running a single-threaded tokio runtime.
//! Each cycle it asks a [`LatencySource`] for a round-trip time, publishes the
//! result into the shared [`SampleCell`], then sleeps. Shutdown goes through a
//! `watch` channel so both the sleep and an in-flight probe are interrupted,
//! and the thread is joined before [`SamplerHandle::shutdown`] returns.
//!
//! ```text
//!  UI thread                         sampler thread
//!  ─────────                         ──────────────
//!  Sampler::spawn ─────────────────▶ loop {
//!                                      measure()  ◀── cancel
//!  SampleCell::latest ◀──────────────  publish()
//!                                      sleep()    ◀── cancel
//!                                    }
//!  SamplerHandle::shutdown ──cancel─▶ exit
//!                          ◀──join───
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::data::{Sample, SampleCell};
use crate::source::LatencySource;

/// Pause between the end of one probe and the start of the next.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Settings for the probe loop.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    pub interval: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Starts the probe loop.
pub struct Sampler;

impl Sampler {
    /// Spawn the sampler thread.
    ///
    /// The returned handle must be kept alive; dropping it stops the loop.
    pub fn spawn(
        source: Arc<dyn LatencySource>,
        cell: SampleCell,
        config: SamplerConfig,
    ) -> Result<SamplerHandle> {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let cycles = Arc::new(AtomicU64::new(0));
        let thread_cycles = cycles.clone();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to build sampler runtime")?;

        let thread = std::thread::Builder::new()
            .name("sampler".to_string())
            .spawn(move || {
                runtime.block_on(run_loop(
                    &*source,
                    &cell,
                    config.interval,
                    cancel_rx,
                    &thread_cycles,
                ));
            })
            .context("failed to spawn sampler thread")?;

        Ok(SamplerHandle {
            cancel: cancel_tx,
            thread: Some(thread),
            cycles,
        })
    }
}

/// Owner's end of a running sampler.
#[derive(Debug)]
pub struct SamplerHandle {
    cancel: watch::Sender<bool>,
    thread: Option<JoinHandle<()>>,
    cycles: Arc<AtomicU64>,
}

impl SamplerHandle {
    /// Number of probe cycles completed so far.
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Returns true once the sampler thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        // Err only means the loop already exited and dropped its receiver.
        let _ = self.cancel.send(true);
        if let Some(thread) = self.thread.take() {
            thread.join().map_err(|_| anyhow!("sampler thread panicked"))?;
        }
        Ok(())
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            error!("{}", e);
        }
    }
}

/// The probe loop itself. Returns when `cancel` turns true or its sender is
/// dropped.
pub async fn run_loop(
    source: &dyn LatencySource,
    cell: &SampleCell,
    interval: Duration,
    mut cancel: watch::Receiver<bool>,
    cycles: &AtomicU64,
) {
    info!(source = source.description(), ?interval, "sampler started");

    loop {
        if *cancel.borrow() {
            break;
        }

        let result = tokio::select! {
            result = source.measure() => result,
            _ = cancelled(&mut cancel) => break,
        };

        match &result {
            Ok(rtt) => debug!(ms = rtt.as_millis() as u64, "sample"),
            Err(e) => warn!(error = %e, "probe failed"),
        }
        cell.publish(Sample::from_probe(result));
        cycles.fetch_add(1, Ordering::Relaxed);

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = cancelled(&mut cancel) => break,
        }
    }

    info!(cycles = cycles.load(Ordering::Relaxed), "sampler stopped");
}

async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    // A closed channel counts as cancellation.
    let _ = cancel.wait_for(|stop| *stop).await;
}
