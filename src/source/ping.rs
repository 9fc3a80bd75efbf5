//! Latency source backed by the system `ping` utility.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::trace;

use super::{parse_ping_output, LatencySource};
use crate::data::ProbeError;

/// Default host probed when nothing else is configured.
pub const DEFAULT_HOST: &str = "1.1.1.1";

/// Upper bound on a single `ping` invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends one echo request per call by running `ping` as a child process.
///
/// stdout and stderr are both captured, since some platforms report
/// failures on stderr. The child is killed if the probe times out or the
/// future is dropped.
///
/// # Example
///
/// ```no_run
/// use pingwatch::{LatencySource, PingSource};
///
/// # tokio_test::block_on(async {
/// let source = PingSource::new("1.1.1.1");
/// match source.measure().await {
///     Ok(rtt) => println!("{} ms", rtt.as_millis()),
///     Err(e) => println!("probe failed: {e}"),
/// }
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct PingSource {
    program: String,
    host: String,
    timeout: Duration,
    description: String,
}

impl PingSource {
    /// Create a source pinging `host` with the platform's `ping`.
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let description = format!("ping: {}", host);
        Self {
            program: "ping".to_string(),
            host,
            timeout: DEFAULT_TIMEOUT,
            description,
        }
    }

    /// Override how long one probe may run.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a different executable (a `ping` outside `PATH`, a wrapper script).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Arguments for a single echo request on this platform.
    pub fn args(&self) -> Vec<String> {
        if cfg!(windows) {
            vec![self.host.clone(), "-n".to_string(), "1".to_string()]
        } else {
            vec!["-c".to_string(), "1".to_string(), self.host.clone()]
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // CREATE_NO_WINDOW: don't flash a console per probe.
        #[cfg(windows)]
        cmd.creation_flags(0x0800_0000);

        cmd
    }
}

#[async_trait]
impl LatencySource for PingSource {
    async fn measure(&self) -> Result<Duration, ProbeError> {
        let child = self.command().spawn().map_err(|e| ProbeError::Launch(e.to_string()))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))?
            .map_err(|e| ProbeError::Io(e.to_string()))?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        trace!(status = ?output.status, bytes = text.len(), "ping finished");

        parse_ping_output(&text)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_source_new() {
        let source = PingSource::new("example.net");
        assert_eq!(source.host(), "example.net");
        assert_eq!(source.description(), "ping: example.net");
        assert_eq!(source.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_single_echo_args() {
        let args = PingSource::new(DEFAULT_HOST).args();
        assert_eq!(args.len(), 3);
        assert!(args.contains(&DEFAULT_HOST.to_string()));
        assert!(args.contains(&"1".to_string()));
    }

    #[tokio::test]
    async fn test_launch_failure() {
        let source = PingSource::new(DEFAULT_HOST).with_program("pingwatch-no-such-binary");
        let result = source.measure().await;
        assert!(matches!(result, Err(ProbeError::Launch(_))));
    }

    // `echo` prints its arguments back, which lets the host stand in for
    // the reply line.
    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_child_output() {
        let source = PingSource::new("time=37ms").with_program("echo");
        assert_eq!(source.measure().await, Ok(Duration::from_millis(37)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_output_without_marker() {
        let source = PingSource::new("unreachable").with_program("echo");
        assert_eq!(source.measure().await, Err(ProbeError::MissingMarker));
    }
}
