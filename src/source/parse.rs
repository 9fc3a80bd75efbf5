//! Extraction of the round-trip time from `ping` output.

use std::time::Duration;

use crate::data::ProbeError;

/// `time=37ms` on Windows, `time=12.3 ms` on Linux and macOS.
const EXACT_MARKER: &str = "time=";
/// Windows reports sub-millisecond replies as `time<1ms`.
const BOUND_MARKER: &str = "time<";
const UNIT_MARKER: &str = "ms";

/// Pull the first round-trip time out of the text printed by `ping`.
///
/// The value is whatever sits between `time=` (or `time<`) and the next
/// `ms`, trimmed. Output without both markers is a
/// [`ProbeError::MissingMarker`]; a non-numeric or negative value is a
/// [`ProbeError::Parse`].
///
/// ```
/// use pingwatch::parse_ping_output;
///
/// let rtt = parse_ping_output("Reply from 1.1.1.1: bytes=32 time=37ms TTL=57").unwrap();
/// assert_eq!(rtt.as_millis(), 37);
/// ```
pub fn parse_ping_output(output: &str) -> Result<Duration, ProbeError> {
    let start = [EXACT_MARKER, BOUND_MARKER]
        .iter()
        .filter_map(|marker| output.find(marker).map(|pos| pos + marker.len()))
        .min()
        .ok_or(ProbeError::MissingMarker)?;

    let rest = &output[start..];
    let end = rest.find(UNIT_MARKER).ok_or(ProbeError::MissingMarker)?;
    let text = rest[..end].trim();

    let ms: f64 = text.parse().map_err(|_| ProbeError::Parse(text.to_string()))?;
    if !ms.is_finite() || ms < 0.0 {
        return Err(ProbeError::Parse(text.to_string()));
    }

    Ok(Duration::from_micros((ms * 1000.0).round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOWS_REPLY: &str = "\r\nPinging 1.1.1.1 with 32 bytes of data:\r\n\
        Reply from 1.1.1.1: bytes=32 time=37ms TTL=57\r\n\r\n\
        Ping statistics for 1.1.1.1:\r\n\
        \x20   Packets: Sent = 1, Received = 1, Lost = 0 (0% loss),\r\n\
        Approximate round trip times in milli-seconds:\r\n\
        \x20   Minimum = 37ms, Maximum = 37ms, Average = 37ms\r\n";

    const LINUX_REPLY: &str = "PING 1.1.1.1 (1.1.1.1) 56(84) bytes of data.\n\
        64 bytes from 1.1.1.1: icmp_seq=1 ttl=57 time=12.3 ms\n\n\
        --- 1.1.1.1 ping statistics ---\n\
        1 packets transmitted, 1 received, 0% packet loss, time 0ms\n\
        rtt min/avg/max/mdev = 12.312/12.312/12.312/0.000 ms\n";

    const WINDOWS_TIMEOUT: &str = "\r\nPinging 1.1.1.1 with 32 bytes of data:\r\n\
        Request timed out.\r\n\r\n\
        Ping statistics for 1.1.1.1:\r\n\
        \x20   Packets: Sent = 1, Received = 0, Lost = 1 (100% loss),\r\n";

    #[test]
    fn test_windows_reply() {
        assert_eq!(parse_ping_output(WINDOWS_REPLY), Ok(Duration::from_millis(37)));
    }

    #[test]
    fn test_linux_fractional_reply() {
        let rtt = parse_ping_output(LINUX_REPLY).unwrap();
        assert_eq!(rtt, Duration::from_micros(12_300));
        assert_eq!(rtt.as_millis(), 12);
    }

    #[test]
    fn test_sub_millisecond_reply() {
        let rtt = parse_ping_output("Reply from 192.168.1.1: bytes=32 time<1ms TTL=64").unwrap();
        assert_eq!(rtt, Duration::from_millis(1));
    }

    #[test]
    fn test_timeout_has_no_marker() {
        assert_eq!(parse_ping_output(WINDOWS_TIMEOUT), Err(ProbeError::MissingMarker));
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(parse_ping_output(""), Err(ProbeError::MissingMarker));
    }

    #[test]
    fn test_marker_without_unit() {
        assert_eq!(parse_ping_output("time=37"), Err(ProbeError::MissingMarker));
    }

    #[test]
    fn test_non_numeric_value_is_a_failure() {
        assert_eq!(
            parse_ping_output("time=abc ms"),
            Err(ProbeError::Parse("abc".to_string()))
        );
        assert_eq!(parse_ping_output("time=ms"), Err(ProbeError::Parse(String::new())));
    }

    #[test]
    fn test_negative_value_is_a_failure() {
        assert_eq!(
            parse_ping_output("time=-4ms"),
            Err(ProbeError::Parse("-4".to_string()))
        );
    }

    #[test]
    fn test_first_reply_wins() {
        let output = "time=20ms\ntime=90ms\n";
        assert_eq!(parse_ping_output(output), Ok(Duration::from_millis(20)));
    }
}
