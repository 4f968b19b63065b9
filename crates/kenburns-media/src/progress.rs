//! Progress-stream parsing and bounded diagnostics capture.
//!
//! The engine's stderr carries both its log output and the machine-readable
//! `-progress` key/value stream. Each line is inspected by two independent
//! functions: one feeds the bounded diagnostics ring, the other extracts the
//! elapsed-output-time signal.

use std::collections::VecDeque;

/// Lines of diagnostics retained for error reporting.
const LOG_RING_CAPACITY: usize = 80;

/// Lines included in a failure message.
const ERROR_TAIL_LINES: usize = 20;

/// Bounded ring buffer of recent engine output lines.
///
/// Keeps memory flat on long or noisy renders while preserving the tail that
/// matters when the engine exits non-zero.
#[derive(Debug)]
pub struct LogRing {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogRing {
    pub fn new() -> Self {
        Self::with_capacity(LOG_RING_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a line, dropping the oldest once full. Blank lines are skipped.
    pub fn push(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.to_string());
    }

    /// The last `ERROR_TAIL_LINES` lines, joined for an error message.
    pub fn tail(&self) -> String {
        let skip = self.lines.len().saturating_sub(ERROR_TAIL_LINES);
        self.lines
            .iter()
            .skip(skip)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for LogRing {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the elapsed output time in microseconds from a progress line.
///
/// FFmpeg reports microseconds under both `out_time_us` and (despite the
/// name) `out_time_ms`; both keys are accepted. Unparseable values are
/// ignored.
pub fn parse_out_time_us(line: &str) -> Option<i64> {
    let (key, value) = line.trim().split_once('=')?;
    match key {
        "out_time_us" | "out_time_ms" => value.trim().parse().ok(),
        _ => None,
    }
}

/// Convert elapsed microseconds into a progress fraction in [0, 1].
pub fn progress_fraction(out_time_us: i64, duration_secs: f64) -> f64 {
    if duration_secs <= 0.0 {
        return 0.0;
    }
    (out_time_us as f64 / (duration_secs * 1_000_000.0)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_is_bounded() {
        let mut ring = LogRing::with_capacity(3);
        for i in 0..10 {
            ring.push(&format!("line {i}"));
        }
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.tail(), "line 7\nline 8\nline 9");
    }

    #[test]
    fn ring_skips_blank_lines() {
        let mut ring = LogRing::new();
        ring.push("   ");
        ring.push("");
        ring.push("real output");
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn tail_is_capped_at_twenty_lines() {
        let mut ring = LogRing::new();
        for i in 0..50 {
            ring.push(&format!("l{i}"));
        }
        assert_eq!(ring.tail().lines().count(), 20);
        assert!(ring.tail().ends_with("l49"));
    }

    #[test]
    fn parses_out_time_keys_as_microseconds() {
        assert_eq!(parse_out_time_us("out_time_us=2500000"), Some(2_500_000));
        assert_eq!(parse_out_time_us("out_time_ms=2500000"), Some(2_500_000));
        assert_eq!(parse_out_time_us("frame=42"), None);
        assert_eq!(parse_out_time_us("out_time_ms=N/A"), None);
        assert_eq!(parse_out_time_us("no equals sign here"), None);
    }

    #[test]
    fn fraction_is_clamped() {
        assert_eq!(progress_fraction(2_500_000, 5.0), 0.5);
        assert_eq!(progress_fraction(99_000_000, 5.0), 1.0);
        assert_eq!(progress_fraction(-1, 5.0), 0.0);
    }
}
