use std::time::Duration;

/// Parses the `Duration: HH:MM:SS.ff` field ffmpeg logs for its input.
///
/// Only lines that begin with the field count. Metadata values that merely
/// contain `Duration:` are ignored, as are stamps that overflow.
pub fn parse_duration_line(line: &str) -> Option<Duration> {
    let rest = line.trim_start().strip_prefix("Duration:")?;
    let stamp = rest.trim_start().split(',').next()?.trim();
    parse_timestamp(stamp)
}

fn parse_timestamp(stamp: &str) -> Option<Duration> {
    let mut parts = stamp.splitn(3, ':');
    let hours: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;
    let whole = hours.checked_mul(3600)?.checked_add(minutes.checked_mul(60)?)?;
    let fraction = Duration::try_from_secs_f64(seconds).ok()?;
    Duration::from_secs(whole).checked_add(fraction)
}

/// Turns ffmpeg log and `-progress` output into fractional progress.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    total: Option<Duration>,
    last_log: Option<String>,
}

impl ProgressTracker {
    pub fn total(&self) -> Option<Duration> {
        self.total
    }

    pub fn last_log(&self) -> Option<&str> {
        self.last_log.as_deref()
    }

    /// Records a log line; the first input duration seen becomes the total.
    pub fn observe_log(&mut self, line: &str) {
        if self.total.is_none() {
            self.total = parse_duration_line(line).filter(|total| !total.is_zero());
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            self.last_log = Some(trimmed.to_string());
        }
    }

    /// Interprets one `key=value` line of `-progress` output.
    pub fn observe_progress(&mut self, line: &str) -> Option<f64> {
        let (key, value) = line.trim().split_once('=')?;
        match key {
            // out_time_ms is in microseconds as well.
            "out_time_us" | "out_time_ms" => {
                let elapsed_us: i64 = value.trim().parse().ok()?;
                let total_us = self.total?.as_micros() as f64;
                Some((elapsed_us as f64 / total_us).clamp(0.0, 1.0))
            }
            "progress" if value.trim() == "end" => Some(1.0),
            _ => None,
        }
    }
}
