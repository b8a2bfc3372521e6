use std::collections::HashMap;
use std::time::Instant;

/// Sink for scan events: progress, stage timings, metrics and messages.
///
/// Use cases report through this trait instead of calling `log` directly
/// so tests can run silently and the CLI can aggregate a summary.
pub trait PipelineLogger: Send {
    /// `current` of `total` videos finished.
    fn progress(&mut self, current: usize, total: usize);

    /// Time spent in a named stage for one sampled frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Point-in-time value, e.g. faces found in one frame.
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Non-fatal problem: a skipped video, a failed frame.
    fn warn(&mut self, message: &str);

    /// End-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards everything.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
    fn warn(&mut self, _message: &str) {}
}

/// Forwards messages to the `log` facade and keeps timing and metric
/// samples for the summary printed at the end of a scan.
pub struct StdoutPipelineLogger {
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    videos_done: usize,
    warnings: usize,
}

impl StdoutPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            videos_done: 0,
            warnings: 0,
        }
    }

    /// Formatted summary, or `None` if no frame was ever timed.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.timings.get("detect").map_or(0, Vec::len);
        let mut lines = vec![format!(
            "Scan summary ({} videos, {frames} sampled frames, {:.1}s total):",
            self.videos_done,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = mean(durations);
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms  ({pct:4.1}%)"
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            let values = &self.metrics[name];
            let max = values.iter().copied().fold(0.0_f64, f64::max);
            lines.push(format!("  {name}: avg {:.1}, max {max:.0}", mean(values)));
        }

        if self.warnings > 0 {
            lines.push(format!("  Warnings: {}", self.warnings));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.videos_done = current;
        if total > 0 {
            let pct = current as f64 / total as f64 * 100.0;
            log::debug!("Overall progress: {current}/{total} videos ({pct:.1}%)");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn warn(&mut self, message: &str) {
        self.warnings += 1;
        log::warn!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_null_logger_accepts_everything() {
        let mut logger = NullPipelineLogger;
        logger.progress(1, 10);
        logger.timing("detect", 5.0);
        logger.metric("faces_per_frame", 3.0);
        logger.info("hello");
        logger.warn("careful");
        logger.summary();
    }

    #[test]
    fn test_timing_records_values_per_stage() {
        let mut logger = StdoutPipelineLogger::new();
        logger.timing("detect", 20.0);
        logger.timing("detect", 30.0);
        logger.timing("match", 1.5);

        assert_eq!(logger.timings_for("detect").unwrap(), &[20.0, 30.0]);
        assert_eq!(logger.timings_for("match").unwrap(), &[1.5]);
        assert!(logger.timings_for("decode").is_none());
    }

    #[test]
    fn test_metric_records_values() {
        let mut logger = StdoutPipelineLogger::new();
        logger.metric("faces_per_frame", 3.0);
        logger.metric("faces_per_frame", 4.0);
        assert_relative_eq!(mean(logger.metrics_for("faces_per_frame").unwrap()), 3.5);
    }

    #[test]
    fn test_summary_counts_videos_and_frames() {
        let mut logger = StdoutPipelineLogger::new();
        logger.progress(3, 3);
        logger.timing("decode", 4.0);
        logger.timing("detect", 20.0);
        logger.timing("detect", 30.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("3 videos"));
        assert!(summary.contains("2 sampled frames"));
        assert!(summary.contains("decode"));
        assert!(summary.contains("detect"));
    }

    #[test]
    fn test_summary_includes_metric_average_and_max() {
        let mut logger = StdoutPipelineLogger::new();
        logger.metric("faces_per_frame", 1.0);
        logger.metric("faces_per_frame", 4.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("faces_per_frame: avg 2.5, max 4"));
    }

    #[test]
    fn test_summary_reports_warnings() {
        let mut logger = StdoutPipelineLogger::new();
        logger.warn("could not open a.mp4");
        logger.timing("detect", 1.0);
        assert!(logger.summary_string().unwrap().contains("Warnings: 1"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = StdoutPipelineLogger::new();
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_mean_of_nothing_is_zero() {
        assert_relative_eq!(mean(&[]), 0.0);
    }
}
