use std::collections::HashMap;
use std::time::Instant;

/// Observer for merge runs: row progress, stage timings, counters.
///
/// Keeps executors free of any particular output mechanism.
pub trait MergeLogger: Send {
    /// Report that `current` of `total` tile rows are folded.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named stage took for one row (or the final flush).
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time counter (e.g. fragment count).
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards everything. Default for library callers and tests.
pub struct NullMergeLogger;

impl MergeLogger for NullMergeLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Collects per-stage timings and metrics and reports through `log`.
///
/// Progress lines are throttled to every `throttle_rows` rows.
pub struct StdoutMergeLogger {
    throttle_rows: usize,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    total_rows: usize,
}

impl StdoutMergeLogger {
    pub fn new(throttle_rows: usize) -> Self {
        Self {
            throttle_rows: throttle_rows.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            total_rows: 0,
        }
    }

    /// Formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Merge summary ({} tile rows, {:.1}ms total):",
            self.total_rows, elapsed_ms
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = mean(durations);
            lines.push(format!(
                "  {stage:14}: avg {avg_ms:7.2}ms  total {total_ms:8.2}ms"
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            let values = &self.metrics[name];
            let last = values.last().copied().unwrap_or(0.0);
            lines.push(format!("  {name}: {last}"));
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

/// Milliseconds elapsed since `start`.
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

impl Default for StdoutMergeLogger {
    fn default() -> Self {
        Self::new(10)
    }
}

impl MergeLogger for StdoutMergeLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_rows = total;
        if total > 0 && (current % self.throttle_rows == 0 || current == total) {
            log::info!("Merged tile rows: {current}/{total}");
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

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
