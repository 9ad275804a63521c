use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub elapsed_ms: u64,
    pub files_ok: u64,
    pub files_failed: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub overall_ratio: f64,
}

/// Counters shared by the file jobs of a single run
pub struct MetricsCollector {
    start_time: std::time::Instant,
    files_ok: AtomicU64,
    files_failed: AtomicU64,
    bytes_in: AtomicU64,
    bytes_out: AtomicU64,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            start_time: std::time::Instant::now(),
            files_ok: AtomicU64::new(0),
            files_failed: AtomicU64::new(0),
            bytes_in: AtomicU64::new(0),
            bytes_out: AtomicU64::new(0),
        }
    }

    pub fn record_success(&self, bytes_in: u64, bytes_out: u64) {
        self.files_ok.fetch_add(1, Ordering::Relaxed);
        self.bytes_in.fetch_add(bytes_in, Ordering::Relaxed);
        self.bytes_out.fetch_add(bytes_out, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.files_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self) -> RunSummary {
        let bytes_in = self.bytes_in.load(Ordering::Relaxed);
        let bytes_out = self.bytes_out.load(Ordering::Relaxed);

        RunSummary {
            elapsed_ms: self.start_time.elapsed().as_millis() as u64,
            files_ok: self.files_ok.load(Ordering::Relaxed),
            files_failed: self.files_failed.load(Ordering::Relaxed),
            bytes_in,
            bytes_out,
            overall_ratio: if bytes_in == 0 { 0.0 } else { bytes_out as f64 / bytes_in as f64 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_counts() {
        let metrics = MetricsCollector::new();
        metrics.record_success(100, 50);
        metrics.record_success(300, 150);
        metrics.record_failure();

        let summary = metrics.summary();
        assert_eq!(summary.files_ok, 2);
        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.bytes_in, 400);
        assert_eq!(summary.bytes_out, 200);
        assert!((summary.overall_ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_run_has_zero_ratio() {
        assert_eq!(MetricsCollector::default().summary().overall_ratio, 0.0);
    }
}
