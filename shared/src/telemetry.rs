use std::time::{Duration, Instant};

/// Wall-clock timer for one pipeline stage. Logs the elapsed time when finished.
pub struct Telemetry {
    stage: &'static str,
    start: Instant,
}

impl Telemetry {
    pub fn new(stage: &'static str) -> Self {
        tracing::debug!(stage, "stage started");
        Self {
            stage,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        tracing::info!(
            stage = self.stage,
            elapsed_ms = elapsed.as_millis() as u64,
            "stage finished"
        );
        elapsed
    }
}
