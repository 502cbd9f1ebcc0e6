use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub produced: u64,
    pub dispatched: u64,
    pub recorded: u64,
    pub failed: u64,
    pub peak_in_flight: usize,
    pub interrupted: bool,
    pub elapsed_seconds: f64,
}

impl RunSummary {
    pub fn succeeded(&self) -> u64 {
        self.recorded - self.failed
    }

    pub fn requests_per_second(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.recorded as f64 / self.elapsed_seconds
        } else {
            0.0
        }
    }
}
