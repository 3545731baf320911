use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Moving average of the step rate over the last `window` step durations.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    samples: VecDeque<f64>,
    window: usize,
    last: Option<Instant>,
    fps: f64,
}

impl FpsCounter {
    pub fn new(window: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(window + 1),
            window: window.max(1),
            last: None,
            fps: 0.0,
        }
    }

    /// Records the time since the previous call. The first call only starts the clock.
    pub fn tick(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last.replace(now) {
            self.record(now - last);
        }
    }

    pub fn record(&mut self, elapsed: Duration) {
        let seconds = elapsed.as_secs_f64();
        if seconds <= 0.0 {
            return;
        }
        self.samples.push_back(1.0 / seconds);
        while self.samples.len() > self.window {
            self.samples.pop_front();
        }
        self.fps = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}
