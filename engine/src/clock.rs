use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

const FPS_WINDOW: usize = 10;

/// Frame-rate throttling clock.
///
/// `tick` sleeps just long enough to keep the loop at or below the requested
/// rate. It never speeds up a frame that is already over budget.
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Instant,
    recent: VecDeque<Duration>,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            recent: VecDeque::with_capacity(FPS_WINDOW),
            frames: 0,
        }
    }

    /// Block until `1 / frame_rate` seconds have passed since the previous
    /// tick, then return the real time elapsed since that tick.
    /// A `frame_rate` of 0 disables throttling.
    pub fn tick(&mut self, frame_rate: u32) -> Duration {
        if let Some(budget) = frame_budget(frame_rate) {
            let spent = self.last_tick.elapsed();
            if spent < budget {
                thread::sleep(budget - spent);
            }
        }

        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;

        if self.recent.len() == FPS_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(delta);
        self.frames += 1;
        delta
    }

    /// Average frame rate over the last ten ticks, 0.0 before the first one.
    pub fn fps(&self) -> f32 {
        let total: Duration = self.recent.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.recent.len() as f32 / total.as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Restart the measurement from now, dropping the fps history.
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
        self.recent.clear();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

fn frame_budget(frame_rate: u32) -> Option<Duration> {
    if frame_rate == 0 {
        None
    } else {
        Some(Duration::from_secs_f64(1.0 / f64::from(frame_rate)))
    }
}
