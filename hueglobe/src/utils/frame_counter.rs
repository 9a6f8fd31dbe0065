use std::collections::VecDeque;
use web_time::{Duration, Instant};

const DEFAULT_RUNNING_SIZE: usize = 60;

#[derive(Debug, Clone)]
pub struct FrameCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    frames: u64,
}

impl Default for FrameCounter {
    fn default() -> Self {
        FrameCounter {
            frame_times: VecDeque::with_capacity(DEFAULT_RUNNING_SIZE),
            last_frame: Instant::now(),
            frames: 0,
        }
    }
}

impl FrameCounter {
    /// Marks the start of a new frame and returns the time since the previous one
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.new_frame(delta.as_secs_f32());
        delta
    }

    pub fn new_frame(&mut self, delta_time: f32) {
        if self.frame_times.len() >= DEFAULT_RUNNING_SIZE {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(delta_time);
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn mean_delta_time(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    pub fn fps(&self) -> u32 {
        let mean = self.mean_delta_time();
        if mean <= f32::EPSILON {
            return 0;
        }
        (1.0 / mean) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_follows_the_running_mean() {
        let mut counter = FrameCounter::default();
        assert_eq!(counter.fps(), 0);

        counter.new_frame(0.5);
        counter.new_frame(0.5);
        assert_eq!(counter.frames(), 2);
        assert_eq!(counter.fps(), 2);

        for _ in 0..DEFAULT_RUNNING_SIZE {
            counter.new_frame(0.01);
        }
        assert_eq!(counter.frames(), 2 + DEFAULT_RUNNING_SIZE as u64);
        assert!((counter.mean_delta_time() - 0.01).abs() < 1e-6);
    }
}
