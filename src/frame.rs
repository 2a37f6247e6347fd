use std::time::{Duration, Instant};

/// Time left in a frame of length `target` after `elapsed` has passed.
pub fn remaining(target: Duration, elapsed: Duration) -> Duration {
    target.saturating_sub(elapsed)
}

/// Sleeps away whatever is left of each frame to hold a fixed rate.
pub struct FrameLimiter {
    target: Duration,
    frame_start: Instant,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        FrameLimiter {
            target: Duration::from_secs(1) / fps.max(1),
            frame_start: Instant::now(),
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    pub fn begin(&mut self) {
        self.frame_start = Instant::now();
    }

    pub fn wait(&self) {
        let left = remaining(self.target, self.frame_start.elapsed());
        if !left.is_zero() {
            std::thread::sleep(left);
        }
    }
}
