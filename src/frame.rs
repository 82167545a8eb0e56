use std::time::Instant;

const FPS_UPDATE_INTERVAL: f32 = 0.5;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Idle,
    Running { start: Instant, last: Instant },
    Cancelled,
}

/// Per-session frame schedule
///
/// Yields frames only between `begin` and `cancel`. Cancelling is final:
/// a cancelled loop never schedules another frame.
#[derive(Debug)]
pub struct FrameLoop {
    frame_number: u64,
    state: LoopState,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            frame_number: 0,
            state: LoopState::Idle,
        }
    }

    pub fn begin(&mut self) {
        if self.state == LoopState::Idle {
            let now = Instant::now();
            self.state = LoopState::Running { start: now, last: now };
        }
    }

    pub fn cancel(&mut self) {
        self.state = LoopState::Cancelled;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Schedules the next frame, or `None` once the loop is not running
    pub fn next_frame(&mut self) -> Option<FrameInfo> {
        let LoopState::Running { start, last } = &mut self.state else {
            return None;
        };

        let now = Instant::now();
        let delta = now.duration_since(*last).as_secs_f32();
        let time = now.duration_since(*start).as_secs_f32();
        *last = now;

        let info = FrameInfo::new(self.frame_number, time, delta);
        self.frame_number += 1;
        Some(info)
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameLoop {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        self.next_frame()
    }
}

/// Frames-per-second averaged over half-second windows
#[derive(Debug, Default, Clone)]
pub struct FpsCounter {
    fps: f32,
    frame_count: u32,
    timer: f32,
}

impl FpsCounter {
    pub fn update(&mut self, delta: f32) {
        self.frame_count += 1;
        self.timer += delta;

        if self.timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.timer;
            log::debug!("FPS: {:.1}", self.fps);
            self.frame_count = 0;
            self.timer = 0.0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_loop_yields_nothing() {
        let mut frames = FrameLoop::new();
        assert!(frames.next_frame().is_none());
        assert!(!frames.is_running());
    }

    #[test]
    fn frames_are_numbered_from_zero() {
        let mut frames = FrameLoop::new();
        frames.begin();
        let numbers: Vec<u64> = frames.by_ref().take(3).map(|f| f.number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
        assert_eq!(frames.frame_number(), 3);
    }

    #[test]
    fn cancel_is_final() {
        let mut frames = FrameLoop::new();
        frames.begin();
        frames.cancel();
        frames.begin();
        assert!(frames.next_frame().is_none());
    }

    #[test]
    fn fps_counter_averages_window() {
        let mut fps = FpsCounter::default();
        for _ in 0..40 {
            fps.update(1.0 / 60.0);
        }
        assert!((fps.fps() - 60.0).abs() < 1.0);
    }
}
