use std::time::Instant;

/// Frame pacing with an explicit run/stop switch
///
/// The interactive binary starts it once and leaves it running; tests drive a
/// bounded number of ticks and stop it.
#[derive(Debug)]
pub struct RenderLoop {
    last_tick: Instant,
    running: bool,
    frames: u64,
}

impl RenderLoop {
    /// Create a running loop starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            running: true,
            frames: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Resume scheduling; resets the clock so the first delta after a pause
    /// stays small
    pub fn run(&mut self) {
        self.running = true;
        self.last_tick = Instant::now();
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance one frame; returns the delta since the previous tick in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.frames += 1;
        delta
    }

    /// Total frames ticked since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_loop_starts_running() {
        let render_loop = RenderLoop::new();
        assert!(render_loop.is_running());
        assert_eq!(render_loop.frames(), 0);
    }

    #[test]
    fn test_tick_measures_delta() {
        let mut render_loop = RenderLoop::new();

        thread::sleep(Duration::from_millis(10));
        let delta = render_loop.tick();

        assert!(delta >= 0.009, "Delta should cover the sleep, got {}", delta);
        assert!(delta < 0.5, "Delta should stay near the sleep, got {}", delta);
    }

    #[test]
    fn test_tick_counts_frames() {
        let mut render_loop = RenderLoop::new();

        for _ in 0..5 {
            render_loop.tick();
        }

        assert_eq!(render_loop.frames(), 5);
    }

    #[test]
    fn test_stop_and_run() {
        let mut render_loop = RenderLoop::new();

        render_loop.stop();
        assert!(!render_loop.is_running());

        thread::sleep(Duration::from_millis(10));
        render_loop.run();
        assert!(render_loop.is_running());

        // Clock was reset on run, so the pause is not counted
        let delta = render_loop.tick();
        assert!(delta < 0.009, "Pause time should not leak into the delta, got {}", delta);
    }
}
