use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

/// Wall-clock frame timing for a timer-driven simulation.
///
/// Each timer callback calls `begin_frame()`, which returns the elapsed time since
/// the previous callback clamped to `max_dt`. `resync()` re-bases the clock so that
/// time spent suspended (pause, a modal riddle prompt) never arrives as one huge delta.
pub struct TimeState {
    pub target_dt: f64,
    pub max_dt: f64,
    pub real_dt: f64,
    pub total_time: f64,
    pub frame_count: u64,
    pub clamped_frames: u64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl TimeState {
    pub fn new(target_fps: u32, max_dt: f64) -> Self {
        let target_dt = 1.0 / target_fps.max(1) as f64;
        Self {
            target_dt,
            max_dt,
            real_dt: 0.0,
            total_time: 0.0,
            frame_count: 0,
            clamped_frames: 0,
            last_instant: Instant::now(),
            fps_samples: [target_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 1.0 / target_dt,
            smoothed_frame_time_ms: target_dt * 1000.0,
        }
    }

    /// Timer interval in whole milliseconds (16 at 60 Hz).
    pub fn interval_ms(&self) -> u64 {
        (self.target_dt * 1000.0) as u64
    }

    /// Measure the wall-clock delta since the last frame and feed it to `advance`.
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(raw)
    }

    /// Account for `raw_dt` seconds of elapsed time and return the clamped delta
    /// the simulation should use.
    pub fn advance(&mut self, raw_dt: f64) -> f32 {
        let mut dt = raw_dt.max(0.0);
        if dt > self.max_dt {
            log::warn!(
                "Frame took {:.1}ms -- clamping delta to {}ms",
                dt * 1000.0,
                self.max_dt * 1000.0
            );
            dt = self.max_dt;
            self.clamped_frames += 1;
        }

        self.real_dt = dt;
        self.total_time += dt;
        self.frame_count += 1;

        // FPS smoothing
        self.fps_samples[self.fps_sample_index] = dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        dt as f32
    }

    pub fn resync(&mut self) {
        self.last_instant = Instant::now();
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new(60, 0.1)
    }
}
