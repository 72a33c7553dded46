//=========================================================================
// Frame Time
//=========================================================================

const FPS_SAMPLE_COUNT: usize = 60;

/// Per-frame timing, advanced by the runtime with the measured delta.
///
/// Deltas are variable; there is no fixed-step accumulator.
#[derive(Debug, Clone)]
pub struct FrameTime {
    delta: f32,
    elapsed: f64,
    frame_count: u64,
    target_fps: Option<u32>,

    fps_samples: [f32; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    fps_samples_filled: usize,
    smoothed_fps: f32,
}

impl FrameTime {
    pub fn new(target_fps: Option<u32>) -> Self {
        Self {
            delta: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            target_fps,
            fps_samples: [0.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            fps_samples_filled: 0,
            smoothed_fps: 0.0,
        }
    }

    pub(crate) fn advance(&mut self, delta: f32) {
        let delta = delta.max(0.0);
        self.delta = delta;
        self.elapsed += delta as f64;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = delta;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        self.fps_samples_filled = (self.fps_samples_filled + 1).min(FPS_SAMPLE_COUNT);

        let filled = &self.fps_samples[..self.fps_samples_filled];
        let avg_dt = filled.iter().sum::<f32>() / filled.len() as f32;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    /// Duration of the last frame in seconds.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Seconds since the first frame.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second averaged over the last 60 frames (fewer during
    /// warm-up; 0 before the first frame).
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    pub fn target_fps(&self) -> Option<u32> {
        self.target_fps
    }

    /// Changes the frame cap; `None` or `Some(0)` uncaps.
    pub fn set_target_fps(&mut self, fps: Option<u32>) {
        self.target_fps = fps.filter(|&fps| fps > 0);
    }

    /// Minimum frame duration implied by the target, if any.
    pub fn target_frame_duration(&self) -> Option<std::time::Duration> {
        self.target_fps
            .map(|fps| std::time::Duration::from_secs_f64(1.0 / fps as f64))
    }
}

impl Default for FrameTime {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut time = FrameTime::default();
        time.advance(0.5);
        time.advance(0.25);

        assert_eq!(time.delta(), 0.25);
        assert_eq!(time.elapsed(), 0.75);
        assert_eq!(time.frame_count(), 2);
    }

    #[test]
    fn fps_converges_to_steady_rate() {
        let mut time = FrameTime::default();
        for _ in 0..FPS_SAMPLE_COUNT {
            time.advance(1.0 / 30.0);
        }
        assert!((time.fps() - 30.0).abs() < 0.01);
    }

    #[test]
    fn fps_ignores_unfilled_samples() {
        let mut time = FrameTime::default();
        assert_eq!(time.fps(), 0.0);

        time.advance(1.0 / 30.0);
        assert!((time.fps() - 30.0).abs() < 0.01);

        time.advance(1.0 / 10.0);
        // mean of 1/30 and 1/10 is 1/15
        assert!((time.fps() - 15.0).abs() < 0.01);
    }

    #[test]
    fn fps_window_drops_oldest_sample() {
        let mut time = FrameTime::default();
        time.advance(1.0);
        for _ in 0..FPS_SAMPLE_COUNT {
            time.advance(1.0 / 60.0);
        }
        assert!((time.fps() - 60.0).abs() < 0.01);
    }

    #[test]
    fn negative_delta_is_clamped() {
        let mut time = FrameTime::default();
        time.advance(-1.0);
        assert_eq!(time.delta(), 0.0);
    }

    #[test]
    fn zero_target_uncaps() {
        let mut time = FrameTime::new(Some(60));
        assert!(time.target_frame_duration().is_some());

        time.set_target_fps(Some(0));
        assert_eq!(time.target_fps(), None);
        assert_eq!(time.target_frame_duration(), None);
    }
}
