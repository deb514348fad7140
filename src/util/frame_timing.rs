//! Frame-rate bookkeeping for the renderer's periodic FPS log.

use web_time::{Duration, Instant};

/// Frame timing with smoothed FPS and a periodic debug-level summary.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Last time a summary was logged
    last_report: Instant,
    /// Summary period (zero = never)
    report_interval: Duration,
    /// Frames since the last summary
    frames_since_report: u32,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a timer logging a summary every `report_interval_secs`
    /// seconds. Zero, negative and non-finite intervals disable the summary.
    #[must_use]
    pub fn new(report_interval_secs: f32) -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            last_report: now,
            report_interval: Duration::try_from_secs_f32(report_interval_secs)
                .unwrap_or(Duration::ZERO),
            frames_since_report: 0,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,
        }
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        self.record(now.duration_since(self.last_frame));
        self.last_frame = now;

        if self.report_interval.is_zero() {
            return;
        }
        let since_report = now.duration_since(self.last_report);
        if since_report >= self.report_interval {
            let average =
                self.frames_since_report as f32 / since_report.as_secs_f32();
            log::debug!(
                "{} frames in {:.1}s ({average:.1} fps, smoothed {:.1})",
                self.frames_since_report,
                since_report.as_secs_f32(),
                self.smoothed_fps
            );
            self.frames_since_report = 0;
            self.last_report = now;
        }
    }

    fn record(&mut self, elapsed: Duration) {
        self.frames_since_report += 1;
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_moves_toward_observed_rate() {
        let mut timing = FrameTiming::new(0.0);
        for _ in 0..200 {
            timing.record(Duration::from_millis(10));
        }
        assert!((timing.fps() - 100.0).abs() < 1.0);
    }

    #[test]
    fn zero_length_frames_are_ignored() {
        let mut timing = FrameTiming::new(0.0);
        timing.record(Duration::ZERO);
        assert_eq!(timing.fps(), 60.0);
    }

    #[test]
    fn unrepresentable_intervals_disable_reporting() {
        for secs in [f32::INFINITY, f32::MAX, f32::NAN, -1.0] {
            let timing = FrameTiming::new(secs);
            assert!(timing.report_interval.is_zero(), "{secs}");
        }
        let timing = FrameTiming::new(5.0);
        assert_eq!(timing.report_interval, Duration::from_secs(5));
    }

    #[test]
    fn infinite_interval_from_toml_is_accepted() {
        let options = crate::options::Options::from_toml_str(
            "[display]\nfps_log_interval = inf\n",
        )
        .unwrap();
        let mut timing = FrameTiming::new(options.display.fps_log_interval);
        timing.end_frame();
        assert_eq!(timing.frames_since_report, 1);
    }
}
