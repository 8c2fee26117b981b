use std::time::{Duration, Instant};

pub const TARGET_FPS: u32 = 60;

/// Longest step fed to the simulation; a stall (window drag, breakpoint)
/// must not teleport the player through walls.
pub const MAX_DT: Duration = Duration::from_millis(100);

/// Measures inter-frame time and paces the loop to a target interval.
pub struct FrameClock {
    interval: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    pub fn starting_at(target_fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_micros(1_000_000 / target_fps.max(1) as u64),
            last: now,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Seconds since the previous tick (capped at [`MAX_DT`]).
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// [`FrameClock::tick`] against an explicit clock reading.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed.min(MAX_DT).as_secs_f32()
    }

    /// How long to sleep so this frame lasts `interval`.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last))
    }

    /// Sleep away the rest of the current frame interval.
    pub fn pace(&self) {
        let rest = self.remaining_at(Instant::now());
        if !rest.is_zero() {
            std::thread::sleep(rest);
        }
    }
}

/// Rolling render-time average, reported every few seconds.
pub struct FrameStats {
    acc_time: Duration,
    acc_frames: usize,
    last_report: Instant,
    every: Duration,
}

impl FrameStats {
    pub fn new(every: Duration) -> Self {
        Self {
            acc_time: Duration::ZERO,
            acc_frames: 0,
            last_report: Instant::now(),
            every,
        }
    }

    /// Record one frame's render time. Returns `(avg_ms, fps)` when a report
    /// is due and resets the window.
    pub fn record(&mut self, frame_time: Duration) -> Option<(f64, f64)> {
        self.acc_time += frame_time;
        self.acc_frames += 1;
        if self.last_report.elapsed() < self.every {
            return None;
        }
        let avg_ms = self.acc_time.as_secs_f64() * 1000.0 / self.acc_frames as f64;
        let fps = if avg_ms > 0.0 { 1000.0 / avg_ms } else { f64::INFINITY };
        self.acc_time = Duration::ZERO;
        self.acc_frames = 0;
        self.last_report = Instant::now();
        Some((avg_ms, fps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_measured_and_capped() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(60, t0);
        let dt = clock.tick_at(t0 + Duration::from_millis(20));
        assert!((dt - 0.020).abs() < 1e-6);
        let dt = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((dt - MAX_DT.as_secs_f32()).abs() < 1e-6);
    }

    #[test]
    fn remaining_sleep_targets_interval() {
        let t0 = Instant::now();
        let clock = FrameClock::starting_at(50, t0);
        assert_eq!(clock.interval(), Duration::from_millis(20));
        assert_eq!(
            clock.remaining_at(t0 + Duration::from_millis(5)),
            Duration::from_millis(15)
        );
        assert_eq!(
            clock.remaining_at(t0 + Duration::from_millis(50)),
            Duration::ZERO
        );
    }

    #[test]
    fn stats_report_when_due() {
        let mut stats = FrameStats::new(Duration::ZERO);
        let (avg, fps) = stats.record(Duration::from_millis(4)).unwrap();
        assert!((avg - 4.0).abs() < 1e-9);
        assert!((fps - 250.0).abs() < 1e-6);

        let mut quiet = FrameStats::new(Duration::from_secs(3600));
        assert!(quiet.record(Duration::from_millis(4)).is_none());
    }
}
