//! Timer module - elapsed play time with pause/resume
//!
//! Every operation has an `_at(Instant)` form taking the current instant
//! explicitly; the plain forms read `Instant::now()`. Tests and the game state
//! use the `_at` forms so that time is fully deterministic.

use std::time::{Duration, Instant};

/// Wall-clock play timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    start: Instant,
    accumulated_pause: Duration,
    pause_start: Option<Instant>,
    elapsed: Duration,
    stopped: bool,
}

impl Timer {
    /// Create a timer started now
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    /// Create a timer started at `now`
    pub fn started_at(now: Instant) -> Self {
        Self {
            start: now,
            accumulated_pause: Duration::ZERO,
            pause_start: None,
            elapsed: Duration::ZERO,
            stopped: false,
        }
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// (Re)start counting from zero at `now`
    pub fn start_at(&mut self, now: Instant) {
        *self = Self::started_at(now);
    }

    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    /// Same as [`Timer::start_at`]; the game calls this on every deal
    pub fn reset_at(&mut self, now: Instant) {
        self.start_at(now);
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Recompute elapsed time. No-op while paused or stopped.
    pub fn update_at(&mut self, now: Instant) {
        if self.stopped || self.pause_start.is_some() {
            return;
        }
        self.elapsed = now
            .saturating_duration_since(self.start)
            .saturating_sub(self.accumulated_pause);
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// Start a pause. Pausing twice keeps the first pause start.
    pub fn pause_at(&mut self, now: Instant) {
        if self.stopped || self.pause_start.is_some() {
            return;
        }
        self.update_at(now);
        self.pause_start = Some(now);
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    /// End the current pause, adding its length to the accumulated pause
    pub fn resume_at(&mut self, now: Instant) {
        if let Some(paused_at) = self.pause_start.take() {
            self.accumulated_pause += now.saturating_duration_since(paused_at);
        }
    }

    /// Freeze the elapsed value; only a reset unfreezes it
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.pause_start.is_some()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Elapsed time as `MM:SS`
    pub fn formatted(&self) -> String {
        format_mm_ss(self.elapsed)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a duration as `MM:SS`, truncated to whole seconds.
///
/// Minutes are not wrapped into hours.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use mahjong_core::timer::format_mm_ss;
///
/// assert_eq!(format_mm_ss(Duration::from_millis(65_999)), "01:05");
/// assert_eq!(format_mm_ss(Duration::from_secs(6000)), "100:00");
/// ```
pub fn format_mm_ss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_update_tracks_wall_clock() {
        let t0 = Instant::now();
        let mut timer = Timer::started_at(t0);
        assert_eq!(timer.elapsed(), Duration::ZERO);

        timer.update_at(t0 + secs(3));
        assert_eq!(timer.elapsed(), secs(3));
    }

    #[test]
    fn test_pause_excludes_paused_span() {
        let t0 = Instant::now();
        let mut timer = Timer::started_at(t0);

        timer.pause_at(t0 + secs(10));
        assert!(timer.is_paused());
        timer.update_at(t0 + secs(25));
        assert_eq!(timer.elapsed(), secs(10));

        timer.resume_at(t0 + secs(30));
        timer.update_at(t0 + secs(35));
        assert_eq!(timer.elapsed(), secs(15));
    }

    #[test]
    fn test_double_pause_keeps_first_start() {
        let t0 = Instant::now();
        let mut timer = Timer::started_at(t0);
        timer.pause_at(t0 + secs(1));
        timer.pause_at(t0 + secs(5));
        timer.resume_at(t0 + secs(6));
        timer.update_at(t0 + secs(7));
        assert_eq!(timer.elapsed(), secs(2));
    }

    #[test]
    fn test_resume_without_pause_is_noop() {
        let t0 = Instant::now();
        let mut timer = Timer::started_at(t0);
        timer.resume_at(t0 + secs(4));
        timer.update_at(t0 + secs(4));
        assert_eq!(timer.elapsed(), secs(4));
    }

    #[test]
    fn test_stop_freezes_elapsed() {
        let t0 = Instant::now();
        let mut timer = Timer::started_at(t0);
        timer.update_at(t0 + secs(42));
        timer.stop();
        timer.update_at(t0 + secs(100));
        assert_eq!(timer.elapsed(), secs(42));
        assert!(timer.is_stopped());

        timer.reset_at(t0 + secs(100));
        assert!(!timer.is_stopped());
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_formatting_truncates() {
        assert_eq!(format_mm_ss(Duration::ZERO), "00:00");
        assert_eq!(format_mm_ss(Duration::from_millis(59_999)), "00:59");
        assert_eq!(format_mm_ss(secs(61)), "01:01");

        let t0 = Instant::now();
        let mut timer = Timer::started_at(t0);
        timer.update_at(t0 + Duration::from_millis(125_400));
        assert_eq!(timer.formatted(), "02:05");
    }
}
