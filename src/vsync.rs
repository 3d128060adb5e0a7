// src/vsync.rs

//! Refresh pacing for presents.
//!
//! A present must not return before the frame is latched on the output, and
//! must not hang forever if the output stalls. `FrameClock` models the
//! vertical-blank cadence: a drift-free deadline advanced by one refresh
//! interval per frame, with a hard bound on any single wait.
//!
//! Pacing to a software deadline approximates the hardware vblank; whether
//! the approximation is tight enough for a given projector-camera rig needs
//! validation against the actual hardware (see `wait_for_vblank`).

use crate::error::ScreenError;
use log::warn;
use std::time::{Duration, Instant};

pub struct FrameClock {
    interval: Duration,
    timeout: Duration,
    next_vblank: Instant,
}

impl FrameClock {
    /// `refresh_rate_hz` is clamped to at least 1 Hz; `timeout_intervals`
    /// to at least one refresh interval.
    pub fn new(refresh_rate_hz: f64, timeout_intervals: u32) -> Self {
        let interval = Duration::from_secs_f64(1.0 / refresh_rate_hz.max(1.0));
        FrameClock {
            interval,
            timeout: interval * timeout_intervals.max(1),
            next_vblank: Instant::now() + interval,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.interval
    }

    /// Block until the next vblank deadline.
    ///
    /// Returns only once the deadline has passed, i.e. the frame submitted
    /// before this call has had a refresh boundary to latch on. If the
    /// caller fell behind by more than one interval the clock resyncs to
    /// `now + interval` instead of sleeping toward stale deadlines. A wait
    /// that would exceed the configured bound fails with
    /// `PresentationTimeout` rather than blocking the producer loop, which
    /// is typically paired with camera hardware that has its own timeouts.
    pub fn wait_for_vblank(&mut self) -> Result<(), ScreenError> {
        let now = Instant::now();
        if now >= self.next_vblank {
            let behind = now - self.next_vblank;
            if behind > self.interval {
                warn!(
                    "FrameClock: {:.1} intervals behind, resyncing",
                    behind.as_secs_f64() / self.interval.as_secs_f64()
                );
            }
            self.next_vblank = now + self.interval;
        }

        let wait = self.next_vblank - now;
        if wait > self.timeout {
            return Err(ScreenError::PresentationTimeout { waited: wait });
        }
        std::thread::sleep(wait);
        self.next_vblank += self.interval;
        Ok(())
    }

    #[cfg(test)]
    fn set_next_vblank(&mut self, at: Instant) {
        self.next_vblank = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paces_to_the_refresh_interval() {
        let mut clock = FrameClock::new(200.0, 2); // 5 ms interval
        let start = Instant::now();
        clock.wait_for_vblank().expect("first wait");
        clock.wait_for_vblank().expect("second wait");
        // Two waits span at least one full interval even under coarse
        // scheduling; the first deadline was already partly consumed.
        assert!(start.elapsed() >= clock.refresh_interval());
    }

    #[test]
    fn resyncs_after_missed_deadlines() {
        let mut clock = FrameClock::new(200.0, 2);
        clock.set_next_vblank(Instant::now() - Duration::from_millis(100));
        let start = Instant::now();
        clock.wait_for_vblank().expect("resynced wait");
        // After the resync a full interval is waited, not the stale backlog.
        let elapsed = start.elapsed();
        assert!(elapsed >= clock.refresh_interval());
        assert!(elapsed < Duration::from_millis(100));
    }

    #[test]
    fn a_wait_beyond_the_bound_times_out() {
        let mut clock = FrameClock::new(200.0, 2); // bound: 10 ms
        clock.set_next_vblank(Instant::now() + Duration::from_secs(5));
        match clock.wait_for_vblank() {
            Err(ScreenError::PresentationTimeout { waited }) => {
                assert!(waited > clock.refresh_interval());
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
