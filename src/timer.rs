use std::time::Duration;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

// Cross-platform monotonic timer.
pub struct Timer {
    #[cfg(not(target_arch = "wasm32"))]
    start: Instant,
    #[cfg(target_arch = "wasm32")]
    start_time_ms: f64,
}

impl Timer {
    pub fn new() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                start: Instant::now(),
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            Self {
                start_time_ms: Self::now_ms(),
            }
        }
    }

    pub fn elapsed(&self) -> Duration {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.start.elapsed()
        }

        #[cfg(target_arch = "wasm32")]
        {
            let elapsed_ms = (Self::now_ms() - self.start_time_ms).max(0.0);
            Duration::from_secs_f64(elapsed_ms / 1000.0)
        }
    }

    // performance.now() is monotonic, Date.now() is the fallback.
    #[cfg(target_arch = "wasm32")]
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

// Elapsed time between consecutive display refreshes. Frame times are kept
// as durations since the clock's start and only the delta is narrowed to
// f32, so long uptimes keep full resolution. The first tick reports zero.
pub struct FrameClock {
    timer: Timer,
    last_frame: Option<Duration>,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            timer: Timer::new(),
            last_frame: None,
            frame_count: 0,
        }
    }

    pub fn tick(&mut self) -> f32 {
        let now = self.timer.elapsed();
        self.advance_to(now)
    }

    // Same as `tick`, with the time since start supplied by the caller.
    pub fn advance_to(&mut self, now: Duration) -> f32 {
        let delta = match self.last_frame {
            Some(last) => now.saturating_sub(last).as_secs_f32(),
            None => 0.0,
        };
        self.last_frame = Some(now);
        self.frame_count += 1;
        delta
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn first_tick_reports_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance_to(secs(3.0)), 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn deltas_follow_time_source() {
        let mut clock = FrameClock::new();
        clock.advance_to(secs(1.0));
        assert!((clock.advance_to(secs(1.25)) - 0.25).abs() < 1e-6);
        assert!((clock.advance_to(secs(1.5)) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn backwards_time_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance_to(secs(2.0));
        assert_eq!(clock.advance_to(secs(1.0)), 0.0);
    }

    #[test]
    fn deltas_stay_exact_after_a_day_of_uptime() {
        let day = 86_400.0;
        let step = 1.0 / 60.0;
        let mut clock = FrameClock::new();
        clock.advance_to(secs(day));
        for i in 1..=6 {
            let dt = clock.advance_to(secs(day + i as f64 * step));
            assert!((dt - step as f32).abs() < 1e-6, "dt {dt}");
        }
    }
}
