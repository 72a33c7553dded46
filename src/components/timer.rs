//=========================================================================
// Timer
//=========================================================================

/// Countdown stepped by the frame delta.
///
/// One-shot timers stop after firing; repeating timers rearm and carry the
/// overshoot into the next period.
#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    wait_time: f32,
    repeating: bool,
    remaining: f32,
    running: bool,
}

impl Timer {
    /// Creates a stopped timer.
    ///
    /// # Panics
    ///
    /// Panics if `wait_time` is not positive.
    pub fn new(wait_time: f32, repeating: bool) -> Self {
        assert!(wait_time > 0.0, "Timer wait time must be positive, got {}", wait_time);
        Self {
            wait_time,
            repeating,
            remaining: wait_time,
            running: false,
        }
    }

    /// (Re)starts from the full wait time.
    pub fn start(&mut self) {
        self.remaining = self.wait_time;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advances by `delta`; returns `true` if the timer fired during this step.
    pub fn step(&mut self, delta: f32) -> bool {
        if !self.running {
            return false;
        }

        self.remaining -= delta.max(0.0);
        if self.remaining > 0.0 {
            return false;
        }

        if self.repeating {
            self.remaining = (self.remaining % self.wait_time) + self.wait_time;
        } else {
            self.remaining = 0.0;
            self.running = false;
        }
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds left until the next fire.
    pub fn time_left(&self) -> f32 {
        self.remaining
    }

    pub fn wait_time(&self) -> f32 {
        self.wait_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_timer_never_fires() {
        let mut timer = Timer::new(0.5, false);
        assert!(!timer.step(10.0));
    }

    #[test]
    fn one_shot_fires_once() {
        let mut timer = Timer::new(0.5, false);
        timer.start();

        assert!(!timer.step(0.25));
        assert!(timer.step(0.25));
        assert!(!timer.is_running());
        assert!(!timer.step(1.0));
    }

    #[test]
    fn repeating_carries_overshoot() {
        let mut timer = Timer::new(1.0, true);
        timer.start();

        assert!(timer.step(1.25));
        assert!(timer.is_running());
        assert!((timer.time_left() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn restart_resets_countdown() {
        let mut timer = Timer::new(1.0, false);
        timer.start();
        timer.step(0.9);
        timer.start();
        assert_eq!(timer.time_left(), 1.0);
    }
}
