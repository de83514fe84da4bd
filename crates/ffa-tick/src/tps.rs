/// Ticks-per-second tracking with exponential moving averages.
#[derive(Debug, Clone, Copy)]
pub struct TpsTracker {
    /// TPS with 5-second smoothing
    pub tps_5s: f32,
    /// TPS with 1-minute smoothing
    pub tps_1m: f32,
    target: f32,
}

impl TpsTracker {
    #[must_use]
    pub const fn new(target: f32) -> Self {
        Self {
            tps_5s: target,
            tps_1m: target,
            target,
        }
    }

    /// Fold in the wall-clock duration of the last tick.
    pub fn update(&mut self, delta_time: f32) {
        if delta_time <= 0.0 {
            return;
        }

        let instant_tps = (1.0 / delta_time).min(1000.0);

        let alpha_5s = 1.0 - (-delta_time / 5.0_f32).exp();
        let alpha_1m = 1.0 - (-delta_time / 60.0_f32).exp();

        self.tps_5s += alpha_5s * (instant_tps - self.tps_5s);
        self.tps_1m += alpha_1m * (instant_tps - self.tps_1m);
    }

    /// Whether the short window has fallen below 90% of target.
    #[must_use]
    pub fn is_lagging(&self) -> bool {
        self.tps_5s < self.target * 0.9
    }
}

impl Default for TpsTracker {
    fn default() -> Self {
        Self::new(crate::TICKS_PER_SECOND as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_rate_stays_on_target() {
        let mut tps = TpsTracker::default();
        for _ in 0..200 {
            tps.update(0.05);
        }
        assert!((tps.tps_5s - 20.0).abs() < 0.01);
        assert!(!tps.is_lagging());
    }

    #[test]
    fn slow_ticks_pull_short_window_down_first() {
        let mut tps = TpsTracker::default();
        for _ in 0..50 {
            tps.update(0.1);
        }
        assert!(tps.tps_5s < tps.tps_1m);
        assert!(tps.is_lagging());
    }

    #[test]
    fn non_positive_delta_is_ignored() {
        let mut tps = TpsTracker::default();
        tps.update(0.0);
        tps.update(-1.0);
        assert!((tps.tps_5s - 20.0).abs() < f32::EPSILON);
    }
}
