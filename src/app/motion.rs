/// A scalar that approaches its target at a fixed rate, sampled once per
/// frame. Kept separate from the physics integrator; the integrator owns
/// authoritative positions, this only drives presentation values.
#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct Eased {
    current: f32,
    target: f32,
    /// Seconds to traverse the full unit range.
    duration: f32,
}

impl Eased {
    pub(in crate::app) fn new(value: f32, duration: f32) -> Self {
        Self {
            current: value,
            target: value,
            duration: duration.max(1e-3),
        }
    }

    pub(in crate::app) fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub(in crate::app) fn value(self) -> f32 {
        self.current
    }

    /// Advances toward the target by `dt` seconds. Returns true while the
    /// value is still in flight.
    pub(in crate::app) fn advance(&mut self, dt: f32) -> bool {
        let remaining = self.target - self.current;
        if remaining == 0.0 {
            return false;
        }

        let step = (dt / self.duration).max(0.0);
        if remaining.abs() <= step {
            self.current = self.target;
            false
        } else {
            self.current += step * remaining.signum();
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_target_within_duration() {
        let mut eased = Eased::new(0.0, 0.3);
        eased.set_target(1.0);

        let dt = 1.0 / 60.0;
        let mut frames = 0;
        while eased.advance(dt) {
            frames += 1;
            assert!(frames < 60, "eased scalar never settled");
        }
        assert_eq!(eased.value(), 1.0);
        // 0.3s at 60fps is 18 frames, give or take rounding.
        assert!((17..=19).contains(&frames), "settled after {frames} frames");
    }

    #[test]
    fn never_overshoots() {
        let mut eased = Eased::new(0.0, 0.1);
        eased.set_target(1.0);
        for _ in 0..100 {
            eased.advance(0.016);
            assert!(eased.value() <= 1.0);
        }

        eased.set_target(0.25);
        for _ in 0..100 {
            eased.advance(0.016);
            assert!(eased.value() >= 0.25);
        }
        assert_eq!(eased.value(), 0.25);
    }

    #[test]
    fn settled_scalar_reports_no_motion() {
        let mut eased = Eased::new(0.5, 0.3);
        assert!(!eased.advance(0.016));
    }
}
