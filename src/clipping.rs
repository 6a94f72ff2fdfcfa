// Clipping distance: how far (meters) the camera still "sees" before
// everything turns into background. Up/Down arrows nudge it at runtime.

pub const CLIP_MIN: f32 = 0.0;
pub const CLIP_MAX: f32 = 6.0;
pub const CLIP_STEP: f32 = 0.1;
pub const CLIP_DEFAULT: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClippingDistance {
    meters: f32,
}

impl ClippingDistance {
    /// Start at `meters`, clamped into the allowed range.
    pub fn new(meters: f32) -> Self {
        Self { meters: meters.clamp(CLIP_MIN, CLIP_MAX) }
    }

    pub fn get(&self) -> f32 {
        self.meters
    }

    /// Push the clipping plane one step farther (never past 6 m).
    pub fn increment(&mut self) {
        self.meters = (self.meters + CLIP_STEP).min(CLIP_MAX);
    }

    /// Pull the clipping plane one step closer (never below 0 m).
    pub fn decrement(&mut self) {
        self.meters = (self.meters - CLIP_STEP).max(CLIP_MIN);
    }
}

impl Default for ClippingDistance {
    fn default() -> Self {
        Self::new(CLIP_DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn three_steps_up_from_one() {
        let mut clip = ClippingDistance::default();
        for _ in 0..3 {
            clip.increment();
        }
        assert!(close(clip.get(), 1.3), "got {}", clip.get());
    }

    #[test]
    fn clamps_at_six_meters() {
        let mut clip = ClippingDistance::new(1.0);
        for _ in 0..11 {
            clip.increment();
        }
        assert!(close(clip.get(), 2.1), "got {}", clip.get());

        for _ in 0..60 {
            clip.increment();
            assert!(clip.get() <= CLIP_MAX);
        }
        assert_eq!(clip.get(), CLIP_MAX);
    }

    #[test]
    fn steps_past_the_top_do_not_overshoot() {
        let mut clip = ClippingDistance::new(5.9);
        for _ in 0..4 {
            clip.increment();
        }
        assert_eq!(clip.get(), 6.0);
    }

    #[test]
    fn eleven_steps_from_five_stop_at_six() {
        let mut clip = ClippingDistance::new(5.5);
        for _ in 0..11 {
            clip.increment();
        }
        assert_eq!(clip.get(), 6.0);
    }

    #[test]
    fn never_goes_negative() {
        let mut clip = ClippingDistance::new(0.05);
        clip.decrement();
        assert_eq!(clip.get(), 0.0);
        clip.decrement();
        assert_eq!(clip.get(), 0.0);
    }

    #[test]
    fn constructor_clamps() {
        assert_eq!(ClippingDistance::new(-2.0).get(), 0.0);
        assert_eq!(ClippingDistance::new(9.0).get(), 6.0);
    }
}
