/// Clock for one animation leg: maps wall-clock time onto the leg's time fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    /// Id of the `carousel::Animation` this clock plays.
    pub animation_id: u64,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl Tween {
    pub fn new(animation_id: u64, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            animation_id,
            start_ms,
            duration_ms: duration_ms.max(0.0),
        }
    }

    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        now_ms >= self.end_ms()
    }

    /// Elapsed fraction in `[0, 1]`. Zero-length legs are complete immediately.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }
}
