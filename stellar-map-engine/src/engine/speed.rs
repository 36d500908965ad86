use constants::speed::DEFAULT_SPEED_FACTOR;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpeedError {
    #[error("speed factor must be a finite number, got {0}")]
    NotFinite(f32),
}

/// Global time scale for orbital motion with a one-slot memory.
///
/// `override_factor` parks the current factor and stops motion; `restore`
/// brings the parked factor back. The slot is not a stack: overriding twice
/// parks the zero from the first override.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedControl {
    factor: f32,
    last: f32,
    overridden: bool,
}

impl Default for SpeedControl {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_FACTOR)
    }
}

impl SpeedControl {
    pub fn new(initial: f32) -> Self {
        let initial = if initial.is_finite() { initial.max(0.0) } else { DEFAULT_SPEED_FACTOR };
        Self {
            factor: initial,
            last: initial,
            overridden: false,
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn last(&self) -> f32 {
        self.last
    }

    pub fn is_overridden(&self) -> bool {
        self.overridden
    }

    /// Negative values clamp to 0; NaN and infinities are refused.
    pub fn set(&mut self, value: f32) -> Result<(), SpeedError> {
        if !value.is_finite() {
            return Err(SpeedError::NotFinite(value));
        }
        self.last = self.factor;
        self.factor = value.max(0.0);
        Ok(())
    }

    pub fn override_factor(&mut self) {
        self.last = self.factor;
        self.factor = 0.0;
        self.overridden = true;
    }

    pub fn restore(&mut self) {
        self.factor = self.last;
        self.overridden = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_then_restore_round_trips() {
        let mut speed = SpeedControl::default();
        speed.set(1.5).unwrap();
        speed.override_factor();
        assert_eq!(speed.factor(), 0.0);
        assert!(speed.is_overridden());
        speed.restore();
        assert_eq!(speed.factor(), 1.5);
        assert!(!speed.is_overridden());
    }

    #[test]
    fn double_override_loses_the_parked_value() {
        let mut speed = SpeedControl::default();
        speed.override_factor();
        speed.override_factor();
        speed.restore();
        assert_eq!(speed.factor(), 0.0);
    }

    #[test]
    fn set_clamps_and_rejects() {
        let mut speed = SpeedControl::default();
        assert_eq!(speed.factor(), DEFAULT_SPEED_FACTOR);
        speed.set(-3.0).unwrap();
        assert_eq!(speed.factor(), 0.0);
        assert_eq!(speed.last(), DEFAULT_SPEED_FACTOR);
        assert!(matches!(speed.set(f32::NAN), Err(SpeedError::NotFinite(_))));
        assert_eq!(speed.set(f32::INFINITY), Err(SpeedError::NotFinite(f32::INFINITY)));
        assert_eq!(speed.factor(), 0.0);
    }
}
