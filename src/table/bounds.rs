use crate::Chips;
use serde::Serialize;

/// inclusive range cash-out cells are clamped into after a transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Chips,
    pub max: Chips,
}

impl Bounds {
    /// NaN marks an unknown cell and passes through untouched
    pub fn clamp(&self, value: Chips) -> Chips {
        if value.is_nan() {
            value
        } else {
            value.max(self.min).min(self.max)
        }
    }
    pub fn contains(&self, value: Chips) -> bool {
        self.min <= value && value <= self.max
    }
}

impl From<(Chips, Chips)> for Bounds {
    fn from((min, max): (Chips, Chips)) -> Self {
        Self { min, max }
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_both_ends() {
        let bounds = Bounds::from((40.0, 177.0));
        assert_eq!(bounds.clamp(12.0), 40.0);
        assert_eq!(bounds.clamp(300.0), 177.0);
        assert_eq!(bounds.clamp(90.0), 90.0);
    }

    #[test]
    fn nan_passes_through() {
        assert!(Bounds::from((40.0, 177.0)).clamp(f64::NAN).is_nan());
    }
}
