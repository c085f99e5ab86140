use anyhow::Result;

use crate::geometry::geometry_operations::MIN_FIT_POINTS;

pub const DEFAULT_TOLERANCE: f32 = 0.2;

/// Acceptance settings of a circle recognizer.
///
/// `tolerance` is unitless and drives all three acceptance thresholds at once:
/// the maximal fit error, the half width of the excluded center square
/// (relative to `radius / sqrt(2)`), and the accepted shortfall of the
/// bounding box overlap. Lowering it tightens the three checks together.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RecognizerConfig {
    pub tolerance: f32,
    pub min_points: usize,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        RecognizerConfig{
            tolerance: DEFAULT_TOLERANCE,
            min_points: MIN_FIT_POINTS,
        }
    }
}

impl RecognizerConfig {
    pub fn new(tolerance: f32, min_points: usize) -> Result<RecognizerConfig> {
        check_tolerance(tolerance)?;
        if min_points < MIN_FIT_POINTS {
            return Err(anyhow::Error::msg(format!("At least {} points are needed to fit a circle", MIN_FIT_POINTS)));
        }

        Ok(RecognizerConfig{
            tolerance,
            min_points,
        })
    }

    pub fn with_tolerance(self, tolerance: f32) -> Result<RecognizerConfig> {
        RecognizerConfig::new(tolerance, self.min_points)
    }
}

pub fn check_tolerance(tolerance: f32) -> Result<()> {
    if !tolerance.is_finite() || tolerance < 0.0 || tolerance > 1.0 {
        return Err(anyhow::Error::msg(format!("Tolerance must lie in [0, 1], got {}", tolerance)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = RecognizerConfig::default();
        assert_eq!(config.tolerance, 0.2);
        assert_eq!(config.min_points, 3);
    }

    #[test]
    fn invalid_values_are_refused() {
        assert!(RecognizerConfig::new(-0.1, 3).is_err());
        assert!(RecognizerConfig::new(1.5, 3).is_err());
        assert!(RecognizerConfig::new(f32::NAN, 3).is_err());
        assert!(RecognizerConfig::new(0.2, 2).is_err());
        assert!(RecognizerConfig::new(0.0, 3).is_ok());
        assert!(RecognizerConfig::new(1.0, 10).is_ok());
    }

    #[test]
    fn with_tolerance_keeps_min_points() {
        let config = RecognizerConfig::new(0.2, 8).unwrap().with_tolerance(0.05).unwrap();
        assert_eq!(config.tolerance, 0.05);
        assert_eq!(config.min_points, 8);
    }
}
