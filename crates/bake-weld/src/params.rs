//! Welding parameters.

use crate::error::{WeldError, WeldResult};

/// Default welding tolerance in model units.
pub const DEFAULT_TOLERANCE: f32 = 1e-5;

/// Default bounding margin, expressed in multiples of the tolerance.
pub const DEFAULT_MARGIN_FACTOR: f32 = 10.0;

/// Default cap on grid cells per axis.
pub const MAX_GRID_RESOLUTION: u32 = 1024 * 1024;

/// Parameters controlling a weld.
///
/// # Example
///
/// ```
/// use bake_weld::WeldParams;
///
/// let params = WeldParams::new().with_tolerance(1e-4);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeldParams {
    /// Per-component attribute tolerance. Two corners merge when every
    /// component of every shared attribute differs by at most this much.
    pub tolerance: f32,
    /// How far to pad the bounding region, in multiples of the tolerance,
    /// so boundary corners never discretize outside the grid.
    pub margin_factor: f32,
    /// Upper bound on grid cells per axis, limiting memory for tiny
    /// tolerances.
    pub max_grid_resolution: u32,
}

impl Default for WeldParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            margin_factor: DEFAULT_MARGIN_FACTOR,
            max_grid_resolution: MAX_GRID_RESOLUTION,
        }
    }
}

impl WeldParams {
    /// Creates parameters with the default tolerance and grid sizing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates parameters that merge only bit-identical corners.
    #[must_use]
    pub fn exact() -> Self {
        Self::new().with_tolerance(0.0)
    }

    /// Sets the welding tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the bounding margin factor.
    #[must_use]
    pub fn with_margin_factor(mut self, margin_factor: f32) -> Self {
        self.margin_factor = margin_factor;
        self
    }

    /// Sets the cap on grid cells per axis.
    #[must_use]
    pub fn with_max_grid_resolution(mut self, max_grid_resolution: u32) -> Self {
        self.max_grid_resolution = max_grid_resolution;
        self
    }

    /// Checks that the parameters describe a usable weld.
    pub fn validate(&self) -> WeldResult<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(WeldError::InvalidTolerance {
                value: self.tolerance,
            });
        }
        if !self.margin_factor.is_finite() || self.margin_factor < 0.0 {
            return Err(WeldError::InvalidMarginFactor {
                value: self.margin_factor,
            });
        }
        if self.max_grid_resolution == 0 {
            return Err(WeldError::ZeroGridResolution);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(WeldParams::default().validate().is_ok());
        assert!(WeldParams::exact().validate().is_ok());
    }

    #[test]
    fn builders_replace_single_fields() {
        let params = WeldParams::new()
            .with_tolerance(0.5)
            .with_margin_factor(2.0)
            .with_max_grid_resolution(128);
        assert_eq!(params.tolerance, 0.5);
        assert_eq!(params.margin_factor, 2.0);
        assert_eq!(params.max_grid_resolution, 128);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert_eq!(
            WeldParams::new().with_tolerance(-1.0).validate(),
            Err(WeldError::InvalidTolerance { value: -1.0 })
        );
        assert!(matches!(
            WeldParams::new().with_tolerance(f32::NAN).validate(),
            Err(WeldError::InvalidTolerance { .. })
        ));
        assert!(matches!(
            WeldParams::new().with_margin_factor(f32::INFINITY).validate(),
            Err(WeldError::InvalidMarginFactor { .. })
        ));
        assert_eq!(
            WeldParams::new().with_max_grid_resolution(0).validate(),
            Err(WeldError::ZeroGridResolution)
        );
    }
}
