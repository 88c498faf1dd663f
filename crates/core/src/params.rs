//! Galaxy generation parameters and their validation bounds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;

/// Hard ceiling on the point count, to bound allocation. The debug panel
/// stops at 1 000 000; this leaves headroom for callers constructing
/// parameters directly.
pub const MAX_POINT_COUNT: u32 = 2_000_000;

/// Parameter validation error. A failed validation must leave the previously
/// generated point cloud in place, so these are reported instead of clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("point count must be at least 1")]
    ZeroCount,

    #[error("point count {count} exceeds the maximum of {max}")]
    CountTooLarge { count: u32, max: u32 },

    #[error("branch count must be at least 1")]
    ZeroBranches,

    #[error("radius must be positive, got {radius}")]
    NonPositiveRadius { radius: f32 },
}

/// The full tunable parameter set for galaxy generation.
///
/// `spin`, `randomness`, `randomness_power` and `size` are accepted as-is;
/// only `count`, `branches` and `radius` have hard validity requirements
/// (see [`GalaxyParams::validate`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalaxyParams {
    /// Number of points in the cloud.
    pub count: u32,
    /// Rendered size of each point.
    pub size: f32,
    /// Number of spiral arms.
    pub branches: u32,
    /// Maximum distance of a point from the center.
    pub radius: f32,
    /// Rotational offset per unit radius; the spiral sweep.
    pub spin: f32,
    /// Scale of the random per-axis offset, proportional to point radius.
    pub randomness: f32,
    /// Exponent applied to the offset draw; higher values concentrate
    /// points near the arm centerline.
    pub randomness_power: f32,
    /// Color at the galactic center.
    pub inner_color: Color,
    /// Color at the rim.
    pub outer_color: Color,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            branches: 3,
            radius: 5.0,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inner_color: Color::from_rgb8(0xf1, 0x2f, 0x43),
            outer_color: Color::from_rgb8(0x82, 0x32, 0x93),
        }
    }
}

impl GalaxyParams {
    /// Check the hard requirements: a zero branch count would make the
    /// branch modulo undefined, a non-positive radius would degenerate the
    /// color-blend normalization, and the count must be bounded.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.count == 0 {
            return Err(ParamError::ZeroCount);
        }
        if self.count > MAX_POINT_COUNT {
            return Err(ParamError::CountTooLarge {
                count: self.count,
                max: MAX_POINT_COUNT,
            });
        }
        if self.branches == 0 {
            return Err(ParamError::ZeroBranches);
        }
        if !(self.radius > 0.0) {
            return Err(ParamError::NonPositiveRadius {
                radius: self.radius,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GalaxyParams::default().validate().is_ok());
    }

    #[test]
    fn zero_count_rejected() {
        let params = GalaxyParams {
            count: 0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParamError::ZeroCount));
    }

    #[test]
    fn oversized_count_rejected() {
        let params = GalaxyParams {
            count: MAX_POINT_COUNT + 1,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamError::CountTooLarge { .. })
        ));
    }

    #[test]
    fn zero_branches_rejected() {
        let params = GalaxyParams {
            branches: 0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParamError::ZeroBranches));
    }

    #[test]
    fn non_positive_radius_rejected() {
        for radius in [0.0, -1.0, f32::NAN] {
            let params = GalaxyParams {
                radius,
                ..Default::default()
            };
            assert!(
                matches!(params.validate(), Err(ParamError::NonPositiveRadius { .. })),
                "radius {radius} should be rejected"
            );
        }
    }

    #[test]
    fn unconstrained_fields_accepted() {
        let params = GalaxyParams {
            spin: -100.0,
            randomness: 50.0,
            randomness_power: 0.1,
            size: -0.5,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }
}
