//! The galaxy point-cloud generator.
//!
//! Maps a point index and the continuous parameter set into a spiral-armed
//! point cloud: points are distributed across branches by index modulo
//! branch count, swept into a spiral by a radius-proportional spin angle,
//! and scattered around the arm centerline by power-biased random offsets.

use std::f32::consts::TAU;

use crate::params::GalaxyParams;
use crate::random::SeededRandom;

/// CPU-side point cloud: parallel position and color buffers, both exactly
/// `3 * count` long and index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloudData {
    /// Flat xyz triples.
    pub positions: Vec<f32>,
    /// Flat rgb triples, channels in [0, 1].
    pub colors: Vec<f32>,
}

impl PointCloudData {
    pub fn point_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Position of point `i` as an xyz triple.
    pub fn position(&self, i: usize) -> [f32; 3] {
        [
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        ]
    }

    /// Color of point `i` as an rgb triple.
    pub fn color(&self, i: usize) -> [f32; 3] {
        [
            self.colors[i * 3],
            self.colors[i * 3 + 1],
            self.colors[i * 3 + 2],
        ]
    }
}

/// Generate the full point cloud for `params`.
///
/// The caller is expected to have run [`GalaxyParams::validate`] first; the
/// parameters are trusted here.
///
/// Per point, draws from `rng` in a fixed order: the point radius, then a
/// magnitude and a sign draw for each of x, y, z. Identical parameters and
/// RNG state therefore produce identical buffers.
pub fn generate(params: &GalaxyParams, rng: &mut SeededRandom) -> PointCloudData {
    debug_assert!(params.validate().is_ok());

    let count = params.count as usize;
    let mut positions = Vec::with_capacity(count * 3);
    let mut colors = Vec::with_capacity(count * 3);

    for i in 0..count {
        let branch_angle = (i as u32 % params.branches) as f32 / params.branches as f32 * TAU;
        let radius = rng.next() * params.radius;
        let spin_angle = radius * params.spin;

        // Power-biased offsets: exponent > 1 pulls the mass toward the arm
        // centerline, leaving sparse outliers.
        let mut offset = || {
            rng.next().powf(params.randomness_power)
                * rng.next_sign()
                * params.randomness
                * radius
        };
        let random_x = offset();
        let random_y = offset();
        let random_z = offset();

        positions.push((branch_angle + spin_angle).cos() * radius + random_x);
        positions.push(random_y);
        positions.push((branch_angle + spin_angle).sin() * radius + random_z);

        let mixed = params
            .inner_color
            .lerp(params.outer_color, radius / params.radius);
        colors.push(mixed.r);
        colors.push(mixed.g);
        colors.push(mixed.b);
    }

    PointCloudData { positions, colors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn small_params() -> GalaxyParams {
        GalaxyParams {
            count: 500,
            ..Default::default()
        }
    }

    #[test]
    fn buffer_lengths_match_count() {
        let params = small_params();
        let data = generate(&params, &mut SeededRandom::new(1));
        assert_eq!(data.positions.len(), 500 * 3);
        assert_eq!(data.colors.len(), 500 * 3);
        assert_eq!(data.point_count(), 500);
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let params = small_params();
        let a = generate(&params, &mut SeededRandom::new(99));
        let b = generate(&params, &mut SeededRandom::new(99));
        assert_eq!(a, b);

        let c = generate(&params, &mut SeededRandom::new(100));
        assert_ne!(a, c);
    }

    #[test]
    fn colors_within_unit_range() {
        let params = small_params();
        let data = generate(&params, &mut SeededRandom::new(3));
        for &c in &data.colors {
            assert!((0.0..=1.0).contains(&c), "color channel {c} out of range");
        }
    }

    #[test]
    fn branch_angles_cluster_without_noise() {
        // With spin and randomness off, every point sits exactly on one of
        // `branches` rays from the origin.
        let params = GalaxyParams {
            count: 300,
            branches: 5,
            spin: 0.0,
            randomness: 0.0,
            ..Default::default()
        };
        let data = generate(&params, &mut SeededRandom::new(11));

        for i in 0..data.point_count() {
            let [x, y, z] = data.position(i);
            assert_eq!(y, 0.0);

            let r = (x * x + z * z).sqrt();
            if r < 1e-4 {
                continue; // too close to the center to read an angle
            }
            let angle = z.atan2(x).rem_euclid(TAU);
            let expected = (i as u32 % 5) as f32 / 5.0 * TAU;
            let diff = (angle - expected).abs();
            let diff = diff.min(TAU - diff);
            assert!(diff < 1e-3, "point {i}: angle {angle} vs branch {expected}");
        }
    }

    #[test]
    fn single_branch_lies_on_positive_axis() {
        let params = GalaxyParams {
            count: 50,
            branches: 1,
            spin: 0.0,
            randomness: 0.0,
            ..Default::default()
        };
        let data = generate(&params, &mut SeededRandom::new(4));
        for i in 0..data.point_count() {
            let [x, _, z] = data.position(i);
            assert!(x >= 0.0);
            assert!(z.abs() < 1e-4);
        }
    }

    #[test]
    fn single_point_is_valid() {
        let params = GalaxyParams {
            count: 1,
            ..Default::default()
        };
        let data = generate(&params, &mut SeededRandom::new(8));
        assert_eq!(data.positions.len(), 3);
        assert_eq!(data.colors.len(), 3);
        assert!(data.positions.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn radius_bounds_hold() {
        // Without randomness every point's distance from the center is the
        // drawn radius, strictly below the configured maximum.
        let params = GalaxyParams {
            count: 1000,
            randomness: 0.0,
            ..Default::default()
        };
        let data = generate(&params, &mut SeededRandom::new(21));
        for i in 0..data.point_count() {
            let [x, _, z] = data.position(i);
            let r = (x * x + z * z).sqrt();
            assert!(r < params.radius + 1e-3);
        }
    }

    #[test]
    fn inner_and_outer_colors_bound_the_blend() {
        let params = GalaxyParams {
            count: 2000,
            inner_color: Color::from_hex("#f12f43").unwrap(),
            outer_color: Color::from_hex("#823293").unwrap(),
            ..Default::default()
        };
        let data = generate(&params, &mut SeededRandom::new(5));
        let lo = params.inner_color.r.min(params.outer_color.r);
        let hi = params.inner_color.r.max(params.outer_color.r);
        for i in 0..data.point_count() {
            let [r, _, _] = data.color(i);
            assert!(r >= lo - 1e-6 && r <= hi + 1e-6);
        }
    }

    #[test]
    fn reference_parameter_set() {
        // A dense reference configuration: 100k points across 3 branches.
        let params = GalaxyParams {
            count: 100_000,
            size: 0.01,
            branches: 3,
            radius: 5.0,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inner_color: Color::from_hex("#f12f43").unwrap(),
            outer_color: Color::from_hex("#823293").unwrap(),
        };
        let data = generate(&params, &mut SeededRandom::new(1));

        assert_eq!(data.positions.len(), 300_000);
        assert_eq!(data.colors.len(), 300_000);
        assert!(data.positions.iter().all(|v| v.is_finite()));
        assert!(data.colors.iter().all(|&c| (0.0..=1.0).contains(&c)));
    }
}
