use glam::DVec3;

use crate::math::params::SurfaceParameters;

/// Degrees to radians. Every angle entering a trigonometric call goes through here.
#[inline]
pub fn deg2rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// A surface evaluated over an `(alpha, beta)` parameter domain.
pub trait ParametricSurface {
    fn position(&self, alpha: f64, beta: f64) -> DVec3;
}

/// Surface of revolution whose radius eases from `inner_radius` at `alpha = 0`
/// to `outer_radius` at `alpha = 2 * height` along a sine-squared profile.
///
/// `alpha` is both the axial coordinate (`z`) and the profile input; `beta` is
/// the sweep angle around the axis, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpindleProfile {
    inner_radius: f64,
    outer_radius: f64,
    height: f64,
}

impl SpindleProfile {
    pub fn new(params: &SurfaceParameters) -> Self {
        Self {
            inner_radius: params.inner_radius(),
            outer_radius: params.outer_radius(),
            height: params.height(),
        }
    }

    pub fn radius(&self, alpha: f64) -> f64 {
        let s = deg2rad((180.0 * alpha) / (4.0 * self.height)).sin();
        (self.outer_radius - self.inner_radius) * s * s + self.inner_radius
    }
}

impl ParametricSurface for SpindleProfile {
    fn position(&self, alpha: f64, beta: f64) -> DVec3 {
        let r = self.radius(alpha);
        let beta = deg2rad(beta);
        DVec3::new(r * beta.cos(), r * beta.sin(), alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn profile() -> SpindleProfile {
        SpindleProfile::new(&SurfaceParameters::default())
    }

    #[test]
    fn radius_spans_inner_to_outer() {
        let p = profile();
        assert_abs_diff_eq!(p.radius(0.0), 0.35, epsilon = 1e-12);
        assert_abs_diff_eq!(p.radius(2.1), 1.05, epsilon = 1e-12);
    }

    #[test]
    fn radius_is_midway_at_half_height_span() {
        let p = profile();
        // sin²(π/4) = 1/2
        assert_abs_diff_eq!(p.radius(1.05), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn inverted_radii_shrink_the_profile() {
        let params = SurfaceParameters::new(2.0, 0.5, 1.0, 0.1, 1.0).unwrap();
        let p = SpindleProfile::new(&params);
        assert_abs_diff_eq!(p.radius(0.0), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.radius(2.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn z_tracks_alpha() {
        let p = profile();
        for &alpha in &[0.0, 0.3, 1.0, 2.1, -4.0, 17.5] {
            for &beta in &[0.0, 45.0, 90.0, 359.0] {
                assert_eq!(p.position(alpha, beta).z, alpha);
            }
        }
    }

    #[test]
    fn beta_sweeps_around_the_axis() {
        let p = profile();
        let at_zero = p.position(0.0, 0.0);
        assert_abs_diff_eq!(at_zero.x, 0.35, epsilon = 1e-12);
        assert_abs_diff_eq!(at_zero.y, 0.0, epsilon = 1e-12);

        let quarter = p.position(0.0, 90.0);
        assert_abs_diff_eq!(quarter.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(quarter.y, 0.35, epsilon = 1e-12);

        let full = p.position(1.0, 360.0);
        let start = p.position(1.0, 0.0);
        assert_abs_diff_eq!(full.x, start.x, epsilon = 1e-12);
        assert_abs_diff_eq!(full.y, start.y, epsilon = 1e-12);
    }

    #[test]
    fn deg2rad_converts() {
        assert_abs_diff_eq!(deg2rad(180.0), std::f64::consts::PI, epsilon = 1e-15);
        assert_eq!(deg2rad(0.0), 0.0);
    }
}
