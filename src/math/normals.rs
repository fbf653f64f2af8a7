use glam::DVec3;

use crate::math::error::ConfigurationError;
use crate::math::profile::{ParametricSurface, deg2rad};

/// Perturbation used for the forward differences, in degrees.
pub const DEFAULT_DELTA: f64 = 0.0001;

/// Estimates surface normals from forward-difference partials along both
/// parameter axes.
///
/// The result is `∂P/∂alpha × ∂P/∂beta` and is left unnormalized; both partials
/// are divided by `deg2rad(delta)`, so their magnitudes carry that scaling too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalEstimator {
    delta: f64,
}

impl Default for NormalEstimator {
    fn default() -> Self {
        Self {
            delta: DEFAULT_DELTA,
        }
    }
}

impl NormalEstimator {
    pub fn with_delta(delta: f64) -> Result<Self, ConfigurationError> {
        if delta == 0.0 || !delta.is_finite() {
            return Err(ConfigurationError::InvalidDelta(delta));
        }
        Ok(Self { delta })
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn partial_alpha<S: ParametricSurface + ?Sized>(
        &self,
        surface: &S,
        alpha: f64,
        beta: f64,
        p: DVec3,
    ) -> DVec3 {
        (surface.position(alpha + self.delta, beta) - p) / deg2rad(self.delta)
    }

    pub fn partial_beta<S: ParametricSurface + ?Sized>(
        &self,
        surface: &S,
        alpha: f64,
        beta: f64,
        p: DVec3,
    ) -> DVec3 {
        (surface.position(alpha, beta + self.delta) - p) / deg2rad(self.delta)
    }

    pub fn normal<S: ParametricSurface + ?Sized>(
        &self,
        surface: &S,
        alpha: f64,
        beta: f64,
    ) -> DVec3 {
        let p = surface.position(alpha, beta);
        self.normal_at(surface, alpha, beta, p)
    }

    /// Same as [`normal`](Self::normal) when the caller already holds `p`.
    pub fn normal_at<S: ParametricSurface + ?Sized>(
        &self,
        surface: &S,
        alpha: f64,
        beta: f64,
        p: DVec3,
    ) -> DVec3 {
        let du = self.partial_alpha(surface, alpha, beta, p);
        let dv = self.partial_beta(surface, alpha, beta, p);
        du.cross(dv)
    }
}
