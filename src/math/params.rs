use serde::{Deserialize, Serialize};

use crate::math::error::ConfigurationError;

/// Upper bound on lattice points per sweep.
pub const MAX_GRID_SAMPLES: usize = 4_000_000;

/// Angular extent of the `beta` sweep, in degrees.
pub const BETA_SPAN_DEG: f64 = 360.0;

/// Absorbs quotients such as `2.1 / 0.1 = 21.000000000000004` or
/// `0.3 / 0.1 = 2.9999999999999996` so the last in-range sample is kept.
const SWEEP_EPSILON: f64 = 1e-9;

/// Raw parameter record as it arrives from a form or a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterInput {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub height: f64,
    pub alpha_step: f64,
    pub beta_step: f64,
}

impl Default for ParameterInput {
    fn default() -> Self {
        Self {
            inner_radius: 0.35,
            outer_radius: 1.05,
            height: 1.05,
            alpha_step: 0.1,
            beta_step: 1.0,
        }
    }
}

/// Validated snapshot of everything a generation pass depends on.
///
/// `outer_radius < inner_radius` is accepted and yields an inverted profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterInput", into = "ParameterInput")]
pub struct SurfaceParameters {
    inner_radius: f64,
    outer_radius: f64,
    height: f64,
    alpha_step: f64,
    beta_step: f64,
}

impl SurfaceParameters {
    pub fn new(
        inner_radius: f64,
        outer_radius: f64,
        height: f64,
        alpha_step: f64,
        beta_step: f64,
    ) -> Result<Self, ConfigurationError> {
        check_positive("inner_radius", inner_radius)?;
        check_positive("outer_radius", outer_radius)?;
        check_positive("height", height)?;
        check_positive("alpha_step", alpha_step)?;
        check_positive("beta_step", beta_step)?;

        let rows = lattice_len(2.0 * height, alpha_step);
        let columns = lattice_len(BETA_SPAN_DEG, beta_step);
        if rows * columns > MAX_GRID_SAMPLES as f64 {
            return Err(ConfigurationError::TooManySamples {
                rows: saturating_count(rows),
                columns: saturating_count(columns),
                limit: MAX_GRID_SAMPLES,
            });
        }

        Ok(Self {
            inner_radius,
            outer_radius,
            height,
            alpha_step,
            beta_step,
        })
    }

    /// Parses a RON document holding a [`ParameterInput`] and validates it.
    pub fn from_ron(source: &str) -> Result<Self, ConfigurationError> {
        let input: ParameterInput =
            ron::from_str(source).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        Self::try_from(input)
    }

    pub fn to_ron(&self) -> Result<String, ConfigurationError> {
        let input = ParameterInput::from(*self);
        ron::ser::to_string_pretty(&input, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn alpha_step(&self) -> f64 {
        self.alpha_step
    }

    pub fn beta_step(&self) -> f64 {
        self.beta_step
    }

    /// Upper bound of the `alpha` sweep.
    pub fn alpha_span(&self) -> f64 {
        2.0 * self.height
    }

    pub fn grid(&self) -> SampleGrid {
        SampleGrid {
            rows: lattice_len(self.alpha_span(), self.alpha_step) as usize,
            columns: lattice_len(BETA_SPAN_DEG, self.beta_step) as usize,
            alpha_step: self.alpha_step,
            beta_step: self.beta_step,
        }
    }
}

impl Default for SurfaceParameters {
    fn default() -> Self {
        let input = ParameterInput::default();
        Self {
            inner_radius: input.inner_radius,
            outer_radius: input.outer_radius,
            height: input.height,
            alpha_step: input.alpha_step,
            beta_step: input.beta_step,
        }
    }
}

impl TryFrom<ParameterInput> for SurfaceParameters {
    type Error = ConfigurationError;

    fn try_from(input: ParameterInput) -> Result<Self, Self::Error> {
        Self::new(
            input.inner_radius,
            input.outer_radius,
            input.height,
            input.alpha_step,
            input.beta_step,
        )
    }
}

impl From<SurfaceParameters> for ParameterInput {
    fn from(params: SurfaceParameters) -> Self {
        Self {
            inner_radius: params.inner_radius,
            outer_radius: params.outer_radius,
            height: params.height,
            alpha_step: params.alpha_step,
            beta_step: params.beta_step,
        }
    }
}

/// The `(alpha, beta)` lattice visited by a sweep. Samples are computed from
/// their index, so `alpha(k) == k * alpha_step` exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    pub rows: usize,
    pub columns: usize,
    pub alpha_step: f64,
    pub beta_step: f64,
}

impl SampleGrid {
    pub fn alpha(&self, row: usize) -> f64 {
        row as f64 * self.alpha_step
    }

    pub fn beta(&self, column: usize) -> f64 {
        column as f64 * self.beta_step
    }

    pub fn alphas(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows).map(|row| self.alpha(row))
    }

    pub fn betas(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.columns).map(|column| self.beta(column))
    }

    pub fn len(&self) -> usize {
        self.rows * self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if !value.is_finite() {
        return Err(ConfigurationError::NonFinite { field, value });
    }
    if value <= 0.0 {
        return Err(ConfigurationError::NonPositive { field, value });
    }
    Ok(())
}

/// Number of samples `0, step, 2*step, ...` not exceeding `span`.
fn lattice_len(span: f64, step: f64) -> f64 {
    (span / step + SWEEP_EPSILON).floor() + 1.0
}

fn saturating_count(value: f64) -> usize {
    if value >= usize::MAX as f64 {
        usize::MAX
    } else {
        value as usize
    }
}
