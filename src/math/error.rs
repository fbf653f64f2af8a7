/// Rejected surface parameters. Raised once, at the parameter boundary;
/// generation itself never fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("{field} must be strictly positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("sample grid of {rows} x {columns} exceeds the limit of {limit} samples")]
    TooManySamples {
        rows: usize,
        columns: usize,
        limit: usize,
    },
    #[error("finite-difference delta must be non-zero and finite, got {0}")]
    InvalidDelta(f64),
    #[error("parse error: {0}")]
    Parse(String),
}
