//! # Errors
//!
//! $$
//! \text{status} \in \{\text{infeasible},\ \text{unbounded},\ \text{solver},\ \sigma_p \approx 0\}
//! $$
//!
//! Error taxonomy shared by the optimizer, the frontier sweep and the
//! tangency search.

use thiserror::Error;

/// Failure modes of a mean-variance optimization run.
#[derive(Debug, Error)]
pub enum MarkowitzError {
  /// The constraint set admits no solution (e.g. the return floor exceeds
  /// the best achievable portfolio return).
  #[error("problem is infeasible: no weights satisfy the constraints")]
  Infeasible,

  /// The solver reported dual infeasibility.
  #[error("problem is unbounded")]
  Unbounded,

  /// The underlying QP solver failed to converge or errored internally.
  #[error("solver error: {0}")]
  Solver(String),

  /// Portfolio variance is zero or near-zero, the Sharpe ratio is undefined.
  #[error("degenerate portfolio variance {variance:e}, Sharpe ratio undefined")]
  DegenerateVariance { variance: f64 },

  /// Return vector and covariance matrix dimensions disagree.
  #[error("shape mismatch: {assets} assets vs {rows}x{cols} covariance")]
  ShapeMismatch {
    assets: usize,
    rows: usize,
    cols: usize,
  },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MarkowitzError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_carries_context() {
    let err = MarkowitzError::ShapeMismatch {
      assets: 3,
      rows: 2,
      cols: 2,
    };
    assert_eq!(err.to_string(), "shape mismatch: 3 assets vs 2x2 covariance");
  }
}
