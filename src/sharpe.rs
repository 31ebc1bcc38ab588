//! # Portfolio Measures
//!
//! $$
//! S(\mathbf{w}) = \frac{\mathbf{w}^\top \mu - r_f}{\sqrt{\mathbf{w}^\top \Sigma \mathbf{w}}}
//! $$
//!
//! Expected return, variance, volatility and the Sharpe ratio of a weights
//! vector.

use ndarray::Array1;
use ndarray::Array2;

use crate::error::MarkowitzError;
use crate::error::Result;

/// Variance below this threshold makes the Sharpe ratio undefined.
const DEGENERATE_VARIANCE_TOL: f64 = 1e-12;

/// Expected portfolio return `w' mu`.
pub fn portfolio_return(weights: &Array1<f64>, returns: &Array1<f64>) -> f64 {
  weights.dot(returns)
}

/// Portfolio variance `w' C w`.
pub fn portfolio_variance(weights: &Array1<f64>, cov: &Array2<f64>) -> f64 {
  weights.dot(&cov.dot(weights))
}

/// Portfolio volatility `sqrt(w' C w)`, clamped at zero against numerical
/// noise in the quadratic form.
pub fn portfolio_volatility(weights: &Array1<f64>, cov: &Array2<f64>) -> f64 {
  portfolio_variance(weights, cov).max(0.0).sqrt()
}

/// Sharpe ratio of a weights vector against a risk-free rate.
///
/// Fails with [`MarkowitzError::DegenerateVariance`] when the portfolio
/// variance is zero or near-zero.
pub fn sharpe(
  weights: &Array1<f64>,
  risk_free: f64,
  cov: &Array2<f64>,
  returns: &Array1<f64>,
) -> Result<f64> {
  let variance = portfolio_variance(weights, cov);
  if variance <= DEGENERATE_VARIANCE_TOL {
    return Err(MarkowitzError::DegenerateVariance { variance });
  }
  Ok((portfolio_return(weights, returns) - risk_free) / variance.sqrt())
}
