//! # Tangency Portfolio Search
//!
//! $$
//! r^\* = \arg\max_{r_{\min}} S\big(\mathbf{w}^\*(r_{\min})\big)
//! $$
//!
//! Bracketed search for the market portfolio: the return floor whose
//! minimum-variance portfolio maximizes the Sharpe ratio. The bracket update
//! is a fixed-count heuristic bisection, assumed (not guaranteed) unimodal
//! over `[min(returns), max(returns)]`.

use ndarray::Array1;
use ndarray::Array2;

use crate::error::MarkowitzError;
use crate::error::Result;
use crate::qp::check_dims;
use crate::qp::min_variance_weights_with;
use crate::qp::QpSettings;
use crate::sharpe::sharpe;

/// Configuration for [`find_market_portfolio_with`].
#[derive(Clone, Debug)]
pub struct TangencyConfig {
  /// Number of bracket updates to run. Fixed count, not convergence-based.
  pub n_iter: usize,
  /// Step-bias term added when shrinking the bracket; when `None` the
  /// covariance-scaled default `1e-8 + min(C)/100` is used.
  pub epsilon: Option<f64>,
  /// Settings forwarded to every inner minimum-variance solve.
  pub settings: QpSettings,
}

impl Default for TangencyConfig {
  fn default() -> Self {
    Self {
      n_iter: 10,
      epsilon: None,
      settings: QpSettings::default(),
    }
  }
}

/// A search iteration that left the bracket unchanged.
#[derive(Debug)]
pub struct IterationFailure {
  /// Zero-based iteration index.
  pub iteration: usize,
  /// The failure that voided the iteration.
  pub error: MarkowitzError,
}

/// Result of a tangency search.
#[derive(Debug)]
pub struct Tangency {
  /// Weights of the final minimum-variance solve at the converged target.
  pub weights: Array1<f64>,
  /// Final bracket midpoint the weights were solved at.
  pub target_return: f64,
  /// Iterations that failed and were skipped, for diagnostics.
  pub failures: Vec<IterationFailure>,
}

/// Default step-bias heuristic: `1e-8 + min(C)/100`, coupling the bracket
/// perturbation to the scale of the covariance matrix.
pub fn default_epsilon(cov: &Array2<f64>) -> f64 {
  1e-8 + cov.iter().copied().fold(f64::INFINITY, f64::min) / 100.0
}

/// Tangency search with default configuration (10 iterations, default
/// epsilon heuristic).
pub fn find_market_portfolio(
  returns: &Array1<f64>,
  cov: &Array2<f64>,
  risk_free: f64,
) -> Result<Tangency> {
  find_market_portfolio_with(returns, cov, risk_free, &TangencyConfig::default())
}

/// Tangency search with explicit configuration.
///
/// Runs exactly `config.n_iter` bracket updates; an iteration in which any of
/// the three Sharpe evaluations fails leaves the bracket untouched and is
/// recorded on the result. After the loop, one more minimum-variance solve at
/// the final midpoint produces the returned weights; that final solve is the
/// only failure that propagates.
pub fn find_market_portfolio_with(
  returns: &Array1<f64>,
  cov: &Array2<f64>,
  risk_free: f64,
  config: &TangencyConfig,
) -> Result<Tangency> {
  check_dims(returns, cov)?;

  let epsilon = config.epsilon.unwrap_or_else(|| default_epsilon(cov));

  let mut up = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
  let mut down = returns.iter().copied().fold(f64::INFINITY, f64::min);
  let mut mid = (up + down) / 2.0;

  let mut failures = Vec::new();

  for iteration in 0..config.n_iter {
    match bracket_sharpes(returns, cov, risk_free, up, down, mid, &config.settings) {
      Ok((sharpe_up, sharpe_down)) => {
        if sharpe_up > sharpe_down {
          down = (down + mid) / 2.0 - epsilon;
        } else {
          up = (up + mid) / 2.0 + epsilon;
        }
        mid = (up + down) / 2.0;
      }
      Err(error) => {
        tracing::warn!(iteration, %error, "tangency iteration failed, bracket unchanged");
        failures.push(IterationFailure { iteration, error });
      }
    }
  }

  let weights = min_variance_weights_with(returns, cov, mid, &config.settings)?;

  Ok(Tangency {
    weights,
    target_return: mid,
    failures,
  })
}

/// Sharpe ratios at the bracket ends. The midpoint is evaluated as well:
/// a failure at any of the three targets voids the whole iteration.
fn bracket_sharpes(
  returns: &Array1<f64>,
  cov: &Array2<f64>,
  risk_free: f64,
  up: f64,
  down: f64,
  mid: f64,
  settings: &QpSettings,
) -> Result<(f64, f64)> {
  let sharpe_up = sharpe_at(returns, cov, risk_free, up, settings)?;
  let sharpe_down = sharpe_at(returns, cov, risk_free, down, settings)?;
  let _sharpe_mid = sharpe_at(returns, cov, risk_free, mid, settings)?;
  Ok((sharpe_up, sharpe_down))
}

fn sharpe_at(
  returns: &Array1<f64>,
  cov: &Array2<f64>,
  risk_free: f64,
  target: f64,
  settings: &QpSettings,
) -> Result<f64> {
  let weights = min_variance_weights_with(returns, cov, target, settings)?;
  sharpe(&weights, risk_free, cov, returns)
}
