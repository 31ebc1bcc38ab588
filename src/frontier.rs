//! # Efficient Frontier
//!
//! $$
//! \{(\sigma_p, \mu_p)\}:\ r_{\min} \in [\min \mu,\ \max \mu]
//! $$
//!
//! Sweep of the minimum-variance optimizer over a grid of return floors.
//! Infeasible or failed samples are dropped from the frontier and recorded
//! in a skip log instead of aborting the sweep.

use ndarray::Array1;
use ndarray::Array2;

use crate::error::MarkowitzError;
use crate::error::Result;
use crate::qp::check_dims;
use crate::qp::min_variance_weights_with;
use crate::qp::QpSettings;
use crate::sharpe::portfolio_return;
use crate::sharpe::portfolio_volatility;

/// One feasible point on the efficient frontier.
#[derive(Clone, Copy, Debug)]
pub struct FrontierPoint {
  /// Return floor the optimizer was asked for.
  pub target_return: f64,
  /// Realized expected return `w' mu` of the optimal weights.
  pub expected_return: f64,
  /// Realized volatility `sqrt(w' C w)` of the optimal weights.
  pub risk: f64,
}

/// A sweep sample that produced no frontier point.
#[derive(Debug)]
pub struct SkippedSample {
  /// Return floor at which the optimization failed.
  pub target_return: f64,
  /// What went wrong at this sample.
  pub error: MarkowitzError,
}

/// Outcome of a frontier sweep: feasible points in target order plus the
/// samples that were dropped along the way.
#[derive(Debug, Default)]
pub struct Frontier {
  /// Feasible (risk, return) points, ordered by increasing target return.
  pub points: Vec<FrontierPoint>,
  /// Samples excluded from the frontier, for diagnostics.
  pub skipped: Vec<SkippedSample>,
}

/// Trace the efficient frontier with `n` evenly spaced return floors over
/// `[min(returns), max(returns)]` inclusive.
pub fn efficient_frontier(
  returns: &Array1<f64>,
  cov: &Array2<f64>,
  n: usize,
) -> Result<Frontier> {
  efficient_frontier_with(returns, cov, n, &QpSettings::default())
}

/// Frontier sweep with explicit solver settings.
pub fn efficient_frontier_with(
  returns: &Array1<f64>,
  cov: &Array2<f64>,
  n: usize,
  settings: &QpSettings,
) -> Result<Frontier> {
  check_dims(returns, cov)?;

  let lo = returns.iter().copied().fold(f64::INFINITY, f64::min);
  let hi = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
  let targets = Array1::linspace(lo, hi, n).to_vec();

  Ok(frontier_over_targets(returns, cov, &targets, settings))
}

/// Frontier sweep over an explicit list of return floors.
///
/// Unlike [`efficient_frontier`] this performs no dimension check of its own
/// beyond what each solve reports, so a shape mismatch surfaces as every
/// sample being skipped.
pub fn frontier_over_targets(
  returns: &Array1<f64>,
  cov: &Array2<f64>,
  targets: &[f64],
  settings: &QpSettings,
) -> Frontier {
  let mut frontier = Frontier::default();

  for &target in targets {
    match min_variance_weights_with(returns, cov, target, settings) {
      Ok(weights) => frontier.points.push(FrontierPoint {
        target_return: target,
        expected_return: portfolio_return(&weights, returns),
        risk: portfolio_volatility(&weights, cov),
      }),
      Err(error) => {
        tracing::warn!(target_return = target, %error, "skipping frontier sample");
        frontier.skipped.push(SkippedSample {
          target_return: target,
          error,
        });
      }
    }
  }

  frontier
}

#[cfg(test)]
mod tests {
  use ndarray::array;
  use tracing_test::traced_test;

  use super::*;

  #[test]
  fn sweep_covers_every_target_on_a_well_conditioned_universe() {
    let mu = array![0.05, 0.08, 0.12];
    let cov = array![
      [0.04, 0.006, 0.0],
      [0.006, 0.09, 0.012],
      [0.0, 0.012, 0.16]
    ];

    let frontier = efficient_frontier(&mu, &cov, 15).unwrap();

    assert_eq!(frontier.points.len() + frontier.skipped.len(), 15);
    assert!(frontier.points.len() <= 15);
    for point in &frontier.points {
      assert!(point.risk >= 0.0);
      assert!(point.expected_return >= point.target_return - 1e-6);
    }
    for pair in frontier.points.windows(2) {
      assert!(pair[0].target_return <= pair[1].target_return);
    }
  }

  #[test]
  fn risk_grows_toward_the_aggressive_end() {
    let mu = array![0.05, 0.12];
    let cov = array![[0.02, 0.0], [0.0, 0.18]];

    let frontier = efficient_frontier(&mu, &cov, 9).unwrap();
    let first = frontier.points.first().unwrap();
    let last = frontier.points.last().unwrap();

    // The top of the sweep forces everything into the risky asset.
    assert!(last.risk > first.risk);
    assert!(last.expected_return > first.expected_return);
  }

  #[traced_test]
  #[test]
  fn infeasible_targets_are_skipped_and_logged() {
    let mu = array![0.05, 0.10];
    let cov = array![[0.04, 0.0], [0.0, 0.04]];

    let frontier =
      frontier_over_targets(&mu, &cov, &[0.05, 0.10, 0.50], &QpSettings::default());

    assert_eq!(frontier.points.len(), 2);
    assert_eq!(frontier.skipped.len(), 1);
    assert_eq!(frontier.skipped[0].target_return, 0.50);
    assert!(matches!(frontier.skipped[0].error, MarkowitzError::Infeasible));
    assert!(logs_contain("skipping frontier sample"));
  }

  #[test]
  fn empty_sweep_is_empty() {
    let mu = array![0.05, 0.10];
    let cov = array![[0.04, 0.0], [0.0, 0.04]];

    let frontier = efficient_frontier(&mu, &cov, 0).unwrap();
    assert!(frontier.points.is_empty());
    assert!(frontier.skipped.is_empty());
  }

  #[test]
  fn shape_mismatch_aborts_before_the_sweep() {
    let mu = array![0.05, 0.10, 0.15];
    let cov = array![[0.04, 0.0], [0.0, 0.04]];

    assert!(efficient_frontier(&mu, &cov, 5).is_err());
  }
}
