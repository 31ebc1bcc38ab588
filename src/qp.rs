//! # Minimum-Variance QP
//!
//! $$
//! \min_{\mathbf{x}} \ \mathbf{x}^\top \Sigma \mathbf{x}
//! \quad \text{s.t.} \quad \mathbf{x} \ge 0,\ \mathbf{x}^\top \mu \ge r_{\min},\ \mathbf{1}^\top \mathbf{x} = 1
//! $$
//!
//! Long-only minimum-variance allocation under a return floor, solved with
//! the Clarabel interior-point solver.

use clarabel::algebra::CscMatrix;
use clarabel::solver::DefaultSettingsBuilder;
use clarabel::solver::DefaultSolver;
use clarabel::solver::IPSolver;
use clarabel::solver::SolverStatus;
use clarabel::solver::SupportedConeT;
use ndarray::Array1;
use ndarray::Array2;

use crate::error::MarkowitzError;
use crate::error::Result;

/// Solver settings for the minimum-variance QP.
#[derive(Debug, Clone)]
pub struct QpSettings {
  /// Print solver output.
  pub verbose: bool,
  /// Maximum interior-point iterations.
  pub max_iter: u32,
  /// Absolute duality-gap tolerance.
  pub tol_gap_abs: f64,
  /// Relative duality-gap tolerance.
  pub tol_gap_rel: f64,
}

impl Default for QpSettings {
  fn default() -> Self {
    Self {
      verbose: false,
      max_iter: 100,
      tol_gap_abs: 1e-8,
      tol_gap_rel: 1e-8,
    }
  }
}

/// Check that `returns` and `cov` describe the same asset universe.
pub(crate) fn check_dims(returns: &Array1<f64>, cov: &Array2<f64>) -> Result<usize> {
  let assets = returns.len();
  if assets == 0 || cov.nrows() != assets || cov.ncols() != assets {
    return Err(MarkowitzError::ShapeMismatch {
      assets,
      rows: cov.nrows(),
      cols: cov.ncols(),
    });
  }
  Ok(assets)
}

/// Minimum-variance weights for a given return floor, default settings.
///
/// Feasible in practice only for `r_min` within `[min(returns), max(returns)]`;
/// a floor above the best single-asset return yields [`MarkowitzError::Infeasible`].
pub fn min_variance_weights(
  returns: &Array1<f64>,
  cov: &Array2<f64>,
  r_min: f64,
) -> Result<Array1<f64>> {
  min_variance_weights_with(returns, cov, r_min, &QpSettings::default())
}

/// Minimum-variance weights with explicit solver settings.
pub fn min_variance_weights_with(
  returns: &Array1<f64>,
  cov: &Array2<f64>,
  r_min: f64,
  settings: &QpSettings,
) -> Result<Array1<f64>> {
  let n = check_dims(returns, cov)?;

  // Objective x' C x as (1/2) x' P x with P = 2C, upper triangle in CSC.
  let p = upper_csc_scaled(cov, 2.0);
  let q = vec![0.0; n];

  // Constraints in Clarabel form Ax + s = b:
  //   zero cone (1 row):       1' x = 1
  //   nonneg cone (1+n rows):  -mu' x <= -r_min, -x <= 0
  let mut colptr = Vec::with_capacity(n + 1);
  let mut rowval = Vec::with_capacity(3 * n);
  let mut nzval = Vec::with_capacity(3 * n);
  colptr.push(0);
  for j in 0..n {
    rowval.push(0);
    nzval.push(1.0);
    rowval.push(1);
    nzval.push(-returns[j]);
    rowval.push(2 + j);
    nzval.push(-1.0);
    colptr.push(rowval.len());
  }
  let a = CscMatrix::new(n + 2, n, colptr, rowval, nzval);

  let mut b = vec![0.0; n + 2];
  b[0] = 1.0;
  b[1] = -r_min;

  let cones = [
    SupportedConeT::ZeroConeT(1),
    SupportedConeT::NonnegativeConeT(n + 1),
  ];

  let clarabel_settings = DefaultSettingsBuilder::default()
    .verbose(settings.verbose)
    .max_iter(settings.max_iter)
    .tol_gap_abs(settings.tol_gap_abs)
    .tol_gap_rel(settings.tol_gap_rel)
    .build()
    .map_err(|e| MarkowitzError::Solver(e.to_string()))?;

  let mut solver = DefaultSolver::new(&p, &q, &a, &b, &cones, clarabel_settings);
  solver.solve();

  let status = solver.solution.status;
  tracing::debug!(?status, r_min, "minimum-variance solve finished");

  match status {
    SolverStatus::Solved | SolverStatus::AlmostSolved => {
      Ok(Array1::from_vec(solver.solution.x.clone()))
    }
    SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
      Err(MarkowitzError::Infeasible)
    }
    SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
      Err(MarkowitzError::Unbounded)
    }
    other => Err(MarkowitzError::Solver(format!(
      "solver stopped with status {:?}",
      other
    ))),
  }
}

/// Upper triangle of `scale * m` as a Clarabel CSC matrix.
fn upper_csc_scaled(m: &Array2<f64>, scale: f64) -> CscMatrix<f64> {
  let n = m.ncols();
  let mut colptr = Vec::with_capacity(n + 1);
  let mut rowval = Vec::new();
  let mut nzval = Vec::new();
  colptr.push(0);
  for j in 0..n {
    for i in 0..=j {
      let v = scale * m[(i, j)];
      if v != 0.0 {
        rowval.push(i);
        nzval.push(v);
      }
    }
    colptr.push(rowval.len());
  }
  CscMatrix::new(n, n, colptr, rowval, nzval)
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;

  use super::*;
  use crate::sharpe::portfolio_return;
  use crate::sharpe::portfolio_variance;

  #[test]
  fn weights_satisfy_constraints() {
    let mu = array![0.08, 0.10, 0.12];
    let cov = array![
      [0.04, 0.01, 0.00],
      [0.01, 0.09, 0.02],
      [0.00, 0.02, 0.16]
    ];

    let w = min_variance_weights(&mu, &cov, 0.10).unwrap();

    assert_eq!(w.len(), 3);
    for &wi in w.iter() {
      assert!(wi >= -1e-7, "negative weight {wi}");
    }
    assert_abs_diff_eq!(w.sum(), 1.0, epsilon = 1e-6);
    assert!(portfolio_return(&w, &mu) >= 0.10 - 1e-6);
  }

  #[test]
  fn two_uncorrelated_equal_variance_assets_split_evenly() {
    let mu = array![0.05, 0.10];
    let cov = array![[0.04, 0.0], [0.0, 0.04]];

    // Floor at the lowest asset return leaves the unconstrained
    // minimum-variance point, which is the equal split.
    let w = min_variance_weights(&mu, &cov, 0.05).unwrap();

    assert_abs_diff_eq!(w[0], 0.5, epsilon = 1e-5);
    assert_abs_diff_eq!(w[1], 0.5, epsilon = 1e-5);
  }

  #[test]
  fn minimum_variance_beats_nearby_feasible_points() {
    let mu = array![0.05, 0.10];
    let cov = array![[0.04, 0.0], [0.0, 0.09]];

    let w = min_variance_weights(&mu, &cov, 0.05).unwrap();
    let best = portfolio_variance(&w, &cov);

    // Analytic optimum allocates inversely to variance: (9/13, 4/13).
    assert_abs_diff_eq!(w[0], 9.0 / 13.0, epsilon = 1e-4);
    for &a in &[0.0, 0.25, 0.5, 0.75, 1.0] {
      let other = array![a, 1.0 - a];
      assert!(best <= portfolio_variance(&other, &cov) + 1e-8);
    }
  }

  #[test]
  fn single_asset_gets_full_weight() {
    let mu = array![0.07];
    let cov = array![[0.02]];

    let w = min_variance_weights(&mu, &cov, 0.05).unwrap();
    assert_abs_diff_eq!(w[0], 1.0, epsilon = 1e-6);
  }

  #[test]
  fn unreachable_floor_is_infeasible() {
    let mu = array![0.05, 0.10];
    let cov = array![[0.04, 0.0], [0.0, 0.04]];

    let err = min_variance_weights(&mu, &cov, 0.50).unwrap_err();
    assert!(matches!(err, MarkowitzError::Infeasible));
  }

  #[test]
  fn dimension_disagreement_is_rejected() {
    let mu = array![0.05, 0.10, 0.15];
    let cov = array![[0.04, 0.0], [0.0, 0.04]];

    let err = min_variance_weights(&mu, &cov, 0.05).unwrap_err();
    assert!(matches!(
      err,
      MarkowitzError::ShapeMismatch {
        assets: 3,
        rows: 2,
        cols: 2
      }
    ));
  }

  #[test]
  fn repeated_solves_are_identical_within_tolerance() {
    let mu = array![0.08, 0.10, 0.12];
    let cov = array![
      [0.04, 0.01, 0.00],
      [0.01, 0.09, 0.02],
      [0.00, 0.02, 0.16]
    ];

    let w1 = min_variance_weights(&mu, &cov, 0.10).unwrap();
    let w2 = min_variance_weights(&mu, &cov, 0.10).unwrap();

    for (a, b) in w1.iter().zip(w2.iter()) {
      assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }
  }
}
