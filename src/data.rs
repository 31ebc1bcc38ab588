//! # Input Construction
//!
//! $$
//! \hat\Sigma_{ij} = \frac{1}{T-1}\sum_t (r_{i,t}-\bar r_i)(r_{j,t}-\bar r_j)
//! $$
//!
//! Helpers turning raw price history into the return vector and covariance
//! matrix the optimizer consumes.

use ndarray::Array1;
use ndarray::Array2;

/// Convert close prices to a log-return series. Non-positive prices are
/// skipped.
pub fn log_returns(closes: &[f64]) -> Array1<f64> {
  let mut out = Vec::with_capacity(closes.len().saturating_sub(1));
  for i in 1..closes.len() {
    if closes[i - 1] > 0.0 && closes[i] > 0.0 {
      out.push((closes[i] / closes[i - 1]).ln());
    }
  }
  Array1::from_vec(out)
}

/// Align multiple return series to a common tail length.
pub fn align_return_series(series: &[Array1<f64>]) -> Vec<Array1<f64>> {
  let min_len = series.iter().map(|r| r.len()).min().unwrap_or(0);
  series
    .iter()
    .map(|r| r.slice(ndarray::s![r.len() - min_len..]).to_owned())
    .collect()
}

/// Per-asset mean return of aligned series.
pub fn mean_returns(aligned: &[Array1<f64>]) -> Array1<f64> {
  aligned
    .iter()
    .map(|r| r.mean().unwrap_or(0.0))
    .collect()
}

/// Sample covariance matrix (denominator `T - 1`) of aligned return series.
///
/// Series shorter than two observations produce a zero matrix.
pub fn covariance_matrix(aligned: &[Array1<f64>]) -> Array2<f64> {
  let n = aligned.len();
  let t = aligned.first().map(|r| r.len()).unwrap_or(0);
  let mut cov = Array2::zeros((n, n));
  if t < 2 {
    return cov;
  }

  let means = mean_returns(aligned);
  for i in 0..n {
    for j in i..n {
      let mut acc = 0.0;
      for k in 0..t {
        acc += (aligned[i][k] - means[i]) * (aligned[j][k] - means[j]);
      }
      let c = acc / (t - 1) as f64;
      cov[(i, j)] = c;
      cov[(j, i)] = c;
    }
  }

  cov
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;

  use super::*;

  #[test]
  fn log_returns_skip_non_positive_prices() {
    let r = log_returns(&[100.0, 110.0, 0.0, 121.0, 133.1]);
    assert_eq!(r.len(), 2);
    assert_abs_diff_eq!(r[0], (110.0_f64 / 100.0).ln(), epsilon = 1e-12);
    assert_abs_diff_eq!(r[1], (133.1_f64 / 121.0).ln(), epsilon = 1e-12);
  }

  #[test]
  fn alignment_keeps_common_tail() {
    let series = vec![array![1.0, 2.0, 3.0, 4.0], array![5.0, 6.0]];
    let aligned = align_return_series(&series);
    assert_eq!(aligned[0], array![3.0, 4.0]);
    assert_eq!(aligned[1], array![5.0, 6.0]);
  }

  #[test]
  fn covariance_is_symmetric_and_matches_variance_on_diagonal() {
    let a = array![0.01, -0.02, 0.03, 0.00];
    let b = array![0.02, 0.00, -0.01, 0.01];
    let aligned = vec![a.clone(), b];

    let cov = covariance_matrix(&aligned);
    assert_eq!(cov.dim(), (2, 2));
    assert_abs_diff_eq!(cov[(0, 1)], cov[(1, 0)], epsilon = 1e-15);

    let mean_a = a.mean().unwrap();
    let var_a = a.iter().map(|x| (x - mean_a).powi(2)).sum::<f64>() / 3.0;
    assert_abs_diff_eq!(cov[(0, 0)], var_a, epsilon = 1e-15);
  }

  #[test]
  fn short_series_yield_zero_covariance() {
    let cov = covariance_matrix(&[array![0.01], array![0.02]]);
    assert_eq!(cov, Array2::<f64>::zeros((2, 2)));
  }
}
