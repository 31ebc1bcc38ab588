//! # markowitz-rs
//!
//! $$
//! \min_{\mathbf{x}} \ \mathbf{x}^\top \Sigma \mathbf{x}
//! \quad \text{s.t.} \quad \mathbf{x} \ge 0,\ \mathbf{x}^\top \mu \ge r_{\min},\ \mathbf{1}^\top \mathbf{x} = 1
//! $$
//!
//! Mean-variance portfolio optimization: minimum-variance allocation under a
//! return floor, efficient-frontier sweeps and tangency (market) portfolio
//! search via Sharpe-ratio maximization.

pub mod data;
pub mod error;
pub mod frontier;
pub mod plot;
pub mod qp;
pub mod sharpe;
pub mod tangency;

pub use data::align_return_series;
pub use data::covariance_matrix;
pub use data::log_returns;
pub use data::mean_returns;
pub use error::MarkowitzError;
pub use error::Result;
pub use frontier::efficient_frontier;
pub use frontier::efficient_frontier_with;
pub use frontier::frontier_over_targets;
pub use frontier::Frontier;
pub use frontier::FrontierPoint;
pub use frontier::SkippedSample;
pub use plot::FrontierChart;
pub use qp::min_variance_weights;
pub use qp::min_variance_weights_with;
pub use qp::QpSettings;
pub use sharpe::portfolio_return;
pub use sharpe::portfolio_variance;
pub use sharpe::portfolio_volatility;
pub use sharpe::sharpe;
pub use tangency::default_epsilon;
pub use tangency::find_market_portfolio;
pub use tangency::find_market_portfolio_with;
pub use tangency::IterationFailure;
pub use tangency::Tangency;
pub use tangency::TangencyConfig;
