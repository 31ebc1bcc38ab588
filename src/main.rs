use anyhow::Result;
use markowitz_rs::efficient_frontier;
use markowitz_rs::find_market_portfolio;
use markowitz_rs::sharpe;
use markowitz_rs::FrontierChart;
use ndarray::array;

fn main() -> Result<()> {
  // Three-asset example universe: annualized expected returns and covariance.
  let mu = array![0.05, 0.09, 0.13];
  let cov = array![
    [0.03, 0.004, 0.0],
    [0.004, 0.07, 0.008],
    [0.0, 0.008, 0.14]
  ];
  let risk_free = 0.02;

  let frontier = efficient_frontier(&mu, &cov, 50)?;
  println!(
    "Frontier: {} points, {} skipped",
    frontier.points.len(),
    frontier.skipped.len()
  );
  for skipped in &frontier.skipped {
    println!(
      "  skipped target {:.4}: {}",
      skipped.target_return, skipped.error
    );
  }

  let tangency = find_market_portfolio(&mu, &cov, risk_free)?;
  let tangency_sharpe = sharpe(&tangency.weights, risk_free, &cov, &mu)?;
  println!("Market portfolio at target return {:.4}:", tangency.target_return);
  for (i, w) in tangency.weights.iter().enumerate() {
    println!("  asset {}: {:.4}", i + 1, w);
  }
  println!("  Sharpe ratio: {:.4}", tangency_sharpe);
  if !tangency.failures.is_empty() {
    println!("  {} search iterations failed", tangency.failures.len());
  }

  let plot = FrontierChart::new()
    .title("Efficient Frontier (3 assets)")
    .plot(&frontier);
  plot.write_html("target/frontier.html");
  println!("Frontier chart written to target/frontier.html");

  Ok(())
}
