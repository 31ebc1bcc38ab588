//! # Frontier Chart
//!
//! $$
//! \{(\sigma_p, \mu_p)\} \mapsto \text{risk/return scatter}
//! $$
//!
use plotly::common::Marker;
use plotly::common::Mode;
use plotly::layout::Axis;
use plotly::Layout;
use plotly::Plot;
use plotly::Scatter;

use crate::frontier::Frontier;

/// Builder for a risk/return scatter chart of an efficient frontier.
pub struct FrontierChart {
  title: String,
  marker_size: usize,
}

impl FrontierChart {
  pub fn new() -> Self {
    Self {
      title: "Efficient Frontier".to_string(),
      marker_size: 6,
    }
  }

  pub fn title(mut self, title: &str) -> Self {
    self.title = title.into();
    self
  }

  pub fn marker_size(mut self, size: usize) -> Self {
    self.marker_size = size;
    self
  }

  /// Render the frontier's feasible points into a plotly figure.
  pub fn plot(&self, frontier: &Frontier) -> Plot {
    let risk: Vec<f64> = frontier.points.iter().map(|p| p.risk).collect();
    let ret: Vec<f64> = frontier.points.iter().map(|p| p.expected_return).collect();

    let trace = Scatter::new(risk, ret)
      .mode(Mode::Markers)
      .marker(Marker::new().size(self.marker_size))
      .name("frontier");

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(
      Layout::new()
        .title(self.title.as_str())
        .x_axis(Axis::new().title("std"))
        .y_axis(Axis::new().title("Return")),
    );

    plot
  }

  pub fn show(&self, frontier: &Frontier) {
    self.plot(frontier).show();
  }
}

impl Default for FrontierChart {
  fn default() -> Self {
    Self::new()
  }
}
