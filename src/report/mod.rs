//! Output surfaces: chart view state and the HTML predictions table

pub mod chart;
pub mod html;

pub use chart::{ChartState, ConsoleSink, LabeledSeries, RenderSink};
