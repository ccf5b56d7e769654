//! Chart view state
//!
//! A chart is labeled series plus view state: per-series visibility
//! (checkbox-toggle semantics) and an annotation keyed by hovered position.
//! The state machine is decoupled from the analytics; rendering goes through
//! the [`RenderSink`] seam, with a console implementation here.

use crate::Result;
use std::collections::HashMap;

/// One plottable series
#[derive(Debug, Clone)]
pub struct LabeledSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl LabeledSeries {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        LabeledSeries {
            label: label.into(),
            points,
        }
    }
}

/// View state for one chart
#[derive(Debug, Clone)]
pub struct ChartState {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    series: Vec<LabeledSeries>,
    visible: Vec<bool>,
    /// Annotation text per hoverable x-position
    hover_notes: HashMap<usize, String>,
    annotation: Option<String>,
}

impl ChartState {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        ChartState {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series: Vec::new(),
            visible: Vec::new(),
            hover_notes: HashMap::new(),
            annotation: None,
        }
    }

    /// Add a series, visible by default
    pub fn push_series(&mut self, series: LabeledSeries) {
        self.series.push(series);
        self.visible.push(true);
    }

    /// Attach annotation text to one x-position
    pub fn set_hover_note(&mut self, position: usize, text: impl Into<String>) {
        self.hover_notes.insert(position, text.into());
    }

    /// Checkbox toggle: flip visibility of the named series.
    /// Returns the new visibility, or None for an unknown label.
    pub fn toggle(&mut self, label: &str) -> Option<bool> {
        let idx = self.series.iter().position(|s| s.label == label)?;
        self.visible[idx] = !self.visible[idx];
        Some(self.visible[idx])
    }

    pub fn is_visible(&self, label: &str) -> bool {
        self.series
            .iter()
            .position(|s| s.label == label)
            .is_some_and(|idx| self.visible[idx])
    }

    /// Hover over an x-position: sets the annotation when a note exists,
    /// clears it otherwise
    pub fn hover(&mut self, position: Option<usize>) {
        self.annotation = position.and_then(|p| self.hover_notes.get(&p).cloned());
    }

    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// The currently visible series
    pub fn visible_series(&self) -> impl Iterator<Item = &LabeledSeries> {
        self.series
            .iter()
            .zip(&self.visible)
            .filter(|(_, v)| **v)
            .map(|(s, _)| s)
    }
}

/// A rendering surface accepting labeled series
pub trait RenderSink {
    fn render(&mut self, chart: &ChartState) -> Result<()>;
}

/// Prints the visible series as a text table
pub struct ConsoleSink;

impl RenderSink for ConsoleSink {
    fn render(&mut self, chart: &ChartState) -> Result<()> {
        println!("\n{}", chart.title);
        println!("───────────────────────────────");
        println!("  {} vs {}", chart.y_label, chart.x_label);
        for series in chart.visible_series() {
            let values: Vec<String> = series
                .points
                .iter()
                .map(|(x, y)| format!("{:.0}:{:.2}", x, y))
                .collect();
            println!("  {:<12} {}", series.label, values.join("  "));
        }
        if let Some(text) = chart.annotation() {
            println!("  [{}]", text);
        }
        Ok(())
    }
}
