//! HTML predictions table
//!
//! Builds a (player, predicted outcome) table fragment and appends it to an
//! existing report file. Highlighted players carry a `duplicate` row class
//! so the stylesheet can mark them.

use crate::{PredictionResult, Result};
use std::collections::HashSet;
use std::io::Write;

/// Minimal escaping for text nodes
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render the predictions as an HTML table fragment
pub fn predictions_table(results: &[PredictionResult], highlighted: &HashSet<&str>) -> String {
    let mut html = String::new();
    html.push_str("<table class=\"hide-duplicates\">\n");
    html.push_str("  <thead>\n    <tr><th>Player</th><th>Predicted Outcome</th></tr>\n  </thead>\n");
    html.push_str("  <tbody>\n");
    for result in results {
        let marker = if highlighted.contains(result.player.as_str()) {
            " class=\"duplicate\""
        } else {
            ""
        };
        html.push_str(&format!(
            "    <tr{}><td>{}</td><td>{}</td></tr>\n",
            marker,
            escape(&result.player),
            result.outcome
        ));
    }
    html.push_str("  </tbody>\n</table>\n");
    html
}

/// Append a fragment to the report file, creating it if absent
pub fn append_fragment(path: &str, fragment: &str) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(fragment.as_bytes())?;
    Ok(())
}
