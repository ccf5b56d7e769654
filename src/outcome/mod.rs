//! Career outcome classification

pub mod classifier;

pub use classifier::{classify, qualifying_seasons, QualifyingSeason};
