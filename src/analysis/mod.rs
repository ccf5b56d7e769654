//! One-off analytical questions over the loaded tables

pub mod experience;
pub mod outcomes;
pub mod rebounding;
pub mod scoring;
