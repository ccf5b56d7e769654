//! Outcome-prediction pipeline: features, model, training, inference

pub mod features;
pub mod model;
pub mod trainer;

pub use features::{feature_row, MeanImputer, Standardizer, FEATURE_DIM, FEATURE_NAMES};
pub use model::OutcomeModel;
pub use trainer::{fit, prediction_pool, training_examples, FittedPipeline, TrainingExample};
