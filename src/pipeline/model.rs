//! Multinomial logistic regression over career outcome classes
//!
//! A single linear layer with softmax output. Only classes present in the
//! training labels get an output unit; absent classes are never predictable.

use burn::nn::Linear;
use burn::tensor::activation::softmax;
use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};

use crate::pipeline::features::FEATURE_DIM;
use crate::CareerOutcome;

/// Build a batch tensor from standardized feature rows
pub fn batch_tensor<B: Backend>(
    rows: &[[f64; FEATURE_DIM]],
    device: &B::Device,
) -> Tensor<B, 2> {
    let flat: Vec<f32> = rows.iter().flatten().map(|v| *v as f32).collect();
    Tensor::from_data(TensorData::new(flat, [rows.len(), FEATURE_DIM]), device)
}

/// A trained classifier plus its class list
pub struct OutcomeModel<B: Backend> {
    linear: Linear<B>,
    classes: Vec<CareerOutcome>,
    device: B::Device,
}

impl<B: Backend> OutcomeModel<B> {
    pub fn new(linear: Linear<B>, classes: Vec<CareerOutcome>, device: B::Device) -> Self {
        OutcomeModel {
            linear,
            classes,
            device,
        }
    }

    /// Classes seen at training time, in tier order
    pub fn classes(&self) -> &[CareerOutcome] {
        &self.classes
    }

    /// Per-class probability rows for a batch of standardized features.
    ///
    /// Each returned row has one entry per training-time class and sums to 1.
    pub fn probabilities(&self, rows: &[[f64; FEATURE_DIM]]) -> Vec<Vec<f32>> {
        if rows.is_empty() {
            return Vec::new();
        }
        let x = batch_tensor::<B>(rows, &self.device);
        let probs = softmax(self.linear.forward(x), 1);
        let data = probs.into_data();
        let flat: &[f32] = data.as_slice().unwrap();
        flat.chunks(self.classes.len()).map(<[f32]>::to_vec).collect()
    }

    /// Hard label and labeled probability vector for one standardized row
    pub fn predict(&self, row: &[f64; FEATURE_DIM]) -> (CareerOutcome, Vec<(CareerOutcome, f32)>) {
        let probs = self.probabilities(std::slice::from_ref(row)).remove(0);
        let best = argmax(&probs);
        let labeled = self.classes.iter().copied().zip(probs).collect();
        (self.classes[best], labeled)
    }
}

/// Index of the largest value; ties resolve to the earlier (better) tier
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}
