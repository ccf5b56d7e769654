//! Training and inference for the outcome-prediction pipeline
//!
//! Labels the historical pool with the outcome classifier, fits the imputer,
//! scaler, and softmax regression on a shuffled training split, and scores
//! the post-cutoff pool with the frozen transforms.

use burn::nn::{Linear, LinearConfig};
use burn::optim::{GradientsParams, Optimizer, SgdConfig};
use burn::tensor::activation::log_softmax;
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::{ElementConversion, Tensor, TensorData};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data::PlayerSeasonIndex;
use crate::outcome::classify;
use crate::pipeline::features::{feature_row, MeanImputer, Standardizer, FEATURE_DIM};
use crate::pipeline::model::{argmax, batch_tensor, OutcomeModel};
use crate::{
    CareerOutcome, HoopsError, OutcomeConfig, PlayerId, PredictionResult, Result, TrainingConfig,
};

/// Fewest labeled examples we will attempt to split and fit
const MIN_EXAMPLES: usize = 10;

/// One labeled season row from a training-eligible player.
///
/// Granularity is per season row: a player contributes one example per
/// season, all sharing the career label.
#[derive(Debug, Clone)]
pub struct TrainingExample {
    pub player_id: PlayerId,
    pub features: [f64; FEATURE_DIM],
    pub label: CareerOutcome,
}

/// An unlabeled season row from the post-cutoff pool
#[derive(Debug, Clone)]
pub struct PoolRow {
    pub player_id: PlayerId,
    pub player: String,
    pub features: [f64; FEATURE_DIM],
}

/// Label every player drafted at or before the cutoff, one example per
/// season row
pub fn training_examples(
    index: &PlayerSeasonIndex,
    outcome_config: &OutcomeConfig,
    training_config: &TrainingConfig,
) -> Vec<TrainingExample> {
    let mut examples = Vec::new();
    let mut players: Vec<PlayerId> = index
        .players()
        .filter(|(_, rows)| {
            rows.first()
                .is_some_and(|r| r.stats.draftyear <= training_config.cutoff_draft_year)
        })
        .map(|(id, _)| id)
        .collect();
    players.sort();

    for player in players {
        let rows = index.seasons(player);
        let draft_year = rows[0].stats.draftyear;
        let label = classify(draft_year, rows, outcome_config);
        for row in rows {
            examples.push(TrainingExample {
                player_id: player,
                features: feature_row(&row.stats),
                label,
            });
        }
    }
    examples
}

/// Season rows for players drafted inside the prediction range, in player
/// id order
pub fn prediction_pool(
    index: &PlayerSeasonIndex,
    training_config: &TrainingConfig,
) -> Vec<PoolRow> {
    let mut players: Vec<PlayerId> = index
        .players()
        .filter(|(_, rows)| {
            rows.first().is_some_and(|r| {
                r.stats.draftyear >= training_config.predict_draft_start
                    && r.stats.draftyear <= training_config.predict_draft_end
            })
        })
        .map(|(id, _)| id)
        .collect();
    players.sort();

    let mut pool = Vec::new();
    for player in players {
        for row in index.seasons(player) {
            pool.push(PoolRow {
                player_id: player,
                player: row.stats.player.clone(),
                features: feature_row(&row.stats),
            });
        }
    }
    pool
}

/// Frozen imputer + scaler + model, plus the held-out accuracy observed
/// while fitting
pub struct FittedPipeline<B: AutodiffBackend> {
    imputer: MeanImputer,
    scaler: Standardizer,
    model: OutcomeModel<B>,
    pub validation_accuracy: f64,
}

impl<B: AutodiffBackend> FittedPipeline<B> {
    /// Classes seen at training time, in tier order
    pub fn classes(&self) -> &[CareerOutcome] {
        self.model.classes()
    }

    /// Score one raw feature row with the frozen transforms
    pub fn predict_row(
        &self,
        features: &[f64; FEATURE_DIM],
    ) -> (CareerOutcome, Vec<(CareerOutcome, f32)>) {
        let scaled = self.scaler.transform(&self.imputer.transform(features));
        self.model.predict(&scaled)
    }

    /// Score the post-cutoff pool, keeping the first occurrence per player
    pub fn predict_pool(&self, pool: &[PoolRow]) -> Vec<PredictionResult> {
        let mut seen = std::collections::HashSet::new();
        let mut results = Vec::new();
        for row in pool {
            if !seen.insert(row.player_id) {
                continue;
            }
            let (outcome, probabilities) = self.predict_row(&row.features);
            results.push(PredictionResult {
                player_id: row.player_id,
                player: row.player.clone(),
                outcome,
                probabilities,
            });
        }
        results
    }
}

/// Fit the full pipeline on labeled examples.
///
/// Holds out the configured fraction for validation (seeded shuffle), fits
/// the imputer and scaler on the training split only, trains the softmax
/// regression full-batch, and reports held-out accuracy.
pub fn fit<B: AutodiffBackend>(
    examples: &[TrainingExample],
    config: &TrainingConfig,
    device: &B::Device,
) -> Result<FittedPipeline<B>> {
    if examples.len() < MIN_EXAMPLES {
        return Err(HoopsError::InsufficientData {
            have: examples.len(),
            need: MIN_EXAMPLES,
        });
    }

    // Classes actually present in the labels, best tier first
    let classes: Vec<CareerOutcome> = CareerOutcome::ALL
        .iter()
        .copied()
        .filter(|c| examples.iter().any(|e| e.label == *c))
        .collect();

    // Shuffled train/validation split
    let mut indices: Vec<usize> = (0..examples.len()).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    indices.shuffle(&mut rng);
    let n_val = ((examples.len() as f64 * config.holdout_fraction).round() as usize)
        .clamp(1, examples.len() - 1);
    let (val_idx, train_idx) = indices.split_at(n_val);

    // Preprocessing fit on the training split only
    let raw_train: Vec<[f64; FEATURE_DIM]> =
        train_idx.iter().map(|&i| examples[i].features).collect();
    let imputer = MeanImputer::fit(&raw_train);
    let imputed_train: Vec<[f64; FEATURE_DIM]> =
        raw_train.iter().map(|r| imputer.transform(r)).collect();
    let scaler = Standardizer::fit(&imputed_train);
    let x_train: Vec<[f64; FEATURE_DIM]> =
        imputed_train.iter().map(|r| scaler.transform(r)).collect();

    let x_val: Vec<[f64; FEATURE_DIM]> = val_idx
        .iter()
        .map(|&i| scaler.transform(&imputer.transform(&examples[i].features)))
        .collect();

    let class_index = |label: CareerOutcome| {
        classes
            .iter()
            .position(|c| *c == label)
            .expect("label missing from class list")
    };
    let y_train: Vec<usize> = train_idx
        .iter()
        .map(|&i| class_index(examples[i].label))
        .collect();
    let y_val: Vec<usize> = val_idx
        .iter()
        .map(|&i| class_index(examples[i].label))
        .collect();

    log::info!(
        "Fitting on {} examples ({} train / {} validation, {} classes)",
        examples.len(),
        train_idx.len(),
        val_idx.len(),
        classes.len()
    );

    B::seed(config.seed);
    let linear = train_linear::<B>(&x_train, &y_train, classes.len(), config, device);
    let model = OutcomeModel::new(linear, classes, device.clone());

    // Held-out accuracy with the frozen transforms
    let correct = model
        .probabilities(&x_val)
        .iter()
        .zip(&y_val)
        .filter(|(probs, target)| argmax(probs) == **target)
        .count();
    let validation_accuracy = correct as f64 / y_val.len() as f64;

    Ok(FittedPipeline {
        imputer,
        scaler,
        model,
        validation_accuracy,
    })
}

/// Full-batch gradient descent on softmax cross-entropy
fn train_linear<B: AutodiffBackend>(
    x_train: &[[f64; FEATURE_DIM]],
    y_train: &[usize],
    n_classes: usize,
    config: &TrainingConfig,
    device: &B::Device,
) -> Linear<B> {
    let mut model = LinearConfig::new(FEATURE_DIM, n_classes).init(device);
    let mut optimizer = SgdConfig::new().init();

    let n = x_train.len();
    let x = batch_tensor::<B>(x_train, device);

    let mut one_hot = vec![0.0f32; n * n_classes];
    for (i, &class) in y_train.iter().enumerate() {
        one_hot[i * n_classes + class] = 1.0;
    }
    let targets: Tensor<B, 2> =
        Tensor::from_data(TensorData::new(one_hot, [n, n_classes]), device);

    for epoch in 0..config.epochs {
        let logits = model.forward(x.clone());
        let log_probs = log_softmax(logits, 1);
        let loss = (targets.clone() * log_probs).sum_dim(1).neg().mean();

        if epoch % 50 == 0 || epoch == config.epochs - 1 {
            let loss_val: f32 = loss.clone().into_scalar().elem();
            log::debug!("Epoch {}/{}: loss={:.4}", epoch + 1, config.epochs, loss_val);
        }

        let grads = loss.backward();
        let grads_params = GradientsParams::from_grads(grads, &model);
        model = optimizer.step(config.learning_rate, model, grads_params);
    }

    model
}
