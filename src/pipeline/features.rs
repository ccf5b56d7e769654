//! Feature extraction and preprocessing
//!
//! The imputer and standardizer are fit on the training split only; the
//! frozen parameters are then applied to validation and inference rows so no
//! statistic leaks across the split.

use crate::SeasonRecord;

/// Features used by the prediction pipeline, one vector per season row
pub const FEATURE_NAMES: [&str; 7] = ["mins", "fgm", "fga", "fgp", "fgm3", "fga3", "fgp3"];

pub const FEATURE_DIM: usize = FEATURE_NAMES.len();

/// Extract the raw feature vector; missing cells become NaN for imputation
pub fn feature_row(record: &SeasonRecord) -> [f64; FEATURE_DIM] {
    let v = |x: Option<f64>| x.unwrap_or(f64::NAN);
    [
        v(record.mins),
        v(record.fgm),
        v(record.fga),
        v(record.fgp),
        v(record.fgm3),
        v(record.fga3),
        v(record.fgp3),
    ]
}

/// Replaces missing values with the per-feature mean of the training split
#[derive(Debug, Clone)]
pub struct MeanImputer {
    means: [f64; FEATURE_DIM],
}

impl MeanImputer {
    /// Fit per-feature means over the present values of the training rows
    pub fn fit(rows: &[[f64; FEATURE_DIM]]) -> Self {
        let mut means = [0.0; FEATURE_DIM];
        for (j, mean) in means.iter_mut().enumerate() {
            let mut sum = 0.0;
            let mut count = 0usize;
            for row in rows {
                if !row[j].is_nan() {
                    sum += row[j];
                    count += 1;
                }
            }
            if count > 0 {
                *mean = sum / count as f64;
            }
        }
        MeanImputer { means }
    }

    /// Apply the frozen means to one row
    pub fn transform(&self, row: &[f64; FEATURE_DIM]) -> [f64; FEATURE_DIM] {
        let mut out = *row;
        for (j, value) in out.iter_mut().enumerate() {
            if value.is_nan() {
                *value = self.means[j];
            }
        }
        out
    }

    pub fn means(&self) -> &[f64; FEATURE_DIM] {
        &self.means
    }
}

/// Z-score standardization with parameters from the training split
#[derive(Debug, Clone)]
pub struct Standardizer {
    means: [f64; FEATURE_DIM],
    stds: [f64; FEATURE_DIM],
}

impl Standardizer {
    /// Fit mean and standard deviation per feature on imputed training rows
    pub fn fit(rows: &[[f64; FEATURE_DIM]]) -> Self {
        let n = rows.len().max(1) as f64;
        let mut means = [0.0; FEATURE_DIM];
        for row in rows {
            for j in 0..FEATURE_DIM {
                means[j] += row[j];
            }
        }
        for mean in means.iter_mut() {
            *mean /= n;
        }

        let mut stds = [0.0; FEATURE_DIM];
        for row in rows {
            for j in 0..FEATURE_DIM {
                stds[j] += (row[j] - means[j]).powi(2);
            }
        }
        for std in stds.iter_mut() {
            // Floor the deviation so constant features stay finite
            *std = (*std / n).sqrt().max(1e-8);
        }

        Standardizer { means, stds }
    }

    /// Apply the frozen parameters to one row
    pub fn transform(&self, row: &[f64; FEATURE_DIM]) -> [f64; FEATURE_DIM] {
        let mut out = [0.0; FEATURE_DIM];
        for j in 0..FEATURE_DIM {
            out[j] = (row[j] - self.means[j]) / self.stds[j];
        }
        out
    }

    pub fn means(&self) -> &[f64; FEATURE_DIM] {
        &self.means
    }

    pub fn stds(&self) -> &[f64; FEATURE_DIM] {
        &self.stds
    }
}
