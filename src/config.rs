use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::data::model::{PairTable, DEFAULT_LABEL_FIELD};
use crate::error::PrepError;
use crate::features::{FeatureBuilder, NullPolicy, DEFAULT_NULL_MARKERS, DEFAULT_PRICE_COLUMN};
use crate::split::{split_table, split_table_with_rng};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Preparation settings. Every field has a default, so an empty TOML
/// document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    /// Class column of the labeled pair table.
    pub label_field: String,
    pub features: FeatureConfig,
    pub split: SplitConfig,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            label_field: DEFAULT_LABEL_FIELD.to_string(),
            features: FeatureConfig::default(),
            split: SplitConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Features
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub price_column: String,
    /// String forms treated as missing values (case-sensitive).
    pub null_markers: Vec<String>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            price_column: DEFAULT_PRICE_COLUMN.to_string(),
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Train/validation split
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Share of pairs that go to the first (training) table.
    pub fraction: f64,
    pub random: bool,
    /// Fixed seed for reproducible random splits. Ignored when `random` is
    /// false.
    pub seed: Option<u64>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            fraction: 0.8,
            random: true,
            seed: None,
        }
    }
}

impl PrepConfig {
    pub fn from_toml(input: &str) -> Result<Self, PrepError> {
        let config: PrepConfig =
            toml::from_str(input).map_err(|e| PrepError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PrepError> {
        if self.label_field.trim().is_empty() {
            return Err(PrepError::ConfigValidation(
                "label_field must not be empty".into(),
            ));
        }

        if self.features.price_column.trim().is_empty() {
            return Err(PrepError::ConfigValidation(
                "features.price_column must not be empty".into(),
            ));
        }

        let fraction = self.split.fraction;
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(PrepError::ConfigValidation(format!(
                "split.fraction must be within [0, 1], got {fraction}"
            )));
        }

        Ok(())
    }

    pub fn feature_builder(&self) -> FeatureBuilder {
        FeatureBuilder::new(
            self.features.price_column.clone(),
            NullPolicy::new(self.features.null_markers.iter().cloned()),
        )
    }

    /// Split `pairs` with the configured fraction, mode and seed.
    pub fn split(&self, pairs: &PairTable) -> Result<(PairTable, PairTable), PrepError> {
        match (self.split.random, self.split.seed) {
            (true, Some(seed)) => {
                split_table_with_rng(pairs, self.split.fraction, &mut StdRng::seed_from_u64(seed))
            }
            (random, _) => split_table(pairs, self.split.fraction, random),
        }
    }
}
