use std::collections::{BTreeMap, BTreeSet};

use crate::data::model::Value;
use crate::error::{PrepError, Result};

/// Number of features produced per record pair.
pub const FEATURE_COUNT: usize = 1;

/// Numeric summary of one left/right record pair.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Feature value emitted when an attribute cannot be compared.
pub const INCOMPARABLE: f64 = -1.0;

pub const DEFAULT_PRICE_COLUMN: &str = "price";

/// String forms that mark a value as missing.
pub const DEFAULT_NULL_MARKERS: [&str; 3] = ["", "- na -", "nan"];

// ---------------------------------------------------------------------------
// Null policy
// ---------------------------------------------------------------------------

/// Decides which attribute values count as missing.
///
/// `Value::Null` is always missing. Any other value is missing when its
/// string form is one of the markers (compared case-sensitively).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullPolicy {
    markers: BTreeSet<String>,
}

impl Default for NullPolicy {
    fn default() -> Self {
        NullPolicy::new(DEFAULT_NULL_MARKERS)
    }
}

impl NullPolicy {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NullPolicy {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_null(&self, value: &Value) -> bool {
        matches!(value, Value::Null) || self.markers.contains(&value.to_string())
    }

    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(String::as_str)
    }
}

/// Null check with the default markers.
pub fn treat_attr_as_null(value: &Value) -> bool {
    NullPolicy::default().is_null(value)
}

// ---------------------------------------------------------------------------
// Feature builder
// ---------------------------------------------------------------------------

/// Builds a [`FeatureVector`] from two records' attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBuilder {
    price_column: String,
    nulls: NullPolicy,
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        FeatureBuilder::new(DEFAULT_PRICE_COLUMN, NullPolicy::default())
    }
}

impl FeatureBuilder {
    pub fn new(price_column: impl Into<String>, nulls: NullPolicy) -> Self {
        FeatureBuilder {
            price_column: price_column.into(),
            nulls,
        }
    }

    pub fn price_column(&self) -> &str {
        &self.price_column
    }

    pub fn null_policy(&self) -> &NullPolicy {
        &self.nulls
    }

    /// Price difference ratio of the pair, or [`INCOMPARABLE`] when either
    /// price is missing.
    pub fn build(
        &self,
        left: &BTreeMap<String, Value>,
        right: &BTreeMap<String, Value>,
    ) -> Result<FeatureVector> {
        let left_price = self.attribute(left)?;
        let right_price = self.attribute(right)?;

        if self.nulls.is_null(left_price) || self.nulls.is_null(right_price) {
            return Ok([INCOMPARABLE]);
        }

        let l = self.numeric(left_price)?;
        let r = self.numeric(right_price)?;
        Ok([price_difference(l, r)])
    }

    fn attribute<'a>(&self, record: &'a BTreeMap<String, Value>) -> Result<&'a Value> {
        record
            .get(&self.price_column)
            .ok_or_else(|| PrepError::MissingAttribute {
                column: self.price_column.clone(),
            })
    }

    fn numeric(&self, value: &Value) -> Result<f64> {
        value.as_f64().ok_or_else(|| PrepError::NonNumericAttribute {
            column: self.price_column.clone(),
            value: value.to_string(),
        })
    }
}

/// `|l - r|` relative to the mean of the two prices.
///
/// A zero mean gives 0.0 for equal prices and [`INCOMPARABLE`] otherwise.
fn price_difference(l: f64, r: f64) -> f64 {
    let diff = (l - r).abs();
    let mean = (l + r) / 2.0;
    if mean == 0.0 {
        if diff == 0.0 {
            0.0
        } else {
            INCOMPARABLE
        }
    } else {
        diff / mean
    }
}

/// Feature vector for a record pair using the default price column and
/// null markers.
pub fn extrapolate_attributes(
    left: &BTreeMap<String, Value>,
    right: &BTreeMap<String, Value>,
) -> Result<FeatureVector> {
    FeatureBuilder::default().build(left, right)
}
