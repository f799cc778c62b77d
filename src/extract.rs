use std::collections::BTreeMap;

use crate::data::lookup::lookup_record;
use crate::data::model::{PairTable, RecordTable, Value};
use crate::error::{PrepError, Result, Side};
use crate::features::{FeatureBuilder, FeatureVector, INCOMPARABLE};

/// One resolved pair: its feature vector and the merged attributes of both
/// records.
#[derive(Debug, Clone, PartialEq)]
pub struct PairData {
    pub features: FeatureVector,
    /// Left attributes, then right attributes (right wins on a name clash),
    /// then `id` holding the right record's id, then the injected label if
    /// any.
    pub attributes: BTreeMap<String, Value>,
}

/// Materialize feature vectors and labels for every pair, in table order.
pub fn generate_examples(
    pairs: &PairTable,
    ltable: &RecordTable,
    rtable: &RecordTable,
    label_field: &str,
) -> Result<(Vec<FeatureVector>, Vec<i64>)> {
    generate_examples_with(&FeatureBuilder::default(), pairs, ltable, rtable, label_field)
}

/// [`generate_examples`] with a configured feature builder.
pub fn generate_examples_with(
    builder: &FeatureBuilder,
    pairs: &PairTable,
    ltable: &RecordTable,
    rtable: &RecordTable,
    label_field: &str,
) -> Result<(Vec<FeatureVector>, Vec<i64>)> {
    if pairs.label_field() != label_field {
        return Err(PrepError::MissingColumn {
            column: label_field.to_string(),
        });
    }
    if pairs.is_empty() {
        log::warn!("generating examples from an empty pair table");
    }

    let mut examples = Vec::with_capacity(pairs.len());
    let mut labels = Vec::with_capacity(pairs.len());

    for pair in pairs {
        let left = lookup_record(ltable, pair.ltable_id, Side::Left)?;
        let right = lookup_record(rtable, pair.rtable_id, Side::Right)?;
        examples.push(builder.build(&left.attributes, &right.attributes)?);
        labels.push(pair.label);
    }

    let incomparable = examples.iter().filter(|f| f[0] == INCOMPARABLE).count();
    log::debug!(
        "generated {} examples ({incomparable} without comparable prices)",
        examples.len()
    );

    Ok((examples, labels))
}

/// Resolve a single pair of ids into its features and merged attributes,
/// optionally injecting a label field.
pub fn get_data_from_ids(
    left_id: i64,
    right_id: i64,
    ltable: &RecordTable,
    rtable: &RecordTable,
    label: Option<(&str, Value)>,
) -> Result<PairData> {
    get_data_from_ids_with(&FeatureBuilder::default(), left_id, right_id, ltable, rtable, label)
}

/// [`get_data_from_ids`] with a configured feature builder.
pub fn get_data_from_ids_with(
    builder: &FeatureBuilder,
    left_id: i64,
    right_id: i64,
    ltable: &RecordTable,
    rtable: &RecordTable,
    label: Option<(&str, Value)>,
) -> Result<PairData> {
    let left = lookup_record(ltable, left_id, Side::Left)?;
    let right = lookup_record(rtable, right_id, Side::Right)?;

    let features = builder.build(&left.attributes, &right.attributes)?;

    let mut attributes = left.attributes.clone();
    attributes.extend(right.attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
    attributes.insert("id".to_string(), Value::Integer(right.id));
    if let Some((field, value)) = label {
        attributes.insert(field.to_string(), value);
    }

    Ok(PairData {
        features,
        attributes,
    })
}
