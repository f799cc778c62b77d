use std::collections::{BTreeMap, BTreeSet};

use crate::data::lookup::lookup_record;
use crate::data::model::{LabeledPair, PairTable, Record, RecordTable};
use crate::error::{PrepError, Result, Side};

// ---------------------------------------------------------------------------
// Id map
// ---------------------------------------------------------------------------

/// Bijection between the original ids of one side and the dense ids
/// `0..len` assigned by trimming, in ascending original order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdMap {
    originals: Vec<i64>,
    dense: BTreeMap<i64, i64>,
}

impl IdMap {
    fn from_sorted(ids: BTreeSet<i64>) -> Self {
        let originals: Vec<i64> = ids.into_iter().collect();
        let dense = originals
            .iter()
            .enumerate()
            .map(|(new, &old)| (old, new as i64))
            .collect();
        IdMap { originals, dense }
    }

    /// Dense id assigned to an original id.
    pub fn new_id(&self, original: i64) -> Option<i64> {
        self.dense.get(&original).copied()
    }

    /// Original id behind a dense id.
    pub fn original_id(&self, new: i64) -> Option<i64> {
        usize::try_from(new)
            .ok()
            .and_then(|i| self.originals.get(i))
            .copied()
    }

    /// Original ids in dense order.
    pub fn originals(&self) -> &[i64] {
        &self.originals
    }

    /// Number of ids kept on this side.
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    /// Whether no id was kept on this side.
    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Trimming
// ---------------------------------------------------------------------------

/// Result of [`trim_tables`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrimmedTables {
    pub pairs: PairTable,
    pub ltable: RecordTable,
    pub rtable: RecordTable,
    pub left_ids: IdMap,
    pub right_ids: IdMap,
}

impl TrimmedTables {
    /// Drop the id maps and keep `(pairs, ltable, rtable)`.
    pub fn into_tables(self) -> (PairTable, RecordTable, RecordTable) {
        (self.pairs, self.ltable, self.rtable)
    }
}

/// Keep only the records `pairs` references and renumber ids densely.
///
/// Pair ids are resolved as record `id` values, not row positions. The
/// trimmed tables hold the referenced records in ascending original id
/// order with `id` rewritten to `0..len`, so a new id is both the record's
/// key and its row position. Pair rows keep their order and labels.
pub fn trim_tables(
    pairs: &PairTable,
    ltable: &RecordTable,
    rtable: &RecordTable,
) -> Result<TrimmedTables> {
    let left_ids = IdMap::from_sorted(pairs.distinct_ids(Side::Left));
    let right_ids = IdMap::from_sorted(pairs.distinct_ids(Side::Right));

    let new_ltable = keep_records(ltable, &left_ids, Side::Left)?;
    let new_rtable = keep_records(rtable, &right_ids, Side::Right)?;

    let rows = pairs
        .iter()
        .map(|p| {
            Ok(LabeledPair {
                ltable_id: remap(&left_ids, p.ltable_id, Side::Left)?,
                rtable_id: remap(&right_ids, p.rtable_id, Side::Right)?,
                label: p.label,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "trimmed left table {} -> {}, right table {} -> {}",
        ltable.len(),
        new_ltable.len(),
        rtable.len(),
        new_rtable.len()
    );

    Ok(TrimmedTables {
        pairs: PairTable::new(pairs.label_field(), rows),
        ltable: new_ltable,
        rtable: new_rtable,
        left_ids,
        right_ids,
    })
}

fn keep_records(table: &RecordTable, ids: &IdMap, side: Side) -> Result<RecordTable> {
    let records = ids
        .originals()
        .iter()
        .enumerate()
        .map(|(new, &old)| {
            let record = lookup_record(table, old, side)?;
            Ok(Record {
                id: new as i64,
                attributes: record.attributes.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    RecordTable::new(records)
}

fn remap(ids: &IdMap, id: i64, side: Side) -> Result<i64> {
    ids.new_id(id)
        .ok_or(PrepError::RecordNotFound { side, id })
}
