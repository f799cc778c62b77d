use rand::Rng;

use crate::data::model::PairTable;
use crate::error::{PrepError, Result};

/// Split `pairs` into two disjoint tables, the first holding
/// `floor(fraction * len)` rows.
///
/// With `random` the first table's rows are drawn uniformly without
/// replacement; otherwise it takes the leading rows. Both tables list their
/// rows in ascending original position.
pub fn split_table(pairs: &PairTable, fraction: f64, random: bool) -> Result<(PairTable, PairTable)> {
    if random {
        split_table_with_rng(pairs, fraction, &mut rand::thread_rng())
    } else {
        let left_count = left_count(pairs.len(), fraction)?;
        Ok(partition(pairs, |i| i < left_count))
    }
}

/// Random split driven by the caller's generator, for reproducible splits.
pub fn split_table_with_rng<R: Rng + ?Sized>(
    pairs: &PairTable,
    fraction: f64,
    rng: &mut R,
) -> Result<(PairTable, PairTable)> {
    let total = pairs.len();
    let left_count = left_count(total, fraction)?;

    let mut chosen = vec![false; total];
    for i in rand::seq::index::sample(rng, total, left_count).into_vec() {
        chosen[i] = true;
    }

    Ok(partition(pairs, |i| chosen[i]))
}

fn left_count(total: usize, fraction: f64) -> Result<usize> {
    if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
        return Err(PrepError::InvalidArgument(format!(
            "split fraction must be within [0, 1], got {fraction}"
        )));
    }
    Ok(((fraction * total as f64).floor() as usize).min(total))
}

fn partition(pairs: &PairTable, in_left: impl Fn(usize) -> bool) -> (PairTable, PairTable) {
    let (left, right): (Vec<usize>, Vec<usize>) = (0..pairs.len()).partition(|&i| in_left(i));

    if left.is_empty() || right.is_empty() {
        log::warn!(
            "split of {} pairs leaves one side empty ({} / {})",
            pairs.len(),
            left.len(),
            right.len()
        );
    } else {
        log::debug!("split {} pairs into {} / {}", pairs.len(), left.len(), right.len());
    }

    (pairs.select(&left), pairs.select(&right))
}
