use crate::error::{PrepError, Result, Side};

use super::model::{Record, RecordTable};

/// Leftmost row position whose id is `>= id` (bisect-left).
///
/// Equals `table.len()` when every id is smaller. The position only names the
/// requested record when [`lookup_index`] confirms it.
pub fn insertion_point(table: &RecordTable, id: i64) -> usize {
    table.records().partition_point(|r| r.id < id)
}

/// Row position of the record with exactly this id.
pub fn lookup_index(table: &RecordTable, id: i64, side: Side) -> Result<usize> {
    find(table, id)
        .map(|(index, _)| index)
        .ok_or(PrepError::RecordNotFound { side, id })
}

/// The record with exactly this id.
pub fn lookup_record(table: &RecordTable, id: i64, side: Side) -> Result<&Record> {
    find(table, id)
        .map(|(_, record)| record)
        .ok_or(PrepError::RecordNotFound { side, id })
}

fn find(table: &RecordTable, id: i64) -> Option<(usize, &Record)> {
    let index = insertion_point(table, id);
    table
        .row(index)
        .filter(|record| record.id == id)
        .map(|record| (index, record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(ids: &[i64]) -> RecordTable {
        RecordTable::new(ids.iter().map(|&id| Record::new(id)).collect()).unwrap()
    }

    #[test]
    fn insertion_point_is_bisect_left() {
        let t = table(&[2, 4, 6]);
        assert_eq!(insertion_point(&t, 1), 0);
        assert_eq!(insertion_point(&t, 2), 0);
        assert_eq!(insertion_point(&t, 5), 2);
        assert_eq!(insertion_point(&t, 9), 3);
    }

    #[test]
    fn exact_ids_resolve() {
        let t = table(&[10, 20, 30]);
        assert_eq!(lookup_index(&t, 20, Side::Left).unwrap(), 1);
        assert_eq!(lookup_record(&t, 30, Side::Right).unwrap().id, 30);
        assert_eq!(lookup_record(&t, 10, Side::Left).unwrap().id, 10);
    }

    #[test]
    fn absent_id_is_an_error_not_a_neighbour() {
        let t = table(&[10, 20, 30]);
        for missing in [5, 15, 35] {
            match lookup_index(&t, missing, Side::Right) {
                Err(PrepError::RecordNotFound { side, id }) => {
                    assert_eq!(side, Side::Right);
                    assert_eq!(id, missing);
                }
                other => panic!("expected RecordNotFound, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_table_finds_nothing() {
        let t = table(&[]);
        assert!(lookup_record(&t, 0, Side::Left).is_err());
    }
}
