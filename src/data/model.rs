use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Side};

/// Label column name used when a pair table does not specify one.
pub const DEFAULT_LABEL_FIELD: &str = "label";

// ---------------------------------------------------------------------------
// Value – a single attribute cell
// ---------------------------------------------------------------------------

/// A dynamically-typed attribute value mirroring common Pandas dtypes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

// -- Floats compare by bit pattern so a NaN cell equals itself --

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

/// Renders the way Pandas' `str()` would for the cases the null policy
/// cares about: a NaN float prints as `nan`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) if v.is_nan() => write!(f, "nan"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Interpret the value as an `f64` if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

// ---------------------------------------------------------------------------
// Record – one row of a left/right table
// ---------------------------------------------------------------------------

/// A single entity record (one row of the source DataFrame).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    /// Attribute columns: column_name → value. Never contains `id`.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl Record {
    /// A record with no attributes.
    pub fn new(id: i64) -> Self {
        Record {
            id,
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(column.into(), value.into());
        self
    }

    /// Attribute value by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.attributes.get(column)
    }
}

// ---------------------------------------------------------------------------
// RecordTable – a complete left or right table
// ---------------------------------------------------------------------------

/// Records sorted strictly ascending by `id`, plus the union of their
/// attribute column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Record>", into = "Vec<Record>")]
pub struct RecordTable {
    records: Vec<Record>,
    column_names: Vec<String>,
}

impl RecordTable {
    /// Build a table, rejecting ids that are not strictly ascending and
    /// records that carry `id` as an attribute.
    pub fn new(records: Vec<Record>) -> Result<Self, PrepError> {
        if let Some(row) = records.iter().position(|r| r.attributes.contains_key("id")) {
            return Err(PrepError::InvalidRecord {
                row,
                reason: "'id' must not also be an attribute".into(),
            });
        }

        for (position, pair) in records.windows(2).enumerate() {
            if pair[1].id <= pair[0].id {
                return Err(PrepError::UnsortedIds {
                    position: position + 1,
                    previous: pair[0].id,
                    id: pair[1].id,
                });
            }
        }

        let column_names: BTreeSet<String> = records
            .iter()
            .flat_map(|r| r.attributes.keys().cloned())
            .collect();

        Ok(RecordTable {
            records,
            column_names: column_names.into_iter().collect(),
        })
    }

    /// All records, in ascending id order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Sorted attribute column names (excludes `id`).
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Record at a row position.
    pub fn row(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Record ids in row order.
    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.records.iter().map(|r| r.id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TryFrom<Vec<Record>> for RecordTable {
    type Error = PrepError;

    fn try_from(records: Vec<Record>) -> Result<Self, Self::Error> {
        RecordTable::new(records)
    }
}

impl From<RecordTable> for Vec<Record> {
    fn from(table: RecordTable) -> Self {
        table.records
    }
}

// ---------------------------------------------------------------------------
// PairTable – labeled candidate pairs
// ---------------------------------------------------------------------------

/// One labeled candidate pair: (left id, right id, class label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabeledPair {
    pub ltable_id: i64,
    pub rtable_id: i64,
    pub label: i64,
}

impl LabeledPair {
    pub fn new(ltable_id: i64, rtable_id: i64, label: i64) -> Self {
        LabeledPair {
            ltable_id,
            rtable_id,
            label,
        }
    }

    pub fn id(&self, side: Side) -> i64 {
        match side {
            Side::Left => self.ltable_id,
            Side::Right => self.rtable_id,
        }
    }
}

/// Labeled pairs in insertion order. Row order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairTable {
    label_field: String,
    rows: Vec<LabeledPair>,
}

impl PairTable {
    /// Pairs labeled from the `label_field` column.
    pub fn new(label_field: impl Into<String>, rows: Vec<LabeledPair>) -> Self {
        PairTable {
            label_field: label_field.into(),
            rows,
        }
    }

    /// Name of the class column the labels came from.
    pub fn label_field(&self) -> &str {
        &self.label_field
    }

    /// Pairs in insertion order.
    pub fn rows(&self) -> &[LabeledPair] {
        &self.rows
    }

    /// Iterate the pairs in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LabeledPair> {
        self.rows.iter()
    }

    /// Sorted set of distinct ids referenced on one side.
    pub fn distinct_ids(&self, side: Side) -> BTreeSet<i64> {
        self.rows.iter().map(|p| p.id(side)).collect()
    }

    /// A new table with the rows at `indices`, in the order given.
    pub fn select(&self, indices: &[usize]) -> PairTable {
        PairTable {
            label_field: self.label_field.clone(),
            rows: indices.iter().filter_map(|&i| self.rows.get(i).copied()).collect(),
        }
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no pairs.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a PairTable {
    type Item = &'a LabeledPair;
    type IntoIter = std::slice::Iter<'a, LabeledPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
