//! `pairprep`: dataset preparation for entity matching.
//!
//! Takes a left and a right record table plus labeled candidate pairs and
//! produces what a matching model trains on: per-pair feature vectors and
//! labels, train/validation splits, and record tables trimmed to the rows a
//! pair set actually references.
//!
//! Pure, in-memory crate: callers own file I/O and the model itself.

pub mod config;
pub mod data;
pub mod error;
pub mod extract;
pub mod features;
pub mod split;
pub mod trim;

pub use config::PrepConfig;
pub use data::model::{LabeledPair, PairTable, Record, RecordTable, Value};
pub use error::{PrepError, Result, Side};
pub use extract::{generate_examples, get_data_from_ids, PairData};
pub use features::{extrapolate_attributes, treat_attr_as_null, FeatureBuilder, FeatureVector};
pub use split::{split_table, split_table_with_rng};
pub use trim::{trim_tables, IdMap, TrimmedTables};
