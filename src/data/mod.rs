/// Data layer: typed tables, id lookup, and JSON interop.
///
/// Architecture:
/// ```text
///  records-oriented JSON (caller-owned I/O)
///        │
///        ▼
///   ┌──────────┐
///   │   json    │  serde_json::Value → RecordTable / PairTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────────┐
///   │ RecordTable/PairTable │  sorted Vec<Record>, Vec<LabeledPair>
///   └──────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  lookup   │  id → row position (exact match)
///   └──────────┘
/// ```

pub mod json;
pub mod lookup;
pub mod model;
