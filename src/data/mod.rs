/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Series  (strips trailing '%')
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Series  │  Vec<DataPoint>, ascending unique years, full average
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
