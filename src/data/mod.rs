/// Data layer: core types, loading, filtering and statistics.
///
/// Architecture:
/// ```text
///  archive (3).zip
///        │  Unemployment_Rate_upto_11_2020.csv
///        ▼
///   ┌──────────┐
///   │  loader   │  unzip → parse → trim → validate → LoadReport
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ UnemploymentTable │  Vec<UnemploymentRecord>, region index
///   └───────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region equality → visible indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  summary, trend, histogram, density
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
