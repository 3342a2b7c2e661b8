/// Data layer: core types, loading, filtering and chart aggregations.
///
/// Architecture:
/// ```text
///  games.csv / games.tsv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + clean → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, distinct years/genres/ratings
///   └──────────┘
///        │  + FilterCriteria
///        ▼
///   ┌──────────┐
///   │  filter   │  AND-ed predicates → FilteredView (+ games_released)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  count, area series, scatter points, year options
///   └───────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
