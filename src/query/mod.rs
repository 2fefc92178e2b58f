//! Pure views over a listing snapshot. Nothing here mutates its input or
//! touches storage.

pub mod filter;
pub mod group;
pub mod search;
pub mod sort;
pub mod tags;

pub use filter::{apply_filters, matches, FilterCriteria, NumericRange};
pub use group::{group_by_location, unique_values, TextField};
pub use search::search;
pub use sort::{by_date, by_popularity, by_price, popularity_score, sort, SortKey};
pub use tags::{derive_tags, unique_id, with_derived_tags};
