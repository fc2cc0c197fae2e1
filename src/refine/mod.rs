//! Filtering, sorting and paging over the inventory.

pub mod filter;
pub mod range;
pub mod results;
pub mod sort;

pub use filter::{matches, FilterState, MileageStep};
pub use range::{range_label, BoundFormat, RangeBounds, RangeControl, RangeDomain, RangePreset};
pub use results::{FilterChange, ResultSet, DEFAULT_PAGE_SIZE};
pub use sort::SortKey;
