// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod events;
pub mod finance;
pub mod formatting;
pub mod input;
pub mod inventory;
pub mod leads;
pub mod ordering;
pub mod refine;
pub mod storefront;

// Re-export commonly used types
pub use crate::errors::{Error, Result};

pub use crate::inventory::{load_inventory, Vehicle, VehicleId, VehicleStatus};

pub use crate::refine::{
    FilterChange, FilterState, RangeBounds, RangeControl, ResultSet, SortKey,
};

pub use crate::finance::{estimate_monthly, FinancingForm, LoanEstimate};

pub use crate::events::{Event, EventBus, EventKind};

pub use crate::storefront::Storefront;
