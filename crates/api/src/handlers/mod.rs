//! Request handlers, grouped by resource.

pub mod listings;
pub mod lookups;
pub mod photos;
pub mod reports;
