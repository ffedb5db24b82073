//! Repositories: stateless query modules, one per aggregate.

pub mod featured_repo;
pub mod listing_repo;
pub mod lookup_repo;
pub mod photo_repo;
pub mod search_log_repo;

pub use featured_repo::FeaturedRepo;
pub use listing_repo::{BrowseQuery, ListingRepo};
pub use lookup_repo::LookupRepo;
pub use photo_repo::PhotoRepo;
pub use search_log_repo::SearchLogRepo;
