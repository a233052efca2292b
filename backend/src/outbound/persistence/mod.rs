//! PostgreSQL persistence adapters using Diesel ORM.

pub mod diesel_listing_search;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_listing_search::DieselListingSearch;
pub use pool::{DbPool, PoolConfig, PoolError, build_pool};
