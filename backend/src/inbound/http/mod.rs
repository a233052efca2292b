//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod listings;
pub mod sessions;
pub mod state;

pub use error::ApiResult;
pub use state::HttpState;
