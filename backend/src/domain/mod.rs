//! Domain core: transport-agnostic types and decision logic.
//!
//! Nothing in this module performs I/O. Inbound adapters construct domain
//! values from raw request data, ports describe the outbound edges, and the
//! gate/search logic is pure so it can be exhaustively unit tested.

pub mod auth;
pub mod error;
pub mod gate;
pub mod listing;
pub mod ports;
pub mod role;
pub mod search;
pub mod session;

pub use auth::{LoginCredentials, LoginValidationError};
pub use error::{Error, ErrorCode};
pub use gate::{GateDecision, RedirectTargets, RouteClass, RoutePolicy, RoutePrefixes};
pub use listing::{Listing, ListingSummary};
pub use role::Role;
pub use search::ListingFilter;
pub use session::{Session, UserId};
