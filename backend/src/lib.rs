//! Roomlet backend library modules.
//!
//! Server-side core of the Roomlet student-housing marketplace: request
//! gating (role-based access control), listing search, and the signed
//! session credential shared by both.

pub mod domain;
pub mod doc;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod token;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Access-control middleware applied to every inbound request.
pub use middleware::RequestGate;
