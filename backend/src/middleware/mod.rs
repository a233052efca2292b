//! Request middleware.
//!
//! Purpose: run the access-control gate on every inbound request before any
//! handler executes.

pub mod gate;

pub use gate::RequestGate;
