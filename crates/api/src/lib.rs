//! HTTP API: operator-facing control surface for catalog maintenance.

pub mod app;
pub mod authz;
pub mod context;
pub mod middleware;
