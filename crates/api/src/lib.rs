//! HTTP surface of the partner gateway: router, gate middleware, and
//! request/response mapping.

pub mod app;
pub mod context;
pub mod errors;
pub mod middleware;
