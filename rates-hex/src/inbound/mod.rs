//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the query service.

pub(crate) mod handlers;
mod server;

pub use server::HttpServer;
