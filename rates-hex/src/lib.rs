//! # Rates Hex
//!
//! Application services and HTTP adapter for the exchange rates service.
//!
//! ## Architecture
//!
//! - `ingestion/` - Scheduled fetch-and-store loop (write path)
//! - `service/` - Query service over the rate store (read path)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! Both services are generic over narrow ports: ingestion needs only
//! `RateWriter + RateSource`, queries need only `RateReader`.

pub mod inbound;
pub mod ingestion;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod ingestion_tests;

pub use ingestion::{INGESTION_INTERVAL, IngestionService};
pub use service::RateQueryService;
