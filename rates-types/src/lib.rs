//! # Rates Types
//!
//! Domain types and port traits for the official exchange rates service.
//! This crate has ZERO external IO dependencies - only data structures
//! and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyRate, NewCurrencyRate)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for the HTTP API and the upstream feed
//! - `error/` - Repository, source and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CurrencyId, CurrencyRate, NewCurrencyRate, RateId, insertion_time};
pub use dto::*;
pub use error::{AppError, IngestError, RepoError, SourceError};
pub use ports::{PAGE_SIZE, RateReader, RateSource, RateWriter, page_offset};
