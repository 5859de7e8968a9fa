//! Domain models for the exchange rates service.

pub mod rate;

pub use rate::{CurrencyId, CurrencyRate, NewCurrencyRate, RateId, insertion_time};
