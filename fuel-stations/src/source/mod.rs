//! Fuel price feed from the Ministry's REST service.
//!
//! A single GET returns every station in Spain with its current prices.
//! The origin is slow and occasionally refuses connections, so the request
//! is wrapped in a bounded retry loop with a fixed delay between attempts.

mod client;
mod error;
mod retry;

pub use client::{FetchConfig, HttpSource};
pub use error::FetchError;
pub use retry::{DocumentSource, Fetcher};
