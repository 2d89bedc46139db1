//! Weather relay backend.
//!
//! Accepts a city name over HTTP, fetches current conditions from the
//! weatherstack API, normalizes the response into a stable schema, caches it
//! for a fixed TTL, and rate-limits lookups per client.

pub mod cache;
pub mod config;
pub mod error;
pub mod provider;
pub mod ratelimit;
pub mod server;
pub mod weather;
