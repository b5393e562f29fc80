//! Shared domain types for the restaurant ordering API.
//!
//! Used by `resto-server` (the HTTP API) and `resto-cli` (operator tasks).
//! Nothing here performs I/O. Postgres encodings for ids, emails, prices
//! and statuses are compiled in with the `postgres` feature.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
