//! Restaurant ordering REST API.
//!
//! The binary in `main.rs` is a thin wrapper over [`startup::run`]; everything
//! else lives here so it can be exercised from tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod keepalive;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod startup;
pub mod state;
