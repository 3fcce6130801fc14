//! Client for the upstream per-country statistics API.

pub mod client;
pub mod config;

pub use client::*;
pub use config::*;
