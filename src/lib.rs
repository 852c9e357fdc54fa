//! # Realty API Library
//!
//! This library provides the core functionality for the Realty API service,
//! including handlers, models, entity services, and server configuration.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod seeds;
pub mod server;
pub mod services;
pub mod telemetry;
pub mod validation;
pub use migration;
