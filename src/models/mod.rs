//! # Data Models
//!
//! This module contains the SeaORM entities backing the Realty API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod client;
pub mod property;
pub mod transaction;

pub use client::Entity as Client;
pub use property::Entity as Property;
pub use transaction::Entity as Transaction;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "realty-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
