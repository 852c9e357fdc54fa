//! Database migrations for the Realty API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2024_05_01_000001_create_clients;
mod m2024_05_01_000002_create_properties;
mod m2024_05_01_000003_create_transactions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2024_05_01_000001_create_clients::Migration),
            Box::new(m2024_05_01_000002_create_properties::Migration),
            Box::new(m2024_05_01_000003_create_transactions::Migration),
        ]
    }
}
