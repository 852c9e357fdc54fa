//! # Service Layer
//!
//! One service trait per entity, each backed by a SeaORM implementation that
//! owns a handle to the pooled connection. Handlers depend only on the traits,
//! so a test double can stand in for the store. Services accept and return
//! transport DTOs, never raw entities.

pub mod client;
pub mod property;
pub mod transaction;

pub use client::{ClientDto, ClientService, CreateClientDto, DbClientService, UpdateClientDto};
pub use property::{
    CreatePropertyDto, DbPropertyService, PropertyDto, PropertyService, UpdatePropertyDto,
};
pub use transaction::{
    CreateTransactionDto, DbTransactionService, TransactionDto, TransactionService,
};

use sea_orm::DbErr;

/// Decides the outcome of an update whose write reported a conflict, after
/// the row's existence has been re-checked: a write that raced a concurrent
/// delete is a plain "not found" (`Ok(false)`), while a conflict on a row
/// that is still present is re-raised unchanged.
pub(crate) fn downgrade_lost_update(err: DbErr, row_still_exists: bool) -> Result<bool, DbErr> {
    match err {
        DbErr::RecordNotUpdated if !row_still_exists => Ok(false),
        other => Err(other),
    }
}
