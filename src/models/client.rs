//! Client entity model
//!
//! This module contains the SeaORM entity model for the clients table.
//! Clients own properties and appear as the counterparty of transactions;
//! both referencing tables carry restrict-on-delete foreign keys, so the
//! store rejects deleting a client that is still referenced.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// Client entity representing a person the agency does business with
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    /// Unique identifier for the client (primary key, store-assigned)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name (required)
    pub name: String,

    /// Contact email (required)
    pub email: String,

    /// Contact phone number (optional)
    pub phone_number: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::property::Entity")]
    Property,
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
