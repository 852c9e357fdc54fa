//! Property entity model
//!
//! This module contains the SeaORM entity model for the properties table.
//! Each property belongs to an owning client; the owner reference is set at
//! creation and never changed by updates.

use rust_decimal::Decimal;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

use super::client::Entity as Client;

/// Property entity representing a listing offered for sale or rent
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    /// Unique identifier for the property (primary key, store-assigned)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Street address (required, at most 200 characters)
    pub address: String,

    /// Asking price or rent, always positive
    pub price: Decimal,

    /// Listing kind: "Sale" or "Rent"
    #[sea_orm(column_name = "type")]
    pub property_type: String,

    /// Free-form description (optional, at most 500 characters)
    pub description: Option<String>,

    /// Owning client id (restrict-on-delete foreign key)
    pub owner_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Client",
        from = "Column::OwnerId",
        to = "super::client::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
}

impl Related<Client> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
