//! Transaction entity model
//!
//! This module contains the SeaORM entity model for the transactions table,
//! which records a completed deal between a client and a property. Rows are
//! append-only; there is no update or delete path for them.

use rust_decimal::Decimal;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::client::Entity as Client;
use super::property::Entity as Property;

/// Transaction entity representing a closed sale, rental or lease
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction (primary key, store-assigned)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Property the deal concerns (restrict-on-delete foreign key)
    pub property_id: i32,

    /// Client on the deal (restrict-on-delete foreign key)
    pub client_id: i32,

    /// Server-assigned UTC timestamp of creation
    pub date: DateTimeWithTimeZone,

    /// Deal amount, always positive
    pub amount: Decimal,

    /// Deal kind: "Sale", "Rent" or "Lease"
    pub transaction_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Property",
        from = "Column::PropertyId",
        to = "super::property::Column::Id"
    )]
    Property,
    #[sea_orm(
        belongs_to = "Client",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
}

impl Related<Property> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<Client> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
