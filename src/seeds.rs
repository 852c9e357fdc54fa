//! Database seeding functionality
//!
//! Populates the store with a small demo data set (three clients, four
//! properties, two transactions) for local development. Seeding is
//! idempotent: it is skipped entirely as soon as any client row exists.

use anyhow::Result;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, PaginatorTrait, Set,
};

use crate::models::{client, property, transaction};

/// Seeds the demo data set unless the store already holds clients.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<()> {
    if client::Entity::find().count(db).await? > 0 {
        log::info!("Store already holds clients, skipping demo seed");
        return Ok(());
    }

    let mut client_ids = Vec::new();
    for (name, email, phone) in [
        ("Juan Perez", "juan.perez@example.com", "555-0101"),
        ("Maria Garcia", "maria.garcia@example.com", "555-0102"),
        ("Carlos Lopez", "carlos.lopez@example.com", "555-0103"),
    ] {
        let created = client::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            phone_number: Set(Some(phone.to_string())),
        }
        .insert(db)
        .await?;
        client_ids.push(created.id);
    }

    let mut property_ids = Vec::new();
    for (address, price, kind, description, owner) in [
        (
            "123 Main St, Cityville",
            250_000,
            "Sale",
            "Beautiful 3-bedroom house",
            client_ids[0],
        ),
        (
            "456 Oak Ave, Townburg",
            1_200,
            "Rent",
            "Cozy 2-bedroom apartment",
            client_ids[1],
        ),
        (
            "789 Pine Ln, Villageton",
            350_000,
            "Sale",
            "Spacious villa with garden",
            client_ids[0],
        ),
        (
            "101 Maple Dr, Hamlet",
            1_500,
            "Rent",
            "Modern studio in downtown",
            client_ids[2],
        ),
    ] {
        let created = property::ActiveModel {
            id: NotSet,
            address: Set(address.to_string()),
            price: Set(Decimal::from(price)),
            property_type: Set(kind.to_string()),
            description: Set(Some(description.to_string())),
            owner_id: Set(owner),
        }
        .insert(db)
        .await?;
        property_ids.push(created.id);
    }

    for (property_id, client_id, amount, kind, days_ago) in [
        (property_ids[1], client_ids[2], 1_200, "Rent", 10),
        (property_ids[0], client_ids[1], 250_000, "Sale", 5),
    ] {
        transaction::ActiveModel {
            id: NotSet,
            property_id: Set(property_id),
            client_id: Set(client_id),
            date: Set((Utc::now() - Duration::days(days_ago)).into()),
            amount: Set(Decimal::from(amount)),
            transaction_type: Set(kind.to_string()),
        }
        .insert(db)
        .await?;
    }

    log::info!("Demo data seeding completed successfully");
    Ok(())
}
