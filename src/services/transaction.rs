//! Transaction service: list, get and create only.
//!
//! Read paths enrich each row with two display-only fields resolved from the
//! referenced property and client (address and name). Create does the same
//! after the insert, so the create response always equals a subsequent
//! get-by-id. The transaction date is set server-side at create time.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{client, property, transaction};
use crate::pagination::{PagedResult, PageParams};

/// Transaction as returned to callers, including the resolved display fields.
/// `property_address` and `client_name` are `null` if the referenced row is
/// missing rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: i32,
    pub property_id: i32,
    pub client_id: i32,
    pub date: DateTime<FixedOffset>,
    pub amount: Decimal,
    pub transaction_type: String,
    pub property_address: Option<String>,
    pub client_name: Option<String>,
}

/// Payload for recording a transaction. The date is server-set and not
/// accepted from the caller.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionDto {
    #[validate(range(min = 1, message = "PropertyId must be greater than 0"))]
    pub property_id: i32,
    #[validate(range(min = 1, message = "ClientId must be greater than 0"))]
    pub client_id: i32,
    #[validate(custom(function = crate::validation::positive_amount))]
    pub amount: Decimal,
    #[validate(custom(function = crate::validation::transaction_type))]
    pub transaction_type: String,
}

/// Contract for transactions; no update or delete exists.
#[async_trait]
pub trait TransactionService: Send + Sync {
    async fn list_all(&self) -> Result<Vec<TransactionDto>, DbErr>;
    async fn list_paged(&self, params: &PageParams)
        -> Result<PagedResult<TransactionDto>, DbErr>;
    async fn get_by_id(&self, id: i32) -> Result<Option<TransactionDto>, DbErr>;
    async fn create(&self, payload: CreateTransactionDto) -> Result<TransactionDto, DbErr>;
}

/// SeaORM-backed [`TransactionService`].
pub struct DbTransactionService {
    db: DatabaseConnection,
}

impl DbTransactionService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves the display fields for a batch of rows with one query per
    /// referenced table instead of one per row.
    async fn enrich(&self, rows: Vec<transaction::Model>) -> Result<Vec<TransactionDto>, DbErr> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let property_ids: Vec<i32> = rows.iter().map(|t| t.property_id).collect();
        let client_ids: Vec<i32> = rows.iter().map(|t| t.client_id).collect();

        let addresses: HashMap<i32, String> = property::Entity::find()
            .filter(property::Column::Id.is_in(property_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, p.address))
            .collect();

        let names: HashMap<i32, String> = client::Entity::find()
            .filter(client::Column::Id.is_in(client_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(rows
            .into_iter()
            .map(|t| TransactionDto {
                property_address: addresses.get(&t.property_id).cloned(),
                client_name: names.get(&t.client_id).cloned(),
                id: t.id,
                property_id: t.property_id,
                client_id: t.client_id,
                date: t.date,
                amount: t.amount,
                transaction_type: t.transaction_type,
            })
            .collect())
    }
}

#[async_trait]
impl TransactionService for DbTransactionService {
    async fn list_all(&self) -> Result<Vec<TransactionDto>, DbErr> {
        let rows = transaction::Entity::find()
            .order_by_asc(transaction::Column::Id)
            .all(&self.db)
            .await?;

        self.enrich(rows).await
    }

    async fn list_paged(
        &self,
        params: &PageParams,
    ) -> Result<PagedResult<TransactionDto>, DbErr> {
        let paginator = transaction::Entity::find()
            .order_by_asc(transaction::Column::Id)
            .paginate(&self.db, params.limit());

        let total_count = paginator.num_items().await?;
        let rows = paginator.fetch_page(params.page_index()).await?;
        let items = self.enrich(rows).await?;

        Ok(PagedResult::new(items, total_count, params))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<TransactionDto>, DbErr> {
        let Some(row) = transaction::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(self.enrich(vec![row]).await?.into_iter().next())
    }

    async fn create(&self, payload: CreateTransactionDto) -> Result<TransactionDto, DbErr> {
        let transaction = transaction::ActiveModel {
            id: NotSet,
            property_id: Set(payload.property_id),
            client_id: Set(payload.client_id),
            date: Set(Utc::now().into()),
            amount: Set(payload.amount),
            transaction_type: Set(payload.transaction_type),
        };

        let created = transaction.insert(&self.db).await?;

        // Resolve the display fields so the response matches a later get.
        self.enrich(vec![created])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbErr::Custom("inserted transaction vanished during enrichment".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::setup_test_db;
    use crate::services::{
        ClientService, CreateClientDto, CreatePropertyDto, DbClientService, DbPropertyService,
        PropertyService,
    };

    struct Seeded {
        client_id: i32,
        property_id: i32,
    }

    async fn seed_references(db: &DatabaseConnection) -> Seeded {
        let client = DbClientService::new(db.clone())
            .create(CreateClientDto {
                name: "Alice Johnson".to_string(),
                email: "alice@example.com".to_string(),
                phone_number: None,
            })
            .await
            .unwrap();

        let property = DbPropertyService::new(db.clone())
            .create(CreatePropertyDto {
                address: "12 Main St".to_string(),
                price: Decimal::from(250_000),
                property_type: "Sale".to_string(),
                description: None,
                owner_id: client.id,
            })
            .await
            .unwrap();

        Seeded {
            client_id: client.id,
            property_id: property.id,
        }
    }

    fn create_payload(seeded: &Seeded) -> CreateTransactionDto {
        CreateTransactionDto {
            property_id: seeded.property_id,
            client_id: seeded.client_id,
            amount: Decimal::from(245_000),
            transaction_type: "Sale".to_string(),
        }
    }

    #[tokio::test]
    async fn create_sets_the_date_and_enriches() {
        let db = setup_test_db().await;
        let seeded = seed_references(&db).await;
        let service = DbTransactionService::new(db);

        let before = Utc::now() - chrono::Duration::seconds(5);
        let created = service.create(create_payload(&seeded)).await.unwrap();

        assert!(created.id > 0);
        assert!(created.date > before, "date is set at creation time");
        assert_eq!(created.property_address.as_deref(), Some("12 Main St"));
        assert_eq!(created.client_name.as_deref(), Some("Alice Johnson"));
    }

    #[tokio::test]
    async fn create_response_equals_a_later_get() {
        let db = setup_test_db().await;
        let seeded = seed_references(&db).await;
        let service = DbTransactionService::new(db);

        let created = service.create(create_payload(&seeded)).await.unwrap();
        let fetched = service.get_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_by_id_misses_cleanly() {
        let db = setup_test_db().await;
        let service = DbTransactionService::new(db);

        assert!(service.get_by_id(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_with_unknown_references_fails() {
        let db = setup_test_db().await;
        let service = DbTransactionService::new(db);

        let result = service
            .create(CreateTransactionDto {
                property_id: 1,
                client_id: 1,
                amount: Decimal::ONE,
                transaction_type: "Sale".to_string(),
            })
            .await;

        assert!(result.is_err());
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn five_transactions_page_two_of_two() {
        let db = setup_test_db().await;
        let seeded = seed_references(&db).await;
        let service = DbTransactionService::new(db);

        for _ in 0..5 {
            service.create(create_payload(&seeded)).await.unwrap();
        }

        let page = service
            .list_paged(&PageParams {
                page_number: 2,
                page_size: 2,
            })
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_previous);
    }

    #[tokio::test]
    async fn list_all_returns_enriched_rows_in_order() {
        let db = setup_test_db().await;
        let seeded = seed_references(&db).await;
        let service = DbTransactionService::new(db);

        for _ in 0..3 {
            service.create(create_payload(&seeded)).await.unwrap();
        }

        let all = service.list_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
        assert!(all.iter().all(|t| t.property_address.is_some()));
        assert!(all.iter().all(|t| t.client_name.is_some()));
    }
}
