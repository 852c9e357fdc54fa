//! Property CRUD service.
//!
//! The owner reference is caller-supplied on create, immutable on update, and
//! projected as a raw id; the store's restrict-on-delete foreign key is what
//! ties it to an existing client.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::property;
use crate::pagination::{PagedResult, PageParams};

/// Property as returned to callers. The owner is a raw client id, never an
/// expanded object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    pub id: i32,
    pub address: String,
    pub price: Decimal,
    #[serde(rename = "type")]
    pub property_type: String,
    pub description: Option<String>,
    pub owner_id: i32,
}

impl From<property::Model> for PropertyDto {
    fn from(model: property::Model) -> Self {
        Self {
            id: model.id,
            address: model.address,
            price: model.price,
            property_type: model.property_type,
            description: model.description,
            owner_id: model.owner_id,
        }
    }
}

/// Payload for creating a property.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyDto {
    #[validate(custom(function = crate::validation::property_address))]
    pub address: String,
    #[validate(custom(function = crate::validation::positive_price))]
    pub price: Decimal,
    #[serde(rename = "type")]
    #[validate(custom(function = crate::validation::property_type))]
    pub property_type: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "OwnerId must be greater than 0"))]
    pub owner_id: i32,
}

/// Payload for replacing a property's mutable fields. The owner reference is
/// deliberately absent.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyDto {
    #[validate(custom(function = crate::validation::property_address))]
    pub address: String,
    #[validate(custom(function = crate::validation::positive_price))]
    pub price: Decimal,
    #[serde(rename = "type")]
    #[validate(custom(function = crate::validation::property_type))]
    pub property_type: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
}

/// CRUD contract for properties.
#[async_trait]
pub trait PropertyService: Send + Sync {
    async fn list_all(&self) -> Result<Vec<PropertyDto>, DbErr>;
    async fn list_paged(&self, params: &PageParams) -> Result<PagedResult<PropertyDto>, DbErr>;
    async fn get_by_id(&self, id: i32) -> Result<Option<PropertyDto>, DbErr>;
    async fn create(&self, payload: CreatePropertyDto) -> Result<PropertyDto, DbErr>;
    /// Returns `false` when no property with the given id exists.
    async fn update(&self, id: i32, payload: UpdatePropertyDto) -> Result<bool, DbErr>;
    /// Returns `false` when no property with the given id exists.
    async fn delete(&self, id: i32) -> Result<bool, DbErr>;
}

/// SeaORM-backed [`PropertyService`].
pub struct DbPropertyService {
    db: DatabaseConnection,
}

impl DbPropertyService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PropertyService for DbPropertyService {
    async fn list_all(&self) -> Result<Vec<PropertyDto>, DbErr> {
        let properties = property::Entity::find()
            .order_by_asc(property::Column::Id)
            .all(&self.db)
            .await?;

        Ok(properties.into_iter().map(PropertyDto::from).collect())
    }

    async fn list_paged(&self, params: &PageParams) -> Result<PagedResult<PropertyDto>, DbErr> {
        let paginator = property::Entity::find()
            .order_by_asc(property::Column::Id)
            .paginate(&self.db, params.limit());

        let total_count = paginator.num_items().await?;
        let items = paginator
            .fetch_page(params.page_index())
            .await?
            .into_iter()
            .map(PropertyDto::from)
            .collect();

        Ok(PagedResult::new(items, total_count, params))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<PropertyDto>, DbErr> {
        let property = property::Entity::find_by_id(id).one(&self.db).await?;

        Ok(property.map(PropertyDto::from))
    }

    async fn create(&self, payload: CreatePropertyDto) -> Result<PropertyDto, DbErr> {
        let property = property::ActiveModel {
            id: NotSet,
            address: Set(payload.address),
            price: Set(payload.price),
            property_type: Set(payload.property_type),
            description: Set(payload.description),
            owner_id: Set(payload.owner_id),
        };

        let created = property.insert(&self.db).await?;

        Ok(PropertyDto::from(created))
    }

    async fn update(&self, id: i32, payload: UpdatePropertyDto) -> Result<bool, DbErr> {
        let Some(existing) = property::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(false);
        };

        let mut property = existing.into_active_model();
        property.address = Set(payload.address);
        property.price = Set(payload.price);
        property.property_type = Set(payload.property_type);
        property.description = Set(payload.description);
        // owner_id stays untouched

        match property.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(err @ DbErr::RecordNotUpdated) => {
                let still_exists = property::Entity::find_by_id(id)
                    .one(&self.db)
                    .await?
                    .is_some();
                super::downgrade_lost_update(err, still_exists)
            }
            Err(err) => Err(err),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = property::Entity::delete_by_id(id).exec(&self.db).await?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::setup_test_db;
    use crate::services::{ClientService, CreateClientDto, DbClientService};

    async fn seeded_owner(db: &DatabaseConnection) -> i32 {
        DbClientService::new(db.clone())
            .create(CreateClientDto {
                name: "Owner".to_string(),
                email: "owner@example.com".to_string(),
                phone_number: None,
            })
            .await
            .unwrap()
            .id
    }

    fn create_payload(address: &str, owner_id: i32) -> CreatePropertyDto {
        CreatePropertyDto {
            address: address.to_string(),
            price: Decimal::from(250_000),
            property_type: "Sale".to_string(),
            description: Some("Two-bedroom house".to_string()),
            owner_id,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let db = setup_test_db().await;
        let owner_id = seeded_owner(&db).await;
        let service = DbPropertyService::new(db);

        let created = service
            .create(create_payload("12 Main St", owner_id))
            .await
            .unwrap();

        let fetched = service.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.address, "12 Main St");
        assert_eq!(fetched.price, Decimal::from(250_000));
        assert_eq!(fetched.property_type, "Sale");
        assert_eq!(fetched.owner_id, owner_id);
    }

    #[tokio::test]
    async fn create_with_unknown_owner_persists_nothing() {
        let db = setup_test_db().await;
        let service = DbPropertyService::new(db);

        let result = service.create(create_payload("12 Main St", 999)).await;
        assert!(result.is_err());
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_the_owner_reference() {
        let db = setup_test_db().await;
        let owner_id = seeded_owner(&db).await;
        let service = DbPropertyService::new(db);

        let created = service
            .create(create_payload("12 Main St", owner_id))
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                UpdatePropertyDto {
                    address: "14 Main St".to_string(),
                    price: Decimal::from(300_000),
                    property_type: "Rent".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert!(updated);

        let fetched = service.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.address, "14 Main St");
        assert_eq!(fetched.property_type, "Rent");
        assert_eq!(fetched.description, None);
        assert_eq!(fetched.owner_id, owner_id);
    }

    #[tokio::test]
    async fn update_of_absent_property_reports_false() {
        let db = setup_test_db().await;
        let service = DbPropertyService::new(db);

        let updated = service
            .update(
                7,
                UpdatePropertyDto {
                    address: "Nowhere".to_string(),
                    price: Decimal::ONE,
                    property_type: "Sale".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let db = setup_test_db().await;
        let owner_id = seeded_owner(&db).await;
        let service = DbPropertyService::new(db);

        let created = service
            .create(create_payload("12 Main St", owner_id))
            .await
            .unwrap();

        assert!(service.delete(created.id).await.unwrap());
        assert!(!service.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn list_paged_orders_by_id() {
        let db = setup_test_db().await;
        let owner_id = seeded_owner(&db).await;
        let service = DbPropertyService::new(db);

        for i in 0..4 {
            service
                .create(create_payload(&format!("{i} Main St"), owner_id))
                .await
                .unwrap();
        }

        let page = service
            .list_paged(&PageParams {
                page_number: 2,
                page_size: 3,
            })
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_count, 4);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }
}
