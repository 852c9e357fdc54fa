//! Client CRUD service.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::client;
use crate::pagination::{PagedResult, PageParams};

/// Client as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
}

impl From<client::Model> for ClientDto {
    fn from(model: client::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone_number: model.phone_number,
        }
    }
}

/// Payload for creating a client.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientDto {
    #[validate(custom(function = crate::validation::client_name))]
    pub name: String,
    #[validate(custom(function = crate::validation::client_email))]
    pub email: String,
    pub phone_number: Option<String>,
}

/// Payload for replacing a client's mutable fields.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientDto {
    #[validate(custom(function = crate::validation::client_name))]
    pub name: String,
    #[validate(custom(function = crate::validation::client_email))]
    pub email: String,
    pub phone_number: Option<String>,
}

/// CRUD contract for clients.
#[async_trait]
pub trait ClientService: Send + Sync {
    async fn list_all(&self) -> Result<Vec<ClientDto>, DbErr>;
    async fn list_paged(&self, params: &PageParams) -> Result<PagedResult<ClientDto>, DbErr>;
    async fn get_by_id(&self, id: i32) -> Result<Option<ClientDto>, DbErr>;
    async fn create(&self, payload: CreateClientDto) -> Result<ClientDto, DbErr>;
    /// Returns `false` when no client with the given id exists.
    async fn update(&self, id: i32, payload: UpdateClientDto) -> Result<bool, DbErr>;
    /// Returns `false` when no client with the given id exists.
    async fn delete(&self, id: i32) -> Result<bool, DbErr>;
}

/// SeaORM-backed [`ClientService`].
pub struct DbClientService {
    db: DatabaseConnection,
}

impl DbClientService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientService for DbClientService {
    async fn list_all(&self) -> Result<Vec<ClientDto>, DbErr> {
        let clients = client::Entity::find()
            .order_by_asc(client::Column::Id)
            .all(&self.db)
            .await?;

        Ok(clients.into_iter().map(ClientDto::from).collect())
    }

    async fn list_paged(&self, params: &PageParams) -> Result<PagedResult<ClientDto>, DbErr> {
        let paginator = client::Entity::find()
            .order_by_asc(client::Column::Id)
            .paginate(&self.db, params.limit());

        let total_count = paginator.num_items().await?;
        let items = paginator
            .fetch_page(params.page_index())
            .await?
            .into_iter()
            .map(ClientDto::from)
            .collect();

        Ok(PagedResult::new(items, total_count, params))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<ClientDto>, DbErr> {
        let client = client::Entity::find_by_id(id).one(&self.db).await?;

        Ok(client.map(ClientDto::from))
    }

    async fn create(&self, payload: CreateClientDto) -> Result<ClientDto, DbErr> {
        let client = client::ActiveModel {
            id: NotSet,
            name: Set(payload.name),
            email: Set(payload.email),
            phone_number: Set(payload.phone_number),
        };

        let created = client.insert(&self.db).await?;

        Ok(ClientDto::from(created))
    }

    async fn update(&self, id: i32, payload: UpdateClientDto) -> Result<bool, DbErr> {
        let Some(existing) = client::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(false);
        };

        let mut client = existing.into_active_model();
        client.name = Set(payload.name);
        client.email = Set(payload.email);
        client.phone_number = Set(payload.phone_number);

        match client.update(&self.db).await {
            Ok(_) => Ok(true),
            // The row can vanish between the read and the write; a missed
            // update against a confirmed-gone row is a plain "not found".
            Err(err @ DbErr::RecordNotUpdated) => {
                let still_exists = client::Entity::find_by_id(id)
                    .one(&self.db)
                    .await?
                    .is_some();
                super::downgrade_lost_update(err, still_exists)
            }
            Err(err) => Err(err),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = client::Entity::delete_by_id(id).exec(&self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
