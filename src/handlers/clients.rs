//! # Client API Handlers

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use validator::Validate;

use crate::error::ApiError;
use crate::pagination::{PagedResult, PageParams};
use crate::server::AppState;
use crate::services::{ClientDto, CreateClientDto, UpdateClientDto};

/// List clients, paged
#[utoipa::path(
    get,
    path = "/api/v1/clients",
    params(PageParams),
    responses(
        (status = 200, description = "One page of clients", body = PagedResult<ClientDto>),
        (status = 400, description = "Invalid paging parameters", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "clients"
)]
pub async fn list_clients(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<PagedResult<ClientDto>>, ApiError> {
    let Query(params) = params?;
    params.validate()?;

    let page = state.clients.list_paged(&params).await?;

    Ok(Json(page))
}

/// Get a client by id
#[utoipa::path(
    get,
    path = "/api/v1/clients/{id}",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "The client", body = ClientDto),
        (status = 404, description = "Client not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "clients"
)]
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ClientDto>, ApiError> {
    state
        .clients
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Client", id))
}

/// Create a client
#[utoipa::path(
    post,
    path = "/api/v1/clients",
    request_body = CreateClientDto,
    responses(
        (status = 201, description = "Client created", body = ClientDto, headers(
            ("Location", description = "URL of the created client")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "clients"
)]
pub async fn create_client(
    State(state): State<AppState>,
    payload: Result<Json<CreateClientDto>, JsonRejection>,
) -> Result<(StatusCode, [(&'static str, String); 1], Json<ClientDto>), ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let created = state.clients.create(payload).await?;
    let location = format!("/api/v1/clients/{}", created.id);

    Ok((StatusCode::CREATED, [("Location", location)], Json(created)))
}

/// Replace a client's fields
#[utoipa::path(
    put,
    path = "/api/v1/clients/{id}",
    params(("id" = i32, Path, description = "Client id")),
    request_body = UpdateClientDto,
    responses(
        (status = 204, description = "Client updated"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Client not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "clients"
)]
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateClientDto>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    if state.clients.update(id, payload).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Client", id))
    }
}

/// Delete a client
#[utoipa::path(
    delete,
    path = "/api/v1/clients/{id}",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found", body = ApiError),
        (status = 500, description = "Client is still referenced", body = ApiError)
    ),
    tag = "clients"
)]
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.clients.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Client", id))
    }
}
