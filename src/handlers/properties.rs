//! # Property API Handlers

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
use crate::services::{CreatePropertyDto, PropertyDto, UpdatePropertyDto};

/// List properties, paged
#[utoipa::path(
    get,
    path = "/api/v1/properties",
    params(PageParams),
    responses(
        (status = 200, description = "One page of properties", body = PagedResult<PropertyDto>),
        (status = 400, description = "Invalid paging parameters", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "properties"
)]
pub async fn list_properties(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<PagedResult<PropertyDto>>, ApiError> {
    let Query(params) = params?;
    params.validate()?;

    let page = state.properties.list_paged(&params).await?;

    Ok(Json(page))
}

/// Get a property by id
#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}",
    params(("id" = i32, Path, description = "Property id")),
    responses(
        (status = 200, description = "The property", body = PropertyDto),
        (status = 404, description = "Property not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "properties"
)]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PropertyDto>, ApiError> {
    state
        .properties
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Property", id))
}

/// Create a property for an existing owner
#[utoipa::path(
    post,
    path = "/api/v1/properties",
    request_body = CreatePropertyDto,
    responses(
        (status = 201, description = "Property created", body = PropertyDto, headers(
            ("Location", description = "URL of the created property")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "properties"
)]
pub async fn create_property(
    State(state): State<AppState>,
    payload: Result<Json<CreatePropertyDto>, JsonRejection>,
) -> Result<(StatusCode, [(&'static str, String); 1], Json<PropertyDto>), ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let created = state.properties.create(payload).await?;
    let location = format!("/api/v1/properties/{}", created.id);

    Ok((StatusCode::CREATED, [("Location", location)], Json(created)))
}

/// Replace a property's fields; the owner reference never changes
#[utoipa::path(
    put,
    path = "/api/v1/properties/{id}",
    params(("id" = i32, Path, description = "Property id")),
    request_body = UpdatePropertyDto,
    responses(
        (status = 204, description = "Property updated"),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Property not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "properties"
)]
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdatePropertyDto>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    if state.properties.update(id, payload).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Property", id))
    }
}

/// Delete a property
#[utoipa::path(
    delete,
    path = "/api/v1/properties/{id}",
    params(("id" = i32, Path, description = "Property id")),
    responses(
        (status = 204, description = "Property deleted"),
        (status = 404, description = "Property not found", body = ApiError),
        (status = 500, description = "Property is still referenced", body = ApiError)
    ),
    tag = "properties"
)]
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.properties.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Property", id))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    use crate::handlers::testing::{body_json, setup_test_app};

    async fn seed_owner(app: &axum::Router) -> i64 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/clients")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        json!({"name": "Owner", "email": "owner@example.com"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_i64().unwrap()
    }

    fn post_property(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/properties")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_projects_all_fields_back() {
        let app = setup_test_app().await;
        let owner_id = seed_owner(&app).await;

        let response = app
            .oneshot(post_property(json!({
                "address": "12 Main St",
                "price": "250000.00",
                "type": "Sale",
                "description": "Two-bedroom house",
                "ownerId": owner_id
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["address"], "12 Main St");
        assert_eq!(json["type"], "Sale");
        assert_eq!(json["ownerId"], owner_id);
        // The owner comes back as a raw id, never an expanded object.
        assert!(json["ownerId"].is_i64());
    }

    #[tokio::test]
    async fn invalid_fields_are_reported_per_field() {
        let app = setup_test_app().await;

        let response = app
            .oneshot(post_property(json!({
                "address": "",
                "price": "0",
                "type": "Lease",
                "ownerId": 0
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["errors"]["address"][0], "Address is required");
        assert_eq!(json["errors"]["price"][0], "Price must be greater than 0");
        assert_eq!(json["errors"]["type"][0], "Type must be either 'Sale' or 'Rent'");
        assert_eq!(json["errors"]["ownerId"][0], "OwnerId must be greater than 0");
    }

    #[tokio::test]
    async fn create_against_unknown_owner_is_a_500_fault() {
        let app = setup_test_app().await;

        let response = app
            .clone()
            .oneshot(post_property(json!({
                "address": "12 Main St",
                "price": "250000.00",
                "type": "Sale",
                "ownerId": 999
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        // Store detail stays out of the payload.
        assert_eq!(json["message"], "An internal server error occurred");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/properties")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(response).await["totalCount"], 0);
    }

    #[tokio::test]
    async fn update_with_invalid_fields_is_rejected_and_leaves_the_row_alone() {
        let app = setup_test_app().await;
        let owner_id = seed_owner(&app).await;

        let response = app
            .clone()
            .oneshot(post_property(json!({
                "address": "12 Main St",
                "price": "250000.00",
                "type": "Sale",
                "ownerId": owner_id
            })))
            .await
            .unwrap();
        let id = body_json(response).await["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/api/v1/properties/{id}"))
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        json!({
                            "address": "14 Main St",
                            "price": "0",
                            "type": "Lease"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["errors"]["price"][0], "Price must be greater than 0");
        assert_eq!(json["errors"]["type"][0], "Type must be either 'Sale' or 'Rent'");

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/properties/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["address"], "12 Main St");
        // Scale is not preserved by the store, so compare numerically.
        let price: f64 = json["price"].as_str().unwrap().parse().unwrap();
        assert_eq!(price, 250_000.0);
        assert_eq!(json["type"], "Sale");
    }

    #[tokio::test]
    async fn update_and_delete_follow_the_client_shapes() {
        let app = setup_test_app().await;
        let owner_id = seed_owner(&app).await;

        let response = app
            .clone()
            .oneshot(post_property(json!({
                "address": "12 Main St",
                "price": "250000.00",
                "type": "Sale",
                "ownerId": owner_id
            })))
            .await
            .unwrap();
        let id = body_json(response).await["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/api/v1/properties/{id}"))
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        json!({
                            "address": "14 Main St",
                            "price": "300000.00",
                            "type": "Rent"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/properties/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["address"], "14 Main St");
        assert_eq!(json["type"], "Rent");
        assert_eq!(json["ownerId"], owner_id);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/properties/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/properties/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
