//! # Transaction API Handlers
//!
//! Transactions are append-only at the HTTP surface: list, get and create.

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
use crate::services::{CreateTransactionDto, TransactionDto};

/// List transactions, paged and enriched
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    params(PageParams),
    responses(
        (status = 200, description = "One page of transactions", body = PagedResult<TransactionDto>),
        (status = 400, description = "Invalid paging parameters", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "transactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<PagedResult<TransactionDto>>, ApiError> {
    let Query(params) = params?;
    params.validate()?;

    let page = state.transactions.list_paged(&params).await?;

    Ok(Json(page))
}

/// Get a transaction by id
#[utoipa::path(
    get,
    path = "/api/v1/transactions/{id}",
    params(("id" = i32, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "The transaction", body = TransactionDto),
        (status = 404, description = "Transaction not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "transactions"
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TransactionDto>, ApiError> {
    state
        .transactions
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Transaction", id))
}

/// Record a transaction; the date is set server-side
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    request_body = CreateTransactionDto,
    responses(
        (status = 201, description = "Transaction recorded", body = TransactionDto, headers(
            ("Location", description = "URL of the created transaction")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "transactions"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionDto>, JsonRejection>,
) -> Result<(StatusCode, [(&'static str, String); 1], Json<TransactionDto>), ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let created = state.transactions.create(payload).await?;
    let location = format!("/api/v1/transactions/{}", created.id);

    Ok((StatusCode::CREATED, [("Location", location)], Json(created)))
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

    async fn post_json(app: &axum::Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    async fn seed_references(app: &axum::Router) -> (i64, i64) {
        let (status, client) = post_json(
            app,
            "/api/v1/clients",
            json!({"name": "Alice Johnson", "email": "alice@example.com"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let client_id = client["id"].as_i64().unwrap();

        let (status, property) = post_json(
            app,
            "/api/v1/properties",
            json!({
                "address": "12 Main St",
                "price": "250000.00",
                "type": "Sale",
                "ownerId": client_id
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        (property["id"].as_i64().unwrap(), client_id)
    }

    #[tokio::test]
    async fn create_enriches_and_sets_the_date() {
        let app = setup_test_app().await;
        let (property_id, client_id) = seed_references(&app).await;

        let (status, json) = post_json(
            &app,
            "/api/v1/transactions",
            json!({
                "propertyId": property_id,
                "clientId": client_id,
                "amount": "245000.00",
                "transactionType": "Sale"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["propertyAddress"], "12 Main St");
        assert_eq!(json["clientName"], "Alice Johnson");
        assert!(json["date"].is_string());

        // A later get returns the same projection.
        let id = json["id"].as_i64().unwrap();
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/transactions/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json);
    }

    #[tokio::test]
    async fn zero_property_id_fails_validation_before_the_store() {
        let app = setup_test_app().await;

        let (status, json) = post_json(
            &app,
            "/api/v1/transactions",
            json!({
                "propertyId": 0,
                "clientId": 1,
                "amount": "100.00",
                "transactionType": "Sale"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["errors"]["propertyId"][0],
            "PropertyId must be greater than 0"
        );

        // Nothing was recorded.
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/transactions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(response).await["totalCount"], 0);
    }

    #[tokio::test]
    async fn unknown_transaction_type_is_rejected() {
        let app = setup_test_app().await;
        let (property_id, client_id) = seed_references(&app).await;

        let (status, json) = post_json(
            &app,
            "/api/v1/transactions",
            json!({
                "propertyId": property_id,
                "clientId": client_id,
                "amount": "100.00",
                "transactionType": "Swap"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["errors"]["transactionType"][0],
            "TransactionType must be either 'Sale', 'Rent', or 'Lease'"
        );
    }

    #[tokio::test]
    async fn paging_five_transactions_page_two_of_two() {
        let app = setup_test_app().await;
        let (property_id, client_id) = seed_references(&app).await;

        for _ in 0..5 {
            let (status, _) = post_json(
                &app,
                "/api/v1/transactions",
                json!({
                    "propertyId": property_id,
                    "clientId": client_id,
                    "amount": "1000.00",
                    "transactionType": "Rent"
                }),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/transactions?pageNumber=2&pageSize=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
        assert_eq!(json["totalCount"], 5);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["hasNext"], true);
        assert_eq!(json["hasPrevious"], true);
    }

    #[tokio::test]
    async fn mutating_routes_do_not_exist() {
        let app = setup_test_app().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/transactions/1")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/transactions/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
