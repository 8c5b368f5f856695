//! Coffee service routes

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use common::error::StoreError;
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::{
    error::{ApiError, ApiResult},
    middleware::{cors_middleware, log_requests},
    models::{ApiResponse, CoffeeListResponse, DeleteCoffeeResponse},
    state::AppState,
    validation::{validate_create, validate_update},
};

/// Create the router for the coffee service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(list_coffees).post(create_coffee))
        .route(
            "/:id",
            get(get_coffee).put(update_coffee).delete(delete_coffee),
        )
        .layer(middleware::from_fn(cors_middleware))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let healthy = state
        .coffee_service
        .health_check()
        .await
        .unwrap_or_else(|e| {
            error!("Storage health check failed: {}", e);
            false
        });

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if healthy { "ok" } else { "degraded" },
            "service": "coffee-service",
            "storage": if healthy { "up" } else { "down" },
        })),
    )
}

/// Create a new coffee
pub async fn create_coffee(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let payload = parse_body(&body)?;
    let request = validate_create(&payload).map_err(|report| {
        warn!("Rejected coffee payload: {}", report.errors.join(", "));
        ApiError::from(report)
    })?;

    let coffee = state
        .coffee_service
        .create(request)
        .await
        .map_err(storage_failure("Failed to create coffee"))?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(coffee))))
}

/// Get all coffees
pub async fn list_coffees(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let coffees = state
        .coffee_service
        .list()
        .await
        .map_err(storage_failure("Failed to list coffees"))?;

    Ok(Json(ApiResponse::ok(CoffeeListResponse {
        count: coffees.len(),
        coffees,
    })))
}

/// Get a coffee by ID
pub async fn get_coffee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let coffee = state
        .coffee_service
        .get(&id)
        .await
        .map_err(storage_failure("Failed to retrieve coffee"))?
        .ok_or_else(|| ApiError::coffee_not_found(&id))?;

    Ok(Json(ApiResponse::ok(coffee)))
}

/// Update a coffee with a partial payload
pub async fn update_coffee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let payload = parse_body(&body)?;
    let request = validate_update(&payload).map_err(|report| {
        warn!("Rejected update for coffee {}: {}", id, report.errors.join(", "));
        ApiError::from(report)
    })?;

    let coffee = state
        .coffee_service
        .update(&id, &request)
        .await
        .map_err(storage_failure("Failed to update coffee"))?
        .ok_or_else(|| ApiError::coffee_not_found(&id))?;

    Ok(Json(ApiResponse::ok(coffee)))
}

/// Delete a coffee by ID
pub async fn delete_coffee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state
        .coffee_service
        .delete(&id)
        .await
        .map_err(storage_failure("Failed to delete coffee"))?;

    if !deleted {
        return Err(ApiError::coffee_not_found(&id));
    }

    Ok(Json(ApiResponse::ok(DeleteCoffeeResponse {
        message: format!("Coffee with ID {} has been deleted", id),
        id,
    })))
}

fn parse_body(body: &Bytes) -> ApiResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::MalformedInput(
            "Request body is required".to_string(),
        ));
    }

    serde_json::from_slice(body)
        .map_err(|_| ApiError::MalformedInput("Invalid JSON in request body".to_string()))
}

/// Log the storage error and hide it behind a generic message
fn storage_failure(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
    move |e| {
        error!("{}: {}", message, e);
        ApiError::Storage(message)
    }
}
