//! Restaurant handlers: list, read with nested pizzas, delete.

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;
use crate::views::{many, RestaurantDetail, RestaurantSummary};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

/// Path ids that are not integers name no restaurant.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str.parse().map_err(|_| AppError::restaurant_not_found())
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants, without pizzas", body = [RestaurantSummary]),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantSummary>>, AppError> {
    let rows = state.store.list_restaurants().await?;
    Ok(Json(many(rows)))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant with its pizzas", body = RestaurantDetail),
        (status = 404, description = "Restaurant not found", body = ErrorBody),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<RestaurantDetail>, AppError> {
    let id = parse_id(&id_str)?;
    let (restaurant, pizzas) = state
        .store
        .restaurant_with_pizzas(id)
        .await?
        .ok_or_else(AppError::restaurant_not_found)?;
    Ok(Json(RestaurantDetail::new(restaurant, pizzas)))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 204, description = "Restaurant and its restaurant_pizzas deleted"),
        (status = 404, description = "Restaurant not found", body = ErrorBody),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    if !state.store.delete_restaurant(id).await? {
        return Err(AppError::restaurant_not_found());
    }
    tracing::info!(restaurant_id = id, "restaurant deleted");
    Ok(StatusCode::NO_CONTENT)
}
