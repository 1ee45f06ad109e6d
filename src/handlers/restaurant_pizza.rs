//! Join record creation.

use crate::error::{AppError, ErrorsBody};
use crate::models::RestaurantPizzaRequest;
use crate::service::RequestValidator;
use crate::state::AppState;
use crate::views::RestaurantPizzaView;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = RestaurantPizzaRequest,
    responses(
        (status = 201, description = "Created, with nested pizza and restaurant", body = RestaurantPizzaView),
        (status = 400, description = "Validation failed", body = ErrorsBody),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state, body))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    body: Result<Json<RestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaView>), AppError> {
    let Json(body) = body.map_err(|e| {
        tracing::debug!(error = %e, "rejected body");
        AppError::BadRequest("Invalid data".into())
    })?;
    let pending = RequestValidator::restaurant_pizza(&body);
    let detail = state.store.create_restaurant_pizza(pending).await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}
