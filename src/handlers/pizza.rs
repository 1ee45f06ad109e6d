use crate::error::AppError;
use crate::state::AppState;
use crate::views::{many, PizzaView};
use axum::{extract::State, Json};
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "All pizzas", body = [PizzaView]),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<PizzaView>>, AppError> {
    let rows = state.store.list_pizzas().await?;
    Ok(Json(many(rows)))
}
