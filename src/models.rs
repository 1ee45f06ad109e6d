//! Persisted rows and request payloads.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPizza {
    pub name: String,
    pub ingredients: String,
}

/// Body of `POST /restaurant_pizzas`. Fields stay untyped so a missing or
/// mistyped field is reported by validation alongside every other problem.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct RestaurantPizzaRequest {
    #[serde(default)]
    #[schema(value_type = Option<i32>, minimum = 1, maximum = 30)]
    pub price: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub pizza_id: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub restaurant_id: Option<Value>,
}

/// A committed join record together with the rows it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantPizzaDetail {
    pub record: RestaurantPizza,
    pub pizza: Pizza,
    pub restaurant: Restaurant,
}
