//! Response projections. Each entity has explicit list/detail shapes; nested
//! views never carry their own collections, so Restaurant and Pizza cannot
//! nest each other.

use crate::models::{Pizza, Restaurant, RestaurantPizzaDetail};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PizzaView {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

/// Restaurant without its pizzas: bulk listing and nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RestaurantSummary {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RestaurantDetail {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub pizzas: Vec<PizzaView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RestaurantPizzaView {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaView,
    pub restaurant: RestaurantSummary,
}

impl From<Pizza> for PizzaView {
    fn from(p: Pizza) -> Self {
        PizzaView {
            id: p.id,
            name: p.name,
            ingredients: p.ingredients,
        }
    }
}

impl From<Restaurant> for RestaurantSummary {
    fn from(r: Restaurant) -> Self {
        RestaurantSummary {
            id: r.id,
            name: r.name,
            address: r.address,
        }
    }
}

impl RestaurantDetail {
    pub fn new(restaurant: Restaurant, pizzas: Vec<Pizza>) -> Self {
        RestaurantDetail {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
            pizzas: pizzas.into_iter().map(PizzaView::from).collect(),
        }
    }
}

impl From<RestaurantPizzaDetail> for RestaurantPizzaView {
    fn from(d: RestaurantPizzaDetail) -> Self {
        RestaurantPizzaView {
            id: d.record.id,
            price: d.record.price,
            pizza_id: d.record.pizza_id,
            restaurant_id: d.record.restaurant_id,
            pizza: d.pizza.into(),
            restaurant: d.restaurant.into(),
        }
    }
}

pub fn many<T, V: From<T>>(rows: Vec<T>) -> Vec<V> {
    rows.into_iter().map(V::from).collect()
}
