//! In-memory `PizzaStore` and request helpers for router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use pizza_api::models::{NewPizza, NewRestaurant, Pizza, Restaurant, RestaurantPizza, RestaurantPizzaDetail};
use pizza_api::service::{PendingRestaurantPizza, RequestValidator};
use pizza_api::{app, AppError, AppState, Config, PizzaStore};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct Tables {
    restaurants: Vec<Restaurant>,
    pizzas: Vec<Pizza>,
    restaurant_pizzas: Vec<RestaurantPizza>,
    next_restaurant: i32,
    next_pizza: i32,
    next_restaurant_pizza: i32,
}

fn next(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    offline: bool,
}

impl MemoryStore {
    /// A store whose readiness probe always fails.
    pub fn offline() -> Self {
        MemoryStore {
            offline: true,
            ..MemoryStore::default()
        }
    }

    pub fn restaurant_pizzas(&self) -> Vec<RestaurantPizza> {
        self.tables.lock().unwrap().restaurant_pizzas.clone()
    }

    pub async fn add_restaurant(&self, name: &str, address: &str) -> Restaurant {
        self.create_restaurant(NewRestaurant {
            name: name.into(),
            address: address.into(),
        })
        .await
        .unwrap()
    }

    pub async fn add_pizza(&self, name: &str, ingredients: &str) -> Pizza {
        self.create_pizza(NewPizza {
            name: name.into(),
            ingredients: ingredients.into(),
        })
        .await
        .unwrap()
    }

    pub async fn add_offer(&self, price: i32, pizza_id: i32, restaurant_id: i32) -> RestaurantPizza {
        let request = serde_json::from_value(serde_json::json!({
            "price": price,
            "pizza_id": pizza_id,
            "restaurant_id": restaurant_id,
        }))
        .unwrap();
        self.create_restaurant_pizza(RequestValidator::restaurant_pizza(&request))
            .await
            .unwrap()
            .record
    }
}

#[async_trait]
impl PizzaStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        if self.offline {
            return Err(AppError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        Ok(self.tables.lock().unwrap().restaurants.clone())
    }

    async fn restaurant_with_pizzas(&self, id: i32) -> Result<Option<(Restaurant, Vec<Pizza>)>, AppError> {
        let t = self.tables.lock().unwrap();
        let Some(restaurant) = t.restaurants.iter().find(|r| r.id == id).cloned() else {
            return Ok(None);
        };
        let pizzas = t
            .restaurant_pizzas
            .iter()
            .filter(|rp| rp.restaurant_id == id)
            .filter_map(|rp| t.pizzas.iter().find(|p| p.id == rp.pizza_id).cloned())
            .collect();
        Ok(Some((restaurant, pizzas)))
    }

    async fn delete_restaurant(&self, id: i32) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.restaurants.len();
        t.restaurants.retain(|r| r.id != id);
        if t.restaurants.len() == before {
            return Ok(false);
        }
        t.restaurant_pizzas.retain(|rp| rp.restaurant_id != id);
        Ok(true)
    }

    async fn list_pizzas(&self) -> Result<Vec<Pizza>, AppError> {
        Ok(self.tables.lock().unwrap().pizzas.clone())
    }

    async fn create_restaurant(&self, new: NewRestaurant) -> Result<Restaurant, AppError> {
        RequestValidator::restaurant(&new)?;
        let mut t = self.tables.lock().unwrap();
        let restaurant = Restaurant {
            id: next(&mut t.next_restaurant),
            name: new.name,
            address: new.address,
        };
        t.restaurants.push(restaurant.clone());
        Ok(restaurant)
    }

    async fn create_pizza(&self, new: NewPizza) -> Result<Pizza, AppError> {
        RequestValidator::pizza(&new)?;
        let mut t = self.tables.lock().unwrap();
        let pizza = Pizza {
            id: next(&mut t.next_pizza),
            name: new.name,
            ingredients: new.ingredients,
        };
        t.pizzas.push(pizza.clone());
        Ok(pizza)
    }

    async fn create_restaurant_pizza(
        &self,
        pending: PendingRestaurantPizza,
    ) -> Result<RestaurantPizzaDetail, AppError> {
        let mut t = self.tables.lock().unwrap();
        let pizza = pending
            .pizza_id
            .and_then(|id| t.pizzas.iter().find(|p| p.id == id).cloned());
        let restaurant = pending
            .restaurant_id
            .and_then(|id| t.restaurants.iter().find(|r| r.id == id).cloned());
        let valid = pending.resolve(pizza, restaurant)?;
        let record = RestaurantPizza {
            id: next(&mut t.next_restaurant_pizza),
            price: valid.price,
            pizza_id: valid.pizza.id,
            restaurant_id: valid.restaurant.id,
        };
        t.restaurant_pizzas.push(record.clone());
        Ok(RestaurantPizzaDetail {
            record,
            pizza: valid.pizza,
            restaurant: valid.restaurant,
        })
    }

    async fn clear(&self) -> Result<(), AppError> {
        *self.tables.lock().unwrap() = Tables::default();
        Ok(())
    }
}

pub fn router(store: &MemoryStore) -> Router {
    router_with(store, Config::default())
}

pub fn router_with(store: &MemoryStore, config: Config) -> Router {
    app(AppState::new(store.clone()), &config)
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    send_request(router, builder.body(body).unwrap()).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
