//! Request validation. Errors are collected, never short-circuited, so a
//! client can fix every problem in one round trip.

use crate::error::AppError;
use crate::models::{NewPizza, NewRestaurant, Pizza, Restaurant, RestaurantPizzaRequest};
use serde_json::Value;
use std::ops::RangeInclusive;

pub const PRICE_RANGE: RangeInclusive<i32> = 1..=30;

pub struct RequestValidator;

/// Join record input whose fields passed shape checks; references are still unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingRestaurantPizza {
    pub price: Option<i32>,
    pub pizza_id: Option<i32>,
    pub restaurant_id: Option<i32>,
    price_errors: Vec<String>,
    pizza_errors: Vec<String>,
    restaurant_errors: Vec<String>,
}

/// Join record ready to insert, carrying the rows it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRestaurantPizza {
    pub price: i32,
    pub pizza: Pizza,
    pub restaurant: Restaurant,
}

impl RequestValidator {
    /// Field-level checks for a join record.
    pub fn restaurant_pizza(body: &RestaurantPizzaRequest) -> PendingRestaurantPizza {
        let mut pending = PendingRestaurantPizza::default();

        match integer(body.price.as_ref()) {
            Field::Missing => pending.price_errors.push("Price is required".into()),
            Field::NotInteger => pending.price_errors.push("Price must be an integer".into()),
            Field::OutOfRange => pending.price_errors.push(price_range_message()),
            Field::Value(n) => match i32::try_from(n).ok().filter(|p| PRICE_RANGE.contains(p)) {
                Some(p) => pending.price = Some(p),
                None => pending.price_errors.push(price_range_message()),
            },
        }

        match integer(body.pizza_id.as_ref()) {
            Field::Missing => pending.pizza_errors.push("Pizza is required".into()),
            Field::NotInteger => pending.pizza_errors.push("pizza_id must be an integer".into()),
            // An id outside the column's range cannot name a row.
            Field::OutOfRange => pending.pizza_errors.push("Pizza not found".into()),
            Field::Value(n) => match i32::try_from(n) {
                Ok(id) => pending.pizza_id = Some(id),
                Err(_) => pending.pizza_errors.push("Pizza not found".into()),
            },
        }

        match integer(body.restaurant_id.as_ref()) {
            Field::Missing => pending.restaurant_errors.push("Restaurant is required".into()),
            Field::NotInteger => pending
                .restaurant_errors
                .push("restaurant_id must be an integer".into()),
            Field::OutOfRange => pending.restaurant_errors.push("Restaurant not found".into()),
            Field::Value(n) => match i32::try_from(n) {
                Ok(id) => pending.restaurant_id = Some(id),
                Err(_) => pending.restaurant_errors.push("Restaurant not found".into()),
            },
        }

        pending
    }

    pub fn restaurant(new: &NewRestaurant) -> Result<(), AppError> {
        let mut errors = Vec::new();
        require_text(&new.name, "Name is required", &mut errors);
        require_text(&new.address, "Address is required", &mut errors);
        finish(errors)
    }

    pub fn pizza(new: &NewPizza) -> Result<(), AppError> {
        let mut errors = Vec::new();
        require_text(&new.name, "Name is required", &mut errors);
        require_text(&new.ingredients, "Ingredients are required", &mut errors);
        finish(errors)
    }
}

impl PendingRestaurantPizza {
    /// Apply reference checks using the rows looked up for `pizza_id` and
    /// `restaurant_id`, and return the record to insert or every collected error.
    pub fn resolve(
        mut self,
        pizza: Option<Pizza>,
        restaurant: Option<Restaurant>,
    ) -> Result<ValidatedRestaurantPizza, AppError> {
        if self.pizza_id.is_some() && pizza.is_none() {
            self.pizza_errors.push("Pizza not found".into());
        }
        if self.restaurant_id.is_some() && restaurant.is_none() {
            self.restaurant_errors.push("Restaurant not found".into());
        }

        let errors: Vec<String> = self
            .price_errors
            .into_iter()
            .chain(self.pizza_errors)
            .chain(self.restaurant_errors)
            .collect();
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        match (self.price, pizza, restaurant) {
            (Some(price), Some(pizza), Some(restaurant)) => Ok(ValidatedRestaurantPizza {
                price,
                pizza,
                restaurant,
            }),
            _ => Err(AppError::Validation(vec!["Invalid data".into()])),
        }
    }
}

fn price_range_message() -> String {
    format!(
        "Price must be between {} and {}",
        PRICE_RANGE.start(),
        PRICE_RANGE.end()
    )
}

enum Field {
    Missing,
    NotInteger,
    /// Integral, but beyond what i64 holds.
    OutOfRange,
    Value(i64),
}

fn integer(v: Option<&Value>) -> Field {
    match v {
        None | Some(Value::Null) => Field::Missing,
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Field::Value(i)
            } else if n.is_u64() {
                Field::OutOfRange
            } else {
                // Literals past u64::MAX arrive as whole floats.
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() >= 9.2e18 => Field::OutOfRange,
                    _ => Field::NotInteger,
                }
            }
        }
        Some(_) => Field::NotInteger,
    }
}

fn require_text(value: &str, message: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(message.to_string());
    }
}

fn finish(errors: Vec<String>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}
