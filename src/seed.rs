//! Sample data: three restaurants, three pizzas and six restaurant_pizzas.

use crate::error::{AppError, ConfigError};
use crate::models::{NewPizza, NewRestaurant, Pizza, Restaurant, RestaurantPizzaRequest};
use crate::service::RequestValidator;
use crate::store::PizzaStore;
use serde_json::json;

const RESTAURANTS: &[(&str, &str)] = &[
    ("Pizza Palace", "123 Main St"),
    ("Slice of Heaven", "456 Oak Ave"),
    ("Pizza Paradise", "789 Pine Rd"),
];

const PIZZAS: &[(&str, &str)] = &[
    ("Margherita", "Dough, Tomato Sauce, Mozzarella, Basil"),
    ("Pepperoni", "Dough, Tomato Sauce, Mozzarella, Pepperoni"),
    (
        "Vegetarian",
        "Dough, Tomato Sauce, Mozzarella, Bell Peppers, Mushrooms, Onions",
    ),
];

/// (price, restaurant index, pizza index) into the tables above.
const OFFERS: &[(i32, usize, usize)] = &[(10, 0, 0), (12, 0, 1), (11, 1, 0), (13, 1, 2), (12, 2, 1), (14, 2, 2)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Replace all data with the sample set.
pub async fn seed_database(store: &dyn PizzaStore) -> Result<SeedSummary, AppError> {
    store.clear().await?;

    let mut restaurants = Vec::with_capacity(RESTAURANTS.len());
    for (name, address) in RESTAURANTS {
        let restaurant = store
            .create_restaurant(NewRestaurant {
                name: (*name).into(),
                address: (*address).into(),
            })
            .await?;
        restaurants.push(restaurant);
    }

    let mut pizzas = Vec::with_capacity(PIZZAS.len());
    for (name, ingredients) in PIZZAS {
        let pizza = store
            .create_pizza(NewPizza {
                name: (*name).into(),
                ingredients: (*ingredients).into(),
            })
            .await?;
        pizzas.push(pizza);
    }

    for &(price, r, p) in OFFERS {
        let (restaurant, pizza) = offer_rows(&restaurants, &pizzas, r, p)?;
        let request = RestaurantPizzaRequest {
            price: Some(json!(price)),
            pizza_id: Some(json!(pizza.id)),
            restaurant_id: Some(json!(restaurant.id)),
        };
        store
            .create_restaurant_pizza(RequestValidator::restaurant_pizza(&request))
            .await?;
    }

    let summary = SeedSummary {
        restaurants: restaurants.len(),
        pizzas: pizzas.len(),
        restaurant_pizzas: OFFERS.len(),
    };
    tracing::info!(?summary, "seeded");
    Ok(summary)
}

fn offer_rows<'a>(
    restaurants: &'a [Restaurant],
    pizzas: &'a [Pizza],
    r: usize,
    p: usize,
) -> Result<(&'a Restaurant, &'a Pizza), AppError> {
    match (restaurants.get(r), pizzas.get(p)) {
        (Some(restaurant), Some(pizza)) => Ok((restaurant, pizza)),
        _ => Err(ConfigError::Seed(format!("offer refers to missing row ({r}, {p})")).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offers_point_at_seeded_rows() {
        for &(price, r, p) in OFFERS {
            assert!(r < RESTAURANTS.len() && p < PIZZAS.len());
            assert!((1..=30).contains(&price));
        }
    }

    #[test]
    fn missing_offer_row_is_a_config_error() {
        let err = offer_rows(&[], &[], 0, 0).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Seed(_))), "unexpected error: {err:?}");
    }
}
