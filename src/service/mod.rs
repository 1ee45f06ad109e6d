//! Request validation ahead of persistence.

mod validation;
pub use validation::{PendingRestaurantPizza, RequestValidator, ValidatedRestaurantPizza, PRICE_RANGE};
