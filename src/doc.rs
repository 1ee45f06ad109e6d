//! OpenAPI document for the resource routes.

use crate::error::{ErrorBody, ErrorsBody};
use crate::handlers;
use crate::models::RestaurantPizzaRequest;
use crate::views::{PizzaView, RestaurantDetail, RestaurantPizzaView, RestaurantSummary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Pizza Restaurants API"),
    paths(
        handlers::list_restaurants,
        handlers::get_restaurant,
        handlers::delete_restaurant,
        handlers::list_pizzas,
        handlers::create_restaurant_pizza,
    ),
    components(schemas(
        RestaurantSummary,
        RestaurantDetail,
        PizzaView,
        RestaurantPizzaView,
        RestaurantPizzaRequest,
        ErrorBody,
        ErrorsBody,
    )),
    tags(
        (name = "restaurants"),
        (name = "pizzas"),
        (name = "restaurant_pizzas"),
    )
)]
pub struct ApiDoc;
