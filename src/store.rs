//! Persistence seam and its PostgreSQL implementation.
//!
//! Handlers only see [`PizzaStore`]. [`PgStore`] takes a pooled connection or
//! transaction per call and gives it back on drop, so every exit path,
//! including `?` on an error, releases it (and rolls back an open transaction).

use crate::error::{AppError, ConfigError};
use crate::models::{NewPizza, NewRestaurant, Pizza, Restaurant, RestaurantPizza, RestaurantPizzaDetail};
use crate::service::{PendingRestaurantPizza, RequestValidator};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

#[async_trait]
pub trait PizzaStore: Send + Sync {
    /// Round trip to the backing database (readiness).
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError>;

    /// Restaurant and the pizzas it offers, one entry per join record in creation order.
    async fn restaurant_with_pizzas(&self, id: i32) -> Result<Option<(Restaurant, Vec<Pizza>)>, AppError>;

    /// Delete a restaurant and its join records. Returns false when no such restaurant exists.
    async fn delete_restaurant(&self, id: i32) -> Result<bool, AppError>;

    async fn list_pizzas(&self) -> Result<Vec<Pizza>, AppError>;

    async fn create_restaurant(&self, new: NewRestaurant) -> Result<Restaurant, AppError>;

    async fn create_pizza(&self, new: NewPizza) -> Result<Pizza, AppError>;

    /// Resolve references, finish validation and insert, atomically.
    async fn create_restaurant_pizza(
        &self,
        pending: PendingRestaurantPizza,
    ) -> Result<RestaurantPizzaDetail, AppError>;

    /// Remove every row and restart id generation.
    async fn clear(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(PgStore { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const SELECT_RESTAURANT: &str = "SELECT id, name, address FROM restaurants WHERE id = $1";
const LOCK_RESTAURANT: &str = "SELECT id, name, address FROM restaurants WHERE id = $1 FOR KEY SHARE";
const LOCK_PIZZA: &str = "SELECT id, name, ingredients FROM pizzas WHERE id = $1 FOR KEY SHARE";

#[async_trait]
impl PizzaStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        let rows = sqlx::query_as::<_, Restaurant>("SELECT id, name, address FROM restaurants ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn restaurant_with_pizzas(&self, id: i32) -> Result<Option<(Restaurant, Vec<Pizza>)>, AppError> {
        let mut conn = self.pool.acquire().await?;
        tracing::debug!(restaurant_id = id, "load restaurant");
        let Some(restaurant) = sqlx::query_as::<_, Restaurant>(SELECT_RESTAURANT)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };
        let pizzas = sqlx::query_as::<_, Pizza>(
            r#"
            SELECT p.id, p.name, p.ingredients
            FROM restaurant_pizzas rp
            JOIN pizzas p ON p.id = rp.pizza_id
            WHERE rp.restaurant_id = $1
            ORDER BY rp.id
            "#,
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(Some((restaurant, pizzas)))
    }

    async fn delete_restaurant(&self, id: i32) -> Result<bool, AppError> {
        // restaurant_pizzas rows go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(restaurant_id = id, rows = result.rows_affected(), "delete restaurant");
        Ok(result.rows_affected() > 0)
    }

    async fn list_pizzas(&self) -> Result<Vec<Pizza>, AppError> {
        let rows = sqlx::query_as::<_, Pizza>("SELECT id, name, ingredients FROM pizzas ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_restaurant(&self, new: NewRestaurant) -> Result<Restaurant, AppError> {
        RequestValidator::restaurant(&new)?;
        let row = sqlx::query_as::<_, Restaurant>(
            "INSERT INTO restaurants (name, address) VALUES ($1, $2) RETURNING id, name, address",
        )
        .bind(&new.name)
        .bind(&new.address)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_pizza(&self, new: NewPizza) -> Result<Pizza, AppError> {
        RequestValidator::pizza(&new)?;
        let row = sqlx::query_as::<_, Pizza>(
            "INSERT INTO pizzas (name, ingredients) VALUES ($1, $2) RETURNING id, name, ingredients",
        )
        .bind(&new.name)
        .bind(&new.ingredients)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_restaurant_pizza(
        &self,
        pending: PendingRestaurantPizza,
    ) -> Result<RestaurantPizzaDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        // Referenced rows stay locked against deletion until commit.
        let pizza = match pending.pizza_id {
            Some(id) => {
                sqlx::query_as::<_, Pizza>(LOCK_PIZZA)
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?
            }
            None => None,
        };
        let restaurant = match pending.restaurant_id {
            Some(id) => {
                sqlx::query_as::<_, Restaurant>(LOCK_RESTAURANT)
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?
            }
            None => None,
        };

        let valid = pending.resolve(pizza, restaurant)?;
        let record = sqlx::query_as::<_, RestaurantPizza>(
            r#"
            INSERT INTO restaurant_pizzas (price, pizza_id, restaurant_id)
            VALUES ($1, $2, $3)
            RETURNING id, price, pizza_id, restaurant_id
            "#,
        )
        .bind(valid.price)
        .bind(valid.pizza.id)
        .bind(valid.restaurant.id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        tracing::debug!(id = record.id, "created restaurant_pizza");

        Ok(RestaurantPizzaDetail {
            record,
            pizza: valid.pizza,
            restaurant: valid.restaurant,
        })
    }

    async fn clear(&self) -> Result<(), AppError> {
        sqlx::query("TRUNCATE restaurant_pizzas, restaurants, pizzas RESTART IDENTITY")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Create the database named in `database_url` if it does not exist yet.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| {
            tracing::error!(error = %e, "invalid DATABASE_URL");
            invalid_database_url(database_url)
        })?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn invalid_database_url(url: &str) -> AppError {
    AppError::Config(ConfigError::Invalid {
        key: "DATABASE_URL",
        value: url.to_string(),
    })
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url.rfind('/').ok_or_else(|| invalid_database_url(url))? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
