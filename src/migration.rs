//! Schema bootstrap: restaurants, pizzas and the restaurant_pizzas join table.
//! Statements are idempotent and run in dependency order.

use crate::error::AppError;
use sqlx::PgPool;

const MIGRATIONS: &[(&str, &str)] = &[
    (
        "restaurants",
        r#"
        CREATE TABLE IF NOT EXISTS restaurants (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL CHECK (btrim(name) <> ''),
            address TEXT NOT NULL CHECK (btrim(address) <> '')
        )
        "#,
    ),
    (
        "pizzas",
        r#"
        CREATE TABLE IF NOT EXISTS pizzas (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL CHECK (btrim(name) <> ''),
            ingredients TEXT NOT NULL CHECK (btrim(ingredients) <> '')
        )
        "#,
    ),
    (
        "restaurant_pizzas",
        r#"
        CREATE TABLE IF NOT EXISTS restaurant_pizzas (
            id SERIAL PRIMARY KEY,
            price INTEGER NOT NULL CHECK (price BETWEEN 1 AND 30),
            pizza_id INTEGER NOT NULL REFERENCES pizzas (id),
            restaurant_id INTEGER NOT NULL REFERENCES restaurants (id) ON DELETE CASCADE
        )
        "#,
    ),
    (
        "restaurant_pizzas_restaurant_id_idx",
        "CREATE INDEX IF NOT EXISTS restaurant_pizzas_restaurant_id_idx ON restaurant_pizzas (restaurant_id)",
    ),
    (
        "restaurant_pizzas_pizza_id_idx",
        "CREATE INDEX IF NOT EXISTS restaurant_pizzas_pizza_id_idx ON restaurant_pizzas (pizza_id)",
    ),
];

pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for (name, ddl) in MIGRATIONS {
        tracing::debug!(migration = name, "apply");
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!(count = MIGRATIONS.len(), "schema ready");
    Ok(())
}
