//! Repository for the `items` table.

use sqlx::PgPool;
use valuables_core::item::NewItem;
use valuables_core::types::DbId;

use crate::models::item::Item;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, category, brand, purchase_price, purchase_date, created_at, updated_at";

/// Provides CRUD operations for items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewItem) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (name, category, brand, purchase_price, purchase_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(&input.name)
            .bind(input.category.as_str())
            .bind(&input.brand)
            .bind(input.purchase_price)
            .bind(input.purchase_date)
            .fetch_one(pool)
            .await
    }

    /// Find an item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all items ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items ORDER BY id");
        sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
    }

    /// Write back the mutable fields and `updated_at` of an already merged
    /// item.
    ///
    /// Returns `None` if no row with `item.id` exists.
    pub async fn update(pool: &PgPool, item: &Item) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET
                name = $2,
                brand = $3,
                purchase_price = $4,
                updated_at = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.brand)
            .bind(item.purchase_price)
            .bind(item.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an item by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count items per stored category label.
    pub async fn count_by_category(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT category, COUNT(*) FROM items GROUP BY category ORDER BY category",
        )
        .fetch_all(pool)
        .await
    }
}
