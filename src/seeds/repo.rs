use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Placeholder image for seeds created without one.
pub const DEFAULT_SEED_IMAGE: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Ccircle cx='50' cy='50' r='35' fill='%238B7355'/%3E%3Ccircle cx='50' cy='50' r='20' fill='%23A0826D'/%3E%3C/svg%3E";

/// Catalog record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Seed {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
    pub image: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const SEED_COLUMNS: &str = "id, name, category, price, quantity, image, created_at, updated_at";

impl Seed {
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Seed>> {
        let rows = sqlx::query_as::<_, Seed>(&format!(
            "SELECT {SEED_COLUMNS} FROM seeds ORDER BY created_at, id"
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// All filters optional; combined with AND. Name/category match as
    /// case-insensitive substrings, price bounds are inclusive.
    pub async fn search(
        db: &PgPool,
        name: Option<&str>,
        category: Option<&str>,
        min_price: Option<f64>,
        max_price: Option<f64>,
    ) -> anyhow::Result<Vec<Seed>> {
        let rows = sqlx::query_as::<_, Seed>(&format!(
            r#"
            SELECT {SEED_COLUMNS}
            FROM seeds
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR category ILIKE '%' || $2 || '%')
              AND ($3::float8 IS NULL OR price >= $3)
              AND ($4::float8 IS NULL OR price <= $4)
            ORDER BY created_at, id
            "#
        ))
        .bind(name)
        .bind(category)
        .bind(min_price)
        .bind(max_price)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Seed>> {
        let seed =
            sqlx::query_as::<_, Seed>(&format!("SELECT {SEED_COLUMNS} FROM seeds WHERE id = $1"))
                .bind(id)
                .fetch_optional(db)
                .await?;
        Ok(seed)
    }

    pub async fn create(
        db: &PgPool,
        name: &str,
        category: &str,
        price: f64,
        quantity: i32,
        image: &str,
    ) -> anyhow::Result<Seed> {
        let seed = sqlx::query_as::<_, Seed>(&format!(
            r#"
            INSERT INTO seeds (name, category, price, quantity, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SEED_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(category)
        .bind(price)
        .bind(quantity)
        .bind(image)
        .fetch_one(db)
        .await?;
        Ok(seed)
    }

    /// Partial update: NULL binds keep the stored value, updated_at always
    /// refreshes.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_partial(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        category: Option<&str>,
        price: Option<f64>,
        quantity: Option<i32>,
        image: Option<&str>,
    ) -> anyhow::Result<Option<Seed>> {
        let seed = sqlx::query_as::<_, Seed>(&format!(
            r#"
            UPDATE seeds
            SET name = COALESCE($2, name),
                category = COALESCE($3, category),
                price = COALESCE($4, price),
                quantity = COALESCE($5, quantity),
                image = COALESCE($6, image),
                updated_at = now()
            WHERE id = $1
            RETURNING {SEED_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(category)
        .bind(price)
        .bind(quantity)
        .bind(image)
        .fetch_optional(db)
        .await?;
        Ok(seed)
    }

    /// Returns false when no row matched.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM seeds WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Conditional single-row decrement. The quantity > 0 check and the
    /// decrement are one statement, so concurrent purchasers serialize on
    /// the row lock and quantity can never go negative. None means the row
    /// exists but is out of stock, or does not exist at all; the caller
    /// disambiguates.
    pub async fn purchase(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Seed>> {
        let seed = sqlx::query_as::<_, Seed>(&format!(
            r#"
            UPDATE seeds
            SET quantity = quantity - 1, updated_at = now()
            WHERE id = $1 AND quantity > 0
            RETURNING {SEED_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(seed)
    }

    pub async fn restock(db: &PgPool, id: Uuid, quantity: i32) -> anyhow::Result<Option<Seed>> {
        let seed = sqlx::query_as::<_, Seed>(&format!(
            r#"
            UPDATE seeds
            SET quantity = quantity + $2, updated_at = now()
            WHERE id = $1
            RETURNING {SEED_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(quantity)
        .fetch_optional(db)
        .await?;
        Ok(seed)
    }
}

// Run with `cargo test -- --ignored` against a disposable database.
#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    async fn test_pool() -> Option<PgPool> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .ok()?;
        sqlx::migrate!("./migrations").run(&pool).await.ok()?;
        Some(pool)
    }

    #[tokio::test]
    #[ignore = "needs a live database via DATABASE_URL"]
    async fn purchase_at_zero_leaves_row_unchanged() {
        let Some(db) = test_pool().await else {
            return;
        };
        let seed = Seed::create(&db, "Last In Stock", "Test", 1.50, 1, DEFAULT_SEED_IMAGE)
            .await
            .expect("create");

        let bought = Seed::purchase(&db, seed.id)
            .await
            .expect("purchase")
            .expect("in stock");
        assert_eq!(bought.quantity, 0);

        // At zero the conditional decrement matches nothing and nothing
        // mutates, not even updated_at.
        let denied = Seed::purchase(&db, seed.id).await.expect("purchase");
        assert!(denied.is_none());
        let unchanged = Seed::find_by_id(&db, seed.id)
            .await
            .expect("lookup")
            .expect("still present");
        assert_eq!(unchanged.quantity, 0);
        assert_eq!(unchanged.updated_at, bought.updated_at);

        assert!(Seed::delete(&db, seed.id).await.expect("delete"));
    }

    #[tokio::test]
    #[ignore = "needs a live database via DATABASE_URL"]
    async fn purchase_restock_delete_walkthrough() {
        let Some(db) = test_pool().await else {
            return;
        };
        let seed = Seed::create(&db, "Walkthrough Seed", "Test", 1.50, 50, DEFAULT_SEED_IMAGE)
            .await
            .expect("create");

        let bought = Seed::purchase(&db, seed.id)
            .await
            .expect("purchase")
            .expect("in stock");
        assert_eq!(bought.quantity, 49);

        // Restock adds exactly n.
        let restocked = Seed::restock(&db, seed.id, 50)
            .await
            .expect("restock")
            .expect("exists");
        assert_eq!(restocked.quantity, 99);

        assert!(Seed::delete(&db, seed.id).await.expect("delete"));
        assert!(Seed::find_by_id(&db, seed.id)
            .await
            .expect("lookup")
            .is_none());
        // Gone rows look the same as out-of-stock to purchase; the handler
        // disambiguates with a follow-up lookup.
        assert!(Seed::purchase(&db, seed.id).await.expect("purchase").is_none());
        assert!(Seed::restock(&db, seed.id, 10).await.expect("restock").is_none());
    }
}
