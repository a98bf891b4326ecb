use anyhow::Context;
use sqlx::PgPool;
use tracing::info;

struct DefaultSeed {
    name: &'static str,
    category: &'static str,
    price: f64,
    quantity: i32,
    image: &'static str,
}

const DEFAULT_SEEDS: &[DefaultSeed] = &[
    DefaultSeed {
        name: "Sunflower Seed",
        category: "Flower",
        price: 25.00,
        quantity: 50,
        image: "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Ccircle cx='50' cy='50' r='40' fill='%23FFD700'/%3E%3C/svg%3E",
    },
    DefaultSeed {
        name: "Pumpkin Seed",
        category: "Vegetable",
        price: 20.00,
        quantity: 60,
        image: "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Cellipse cx='50' cy='50' rx='35' ry='38' fill='%23FF8C00'/%3E%3C/svg%3E",
    },
    DefaultSeed {
        name: "Sesame Seed",
        category: "Herb",
        price: 45.00,
        quantity: 40,
        image: "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Ccircle cx='50' cy='50' r='8' fill='%23F5DEB3'/%3E%3C/svg%3E",
    },
    DefaultSeed {
        name: "Chia Seed",
        category: "Superfood",
        price: 30.00,
        quantity: 55,
        image: "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Ccircle cx='50' cy='50' r='35' fill='%23333333'/%3E%3C/svg%3E",
    },
    DefaultSeed {
        name: "Flaxseed",
        category: "Superfood",
        price: 15.00,
        quantity: 80,
        image: "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Cellipse cx='50' cy='50' rx='15' ry='30' fill='%23CD853F'/%3E%3C/svg%3E",
    },
    DefaultSeed {
        name: "Quinoa Seed",
        category: "Grain",
        price: 35.00,
        quantity: 45,
        image: "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Ccircle cx='50' cy='50' r='30' fill='%23F5F5DC'/%3E%3C/svg%3E",
    },
    DefaultSeed {
        name: "Mustard Seed",
        category: "Spice",
        price: 40.00,
        quantity: 35,
        image: "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Ccircle cx='50' cy='50' r='35' fill='%23B8860B'/%3E%3C/svg%3E",
    },
    DefaultSeed {
        name: "Cumin Seed",
        category: "Spice",
        price: 28.00,
        quantity: 50,
        image: "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'%3E%3Crect x='20' y='40' width='60' height='20' fill='%238B7355'/%3E%3C/svg%3E",
    },
];

/// Insert the default catalog when the table is empty. Runs in one
/// transaction so a partial failure leaves nothing behind.
pub async fn seed_defaults(db: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM seeds")
        .fetch_one(db)
        .await
        .context("count seeds")?;
    if count > 0 {
        info!(count, "catalog already populated, skipping defaults");
        return Ok(());
    }

    let mut tx = db.begin().await.context("begin tx")?;
    for s in DEFAULT_SEEDS {
        sqlx::query(
            r#"
            INSERT INTO seeds (name, category, price, quantity, image)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(s.name)
        .bind(s.category)
        .bind(s.price)
        .bind(s.quantity)
        .bind(s.image)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("insert default seed {}", s.name))?;
    }
    tx.commit().await.context("commit tx")?;

    info!(inserted = DEFAULT_SEEDS.len(), "seeded default catalog");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_satisfy_catalog_invariants() {
        for s in DEFAULT_SEEDS {
            assert!(!s.name.is_empty() && s.name.len() <= 100);
            assert!(!s.category.is_empty() && s.category.len() <= 50);
            assert!(s.price > 0.0);
            assert!(s.quantity >= 0);
            assert!(s.image.len() <= 500);
        }
    }

    #[test]
    fn default_names_are_unique() {
        let mut names: Vec<_> = DEFAULT_SEEDS.iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), DEFAULT_SEEDS.len());
    }
}
