//! Schema migrations and category seeding

use sqlx::PgPool;

use crate::models::DEFAULT_CATEGORIES;

use super::DbError;

/// Create the trivia tables if they do not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running trivia migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id BIGSERIAL PRIMARY KEY,
            "type" TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id BIGSERIAL PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            category BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
            difficulty BIGINT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category)")
        .execute(pool)
        .await?;

    tracing::info!("Trivia migrations complete");
    Ok(())
}

/// Insert the default categories, leaving existing rows untouched.
///
/// Returns the number of categories inserted.
pub async fn seed_categories(pool: &PgPool) -> Result<u64, DbError> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for (id, kind) in DEFAULT_CATEGORIES {
        inserted += sqlx::query(
            r#"INSERT INTO categories (id, "type") VALUES ($1, $2) ON CONFLICT (id) DO NOTHING"#,
        )
        .bind(id)
        .bind(kind)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    // Explicit ids bypass the sequence; move it past them.
    sqlx::query(
        "SELECT setval(pg_get_serial_sequence('categories', 'id'), (SELECT MAX(id) FROM categories))",
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(inserted, "Seeded default categories");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        run(&pool).await.expect("first run");
        run(&pool).await.expect("second run");

        seed_categories(&pool).await.expect("first seed");
        let again = seed_categories(&pool).await.expect("second seed");
        assert_eq!(again, 0);
    }
}
