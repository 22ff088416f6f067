//! PostgreSQL store
//!
//! - search: ILIKE with escaped metacharacters, so the term is a literal substring
//! - insert: foreign key violations surface as `DbError::Constraint`

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Category, NewQuestion, Question};

use super::{DbError, TriviaStore};

/// Store backed by a sqlx PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE metacharacters and wrap the term for substring matching.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn list_categories(&self) -> Result<Vec<Category>, DbError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"SELECT id, "type" FROM categories ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DbError> {
        let category = sqlx::query_as::<_, Category>(
            r#"SELECT id, "type" FROM categories WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn list_questions(&self) -> Result<Vec<Question>, DbError> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, DbError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE category = $1
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, DbError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE question ILIKE $1 ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    async fn get_question(&self, id: i64) -> Result<Option<Question>, DbError> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(question)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, DbError> {
        let inserted = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING id, question, answer, category, difficulty
            "#,
        )
        .bind(question.question())
        .bind(question.answer())
        .bind(question.category())
        .bind(question.difficulty())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let fk_violation = e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation());
            if fk_violation {
                DbError::Constraint(format!("unknown category {}", question.category()))
            } else {
                DbError::Sqlx(e)
            }
        })?;
        Ok(inserted)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_questions(&self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("van"), "%van%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern(r"c:\x"), r"%c:\\x%");
    }

    // Integration tests - run with DATABASE_URL set
    // cargo test -p trivia-server -- --ignored

    async fn store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        migrations::seed_categories(&pool).await.expect("seed failed");
        PgStore::new(pool)
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_delete_round_trip() {
        let store = store().await;
        let before = store.count_questions().await.unwrap();

        let new = NewQuestion::new("Which planet is known as the Red Planet?", "Mars", 1, 2)
            .unwrap();
        let created = store.insert_question(new).await.unwrap();
        assert_eq!(store.count_questions().await.unwrap(), before + 1);

        let found = store.search_questions("red PLANET").await.unwrap();
        assert!(found.iter().any(|q| q.id == created.id));

        assert!(store.delete_question(created.id).await.unwrap());
        assert!(store.get_question(created.id).await.unwrap().is_none());
        assert_eq!(store.count_questions().await.unwrap(), before);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_with_unknown_category_is_constraint_error() {
        let store = store().await;
        let new = NewQuestion::new("q", "a", 999_999, 1).unwrap();
        let err = store.insert_question(new).await.unwrap_err();
        assert!(matches!(err, DbError::Constraint(_)));
    }
}
