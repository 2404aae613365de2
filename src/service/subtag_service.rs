use crate::errors::ApiResult;
use crate::model::subtag::Subtag;
use sqlx::{query_as, Sqlite, SqlitePool, Transaction};

impl Subtag {
    /// Resolves a subtag name to its row, creating the row if it does not
    /// exist yet. A single upsert statement, so two submissions racing on
    /// the same new name both land on the one row instead of duplicating it.
    pub async fn find_or_create(tx: &mut Transaction<'_, Sqlite>, name: &str) -> ApiResult<Subtag> {
        // DO NOTHING returns no row, so the no-op update forces RETURNING
        // to yield the existing one.
        let subtag = query_as::<_, Subtag>(
            r#"
            INSERT INTO subtag (name)
            VALUES (?1)
            ON CONFLICT(name) DO UPDATE SET name = excluded.name
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&mut **tx)
        .await?;

        Ok(subtag)
    }

    #[allow(dead_code)]
    pub async fn find_by_name(pool: &SqlitePool, name: &str) -> ApiResult<Option<Subtag>> {
        let subtag = query_as::<_, Subtag>("SELECT id, name FROM subtag WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await?;

        Ok(subtag)
    }

    pub async fn get_count(pool: &SqlitePool) -> ApiResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subtag")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Distinct subtags attached to at least one question in the category,
    /// in id (creation) order.
    pub async fn in_category(pool: &SqlitePool, category: &str) -> ApiResult<Vec<Subtag>> {
        let subtags = query_as::<_, Subtag>(
            r#"
            SELECT DISTINCT s.id, s.name
            FROM subtag s
            JOIN subtags_questions sq ON sq.subtag_id = s.id
            JOIN question q ON q.id = sq.question_id
            WHERE q.category = ?
            ORDER BY s.id
            "#,
        )
        .bind(category)
        .fetch_all(pool)
        .await?;

        Ok(subtags)
    }
}

/// Splits a raw comma-separated subtag string into trimmed, non-empty,
/// deduplicated names, preserving first-occurrence order.
pub fn split_subtag_names(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in raw.split(',') {
        let name = name.trim();
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
