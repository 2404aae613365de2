use crate::errors::{bad_request, ApiResult};
use crate::model::question::{CreateResponse, Question, QuestionRow, SubmitRequest};
use crate::model::subtag::Subtag;
use crate::service::subtag_service::split_subtag_names;
use chrono::Utc;
use sqlx::{query, query_as, query_scalar, SqlitePool};
use std::collections::HashMap;

const MAX_SUBTAG_NAME_LEN: usize = 100;

impl Question {
    /// Persists a question together with its subtags in one transaction:
    /// resolve each name (creating missing subtag rows), then attach them.
    /// A failure anywhere rolls everything back, so no orphan subtags from
    /// a half-done submission.
    pub async fn create(pool: &SqlitePool, req: &SubmitRequest) -> ApiResult<CreateResponse> {
        let names = split_subtag_names(req.subtags.as_deref().unwrap_or(""));
        for name in &names {
            if name.chars().count() > MAX_SUBTAG_NAME_LEN {
                return Err(bad_request("Subtag name can not be longer than 100 chars"));
            }
        }

        let now = Utc::now().timestamp_millis();
        let mut tx = pool.begin().await?;

        let id = query_scalar::<_, i64>(
            r#"
            INSERT INTO question (question_text, response_text, category, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&req.question)
        .bind(&req.response)
        .bind(&req.category)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for name in &names {
            let subtag = Subtag::find_or_create(&mut tx, name).await?;

            query("INSERT OR IGNORE INTO subtags_questions (subtag_id, question_id) VALUES (?, ?)")
                .bind(subtag.id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(CreateResponse {
            id,
            created_at: now,
        })
    }

    /// The most recent `limit` questions, newest first. Ties on the
    /// millisecond timestamp fall back to id order.
    pub async fn recent(pool: &SqlitePool, limit: u32) -> ApiResult<Vec<Question>> {
        let rows = query_as::<_, QuestionRow>(
            r#"
            SELECT id, question_text, response_text, category, created_at
            FROM question
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let mut questions: Vec<Question> = rows.into_iter().map(Question::from).collect();
        Self::attach_subtags(pool, &mut questions).await?;

        Ok(questions)
    }

    /// Distinct categories across all questions, sorted alphabetically so
    /// report output is reproducible.
    pub async fn categories(pool: &SqlitePool) -> ApiResult<Vec<String>> {
        let categories =
            query_scalar::<_, String>("SELECT DISTINCT category FROM question ORDER BY category")
                .fetch_all(pool)
                .await?;

        Ok(categories)
    }

    /// Questions in a category carrying the given subtag, in insertion (id) order.
    pub async fn in_category_with_subtag(
        pool: &SqlitePool,
        category: &str,
        subtag_id: i64,
    ) -> ApiResult<Vec<QuestionRow>> {
        let rows = query_as::<_, QuestionRow>(
            r#"
            SELECT q.id, q.question_text, q.response_text, q.category, q.created_at
            FROM question q
            JOIN subtags_questions sq ON sq.question_id = q.id
            WHERE q.category = ? AND sq.subtag_id = ?
            ORDER BY q.id
            "#,
        )
        .bind(category)
        .bind(subtag_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_count(pool: &SqlitePool) -> ApiResult<i64> {
        let count = query_scalar::<_, i64>("SELECT COUNT(*) FROM question")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Fills in the subtag names of each question with a single query,
    /// preserving per-question attachment order.
    async fn attach_subtags(pool: &SqlitePool, questions: &mut [Question]) -> ApiResult<()> {
        if questions.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = questions.iter().map(|q| q.row.id).collect();
        let ids = serde_json::to_string(&ids).unwrap();

        let rows = query_as::<_, (i64, String)>(
            r#"
            SELECT sq.question_id, s.name
            FROM subtags_questions sq
            JOIN subtag s ON s.id = sq.subtag_id
            WHERE sq.question_id IN (SELECT value FROM json_each(?1))
            ORDER BY sq.rowid
            "#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        let mut by_question: HashMap<i64, Vec<String>> = HashMap::new();
        for (question_id, name) in rows {
            by_question.entry(question_id).or_default().push(name);
        }

        for question in questions.iter_mut() {
            question.subtags = by_question.remove(&question.row.id).unwrap_or_default();
        }

        Ok(())
    }
}
