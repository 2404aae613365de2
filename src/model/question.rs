use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// which Rust types correspond to which sqlite column types:
// https://docs.rs/sqlx/latest/sqlx/sqlite/types/index.html
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct QuestionRow {
    pub id: i64,
    pub question_text: String,
    pub response_text: Option<String>,
    pub category: String,
    pub created_at: i64,
}

#[derive(Debug, Serialize, Clone)]
pub struct Question {
    #[serde(flatten)]
    pub row: QuestionRow,

    pub subtags: Vec<String>,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Self {
            row,
            subtags: vec![],
        }
    }
}

/// Form payload of `POST /submit`. The subtags field is a single
/// comma-separated string, split and trimmed server-side.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitRequest {
    #[validate(length(min = 1, max = 500, message = "can not be empty or longer than 500 chars"))]
    pub question: String,

    #[validate(length(max = 2000, message = "can not be longer than 2000 chars"))]
    pub response: Option<String>,

    #[validate(length(min = 1, max = 100, message = "can not be empty or longer than 100 chars"))]
    pub category: String,

    pub subtags: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub info: String,
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub id: i64,
    pub created_at: i64,
}
