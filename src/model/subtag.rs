use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct Subtag {
    pub id: i64,
    pub name: String,
}
