mod service;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

// Each test gets its own isolated in-memory database. A single connection
// is required: every pooled SQLite connection would otherwise see its own
// private ":memory:" instance.
pub async fn init_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("cannot open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("cannot migrate test database");

    pool
}
