// There are a couple approaches to take when implementing E2E tests. This
// approach adds tests on /src/tests, this way tests can reference modules
// inside the src folder. Another approach would be to have the tests in a
// /tests folder on the root of the project, to do this and be able to import
// modules from the src folder, modules need to be exported as a lib.
#[cfg(test)]
mod tests;

use intervue::util::common::load_dotenv;
use intervue::{create_app, AppState};
use tokio::net::TcpListener;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    load_dotenv();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or(format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(fmt::layer())
        .init();

    let app_state = AppState::new().await;

    let config = &app_state.config;
    debug!("Config:\n {:#?}", config);

    // This integrates database migrations into the application binary
    // to ensure the database is properly migrated during startup.
    let db = &app_state.db;
    if config.db.auto_migrate {
        debug!("Migrating database...");
        db.migrate().await.expect("Cannot migrate database");
    }

    let addr = format!("{}:{}", &config.http.ip, &config.http.port);
    let app = create_app(app_state).await;
    let listener = TcpListener::bind(&addr).await.unwrap();
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await.unwrap()
}
