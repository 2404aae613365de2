use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Router};
#[cfg(not(debug_assertions))]
use include_dir::{include_dir, Dir};
use minijinja::{context, Environment};
use tracing::error;

type HtmlResult = Result<Html<String>, HtmlError>;

pub fn create_routes() -> Router<AppState> {
    let mut env = Environment::new();
    load_templates(&mut env);

    Router::new().route("/", get(index)).layer(Extension(env))
}

async fn index(
    State(state): State<AppState>,
    Extension(env): Extension<Environment<'static>>,
) -> HtmlResult {
    let template = env.get_template("index.html")?;

    Ok(Html(template.render(context! {
        app_name => state.config.app_name.clone(),
    })?))
}

#[derive(Debug)]
enum HtmlError {
    TemplateError(minijinja::Error),
}

impl From<minijinja::Error> for HtmlError {
    fn from(err: minijinja::Error) -> Self {
        HtmlError::TemplateError(err)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        match self {
            HtmlError::TemplateError(err) => {
                error!("template error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(PAGE_500)).into_response()
            }
        }
    }
}

static PAGE_500: &str = include_str!("../../templates/500.html");

#[cfg(not(debug_assertions))]
static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

#[cfg(debug_assertions)]
fn load_templates(env: &mut Environment) {
    use minijinja::path_loader;
    // In development mode, use the file system to load templates in real-time
    env.set_loader(path_loader("templates"));
}

#[cfg(not(debug_assertions))]
fn load_templates(env: &mut Environment<'_>) {
    // In production mode, load templates from the embedded files using include_dir
    for file in TEMPLATES_DIR.files() {
        if let Some(name) = file.path().to_str() {
            let content =
                std::str::from_utf8(file.contents()).expect("Template is not valid utf-8");
            env.add_template(name, content)
                .unwrap_or_else(|e| panic!("Failed to add template {}: {}", name, e));
        }
    }
}
