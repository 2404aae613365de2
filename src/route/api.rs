use crate::errors::ApiResult;
use crate::model::question::{InfoResponse, Question, SubmitRequest, SubmitResponse};
use crate::model::report::Report;
use crate::service::report_service::ReportService;
use crate::util::common::{format_timestamp, html_escape, Pipe};
use crate::util::extractor::{Json, ValidatedForm};
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit_question))
        .route("/get-info", get(get_info))
        .route("/generate-pdf", get(generate_pdf))
}

async fn submit_question(
    State(state): State<AppState>,
    ValidatedForm(req): ValidatedForm<SubmitRequest>,
) -> ApiResult<Json<SubmitResponse>> {
    Question::create(&state.db, &req).await?;

    Json(SubmitResponse {
        message: "Question and response saved successfully!".to_string(),
    })
    .pipe(Ok)
}

/// Returns the most recent questions as a ready-to-embed HTML fragment,
/// wrapped in JSON. The index page drops it into the document as-is, so
/// every stored field is escaped here.
async fn get_info(State(state): State<AppState>) -> ApiResult<Json<InfoResponse>> {
    let questions = Question::recent(&state.db, state.config.recent_limit).await?;

    Json(InfoResponse {
        info: render_info_fragment(&questions),
    })
    .pipe(Ok)
}

fn render_info_fragment(questions: &[Question]) -> String {
    let mut info = String::new();
    for question in questions {
        let row = &question.row;
        info.push_str("<div>");
        info.push_str(&format!(
            "<p><strong>Category:</strong> {}</p>",
            html_escape(&row.category)
        ));
        info.push_str(&format!(
            "<p><strong>Question:</strong> {}</p>",
            html_escape(&row.question_text)
        ));
        info.push_str(&format!(
            "<p><strong>Response:</strong> {}</p>",
            html_escape(row.response_text.as_deref().unwrap_or(""))
        ));
        info.push_str(&format!(
            "<p><strong>Subtags:</strong> {}</p>",
            html_escape(&question.subtags.join(", "))
        ));
        info.push_str(&format!(
            "<p><strong>Asked on:</strong> {}</p>",
            format_timestamp(row.created_at)
        ));
        info.push_str("</div><hr>");
    }
    info
}

/// Builds the full report, writes it under the configured output directory
/// and streams it back as a download.
async fn generate_pdf(State(state): State<AppState>) -> ApiResult<Response> {
    let report = Report::assemble(&state.db).await?;

    let service = ReportService::new(state.config.report.clone());
    let (path, filename) = service.write(&report).await?;

    let file = File::open(&path).await?;
    let stream = ReaderStream::new(file);

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    Ok((headers, Body::from_stream(stream)).into_response())
}
