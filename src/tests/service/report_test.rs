#[cfg(test)]
mod tests {
    use crate::tests::init_db;
    use intervue::config::ReportConfig;
    use intervue::model::question::{Question, SubmitRequest};
    use intervue::model::report::Report;
    use intervue::pdf;
    use intervue::service::report_service::ReportService;
    use std::process;

    async fn seed(pool: &sqlx::SqlitePool, question: &str, category: &str, subtags: &str) {
        Question::create(
            pool,
            &SubmitRequest {
                question: question.to_string(),
                response: Some(format!("answer to {}", question)),
                category: category.to_string(),
                subtags: Some(subtags.to_string()),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_assemble_groups_by_category_then_subtag() {
        let pool = init_db().await;

        seed(&pool, "q1", "coding", "arrays").await;
        seed(&pool, "q2", "coding", "arrays").await;
        seed(&pool, "q3", "coding", "graphs").await;
        seed(&pool, "q4", "behavioral", "teamwork").await;

        let report = Report::assemble(&pool).await.unwrap();

        // Categories alphabetical, subtags in creation order.
        let categories: Vec<&str> = report.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(categories, vec!["behavioral", "coding"]);

        let coding = &report.categories[1];
        let subtags: Vec<&str> = coding.subtags.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(subtags, vec!["arrays", "graphs"]);

        let arrays = &coding.subtags[0];
        assert_eq!(arrays.entries.len(), 2);
        assert_eq!(arrays.entries[0].question, "q1");
        assert_eq!(arrays.entries[0].answer, "answer to q1");
        assert_eq!(arrays.entries[1].question, "q2");
    }

    #[tokio::test]
    async fn test_assemble_empty_store() {
        let pool = init_db().await;

        let report = Report::assemble(&pool).await.unwrap();
        assert!(report.categories.is_empty());

        // An empty report still renders as a valid document.
        let bytes = pdf::render(&report);
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_question_in_two_subtags_appears_in_both_sections() {
        let pool = init_db().await;

        seed(&pool, "q1", "coding", "arrays, graphs").await;

        let report = Report::assemble(&pool).await.unwrap();
        let coding = &report.categories[0];
        assert_eq!(coding.subtags.len(), 2);
        assert_eq!(coding.subtags[0].entries[0].question, "q1");
        assert_eq!(coding.subtags[1].entries[0].question, "q1");
    }

    #[tokio::test]
    async fn test_missing_response_renders_as_empty_answer() {
        let pool = init_db().await;

        Question::create(
            &pool,
            &SubmitRequest {
                question: "unanswered".to_string(),
                response: None,
                category: "coding".to_string(),
                subtags: Some("arrays".to_string()),
            },
        )
        .await
        .unwrap();

        let report = Report::assemble(&pool).await.unwrap();
        assert_eq!(report.categories[0].subtags[0].entries[0].answer, "");
    }

    #[tokio::test]
    async fn test_write_creates_timestamped_file() {
        let pool = init_db().await;
        seed(&pool, "q1", "coding", "arrays").await;

        let report = Report::assemble(&pool).await.unwrap();

        let output_dir = std::env::temp_dir()
            .join(format!("intervue-report-test-{}", process::id()))
            .to_string_lossy()
            .into_owned();
        let service = ReportService::new(ReportConfig {
            output_dir: output_dir.clone(),
            filename_prefix: "Interview_review".to_string(),
        });

        let (path, filename) = service.write(&report).await.unwrap();

        assert!(filename.starts_with("Interview_review_"));
        assert!(filename.ends_with(".pdf"));

        let bytes = tokio::fs::read(&path).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        tokio::fs::remove_dir_all(&output_dir).await.ok();
    }
}
