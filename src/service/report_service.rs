use crate::config::ReportConfig;
use crate::errors::ApiResult;
use crate::model::question::Question;
use crate::model::report::{CategorySection, Report, ReportEntry, SubtagSection};
use crate::model::subtag::Subtag;
use crate::pdf;
use chrono::Local;
use sqlx::SqlitePool;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

impl Report {
    /// Groups every stored question into the category -> subtag -> entry
    /// tree the PDF writer renders. Categories come back alphabetical,
    /// subtags and questions in insertion order.
    pub async fn assemble(pool: &SqlitePool) -> ApiResult<Report> {
        let mut report = Report::default();

        for category in Question::categories(pool).await? {
            let mut section = CategorySection {
                name: category.clone(),
                subtags: vec![],
            };

            for subtag in Subtag::in_category(pool, &category).await? {
                let entries = Question::in_category_with_subtag(pool, &category, subtag.id)
                    .await?
                    .into_iter()
                    .map(|row| ReportEntry {
                        question: row.question_text,
                        answer: row.response_text.unwrap_or_default(),
                    })
                    .collect();

                section.subtags.push(SubtagSection {
                    name: subtag.name,
                    entries,
                });
            }

            report.categories.push(section);
        }

        Ok(report)
    }
}

pub struct ReportService {
    config: ReportConfig,
}

impl ReportService {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Renders the report and writes it to a timestamp-named file under the
    /// configured output directory. Returns the file path and its bare name.
    pub async fn write(&self, report: &Report) -> ApiResult<(PathBuf, String)> {
        fs::create_dir_all(&self.config.output_dir).await?;

        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let filename = format!("{}_{}.pdf", self.config.filename_prefix, timestamp);
        let path = PathBuf::from(&self.config.output_dir).join(&filename);

        let bytes = pdf::render(report);
        fs::write(&path, bytes).await?;

        info!("Report written to {}", path.display());
        Ok((path, filename))
    }
}
