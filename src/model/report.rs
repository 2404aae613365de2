/// In-memory shape of a generated report: all questions grouped by
/// category, then subtag. Assembled by the report service, consumed by
/// the PDF writer.
#[derive(Debug, Default)]
pub struct Report {
    pub categories: Vec<CategorySection>,
}

#[derive(Debug)]
pub struct CategorySection {
    pub name: String,
    pub subtags: Vec<SubtagSection>,
}

#[derive(Debug)]
pub struct SubtagSection {
    pub name: String,
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug)]
pub struct ReportEntry {
    pub question: String,
    pub answer: String,
}
