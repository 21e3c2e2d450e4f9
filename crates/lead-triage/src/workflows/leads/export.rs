use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;

use super::domain::ScoredAssessment;
use super::metrics::views::{Grouping, MetricsSnapshot};

/// File name prefix of the lead table export.
pub const LEADS_EXPORT_PREFIX: &str = "leads_xcore";

const LEADS_HEADER: [&str; 6] = ["Empresa", "Email", "Receita Anual", "Setor", "Score", "Status"];
const GROUPING_HEADER: [&str; 2] = ["Categoria", "Quantidade"];

/// Rendered CSV document plus the file name offered for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv buffer: {0}")]
    Flush(#[from] std::io::Error),
    #[error("csv output is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}_{}.csv", date.format("%Y-%m-%d"))
}

/// Render the filtered lead table. Every data field is quoted; the Score
/// column carries the form's base score, not the derived one.
pub fn export_leads_csv<'a, I>(leads: I, date: NaiveDate) -> Result<CsvExport, ExportError>
where
    I: IntoIterator<Item = &'a ScoredAssessment>,
{
    let rows = leads.into_iter().map(|lead| {
        let record = &lead.record;
        vec![
            record.company.clone().unwrap_or_default(),
            record.email.clone().unwrap_or_default(),
            record.annual_revenue.clone().unwrap_or_default(),
            record.sector.clone().unwrap_or_default(),
            format_base_score(record.base_score),
            lead.flag.label().to_string(),
        ]
    });

    Ok(CsvExport {
        filename: export_filename(LEADS_EXPORT_PREFIX, date),
        content: render(&LEADS_HEADER, QuoteStyle::Always, rows)?,
    })
}

/// Render one categorical grouping of the snapshot. Empty groupings produce no file.
pub fn export_grouping_csv(
    snapshot: &MetricsSnapshot,
    grouping: Grouping,
    date: NaiveDate,
) -> Result<Option<CsvExport>, ExportError> {
    let entries = snapshot.grouping(grouping);
    if entries.is_empty() {
        return Ok(None);
    }

    let rows = entries
        .iter()
        .map(|entry| vec![entry.name.clone(), entry.value.to_string()]);

    Ok(Some(CsvExport {
        filename: export_filename(grouping.export_prefix(), date),
        content: render(&GROUPING_HEADER, QuoteStyle::NonNumeric, rows)?,
    }))
}

fn format_base_score(score: Option<f64>) -> String {
    match score {
        Some(score) if score != 0.0 => score.to_string(),
        _ => "0".to_string(),
    }
}

/// Header line is written bare; rows go through the csv writer. No trailing newline.
fn render<R>(header: &[&str], style: QuoteStyle, rows: R) -> Result<String, ExportError>
where
    R: Iterator<Item = Vec<String>>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        writer.write_record(&row)?;
    }

    let body = writer
        .into_inner()
        .map_err(|error| ExportError::Flush(error.into_error()))?;
    let body = String::from_utf8(body)?;

    let mut content = header.join(",");
    if !body.is_empty() {
        content.push('\n');
        content.push_str(body.trim_end_matches('\n'));
    }
    Ok(content)
}
