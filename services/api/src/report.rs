use crate::infra::{build_lead_service, parse_date, LeadSources};
use chrono::{Local, NaiveDate};
use clap::Args;
use lead_triage::config::AppConfig;
use lead_triage::error::AppError;
use lead_triage::workflows::leads::filter::{from_query_string, InMemoryFilterSlot};
use lead_triage::workflows::leads::listing::filter_leads;
use lead_triage::workflows::leads::metrics::views::CategoryCount;
use lead_triage::workflows::leads::{
    CsvExport, DateWindow, Grouping, JsonFileStore, LeadTriageService, MetricsSnapshot,
    ScoredAssessment,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct SourceArgs {
    /// Lead document file (JSON array). Defaults to LEADS_DATA_PATH.
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
    /// Scoring configuration file. Defaults to LEADS_SCORING_CONFIG.
    #[arg(long)]
    pub(crate) scoring_config: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Only print the first N leads
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Filter query in the dashboard URL format, e.g. `status=HOT&sector=Varejo`
    #[arg(long)]
    pub(crate) query: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// First submission date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) from: Option<NaiveDate>,
    /// Last submission date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) to: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Filter query in the dashboard URL format
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Directory the CSV files are written to
    #[arg(long, default_value = ".")]
    pub(crate) out_dir: PathBuf,
    /// Also write the sector, revenue, and maturity reports
    #[arg(long)]
    pub(crate) with_reports: bool,
}

type CliService = LeadTriageService<JsonFileStore, InMemoryFilterSlot>;

// The CLI never touches the service's persisted filter slot.
fn cli_service(source: SourceArgs) -> Result<Arc<CliService>, AppError> {
    let config = AppConfig::load()?;
    let sources = LeadSources::from_config(&config.leads)
        .with_overrides(source.data, source.scoring_config);
    build_lead_service(&sources, Arc::new(InMemoryFilterSlot::default()))
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        source,
        limit,
        query,
    } = args;

    let service = cli_service(source)?;
    let leads = service.cache().leads()?;
    let filters = from_query_string(query.as_deref().unwrap_or_default());
    let matched = filter_leads(&leads, &filters);

    let shown = limit.unwrap_or(matched.len()).min(matched.len());
    println!(
        "Lead scores ({shown} shown, {} matching, {} total)",
        matched.len(),
        leads.len()
    );
    for (rank, lead) in matched.iter().take(shown).enumerate() {
        println!("{:>4}. {}", rank + 1, score_line(lead));
    }

    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs { source, from, to } = args;

    let service = cli_service(source)?;
    let window = DateWindow::new(from, to);
    let snapshot = service.metrics(Some(&window))?;
    render_snapshot(&snapshot, &window);

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs {
        source,
        query,
        out_dir,
        with_reports,
    } = args;

    let service = cli_service(source)?;
    let today = Local::now().date_naive();

    std::fs::create_dir_all(&out_dir)?;
    let export = service.export_leads(Some(query.as_deref().unwrap_or_default()), today)?;
    println!("wrote {}", write_export(&out_dir, &export)?.display());

    if with_reports {
        for grouping in [Grouping::Sector, Grouping::Revenue, Grouping::Maturity] {
            match service.export_report(grouping, today)? {
                Some(export) => println!("wrote {}", write_export(&out_dir, &export)?.display()),
                None => println!("skipped {} report: no leads", grouping.slug()),
            }
        }
    }

    Ok(())
}

fn write_export(dir: &Path, export: &CsvExport) -> Result<PathBuf, AppError> {
    let path = dir.join(&export.filename);
    std::fs::write(&path, &export.content)?;
    Ok(path)
}

fn score_line(lead: &ScoredAssessment) -> String {
    let record = &lead.record;
    format!(
        "{:>3} {:<4} | {} | {} | {}",
        lead.score,
        lead.flag.label(),
        record.company.as_deref().unwrap_or("-"),
        record.role.as_deref().unwrap_or("-"),
        record.sector.as_deref().unwrap_or("-"),
    )
}

fn render_snapshot(snapshot: &MetricsSnapshot, window: &DateWindow) {
    let bound = |date: Option<NaiveDate>| {
        date.map(|date| date.to_string())
            .unwrap_or_else(|| "open".to_string())
    };
    println!(
        "Lead metrics ({} to {})",
        bound(window.start),
        bound(window.end)
    );
    println!(
        "- {} leads | average score {:.1}",
        snapshot.total, snapshot.average_score
    );
    println!(
        "- HOT {} | WARM {} | COLD {}",
        snapshot.temperature.hot, snapshot.temperature.warm, snapshot.temperature.cold
    );

    println!("Score distribution:");
    for bucket in &snapshot.score_buckets {
        println!("  - {:>6}: {}", bucket.name, bucket.value);
    }

    render_counts("Sectors", &snapshot.sector);
    render_counts("Annual revenue", &snapshot.revenue);
    render_counts("Declared maturity", &snapshot.maturity);
}

fn render_counts(title: &str, entries: &[CategoryCount]) {
    println!("{title}:");
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in entries {
        println!("  - {}: {}", entry.name, entry.value);
    }
}
