use chrono::NaiveDate;
use lead_triage::config::LeadsConfig;
use lead_triage::error::AppError;
use lead_triage::workflows::leads::filter::{FileFilterSlot, FilterSlot};
use lead_triage::workflows::leads::{
    JsonFileStore, LeadCache, LeadTriageService, ScoringConfig, ScoringEngine,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Sources the service is assembled from; CLI flags may override the configured paths.
#[derive(Debug, Clone)]
pub(crate) struct LeadSources {
    pub(crate) scoring_config: PathBuf,
    pub(crate) data: PathBuf,
    pub(crate) page_size: usize,
}

impl LeadSources {
    pub(crate) fn from_config(config: &LeadsConfig) -> Self {
        Self {
            scoring_config: config.scoring_config_path.clone(),
            data: config.data_path.clone(),
            page_size: config.page_size,
        }
    }

    pub(crate) fn with_overrides(
        mut self,
        data: Option<PathBuf>,
        scoring_config: Option<PathBuf>,
    ) -> Self {
        if let Some(data) = data {
            self.data = data;
        }
        if let Some(scoring_config) = scoring_config {
            self.scoring_config = scoring_config;
        }
        self
    }
}

pub(crate) fn build_lead_service<F>(
    sources: &LeadSources,
    slot: Arc<F>,
) -> Result<Arc<LeadTriageService<JsonFileStore, F>>, AppError>
where
    F: FilterSlot + 'static,
{
    let scoring = ScoringConfig::load(&sources.scoring_config)?;
    info!(
        path = %sources.scoring_config.display(),
        hot_terms = scoring.role_tiers.hot.len(),
        warm_terms = scoring.role_tiers.warm.len(),
        "loaded scoring configuration"
    );

    let store = Arc::new(JsonFileStore::new(&sources.data));
    let cache = Arc::new(LeadCache::new(
        store,
        Arc::new(ScoringEngine::new(scoring)),
        sources.page_size,
    ));

    Ok(Arc::new(LeadTriageService::new(cache, slot)))
}

pub(crate) fn file_slot(dir: &Path) -> Arc<FileFilterSlot> {
    Arc::new(FileFilterSlot::new(dir))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_triage::workflows::leads::filter::InMemoryFilterSlot;

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert_eq!(
            parse_date(" 2025-03-07 "),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date"))
        );
        assert!(parse_date("07/03/2025").is_err());
    }

    #[test]
    fn overrides_replace_configured_paths() {
        let sources = LeadSources {
            scoring_config: PathBuf::from("scoring_config.json"),
            data: PathBuf::from("data/mock_leads.json"),
            page_size: 1000,
        }
        .with_overrides(Some(PathBuf::from("other.json")), None);

        assert_eq!(sources.data, PathBuf::from("other.json"));
        assert_eq!(sources.scoring_config, PathBuf::from("scoring_config.json"));
    }

    #[test]
    fn missing_scoring_config_fails_service_assembly() {
        let sources = LeadSources {
            scoring_config: PathBuf::from("/nonexistent/scoring_config.json"),
            data: PathBuf::from("data/mock_leads.json"),
            page_size: 10,
        };

        let result = build_lead_service(&sources, Arc::new(InMemoryFilterSlot::default()));
        assert!(matches!(result, Err(AppError::Scoring(_))));
    }
}
