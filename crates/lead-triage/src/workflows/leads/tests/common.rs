use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::leads::cache::LeadCache;
use crate::workflows::leads::domain::AssessmentRecord;
use crate::workflows::leads::filter::InMemoryFilterSlot;
use crate::workflows::leads::scoring::{
    FlagThresholds, RoleTiers, ScoreWeights, ScoringConfig, ScoringEngine,
};
use crate::workflows::leads::service::LeadTriageService;
use crate::workflows::leads::store::{AssessmentStore, StoreError, StorePage};

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig {
        role_tiers: RoleTiers {
            hot: vec!["Diretor".to_string(), "CEO".to_string(), "Sócio".to_string()],
            warm: vec!["Gerente".to_string(), "Coordenador".to_string()],
        },
        weights: ScoreWeights {
            role: 0.4,
            base_score: 0.6,
        },
        thresholds: FlagThresholds {
            hot_min: 70.0,
            warm_min: 40.0,
        },
    }
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(scoring_config())
}

/// Five leads covering every temperature and the missing-field cases.
///
/// Scored order: lead-1 (82 HOT), lead-2 (56 WARM), lead-4 (40 WARM),
/// lead-3 (30 COLD), lead-5 (12 COLD).
pub(super) fn fixture_records() -> Vec<AssessmentRecord> {
    let documents = json!([
        {
            "id": "lead-1",
            "data": "05/03/2025",
            "empresa": "Acme Ltda",
            "nome": "Maria Souza",
            "email": "maria@acme.com.br",
            "cargo": "Diretora Comercial",
            "pontuacaoTotalFinal": 70,
            "setor": "Indústria",
            "receitaAnual": "R$ 1M - 5M",
            "nivelMaturidadeSelecionado": "Avançado"
        },
        {
            "id": "lead-2",
            "data": "20/03/2025",
            "empresa": "Beta Comércio",
            "nome": "João Lima",
            "email": "joao@beta.com.br",
            "cargo": "Gerente de Vendas",
            "pontuacaoTotalFinal": 60,
            "setor": "Varejo",
            "receitaAnual": "Até R$ 1M",
            "nivelMaturidadeSelecionado": "Intermediário"
        },
        {
            "id": "lead-3",
            "data": "12/04/2025",
            "empresa": "Gamma Serviços",
            "nome": "Ana Prado",
            "pontuacaoTotalFinal": 50,
            "setor": "Varejo"
        },
        {
            "id": "lead-4",
            "empresa": "Delta",
            "nome": "Carlos Reis",
            "cargo": "CEO",
            "setor": "Serviços",
            "receitaAnual": "R$ 1M - 5M",
            "nivelMaturidadeSelecionado": "Inicial"
        },
        {
            "id": "lead-5",
            "data": "sem data",
            "nome": "Beatriz Ávila",
            "cargo": "Analista",
            "pontuacaoTotalFinal": "20",
            "receitaAnual": "Até R$ 1M",
            "nivelMaturidadeSelecionado": "Inicial"
        }
    ]);
    serde_json::from_value(documents).expect("fixture documents decode")
}

/// Store serving fixed records in pages, counting every fetch.
#[derive(Default)]
pub(super) struct MemoryStore {
    records: Vec<AssessmentRecord>,
    fetches: AtomicUsize,
}

impl MemoryStore {
    pub(super) fn new(records: Vec<AssessmentRecord>) -> Self {
        Self {
            records,
            fetches: AtomicUsize::new(0),
        }
    }

    pub(super) fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl AssessmentStore for MemoryStore {
    fn fetch_page(&self, limit: usize, cursor: Option<&str>) -> Result<StorePage, StoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let start = match cursor {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| StoreError::InvalidCursor(raw.to_string()))?,
            None => 0,
        };
        let end = (start + limit).min(self.records.len());
        Ok(StorePage {
            records: self.records[start..end].to_vec(),
            next_cursor: (end < self.records.len()).then(|| end.to_string()),
        })
    }
}

pub(super) struct UnavailableStore;

impl AssessmentStore for UnavailableStore {
    fn fetch_page(&self, _limit: usize, _cursor: Option<&str>) -> Result<StorePage, StoreError> {
        Err(StoreError::Unavailable("permission denied".to_string()))
    }
}

pub(super) fn cache_with<S: AssessmentStore + 'static>(
    store: Arc<S>,
    page_size: usize,
) -> Arc<LeadCache<S>> {
    Arc::new(LeadCache::new(store, Arc::new(engine()), page_size))
}

pub(super) fn build_service() -> (
    LeadTriageService<MemoryStore, InMemoryFilterSlot>,
    Arc<MemoryStore>,
    Arc<InMemoryFilterSlot>,
) {
    let store = Arc::new(MemoryStore::new(fixture_records()));
    let slot = Arc::new(InMemoryFilterSlot::default());
    let service = LeadTriageService::new(cache_with(store.clone(), 2), slot.clone());
    (service, store, slot)
}

pub(super) fn unavailable_service() -> LeadTriageService<UnavailableStore, InMemoryFilterSlot> {
    LeadTriageService::new(
        cache_with(Arc::new(UnavailableStore), 100),
        Arc::new(InMemoryFilterSlot::default()),
    )
}

pub(super) fn empty_service() -> LeadTriageService<MemoryStore, InMemoryFilterSlot> {
    LeadTriageService::new(
        cache_with(Arc::new(MemoryStore::new(Vec::new())), 100),
        Arc::new(InMemoryFilterSlot::default()),
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
