use serde::{Deserialize, Serialize};

/// Label used when a lead did not answer the sector or revenue question.
pub const NOT_INFORMED: &str = "Não informado";
/// Label used when a lead did not pick a maturity level.
pub const MATURITY_NOT_INFORMED: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub value: usize,
}

/// Fixed score ranges shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBucket {
    UpTo30,
    UpTo60,
    UpTo80,
    UpTo100,
}

impl ScoreBucket {
    pub const fn ordered() -> [ScoreBucket; 4] {
        [Self::UpTo30, Self::UpTo60, Self::UpTo80, Self::UpTo100]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo30 => "0-30",
            Self::UpTo60 => "31-60",
            Self::UpTo80 => "61-80",
            Self::UpTo100 => "81-100",
        }
    }

    pub const fn for_score(score: u8) -> Self {
        match score {
            0..=30 => Self::UpTo30,
            31..=60 => Self::UpTo60,
            61..=80 => Self::UpTo80,
            _ => Self::UpTo100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBucketCount {
    pub bucket: ScoreBucket,
    pub name: &'static str,
    pub value: usize,
}

/// Point of the declared-maturity vs. score scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpectationPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub auto_level: String,
    pub score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TemperatureCounts {
    pub hot: usize,
    pub warm: usize,
    pub cold: usize,
}

impl TemperatureCounts {
    pub fn total(&self) -> usize {
        self.hot + self.warm + self.cold
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total: usize,
    pub average_score: f64,
    pub revenue: Vec<CategoryCount>,
    pub maturity: Vec<CategoryCount>,
    pub sector: Vec<CategoryCount>,
    pub score_buckets: Vec<ScoreBucketCount>,
    pub expectation: Vec<ExpectationPoint>,
    pub temperature: TemperatureCounts,
}

impl MetricsSnapshot {
    pub fn grouping(&self, grouping: Grouping) -> &[CategoryCount] {
        match grouping {
            Grouping::Sector => &self.sector,
            Grouping::Revenue => &self.revenue,
            Grouping::Maturity => &self.maturity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Categorical dimensions the snapshot groups leads by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    Sector,
    Revenue,
    Maturity,
}

impl Grouping {
    pub fn from_slug(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sector" | "setor" | "setores" => Some(Self::Sector),
            "revenue" | "receita" => Some(Self::Revenue),
            "maturity" | "maturidade" => Some(Self::Maturity),
            _ => None,
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Sector => "sector",
            Self::Revenue => "revenue",
            Self::Maturity => "maturity",
        }
    }

    /// Prefix of the aggregate CSV file name.
    pub const fn export_prefix(self) -> &'static str {
        match self {
            Self::Sector => "relatorio_setores",
            Self::Revenue => "relatorio_receita",
            Self::Maturity => "relatorio_maturidade",
        }
    }
}
