use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Scoring rules loaded from `scoring_config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScoringConfigFile", into = "ScoringConfigFile")]
pub struct ScoringConfig {
    pub role_tiers: RoleTiers,
    pub weights: ScoreWeights,
    pub thresholds: FlagThresholds,
}

/// Role/title terms that mark a contact as high potential.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleTiers {
    pub hot: Vec<String>,
    pub warm: Vec<String>,
}

/// Linear-combination weights. Expected to sum to 1.0, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub role: f64,
    pub base_score: f64,
}

/// Minimum combined score for each temperature. COLD is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlagThresholds {
    pub hot_min: f64,
    pub warm_min: f64,
}

impl ScoringConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScoringConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ScoringConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScoringConfigError> {
        let file: ScoringConfigFile = serde_json::from_reader(reader)?;
        Self::try_from(file)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ScoringConfigError> {
        let file: ScoringConfigFile = serde_json::from_str(raw)?;
        Self::try_from(file)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("failed to read scoring config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("scoring config does not match the expected shape: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scoring config field `{field}` must be a finite number, got {value}")]
    InvalidNumber { field: &'static str, value: f64 },
}

// On-disk layout. Keys follow the shared config file consumed by the
// dashboard and the Python tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScoringConfigFile {
    cargos_alto_potencial: RoleTiersFile,
    regra_combinada: WeightsFile,
    faixas_pontuacao: BandsFile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoleTiersFile {
    hot: Vec<String>,
    warm: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WeightsFile {
    peso_cargo: f64,
    peso_pontuacao: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BandsFile {
    hot: BandFile,
    warm: BandFile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BandFile {
    min: f64,
}

fn finite(field: &'static str, value: f64) -> Result<f64, ScoringConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringConfigError::InvalidNumber { field, value })
    }
}

impl TryFrom<ScoringConfigFile> for ScoringConfig {
    type Error = ScoringConfigError;

    fn try_from(file: ScoringConfigFile) -> Result<Self, Self::Error> {
        Ok(Self {
            role_tiers: RoleTiers {
                hot: file.cargos_alto_potencial.hot,
                warm: file.cargos_alto_potencial.warm,
            },
            weights: ScoreWeights {
                role: finite("regra_combinada.peso_cargo", file.regra_combinada.peso_cargo)?,
                base_score: finite(
                    "regra_combinada.peso_pontuacao",
                    file.regra_combinada.peso_pontuacao,
                )?,
            },
            thresholds: FlagThresholds {
                hot_min: finite("faixas_pontuacao.hot.min", file.faixas_pontuacao.hot.min)?,
                warm_min: finite("faixas_pontuacao.warm.min", file.faixas_pontuacao.warm.min)?,
            },
        })
    }
}

impl From<ScoringConfig> for ScoringConfigFile {
    fn from(config: ScoringConfig) -> Self {
        Self {
            cargos_alto_potencial: RoleTiersFile {
                hot: config.role_tiers.hot,
                warm: config.role_tiers.warm,
            },
            regra_combinada: WeightsFile {
                peso_cargo: config.weights.role,
                peso_pontuacao: config.weights.base_score,
            },
            faixas_pontuacao: BandsFile {
                hot: BandFile {
                    min: config.thresholds.hot_min,
                },
                warm: BandFile {
                    min: config.thresholds.warm_min,
                },
            },
        }
    }
}
