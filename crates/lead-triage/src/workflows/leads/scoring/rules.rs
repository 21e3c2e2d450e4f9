use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::super::domain::{LeadFlag, RoleTier};
use super::config::FlagThresholds;

/// Lowercase, trim, and strip diacritics so `Diretor de Operações` matches `operacoes`.
pub(crate) fn normalize_term(value: &str) -> String {
    value
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

pub(crate) fn normalize_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|term| normalize_term(term))
        .filter(|term| !term.is_empty())
        .collect()
}

fn contains_any(role: &str, terms: &[String]) -> bool {
    terms.iter().any(|term| role.contains(term.as_str()))
}

/// Hot terms are checked first; the first tier with a match wins.
pub(crate) fn role_tier(role: Option<&str>, hot: &[String], warm: &[String]) -> Option<RoleTier> {
    let role = normalize_term(role?);
    if role.is_empty() {
        return None;
    }

    if contains_any(&role, hot) {
        Some(RoleTier::Hot)
    } else if contains_any(&role, warm) {
        Some(RoleTier::Warm)
    } else {
        None
    }
}

pub(crate) fn flag_for(combined: f64, thresholds: &FlagThresholds) -> LeadFlag {
    if combined >= thresholds.hot_min {
        LeadFlag::Hot
    } else if combined >= thresholds.warm_min {
        LeadFlag::Warm
    } else {
        LeadFlag::Cold
    }
}

/// Round half-up, then clamp into the 0-100 score range.
pub(crate) fn round_score(combined: f64) -> u8 {
    if !combined.is_finite() {
        return 0;
    }
    (combined + 0.5).floor().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_term(value)
}
