use url::form_urlencoded;

use super::super::dates::parse_iso_date;
use super::{FilterState, ScoreRange, SCORE_MAX};

const LIST_DELIMITER: char = ',';

/// Query keys owned by the filter state.
pub const FILTER_KEYS: [&str; 9] = [
    "status", "sector", "revenue", "maturity", "search", "minScore", "maxScore", "from", "to",
];

/// Encode the state as a URL query string, omitting fields left at their default.
pub fn to_query_string(state: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (key, values) in [
        ("status", &state.status),
        ("sector", &state.sector),
        ("revenue", &state.revenue),
        ("maturity", &state.maturity),
    ] {
        if !values.is_empty() {
            serializer.append_pair(key, &values.join(","));
        }
    }

    if !state.search.is_empty() {
        serializer.append_pair("search", &state.search);
    }

    let defaults = ScoreRange::default();
    if state.score_range.min != defaults.min {
        serializer.append_pair("minScore", &state.score_range.min.to_string());
    }
    if state.score_range.max != defaults.max {
        serializer.append_pair("maxScore", &state.score_range.max.to_string());
    }

    if let Some(from) = state.date_range.from {
        serializer.append_pair("from", &from.format("%Y-%m-%d").to_string());
    }
    if let Some(to) = state.date_range.to {
        serializer.append_pair("to", &to.format("%Y-%m-%d").to_string());
    }

    serializer.finish()
}

/// Decode a URL query string. Absent or unreadable keys keep their default.
pub fn from_query_string(query: &str) -> FilterState {
    let mut state = FilterState::default();

    for (key, value) in form_urlencoded::parse(strip_question_mark(query).as_bytes()) {
        match key.as_ref() {
            "status" => state.status = split_list(&value),
            "sector" => state.sector = split_list(&value),
            "revenue" => state.revenue = split_list(&value),
            "maturity" => state.maturity = split_list(&value),
            "search" => state.search = value.into_owned(),
            "minScore" => {
                if let Some(min) = parse_score_bound(&value) {
                    state.score_range.min = min;
                }
            }
            "maxScore" => {
                if let Some(max) = parse_score_bound(&value) {
                    state.score_range.max = max;
                }
            }
            "from" => state.date_range.from = parse_iso_date(&value),
            "to" => state.date_range.to = parse_iso_date(&value),
            _ => {}
        }
    }

    state
}

/// True when the query string carries at least one filter key.
pub fn has_filter_keys(query: &str) -> bool {
    form_urlencoded::parse(strip_question_mark(query).as_bytes())
        .any(|(key, _)| FILTER_KEYS.contains(&key.as_ref()))
}

fn parse_score_bound(raw: &str) -> Option<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|bound| *bound <= SCORE_MAX)
}

fn strip_question_mark(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_DELIMITER)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}
