//! Trigger phrases that drive intent and metric detection.
//!
//! All phrases are lowercase and are looked up as plain substrings of the
//! lowercased question, so e.g. "vs" also fires inside "canvas".

use crate::query::Intent;

/// Phrases that mark a question about where the data comes from.
/// Checked before any intent in [INTENTS].
pub const SOURCE: &[&str] = &["source", "data came from", "where", "from where"];

/// Phrases that make the splitter look for a trailing data-source clause.
pub const SOURCE_CLAUSE: &[&str] = &[
    "where",
    "data came from",
    "source",
    "from where",
    "data source",
];

/// Intents in priority order: the first group with a hit wins.
pub const INTENTS: &[(Intent, &[&str])] = &[
    (
        Intent::Highest,
        &["highest", "maximum", "most", "top", "largest", "best"],
    ),
    (
        Intent::Lowest,
        &["lowest", "minimum", "least", "smallest", "worst"],
    ),
    (
        Intent::Compare,
        &[
            "compare",
            "comparison",
            "versus",
            "vs",
            "difference",
            "between",
        ],
    ),
    (Intent::Average, &["average", "mean", "avg"]),
    (Intent::Total, &["total", "sum", "overall"]),
    (
        Intent::Trend,
        &[
            "trend",
            "over time",
            "yearly",
            "year by year",
            "every year",
            "each year",
            "growth",
        ],
    ),
    (
        Intent::Correlation,
        &["correlation", "relation", "affect", "impact", "depend"],
    ),
    (Intent::List, &["list", "show all", "what are"]),
];

pub const RAINFALL: &[&str] = &["rainfall", "rain", "precipitation"];

pub const PRODUCTION: &[&str] = &["production", "produce", "crop", "yield"];

pub const BOTH: &[&str] = &["at the same time", "also"];

/// Marks a single request with several parts that must not be split apart.
pub const SIMULTANEOUS: &str = "at the same time";

/// The sub-question appended when a trailing data-source clause is split off.
pub const SOURCE_QUESTION: &str = "where does the data come from";

pub fn any_in(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}

/// The first intent in [INTENTS] with a phrase in `text`.
pub fn intent_of(text: &str) -> Intent {
    INTENTS
        .iter()
        .find(|(_, phrases)| any_in(text, phrases))
        .map(|&(intent, _)| intent)
        .unwrap_or(Intent::General)
}
