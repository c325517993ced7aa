//! Turning one sub-question into a [QueryDescriptor].

use crate::dataset::{Dataset, Filter, Year};
use crate::keywords;
use regex::Regex;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Source,
    Highest,
    Lowest,
    Compare,
    Average,
    Total,
    Trend,
    Correlation,
    List,
    General,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Intent::Source => write!(f, "source"),
            Intent::Highest => write!(f, "highest"),
            Intent::Lowest => write!(f, "lowest"),
            Intent::Compare => write!(f, "compare"),
            Intent::Average => write!(f, "average"),
            Intent::Total => write!(f, "total"),
            Intent::Trend => write!(f, "trend"),
            Intent::Correlation => write!(f, "correlation"),
            Intent::List => write!(f, "list"),
            Intent::General => write!(f, "general"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Metric {
    Production,
    Rainfall,
    Both,
}

impl Metric {
    /// The single metric to rank by; [Metric::Both] falls back to production.
    pub fn single(self) -> Metric {
        match self {
            Metric::Both => Metric::Production,
            m => m,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Metric::Production => write!(f, "Production"),
            Metric::Rainfall => write!(f, "Rainfall"),
            Metric::Both => write!(f, "Both"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryDescriptor {
    pub intent: Intent,
    pub states: Vec<String>,
    pub crops: Vec<String>,
    /// Mentioned years that occur in the dataset, in question order.
    pub years: Option<Vec<Year>>,
    pub metric: Option<Metric>,
    pub asks_both: bool,
}

impl QueryDescriptor {
    pub fn metric(&self) -> Metric {
        self.metric.unwrap_or(Metric::Production)
    }

    pub fn years(&self) -> &[Year] {
        self.years.as_deref().unwrap_or(&[])
    }

    /// Restrict by crop and year, and by state if `by_state`.
    pub fn filter(&self, by_state: bool) -> Filter<'_> {
        Filter {
            crops: &self.crops,
            years: self.years(),
            states: if by_state { &self.states } else { &[] },
        }
    }
}

pub struct Extractor {
    year: Regex,
}

impl Extractor {
    pub fn new() -> Extractor {
        Extractor {
            year: Regex::new(r"\b(20\d{2}|\d{4})\b").expect("valid year pattern"),
        }
    }

    fn mentioned(names: &[String], lower: &str) -> Vec<String> {
        names
            .iter()
            .filter(|n| lower.contains(&n.to_lowercase()))
            .cloned()
            .collect()
    }

    fn years(&self, question: &str, dataset: &Dataset) -> Option<Vec<Year>> {
        let years: Vec<Year> = self
            .year
            .find_iter(question)
            .filter_map(|m| m.as_str().parse::<Year>().ok())
            .filter(|&y| dataset.has_year(y))
            .collect();
        if years.is_empty() { None } else { Some(years) }
    }

    pub fn extract(&self, question: &str, dataset: &Dataset) -> QueryDescriptor {
        let lower = question.to_lowercase();
        let states = Extractor::mentioned(dataset.states(), &lower);
        let crops = Extractor::mentioned(dataset.crops(), &lower);
        let years = self.years(question, dataset);

        if keywords::any_in(&lower, keywords::SOURCE) {
            return QueryDescriptor {
                intent: Intent::Source,
                states,
                crops,
                years,
                metric: None,
                asks_both: false,
            };
        }

        let intent = keywords::intent_of(&lower);
        let rainfall = keywords::any_in(&lower, keywords::RAINFALL);
        let production = keywords::any_in(&lower, keywords::PRODUCTION);
        let asks_both = keywords::any_in(&lower, keywords::BOTH) || (rainfall && production);
        let metric = if asks_both {
            Metric::Both
        } else if rainfall {
            Metric::Rainfall
        } else {
            Metric::Production
        };
        QueryDescriptor {
            intent,
            states,
            crops,
            years,
            metric: Some(metric),
            asks_both,
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Extractor::new()
    }
}
