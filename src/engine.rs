//! Main entry point for answering questions.

use crate::dataset::Dataset;
use crate::errors::Report;
use crate::handlers;
use crate::output::{self, OExplain, OSubQuestion, banner, rule};
use crate::query::{Extractor, Intent, QueryDescriptor};
use crate::splitter::Splitter;
use log::{debug, warn};
use std::fmt::{self, Write};

pub const EMPTY_QUESTION: &str = "❌ Please enter a question!";

/// Last stop for failures that no sub-question report caught.
fn or_rephrase(question: &str, answer: Result<String, fmt::Error>) -> String {
    match answer {
        Ok(answer) => answer,
        Err(e) => {
            warn!(target: "samarth", "'{question}': {e}");
            format!("❌ Error: {e}\n\nTry rephrasing your question.")
        }
    }
}

/// Answers questions about one dataset.
pub struct Engine {
    dataset: Dataset,
    splitter: Splitter,
    extractor: Extractor,
}

impl Engine {
    pub fn new(dataset: Dataset) -> Engine {
        Engine {
            dataset,
            splitter: Splitter::new(),
            extractor: Extractor::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn split(&self, question: &str) -> Vec<String> {
        self.splitter.split(question)
    }

    pub fn descriptor(&self, question: &str) -> QueryDescriptor {
        self.extractor.extract(question, &self.dataset)
    }

    /// Run the handler for the intent.
    /// Average, total and correlation questions get the general summary.
    pub fn dispatch(&self, q: &QueryDescriptor) -> Report {
        let d = &self.dataset;
        match q.intent {
            Intent::Source => handlers::source(d),
            Intent::Highest => handlers::highest(q, d),
            Intent::Lowest => handlers::lowest(q, d),
            Intent::Compare => handlers::compare(q, d),
            Intent::Trend => handlers::trend(q, d),
            Intent::List => handlers::list(q, d),
            Intent::Average | Intent::Total | Intent::Correlation | Intent::General => {
                handlers::general(q, d)
            }
        }
    }

    /// The report for one sub-question; failures become the error text.
    pub fn answer_single(&self, question: &str) -> String {
        let q = self.descriptor(question);
        debug!(target: "samarth", "'{question}': {q:?}");
        match self.dispatch(&q) {
            Ok(report) => report,
            Err(e) => {
                warn!(target: "samarth", "'{question}': {} failed: {}", q.intent, e.message);
                e.to_string()
            }
        }
    }

    fn assemble(&self, questions: &[String]) -> Result<String, fmt::Error> {
        if let [question] = questions {
            return Ok(self.answer_single(question));
        }
        let mut out = banner(&format!(
            "MULTI-QUERY RESPONSE ({} questions detected)",
            questions.len()
        ));
        for (i, question) in questions.iter().enumerate() {
            writeln!(out)?;
            writeln!(out, "{}", rule('='))?;
            writeln!(out, "QUERY {}: {question}", i + 1)?;
            writeln!(out, "{}", rule('='))?;
            writeln!(out)?;
            writeln!(out, "{}", self.answer_single(question))?;
        }
        Ok(out)
    }

    pub fn answer(&self, question: &str) -> String {
        let question = question.trim();
        if question.is_empty() {
            return EMPTY_QUESTION.to_owned();
        }
        let questions = self.split(question);
        debug!(target: "samarth", "sub-questions: {}", output::pretty_questions(&questions));
        or_rephrase(question, self.assemble(&questions))
    }

    pub fn explain(&self, question: &str) -> OExplain {
        let question = question.trim();
        OExplain {
            question: question.to_owned(),
            sub_questions: self
                .split(question)
                .into_iter()
                .map(|text| OSubQuestion {
                    descriptor: self.descriptor(&text),
                    text,
                })
                .collect(),
        }
    }
}
