//! Splitting a compound question into independent sub-questions.

use crate::keywords;
use itertools::Itertools;
use regex::Regex;

pub struct Splitter {
    source_clauses: Vec<Regex>,
    sentence_boundary: Regex,
    sentence_split: Regex,
    also_split: Regex,
}

impl Splitter {
    pub fn new() -> Splitter {
        let re = |p: &str| Regex::new(p).expect("valid splitter pattern");
        Splitter {
            source_clauses: vec![
                re(r"(and\s+)?(also\s+)?mention\s+where.*"),
                re(r"(and\s+)?(also\s+)?where.*came\s+from"),
                re(r"(and\s+)?(also\s+)?what.*source"),
            ],
            sentence_boundary: re(r"\.\s+[A-Z]"),
            sentence_split: re(r"[.;]\s+"),
            also_split: re(r"\.\s+(and\s+)?also\s+"),
        }
    }

    /// Byte offset in the lowercased text where a trailing source clause starts.
    fn source_clause(&self, lower: &str) -> Option<usize> {
        self.source_clauses
            .iter()
            .find_map(|re| re.find(lower))
            .map(|m| m.start())
    }

    /// The text before a trailing data-source clause, and whether one was found.
    fn strip_source<'a>(&self, question: &'a str, lower: &str) -> (&'a str, bool) {
        if !keywords::any_in(lower, keywords::SOURCE_CLAUSE) {
            return (question, false);
        }
        match self.source_clause(lower) {
            Some(start) => {
                // Lowercasing can change byte lengths outside ASCII.
                let chars = lower[..start].chars().count();
                let cut = question
                    .char_indices()
                    .nth(chars)
                    .map_or(question.len(), |(i, _)| i);
                (&question[..cut], true)
            }
            None => (question, false),
        }
    }

    /// Ordered, non-empty list of sub-questions.
    ///
    /// A trailing "where does the data come from" style clause becomes its own
    /// sub-question, always the last one.
    pub fn split(&self, question: &str) -> Vec<String> {
        let lower = question.to_lowercase();
        let (main, asks_source) = self.strip_source(question, &lower);
        let main = main.trim();

        let mut questions = if self.sentence_boundary.is_match(main) || main.contains(';') {
            self.sentence_split
                .split(main)
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_owned)
                .collect_vec()
        } else if lower.contains(keywords::SIMULTANEOUS) {
            vec![main.to_owned()]
        } else if self.also_split.is_match(&lower) {
            self.also_split
                .split(main)
                .map(str::trim)
                .filter(|q| q.len() > 3)
                .map(str::to_owned)
                .collect_vec()
        } else {
            vec![main.to_owned()]
        };

        questions.retain(|q| !q.is_empty());
        if asks_source {
            questions.push(keywords::SOURCE_QUESTION.to_owned());
        }
        if questions.is_empty() {
            questions.push(question.trim().to_owned());
        }
        questions
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Splitter::new()
    }
}
