//! The crop production and rainfall table.

use crate::errors::{self, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use std::{fs, io, path::Path};

pub type Year = u16;

/// Name reported for data that was not read from a named file.
pub const DEFAULT_NAME: &str = "merged_crop_rainfall.csv";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Record {
    #[serde(rename = "State")]
    pub state: String,
    pub crop: String,
    #[serde(rename = "Year")]
    pub year: Year,
    #[serde(rename = "Production")]
    pub production: f64,
    #[serde(rename = "Rainfall")]
    pub rainfall: f64,
}

/// Which rows to keep; an empty restriction keeps everything.
#[derive(Clone, Copy, Default)]
pub struct Filter<'a> {
    pub crops: &'a [String],
    pub years: &'a [Year],
    pub states: &'a [String],
}

impl Filter<'_> {
    pub fn matches(&self, r: &Record) -> bool {
        (self.crops.is_empty() || self.crops.contains(&r.crop))
            && (self.years.is_empty() || self.years.contains(&r.year))
            && (self.states.is_empty() || self.states.contains(&r.state))
    }
}

/// Read-only table together with its distinct values.
///
/// Distinct states, crops and years are kept in order of first appearance.
#[derive(Debug)]
pub struct Dataset {
    name: String,
    records: Vec<Record>,
    states: Vec<String>,
    crops: Vec<String>,
    years: Vec<Year>,
    span: (Year, Year),
}

fn distinct<T: Clone + Eq + Hash>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(v.clone())).collect()
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Result<Dataset> {
        if records.is_empty() {
            return Err(errors::invalid_input_ref("no records found"));
        }
        for (i, r) in records.iter().enumerate() {
            if !r.production.is_finite() || !r.rainfall.is_finite() {
                return Err(errors::invalid_input(format!(
                    "record {} ({}, {}, {}) has a non-finite value",
                    i + 1,
                    r.state,
                    r.crop,
                    r.year
                )));
            }
        }
        let states = distinct(records.iter().map(|r| r.state.clone()));
        let crops = distinct(records.iter().map(|r| r.crop.clone()));
        let years = distinct(records.iter().map(|r| r.year));
        let first = records[0].year;
        let span = years
            .iter()
            .fold((first, first), |(lo, hi), &y| (lo.min(y), hi.max(y)));
        Ok(Dataset {
            name: DEFAULT_NAME.to_owned(),
            records,
            states,
            crops,
            years,
            span,
        })
    }

    /// Parse CSV with the header `State,crop,Year,Production,Rainfall`.
    /// Other columns are ignored.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Dataset> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut records = Vec::new();
        for row in rdr.deserialize() {
            let record: Record = row?;
            records.push(record);
        }
        Dataset::new(records)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        let dataset = Dataset::from_reader(io::BufReader::new(file))?;
        Ok(match path.file_name() {
            Some(name) => dataset.with_name(&name.to_string_lossy()),
            None => dataset,
        })
    }

    pub fn with_name(self, name: &str) -> Dataset {
        Dataset {
            name: name.to_owned(),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn crops(&self) -> &[String] {
        &self.crops
    }

    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn has_year(&self, year: Year) -> bool {
        self.years.contains(&year)
    }

    pub fn year_span(&self) -> (Year, Year) {
        self.span
    }

    pub fn select(&self, filter: &Filter) -> Vec<&Record> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    pub fn statistics(&self) {
        let (first, last) = self.year_span();
        info!(target: "samarth", "records: {}", self.len());
        info!(target: "samarth", "years in input data: {first}-{last}");
        info!(target: "samarth", "distinct states: {}", self.states.len());
        info!(target: "samarth", "distinct crops: {}", self.crops.len());
    }
}
