//! Report formatting and data structures for representing explained queries.

use crate::query::QueryDescriptor;
use itertools::Itertools;
use serde::Serialize;

pub const RULE_WIDTH: usize = 63;

const BANNER_TOP: &str = "╔═══════════════════════════════════════════════════════════╗";
const BANNER_BOTTOM: &str = "╚═══════════════════════════════════════════════════════════╝";

pub fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

/// The boxed title that opens every report, followed by a blank line.
pub fn banner(title: &str) -> String {
    format!("{BANNER_TOP}\n║  {title}\n{BANNER_BOTTOM}\n\n")
}

fn group_thousands(digits: &str) -> String {
    let n = digits.len();
    let mut s = String::with_capacity(n + n / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            s.push(',');
        }
        s.push(c);
    }
    s
}

/// Thousands separators and exactly two decimals, e.g. `1,234,567.89`.
pub fn number(x: f64) -> String {
    let s = format!("{:.2}", x.abs());
    let (int, frac) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    let sign = if x < 0.0 && s.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{sign}{}.{frac}", group_thousands(int))
}

pub fn mm(x: f64) -> String {
    format!("{} mm", number(x))
}

pub fn count(n: usize) -> String {
    group_thousands(&n.to_string())
}

/// A mean that may be missing, in millimetres.
pub fn mean_mm(x: Option<f64>) -> String {
    match x {
        Some(x) => mm(x),
        None => "n/a".to_owned(),
    }
}

pub fn pretty_questions(questions: &[String]) -> String {
    questions.iter().map(|q| format!("'{q}'")).join(", ")
}

#[derive(Debug, Serialize)]
pub struct OSubQuestion {
    pub text: String,
    pub descriptor: QueryDescriptor,
}

#[derive(Debug, Serialize)]
pub struct OExplain {
    pub question: String,
    pub sub_questions: Vec<OSubQuestion>,
}
