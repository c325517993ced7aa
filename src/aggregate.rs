//! Grouping and ranking over selected rows.

use crate::dataset::Record;
use std::collections::{BTreeMap, BTreeSet};

/// Sums of `value` per `key`, in ascending key order.
pub fn sum_by<'a, K, FK, FV>(rows: &[&'a Record], key: FK, value: FV) -> Vec<(K, f64)>
where
    K: Ord,
    FK: Fn(&'a Record) -> K,
    FV: Fn(&'a Record) -> f64,
{
    let mut groups: BTreeMap<K, f64> = BTreeMap::new();
    for &r in rows {
        *groups.entry(key(r)).or_default() += value(r);
    }
    groups.into_iter().collect()
}

pub fn descending<K>(mut groups: Vec<(K, f64)>) -> Vec<(K, f64)> {
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));
    groups
}

pub fn ascending<K>(mut groups: Vec<(K, f64)>) -> Vec<(K, f64)> {
    groups.sort_by(|a, b| a.1.total_cmp(&b.1));
    groups
}

pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (n, sum) = values.fold((0usize, 0.0), |(n, sum), x| (n + 1, sum + x));
    if n == 0 { None } else { Some(sum / n as f64) }
}

pub fn distinct_count<'a, K: Ord>(rows: &[&'a Record], key: impl Fn(&'a Record) -> K) -> usize {
    rows.iter().map(|&r| key(r)).collect::<BTreeSet<_>>().len()
}

/// The five crops with the largest total production.
pub fn top_crops<'a>(rows: &[&'a Record]) -> Vec<(&'a str, f64)> {
    let mut top = descending(sum_by(rows, |r| r.crop.as_str(), |r| r.production));
    top.truncate(5);
    top
}
