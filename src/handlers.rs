//! One report per dispatched intent.

use crate::aggregate::{self, ascending, descending, mean, sum_by};
use crate::dataset::{Dataset, Filter, Record, Year};
use crate::errors::{QueryFailure, Report};
use crate::output::{self, banner, mm, number, rule};
use crate::query::{Metric, QueryDescriptor};
use itertools::Itertools;
use std::fmt::Write;

fn value(metric: Metric, r: &Record) -> f64 {
    match metric {
        Metric::Rainfall => r.rainfall,
        _ => r.production,
    }
}

/// `x` formatted for `metric`, with the rainfall unit where it applies.
fn metric_value(metric: Metric, x: f64) -> String {
    match metric {
        Metric::Rainfall => mm(x),
        _ => number(x),
    }
}

fn state_rows<'a>(rows: &[&'a Record], state: &str) -> Vec<&'a Record> {
    rows.iter().copied().filter(|r| r.state == state).collect()
}

fn crop_ranking(out: &mut String, state: &str, rows: &[&Record]) -> std::fmt::Result {
    writeln!(out, "📍 {}:", state.to_uppercase())?;
    for (i, (crop, production)) in aggregate::top_crops(rows).into_iter().enumerate() {
        writeln!(out, "  {}. {:20} → {}", i + 1, crop, number(production))?;
    }
    writeln!(out)
}

pub fn source(d: &Dataset) -> Report {
    let (first, last) = d.year_span();
    let mut out = banner("DATA SOURCE INFORMATION");
    writeln!(out, "🌐 PRIMARY SOURCE:")?;
    writeln!(out, "{}", rule('═'))?;
    writeln!(out, "  Portal: data.gov.in")?;
    writeln!(out, "  Official: Open Government Data (OGD) Platform India")?;
    writeln!(out, "  Website: https://data.gov.in")?;
    writeln!(out)?;
    writeln!(out, "📁 Dataset: {}", d.name())?;
    writeln!(out)?;
    writeln!(out, "📊 Data Contents:")?;
    writeln!(out, "  • Years Covered: {first} - {last}")?;
    writeln!(out, "  • States: {} Indian states", d.states().len())?;
    writeln!(out, "  • Crops: {} different crop types", d.crops().len())?;
    writeln!(out, "  • Total Records: {}", output::count(d.len()))?;
    writeln!(out)?;
    writeln!(out, "🔍 Data Fields:")?;
    writeln!(out, "  • State: Geographic location")?;
    // Years as loaded, so other extracts of the table report their own range.
    writeln!(out, "  • Year: Time period ({first}-{last})")?;
    writeln!(out, "  • Crop: Agricultural product")?;
    writeln!(out, "  • Production: Output quantity")?;
    writeln!(out, "  • Rainfall: Precipitation in millimeters")?;
    writeln!(out)?;
    writeln!(out, "ℹ️  NOTE:")?;
    writeln!(out, "   This is a merged dataset combining agricultural production")?;
    writeln!(out, "   data with regional rainfall measurements from data.gov.in,")?;
    writeln!(out, "   India's official open data portal maintained by the")?;
    writeln!(out, "   National Informatics Centre (NIC).")?;
    Ok(out)
}

#[derive(Clone, Copy)]
enum Extreme {
    Highest,
    Lowest,
}

/// States ranked by summed metric, from the requested end.
fn ranked<'a>(q: &QueryDescriptor, d: &'a Dataset, end: Extreme) -> Vec<(&'a str, f64)> {
    let metric = q.metric().single();
    let rows = d.select(&q.filter(true));
    let groups = sum_by(&rows, |r| r.state.as_str(), |r| value(metric, r));
    match end {
        Extreme::Highest => descending(groups),
        Extreme::Lowest => ascending(groups),
    }
}

fn extreme(q: &QueryDescriptor, d: &Dataset, end: Extreme) -> Report {
    let metric = q.metric().single();
    let ranking = ranked(q, d, end);
    let Some(&(state, x)) = ranking.first() else {
        return Err(QueryFailure::empty("no records match the question"));
    };
    let (title, marker, label, heading) = match end {
        Extreme::Highest => ("HIGHEST", "🏆", "TOP STATE", "TOP 5 RANKING"),
        Extreme::Lowest => ("LOWEST", "📉", "BOTTOM STATE", "BOTTOM 5 RANKING"),
    };
    let metric_name = metric.to_string();
    let mut out = banner(&format!("{title} {} ANALYSIS", metric_name.to_uppercase()));
    writeln!(out, "{marker} {label}: {state}")?;
    writeln!(out, "📊 {metric_name}: {}", metric_value(metric, x))?;
    writeln!(out)?;
    writeln!(out, "{heading}:")?;
    writeln!(out, "{}", rule('═'))?;
    for (i, (state, x)) in ranking.iter().take(5).enumerate() {
        writeln!(out, "  {}. {:25} → {}", i + 1, state, metric_value(metric, *x))?;
    }
    Ok(out)
}

pub fn highest(q: &QueryDescriptor, d: &Dataset) -> Report {
    extreme(q, d, Extreme::Highest)
}

pub fn lowest(q: &QueryDescriptor, d: &Dataset) -> Report {
    extreme(q, d, Extreme::Lowest)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Comparison<'a> {
    pub metric: Metric,
    pub values: [(&'a str, f64); 2],
    pub difference: f64,
    /// Difference relative to the smaller value, in percent.
    pub percentage: f64,
    pub winner: &'a str,
}

/// Mean rainfall or summed production of both states.
pub fn compare_values<'a>(
    metric: Metric,
    rows: &[&Record],
    states: [&'a str; 2],
) -> Result<Comparison<'a>, QueryFailure> {
    let value_of = |state: &str| -> Result<f64, QueryFailure> {
        let rows = state_rows(rows, state);
        match metric {
            Metric::Rainfall => mean(rows.iter().map(|r| r.rainfall)).ok_or_else(|| {
                QueryFailure::empty(&format!("no rainfall records for {state}"))
            }),
            _ => Ok(rows.iter().map(|r| r.production).sum()),
        }
    };
    let v1 = value_of(states[0])?;
    let v2 = value_of(states[1])?;
    let difference = (v1 - v2).abs();
    let smaller = v1.min(v2);
    if smaller == 0.0 {
        return Err(QueryFailure::division_by_zero(
            "cannot compute a percentage relative to zero",
        ));
    }
    Ok(Comparison {
        metric,
        values: [(states[0], v1), (states[1], v2)],
        difference,
        percentage: difference / smaller * 100.0,
        winner: if v1 > v2 { states[0] } else { states[1] },
    })
}

fn compare_single(q: &QueryDescriptor, rows: &[&Record], states: [&str; 2]) -> Report {
    let metric = q.metric().single();
    let c = compare_values(metric, rows, states)?;
    let rainfall = metric == Metric::Rainfall;
    let mut out = banner(&format!(
        "COMPARISON: {} vs {}",
        states[0].to_uppercase(),
        states[1].to_uppercase()
    ));
    writeln!(out, "📊 {} COMPARISON:", metric.to_string().to_uppercase())?;
    writeln!(out)?;
    for (state, x) in c.values {
        let unit = if rainfall { " mm (avg)" } else { "" };
        writeln!(out, "  {:25} → {}{unit}", state, number(x))?;
    }
    writeln!(out)?;
    writeln!(out, "  Difference: {}", metric_value(metric, c.difference))?;
    writeln!(out, "  Percentage: {:.2}%", c.percentage)?;
    writeln!(out, "  Winner: {} 🏆", c.winner)?;
    Ok(out)
}

fn compare_both(rows: &[&Record], states: [&str; 2]) -> Report {
    let mut out = banner(&format!(
        "COMPREHENSIVE COMPARISON: {} vs {}",
        states[0].to_uppercase(),
        states[1].to_uppercase()
    ));
    writeln!(out, "🌧️  RAINFALL COMPARISON:")?;
    writeln!(out, "{}", rule('═'))?;
    writeln!(out)?;
    writeln!(out, "{:<10} {:<25} {:<25}", "Year", states[0], states[1])?;
    writeln!(out, "{}", rule('-'))?;

    let rainfall = |state: &str, year: Option<Year>| -> Option<f64> {
        mean(
            rows.iter()
                .filter(|r| r.state == state && year.is_none_or(|y| r.year == y))
                .map(|r| r.rainfall),
        )
    };
    let years = rows.iter().map(|r| r.year).unique().sorted().collect_vec();
    for year in years {
        writeln!(
            out,
            "{:<10} {:<25} {:<25}",
            year,
            output::mean_mm(rainfall(states[0], Some(year))),
            output::mean_mm(rainfall(states[1], Some(year)))
        )?;
    }
    writeln!(out, "{}", rule('-'))?;
    writeln!(
        out,
        "{:<10} {:<25} {:<25}",
        "Average",
        output::mean_mm(rainfall(states[0], None)),
        output::mean_mm(rainfall(states[1], None))
    )?;

    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "🌾 TOP CROPS PRODUCED:")?;
    writeln!(out, "{}", rule('═'))?;
    writeln!(out)?;
    for state in states {
        crop_ranking(&mut out, state, &state_rows(rows, state))?;
    }
    Ok(out)
}

/// The first two mentioned states; crop and year restrictions apply, state ones do not.
pub fn compare(q: &QueryDescriptor, d: &Dataset) -> Report {
    let [s1, s2, ..] = q.states.as_slice() else {
        return Err(QueryFailure::precondition(
            "Please mention at least 2 states to compare",
        ));
    };
    let states = [s1.as_str(), s2.as_str()];
    let rows = d.select(&q.filter(false));
    if q.asks_both || q.metric() == Metric::Both {
        compare_both(&rows, states)
    } else {
        compare_single(q, &rows, states)
    }
}

pub fn yearly(q: &QueryDescriptor, d: &Dataset) -> Vec<(Year, f64)> {
    let metric = q.metric().single();
    let filter = Filter {
        years: &[],
        ..q.filter(true)
    };
    let rows = d.select(&filter);
    sum_by(&rows, |r| r.year, |r| value(metric, r))
}

/// Growth from the first to the last value, in percent.
pub fn growth(series: &[(Year, f64)]) -> Result<f64, QueryFailure> {
    let (Some(&(_, first)), Some(&(_, last))) = (series.first(), series.last()) else {
        return Err(QueryFailure::empty("no records match the question"));
    };
    if first == 0.0 {
        return Err(QueryFailure::division_by_zero(
            "cannot compute growth from a zero starting value",
        ));
    }
    Ok((last - first) / first * 100.0)
}

pub fn trend(q: &QueryDescriptor, d: &Dataset) -> Report {
    let metric = q.metric().single();
    let series = yearly(q, d);
    let growth = growth(&series)?;
    let first = series[0].0;
    let last = series[series.len() - 1].0;
    // Years of this series, which may be fewer than the dataset holds.
    let mut out = banner(&format!(
        "{} TREND ({first}-{last})",
        metric.to_string().to_uppercase()
    ));
    for (year, x) in &series {
        writeln!(out, "  {year}  →  {}", metric_value(metric, *x))?;
    }
    writeln!(out)?;
    writeln!(out, "  Overall Growth: {growth:+.2}%")?;
    let direction = if growth > 0.0 {
        "📈 Increasing"
    } else {
        "📉 Decreasing"
    };
    writeln!(out, "  Trend: {direction}")?;
    Ok(out)
}

/// Top crops for the mentioned states, or for the first five states otherwise.
pub fn list(q: &QueryDescriptor, d: &Dataset) -> Report {
    let filter = Filter {
        crops: &[],
        ..q.filter(true)
    };
    let rows = d.select(&filter);
    let states = if q.states.is_empty() {
        rows.iter().map(|r| r.state.as_str()).unique().take(5).collect_vec()
    } else {
        q.states.iter().map(String::as_str).collect_vec()
    };
    let mut out = banner("TOP CROPS BY STATE");
    for state in states {
        crop_ranking(&mut out, state, &state_rows(&rows, state))?;
    }
    Ok(out)
}

pub fn general(q: &QueryDescriptor, d: &Dataset) -> Report {
    let rows = d.select(&q.filter(true));
    let production: f64 = rows.iter().map(|r| r.production).sum();
    let rainfall = mean(rows.iter().map(|r| r.rainfall));
    let mut out = banner("DATA SUMMARY");
    writeln!(out, "  Total Records:    {}", rows.len())?;
    writeln!(out, "  Total Production: {}", number(production))?;
    writeln!(out, "  Avg Rainfall:     {}", output::mean_mm(rainfall))?;
    writeln!(
        out,
        "  States:           {}",
        aggregate::distinct_count(&rows, |r| r.state.as_str())
    )?;
    writeln!(
        out,
        "  Crops:            {}",
        aggregate::distinct_count(&rows, |r| r.crop.as_str())
    )?;
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::FailureKind;
    use crate::query::Intent;

    fn dataset() -> Dataset {
        let rows = [
            ("Punjab", "Rice", 2010, 100.0, 600.0),
            ("Punjab", "Rice", 2011, 150.0, 700.0),
            ("Punjab", "Wheat", 2010, 300.0, 600.0),
            ("Kerala", "Rice", 2010, 80.0, 3000.0),
            ("Kerala", "Rice", 2011, 60.0, 2800.0),
            ("Kerala", "Coconut", 2011, 500.0, 2800.0),
            ("Bihar", "Maize", 2010, 40.0, 1000.0),
        ];
        Dataset::new(
            rows.iter()
                .map(|&(state, crop, year, production, rainfall)| Record {
                    state: state.to_owned(),
                    crop: crop.to_owned(),
                    year,
                    production,
                    rainfall,
                })
                .collect(),
        )
        .unwrap()
    }

    fn owned(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn desc(intent: Intent, states: &[&str], crops: &[&str], metric: Metric) -> QueryDescriptor {
        QueryDescriptor {
            intent,
            states: owned(states),
            crops: owned(crops),
            years: None,
            metric: Some(metric),
            asks_both: metric == Metric::Both,
        }
    }

    #[test]
    fn highest_rice() {
        let d = dataset();
        let q = desc(Intent::Highest, &[], &["Rice"], Metric::Production);
        let report = highest(&q, &d).unwrap();
        assert!(report.starts_with("╔"));
        assert!(report.contains("║  HIGHEST PRODUCTION ANALYSIS\n"));
        assert!(report.contains("🏆 TOP STATE: Punjab\n📊 Production: 250.00\n\nTOP 5 RANKING:\n"));
        assert!(report.contains("  1. Punjab                    → 250.00\n"));
        assert!(report.ends_with("  2. Kerala                    → 140.00\n"));
    }

    #[test]
    fn lowest_rice() {
        let d = dataset();
        let q = desc(Intent::Lowest, &[], &["Rice"], Metric::Both);
        let report = lowest(&q, &d).unwrap();
        assert!(report.contains("║  LOWEST PRODUCTION ANALYSIS\n"));
        assert!(report.contains("📉 BOTTOM STATE: Kerala\n📊 Production: 140.00\n"));
        assert!(report.contains("BOTTOM 5 RANKING:\n"));
    }

    #[test]
    fn highest_and_lowest_agree() {
        let d = dataset();
        let q = desc(Intent::Highest, &[], &[], Metric::Production);
        let mut high = ranked(&q, &d, Extreme::Highest);
        let low = ranked(&q, &d, Extreme::Lowest);
        assert_eq!(high[0], ("Kerala", 640.0));
        assert_eq!(low[0], ("Bihar", 40.0));
        high.reverse();
        assert_eq!(high, low);
    }

    #[test]
    fn highest_rainfall() {
        let d = dataset();
        let q = desc(Intent::Highest, &[], &[], Metric::Rainfall);
        let report = highest(&q, &d).unwrap();
        assert!(report.contains("║  HIGHEST RAINFALL ANALYSIS\n"));
        assert!(report.contains("🏆 TOP STATE: Kerala\n📊 Rainfall: 8,600.00 mm\n"));
        assert!(report.contains("  3. Bihar                     → 1,000.00 mm\n"));
    }

    #[test]
    fn highest_nothing_matches() {
        let d = dataset();
        let q = desc(Intent::Highest, &["Bihar"], &["Rice"], Metric::Production);
        let e = highest(&q, &d).unwrap_err();
        assert_eq!(e.kind, FailureKind::EmptyResult);
    }

    #[test]
    fn compare_rainfall() {
        let d = dataset();
        let q = desc(Intent::Compare, &["Punjab", "Kerala"], &[], Metric::Rainfall);
        let report = compare(&q, &d).unwrap();
        assert!(report.contains("║  COMPARISON: PUNJAB vs KERALA\n"));
        assert!(report.contains("📊 RAINFALL COMPARISON:\n\n"));
        assert!(report.contains("  Punjab                    → 633.33 mm (avg)\n"));
        assert!(report.contains("  Kerala                    → 2,866.67 mm (avg)\n"));
        assert!(report.contains("  Difference: 2,233.33 mm\n"));
        assert!(report.contains("  Percentage: 352.63%\n"));
        assert!(report.ends_with("  Winner: Kerala 🏆\n"));
    }

    #[test]
    fn compare_is_symmetric() {
        let d = dataset();
        let rows = d.select(&Filter::default());
        for metric in [Metric::Production, Metric::Rainfall] {
            let a = compare_values(metric, &rows, ["Punjab", "Kerala"]).unwrap();
            let b = compare_values(metric, &rows, ["Kerala", "Punjab"]).unwrap();
            assert_eq!(a.winner, b.winner);
            assert_eq!(a.difference, b.difference);
            assert_eq!(a.percentage, b.percentage);
        }
    }

    #[test]
    fn compare_needs_two_states() {
        let d = dataset();
        let q = desc(Intent::Compare, &["Punjab"], &[], Metric::Rainfall);
        let e = compare(&q, &d).unwrap_err();
        assert_eq!(e.kind, FailureKind::Precondition);
        assert_eq!(e.to_string(), "❌ Please mention at least 2 states to compare");
    }

    #[test]
    fn compare_against_zero() {
        let d = dataset();
        let mut q = desc(Intent::Compare, &["Punjab", "Bihar"], &[], Metric::Production);
        q.years = Some(vec![2011]);
        let e = compare(&q, &d).unwrap_err();
        assert_eq!(e.kind, FailureKind::DivisionByZero);
        assert!(e.to_string().starts_with("❌ Error: "));
    }

    #[test]
    fn compare_both() {
        let d = dataset();
        let q = desc(Intent::Compare, &["Punjab", "Kerala"], &[], Metric::Both);
        let report = compare(&q, &d).unwrap();
        assert!(report.contains("║  COMPREHENSIVE COMPARISON: PUNJAB vs KERALA\n"));
        assert!(report.contains("Year       Punjab                    Kerala"));
        assert!(report.contains("\n2010       600.00 mm                 3,000.00 mm"));
        assert!(report.contains("\n2011       700.00 mm                 2,800.00 mm"));
        assert!(report.contains("\nAverage    633.33 mm                 2,866.67 mm"));
        assert!(report.contains(
            "📍 PUNJAB:\n  1. Wheat                → 300.00\n  2. Rice                 → 250.00\n\n"
        ));
        assert!(report.contains(
            "📍 KERALA:\n  1. Coconut              → 500.00\n  2. Rice                 → 140.00\n\n"
        ));
    }

    #[test]
    fn compare_both_missing_year() {
        let d = dataset();
        let q = desc(Intent::Compare, &["Punjab", "Bihar"], &[], Metric::Both);
        let report = compare(&q, &d).unwrap();
        assert!(report.contains("\n2011       700.00 mm                 n/a"));
    }

    #[test]
    fn trend_rice() {
        let d = dataset();
        let mut q = desc(Intent::Trend, &[], &["Rice"], Metric::Production);
        q.years = Some(vec![2010]);
        let report = trend(&q, &d).unwrap();
        assert!(report.contains("║  PRODUCTION TREND (2010-2011)\n"));
        assert!(report.contains("  2010  →  180.00\n  2011  →  210.00\n"));
        assert!(report.contains("  Overall Growth: +16.67%\n"));
        assert!(report.ends_with("  Trend: 📈 Increasing\n"));
    }

    #[test]
    fn trend_decreasing_rainfall() {
        let d = dataset();
        let q = desc(Intent::Trend, &["Kerala"], &["Rice"], Metric::Rainfall);
        let report = trend(&q, &d).unwrap();
        assert!(report.contains("  2011  →  2,800.00 mm\n"));
        assert!(report.contains("  Overall Growth: -6.67%\n"));
        assert!(report.ends_with("  Trend: 📉 Decreasing\n"));
    }

    #[test]
    fn trend_title_follows_series() {
        let d = dataset();
        let q = desc(Intent::Trend, &["Bihar"], &[], Metric::Production);
        let report = trend(&q, &d).unwrap();
        assert!(report.contains("║  PRODUCTION TREND (2010-2010)\n"));
        assert!(!report.contains("2011"));
    }

    #[test]
    fn trend_failures() {
        let d = dataset();
        let q = desc(Intent::Trend, &["Bihar"], &["Coconut"], Metric::Production);
        assert_eq!(trend(&q, &d).unwrap_err().kind, FailureKind::EmptyResult);
        let e = growth(&[(2010, 0.0), (2011, 5.0)]).unwrap_err();
        assert_eq!(e.kind, FailureKind::DivisionByZero);
    }

    #[test]
    fn list_mentioned_state() {
        let d = dataset();
        let q = desc(Intent::List, &["Kerala"], &["Rice"], Metric::Production);
        let report = list(&q, &d).unwrap();
        assert!(report.contains("║  TOP CROPS BY STATE\n"));
        assert!(report.ends_with(
            "📍 KERALA:\n  1. Coconut              → 500.00\n  2. Rice                 → 140.00\n\n"
        ));
        assert!(!report.contains("PUNJAB"));
    }

    #[test]
    fn list_first_states() {
        let d = dataset();
        let q = desc(Intent::List, &[], &[], Metric::Production);
        let report = list(&q, &d).unwrap();
        let punjab = report.find("📍 PUNJAB:").unwrap();
        let kerala = report.find("📍 KERALA:").unwrap();
        let bihar = report.find("📍 BIHAR:").unwrap();
        assert!(punjab < kerala && kerala < bihar);
    }

    #[test]
    fn general_summary() {
        let d = dataset();
        let q = desc(Intent::General, &[], &[], Metric::Production);
        let report = general(&q, &d).unwrap();
        assert!(report.contains("║  DATA SUMMARY\n"));
        assert!(report.contains("  Total Records:    7\n"));
        assert!(report.contains("  Total Production: 1,230.00\n"));
        assert!(report.contains("  Avg Rainfall:     1,642.86 mm\n"));
        assert!(report.contains("  States:           3\n"));
        assert!(report.ends_with("  Crops:            4\n"));
    }

    #[test]
    fn general_nothing_matches() {
        let d = dataset();
        let q = desc(Intent::General, &["Bihar"], &["Coconut"], Metric::Production);
        let report = general(&q, &d).unwrap();
        assert!(report.contains("  Total Records:    0\n"));
        assert!(report.contains("  Avg Rainfall:     n/a\n"));
    }

    #[test]
    fn source_report() {
        let d = dataset();
        let report = source(&d).unwrap();
        assert!(report.contains("║  DATA SOURCE INFORMATION\n"));
        assert!(report.contains("  • Years Covered: 2010 - 2011\n"));
        assert!(report.contains("  • Year: Time period (2010-2011)\n"));
        assert!(report.contains("  • States: 3 Indian states\n"));
        assert!(report.contains("  • Crops: 4 different crop types\n"));
        assert!(report.contains("  • Total Records: 7\n"));
        assert!(report.contains("📁 Dataset: merged_crop_rainfall.csv\n"));
    }
}
