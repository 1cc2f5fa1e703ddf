//! CSV discharge input.
//!
//! The first column holds ISO dates, every further column one discharge
//! series. Missing, non-numeric, NaN, zero and negative values are dropped
//! per column before separation; results are written back over the complete
//! daily date range with empty cells for the dropped days.

use std::collections::HashMap;
use std::io::Read;

use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDate};
use log::warn;

use baseflow_core::series::{Discharge, MonthDay};

/// Discharge columns sharing one date index.
#[derive(Debug)]
pub struct Table {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<(String, Vec<Option<f64>>)>,
}

/// One column after cleaning, with the rows it kept.
#[derive(Debug)]
pub struct CleanSeries {
    pub name: String,
    pub dates: Vec<NaiveDate>,
    pub discharge: Discharge,
}

impl CleanSeries {
    pub fn month_days(&self) -> anyhow::Result<Vec<MonthDay>> {
        self.dates
            .iter()
            .map(|d| MonthDay::new(d.month() as u8, d.day() as u8).map_err(Into::into))
            .collect()
    }

    pub fn years(&self) -> Vec<i32> {
        self.dates.iter().map(|d| d.year()).collect()
    }
}

fn parse_date(field: &str) -> anyhow::Result<NaiveDate> {
    let field = field.trim();
    let day = field.get(..10).unwrap_or(field);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{field}', expected YYYY-MM-DD"))
}

fn parse_value(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok()
}

/// Read a table from a path, or from stdin when the path is `-`.
pub fn read_table(path: &str) -> anyhow::Result<Table> {
    let source: Box<dyn Read> = if path == "-" {
        Box::new(std::io::stdin())
    } else {
        Box::new(std::fs::File::open(path).with_context(|| format!("cannot open {path}"))?)
    };
    parse_table(source).with_context(|| format!("cannot read discharge table from {path}"))
}

pub fn parse_table<R: Read>(source: R) -> anyhow::Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = rdr.headers()?.clone();
    if headers.len() < 2 {
        bail!("expected a date column and at least one discharge column");
    }
    let names: Vec<String> = headers.iter().skip(1).map(|h| h.trim().to_string()).collect();

    let mut rows: Vec<(NaiveDate, Vec<Option<f64>>)> = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let date = parse_date(record.get(0).unwrap_or_default())
            .with_context(|| format!("row {}", line + 2))?;
        let values = (1..=names.len())
            .map(|c| record.get(c).and_then(parse_value))
            .collect();
        rows.push((date, values));
    }
    rows.sort_by_key(|(date, _)| *date);

    let dates = rows.iter().map(|(d, _)| *d).collect();
    let columns = names
        .into_iter()
        .enumerate()
        .map(|(c, name)| (name, rows.iter().map(|(_, v)| v[c]).collect()))
        .collect();
    Ok(Table { dates, columns })
}

impl Table {
    /// Drop unusable values of one column and validate the rest.
    pub fn clean(&self, column: usize) -> anyhow::Result<CleanSeries> {
        let (name, values) = &self.columns[column];
        let mut dates = Vec::with_capacity(values.len());
        let mut kept = Vec::with_capacity(values.len());
        let (mut missing, mut non_positive) = (0usize, 0usize);

        for (&date, value) in self.dates.iter().zip(values) {
            match value {
                Some(v) if v.is_nan() => missing += 1,
                None => missing += 1,
                Some(v) if *v <= 0.0 => non_positive += 1,
                Some(v) => {
                    dates.push(date);
                    kept.push(*v);
                }
            }
        }
        if missing > 0 {
            warn!("{name}: dropped {missing} missing values");
        }
        if non_positive > 0 {
            warn!("{name}: dropped {non_positive} zero or negative values");
        }

        let discharge = Discharge::new(kept)
            .with_context(|| format!("column '{name}' has no usable discharge"))?;
        Ok(CleanSeries {
            name: name.clone(),
            dates,
            discharge,
        })
    }

    /// Every day from the first to the last date.
    pub fn full_range(&self) -> Vec<NaiveDate> {
        match (self.dates.first(), self.dates.last()) {
            (Some(&first), Some(&last)) => first.iter_days().take_while(|d| *d <= last).collect(),
            _ => Vec::new(),
        }
    }
}

/// Spread values kept on `dates` over `range`, leaving other days empty.
pub fn realign<T: Copy>(range: &[NaiveDate], dates: &[NaiveDate], values: &[T]) -> Vec<Option<T>> {
    let by_date: HashMap<NaiveDate, T> =
        dates.iter().copied().zip(values.iter().copied()).collect();
    range.iter().map(|d| by_date.get(d).copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "date,a,b\n\
                       2020-01-02,5.0,1.0\n\
                       2020-01-01,6.0,\n\
                       2020-01-04,-1,2.0\n";

    fn table() -> Table {
        parse_table(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn rows_are_sorted_by_date() {
        let t = table();
        assert_eq!(t.dates[0], NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(t.columns.len(), 2);
        assert_eq!(t.columns[0].1, vec![Some(6.0), Some(5.0), Some(-1.0)]);
        assert_eq!(t.columns[1].1, vec![None, Some(1.0), Some(2.0)]);
    }

    #[test]
    fn clean_drops_missing_and_non_positive() {
        let t = table();
        let a = t.clean(0).unwrap();
        assert_eq!(a.discharge.as_slice(), &[6.0, 5.0]);
        let b = t.clean(1).unwrap();
        assert_eq!(b.discharge.as_slice(), &[1.0, 2.0]);
        assert_eq!(b.dates[1], NaiveDate::from_ymd_opt(2020, 1, 4).unwrap());
    }

    #[test]
    fn realign_fills_the_full_range() {
        let t = table();
        let range = t.full_range();
        assert_eq!(range.len(), 4);
        let a = t.clean(0).unwrap();
        let aligned = realign(&range, &a.dates, a.discharge.as_slice());
        assert_eq!(aligned, vec![Some(6.0), Some(5.0), None, None]);
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(parse_table("date,q\nyesterday,1.0\n".as_bytes()).is_err());
    }
}
