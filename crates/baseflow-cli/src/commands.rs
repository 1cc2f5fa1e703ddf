//! Subcommand implementations.

use std::io::Write;

use anyhow::Context;
use clap::{Args, Subcommand};
use log::info;

use baseflow_core::bfi::maximum_bfi;
use baseflow_core::constants::{IHACRES_A_DEFAULT, LH_BETA_DEFAULT};
use baseflow_core::filters::LyneHollick;
use baseflow_core::recession::recession_coefficient;
use baseflow_core::separation::{separate, Method, SeparationConfig, SeparationResult};
use baseflow_core::series::IcePeriod;
use baseflow_core::strict::strict_baseflow;

use crate::input::{read_table, realign, CleanSeries, Table};

#[derive(Subcommand)]
pub enum Command {
    /// Separate baseflow with one or more methods
    Separate(SeparateArgs),

    /// Estimate the recession coefficient of every column
    Recession {
        /// Calendar window to exclude, e.g. 12-01:03-15
        #[arg(long)]
        ice_period: Option<IcePeriod>,

        /// Input CSV (date column first), or - for stdin
        input: String,
    },

    /// Print the strict-baseflow mask of every column
    Strict {
        /// Input CSV (date column first), or - for stdin
        input: String,
    },

    /// Estimate the maximum baseflow index (Eckhardt BFImax) of every column
    BfiMax {
        /// Recession coefficient; estimated when omitted
        #[arg(long)]
        k: Option<f64>,

        /// Lyne-Hollick filter parameter
        #[arg(long, default_value_t = LH_BETA_DEFAULT)]
        lh_beta: f64,

        /// Input CSV (date column first), or - for stdin
        input: String,
    },
}

#[derive(Args)]
pub struct SeparateArgs {
    /// Comma-separated methods, or "all"
    #[arg(short, long, default_value = "all")]
    method: String,

    /// Drainage area [km2] for the HYSEP interval width
    #[arg(long)]
    area: Option<f64>,

    /// Surface runoff duration [days]; overrides --area
    #[arg(long)]
    num_days: Option<f64>,

    /// Calendar window excluded from recession analysis, e.g. 12-01:03-15
    #[arg(long)]
    ice_period: Option<IcePeriod>,

    /// Recession coefficient; estimated when omitted
    #[arg(long)]
    k: Option<f64>,

    #[arg(long)]
    boughton_c: Option<f64>,

    #[arg(long)]
    ihacres_c: Option<f64>,

    #[arg(long, default_value_t = IHACRES_A_DEFAULT)]
    ihacres_a: f64,

    /// Eckhardt maximum baseflow index
    #[arg(long)]
    bfi_max: Option<f64>,

    /// Furey c3/c1 ratio
    #[arg(long)]
    c3c1: Option<f64>,

    /// EWMA smoothing factor
    #[arg(long)]
    ewma_e: Option<f64>,

    /// Willems quickflow proportion
    #[arg(long)]
    willems_w: Option<f64>,

    /// Lyne-Hollick filter parameter
    #[arg(long, default_value_t = LH_BETA_DEFAULT)]
    lh_beta: f64,

    /// Print KGE and BFI per method instead of the baseflow series
    #[arg(long)]
    kge: bool,

    /// Input CSV (date column first), or - for stdin
    input: String,
}

impl SeparateArgs {
    fn config(&self, series: &CleanSeries) -> anyhow::Result<SeparationConfig> {
        let mut config = SeparationConfig {
            methods: Method::parse_list(&self.method)?,
            lh_beta: self.lh_beta,
            area_km2: self.area,
            num_days: self.num_days,
            k: self.k,
            boughton_c: self.boughton_c,
            ihacres_c: self.ihacres_c,
            ihacres_a: self.ihacres_a,
            bfi_max: self.bfi_max,
            c3c1: self.c3c1,
            ewma_e: self.ewma_e,
            willems_w: self.willems_w,
            ..SeparationConfig::default()
        };
        if let Some(period) = self.ice_period {
            config = config.with_ice_period(period, series.month_days()?);
        }
        Ok(config)
    }
}

pub fn run(command: Command) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let out = stdout.lock();
    match command {
        Command::Separate(args) => run_separate(&args, &read_table(&args.input)?, out),
        Command::Recession { ice_period, input } => {
            run_recession(ice_period, &read_table(&input)?, out)
        }
        Command::Strict { input } => run_strict(&read_table(&input)?, out),
        Command::BfiMax { k, lh_beta, input } => {
            run_bfi_max(k, lh_beta, &read_table(&input)?, out)
        }
    }
}

fn fmt_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn run_separate<W: Write>(args: &SeparateArgs, table: &Table, out: W) -> anyhow::Result<()> {
    let range = table.full_range();

    let mut results: Vec<(CleanSeries, SeparationResult)> = Vec::new();
    for column in 0..table.columns.len() {
        let series = table.clean(column)?;
        let config = args.config(&series)?;
        let result = separate(&series.discharge, &config)
            .with_context(|| format!("separation of column '{}' failed", series.name))?;
        if let Some(k) = result.params.k {
            info!("{}: k = {k:.4}", series.name);
        }
        results.push((series, result));
    }

    let mut wtr = csv::Writer::from_writer(out);
    if args.kge {
        wtr.write_record(["column", "method", "kge", "bfi"])?;
        for (series, result) in &results {
            for o in &result.outputs {
                wtr.write_record([
                    series.name.clone(),
                    o.method.to_string(),
                    o.kge.to_string(),
                    o.bfi.to_string(),
                ])?;
            }
        }
        wtr.flush()?;
        return Ok(());
    }

    let mut header = vec!["date".to_string()];
    let mut columns: Vec<Vec<Option<f64>>> = Vec::new();
    for (series, result) in &results {
        for o in &result.outputs {
            header.push(format!("{}_{}", series.name, o.method));
            columns.push(realign(&range, &series.dates, &o.baseflow));
        }
    }
    wtr.write_record(&header)?;
    for (row, date) in range.iter().enumerate() {
        let mut record = vec![date.to_string()];
        record.extend(columns.iter().map(|c| fmt_cell(c[row])));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn run_recession<W: Write>(
    ice_period: Option<IcePeriod>,
    table: &Table,
    out: W,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["column", "k"])?;
    for column in 0..table.columns.len() {
        let series = table.clean(column)?;
        let q = series.discharge.as_slice();
        let strict = strict_baseflow(q);
        let ice = match ice_period {
            Some(period) => Some(period.mask(&series.month_days()?)),
            None => None,
        };
        let k = recession_coefficient(q, &strict, ice.as_deref())
            .with_context(|| format!("recession analysis of column '{}' failed", series.name))?;
        wtr.write_record([series.name.clone(), k.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

fn run_strict<W: Write>(table: &Table, out: W) -> anyhow::Result<()> {
    let range = table.full_range();

    let mut header = vec!["date".to_string()];
    let mut columns: Vec<Vec<Option<bool>>> = Vec::new();
    for column in 0..table.columns.len() {
        let series = table.clean(column)?;
        let strict = strict_baseflow(series.discharge.as_slice());
        header.push(series.name.clone());
        columns.push(realign(&range, &series.dates, &strict));
    }

    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(&header)?;
    for (row, date) in range.iter().enumerate() {
        let mut record = vec![date.to_string()];
        record.extend(columns.iter().map(|c| fmt_cell(c[row])));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn run_bfi_max<W: Write>(
    k: Option<f64>,
    lh_beta: f64,
    table: &Table,
    out: W,
) -> anyhow::Result<()> {
    let lh = LyneHollick::new(lh_beta)?;
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["column", "bfi_max"])?;
    for column in 0..table.columns.len() {
        let series = table.clean(column)?;
        let q = series.discharge.as_slice();
        let k = match k {
            Some(k) => k,
            None => recession_coefficient(q, &strict_baseflow(q), None)
                .with_context(|| format!("recession analysis of column '{}' failed", series.name))?,
        };
        let b_lh = lh.separate(q).baseflow;
        let bfi = maximum_bfi(q, &b_lh, k, Some(series.years().as_slice()))?;
        wtr.write_record([series.name.clone(), bfi.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Days, NaiveDate};
    use clap::Parser;

    use crate::input::parse_table;

    // 2020-01-03 is absent, a drops a negative value, b a missing one.
    const GAPPY: &str = "date,a,b\n\
                         2020-01-01,5,1\n\
                         2020-01-02,3,\n\
                         2020-01-04,4,2\n\
                         2020-01-05,-1,3\n";

    #[derive(Parser)]
    struct SeparateCli {
        #[command(flatten)]
        args: SeparateArgs,
    }

    fn separate_args(flags: &[&str]) -> SeparateArgs {
        let argv = std::iter::once("baseflow")
            .chain(flags.iter().copied())
            .chain(std::iter::once("-"));
        SeparateCli::parse_from(argv).args
    }

    fn output(run: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buf = Vec::new();
        run(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn recession_table(days: usize) -> Table {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let mut csv = String::from("date,a\n");
        for i in 0..days {
            let date = start + Days::new(i as u64);
            csv.push_str(&format!("{date},{}\n", 100.0 * 0.9f64.powi(i as i32)));
        }
        parse_table(csv.as_bytes()).unwrap()
    }

    #[test]
    fn separate_writes_method_columns_over_full_range() {
        let table = parse_table(GAPPY.as_bytes()).unwrap();
        let args = separate_args(&["--method", "fixed"]);
        let text = output(|buf| run_separate(&args, &table, buf));
        assert_eq!(
            text,
            "date,a_fixed,b_fixed\n\
             2020-01-01,3,1\n\
             2020-01-02,3,\n\
             2020-01-03,,\n\
             2020-01-04,3,1\n\
             2020-01-05,,1\n"
        );
    }

    #[test]
    fn separate_names_columns_per_method() {
        let table = parse_table(GAPPY.as_bytes()).unwrap();
        let args = separate_args(&["--method", "lh,usgs_hysep_fixed"]);
        let text = output(|buf| run_separate(&args, &table, buf));
        let header = text.lines().next().unwrap();
        assert_eq!(header, "date,a_lh,a_fixed,b_lh,b_fixed");
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn separate_kge_table_lists_every_column_and_method() {
        let table = parse_table(GAPPY.as_bytes()).unwrap();
        let args = separate_args(&["--method", "fixed", "--kge"]);
        let text = output(|buf| run_separate(&args, &table, buf));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "column,method,kge,bfi");
        assert_eq!(lines.len(), 3);

        let a: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(&a[..2], &["a", "fixed"]);
        let kge: f64 = a[2].parse().unwrap();
        assert!(kge.is_finite() && kge <= 1.0);
        assert_relative_eq!(a[3].parse::<f64>().unwrap(), 0.75);

        let b: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(&b[..2], &["b", "fixed"]);
        assert_relative_eq!(b[3].parse::<f64>().unwrap(), 0.5);
    }

    #[test]
    fn separate_rejects_unknown_method() {
        let table = parse_table(GAPPY.as_bytes()).unwrap();
        let args = separate_args(&["--method", "lh,nope"]);
        assert!(run_separate(&args, &table, Vec::new()).is_err());
    }

    #[test]
    fn strict_mask_is_realigned_with_blanks() {
        let table = parse_table(GAPPY.as_bytes()).unwrap();
        let text = output(|buf| run_strict(&table, buf));
        assert_eq!(
            text,
            "date,a,b\n\
             2020-01-01,false,false\n\
             2020-01-02,false,\n\
             2020-01-03,,\n\
             2020-01-04,false,false\n\
             2020-01-05,,false\n"
        );
    }

    #[test]
    fn recession_prints_one_coefficient_per_column() {
        let text = output(|buf| run_recession(None, &recession_table(30), buf));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "column,k");
        assert_eq!(lines.len(), 2);
        let (name, k) = lines[1].split_once(',').unwrap();
        assert_eq!(name, "a");
        assert_relative_eq!(
            k.parse::<f64>().unwrap(),
            ((0.9 - 1.0 / 0.9) / 2.0f64).exp(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn recession_fails_without_strict_days() {
        let table = parse_table(GAPPY.as_bytes()).unwrap();
        assert!(run_recession(None, &table, Vec::new()).is_err());
    }

    #[test]
    fn bfi_max_prints_one_index_per_column() {
        let table = recession_table(30);
        let text = output(|buf| run_bfi_max(Some(0.9), LH_BETA_DEFAULT, &table, buf));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "column,bfi_max");
        let (name, bfi) = lines[1].split_once(',').unwrap();
        assert_eq!(name, "a");
        let bfi: f64 = bfi.parse().unwrap();
        assert!(bfi > 0.0 && bfi <= 1.0);
    }
}
