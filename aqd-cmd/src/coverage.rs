//! Temporal coverage of a measurements file.

use aqd_data::coverage::{coverage_for_parameter, Bucket, Histogram, TemporalCoverage};
use aqd_openaq::date_range::DateRange;
use aqd_openaq::measurement::Measurement;
use aqd_openaq::Results;
use aqd_utils::dates::parse_local_timestamp;
use anyhow::Context;
use log::info;
use std::io::Write;

/// Bin `input`'s measurements for `parameter` and print or write the result.
pub fn run_coverage(
    input: &str,
    parameter: &str,
    date_range: Option<&str>,
    fill: bool,
    csv_path: Option<&str>,
) -> anyhow::Result<()> {
    let body = std::fs::read_to_string(input).with_context(|| format!("reading {}", input))?;
    let measurements = parse_measurements(&body)?;
    let range = date_range.map(str::parse::<DateRange>).transpose()?;
    info!(
        "Loaded {} measurements from {}; binning {}",
        measurements.len(),
        input,
        parameter
    );

    let coverage = compute_coverage(&measurements, parameter, range.as_ref(), fill)?;

    match csv_path {
        Some(path) => {
            let file = std::fs::File::create(path).with_context(|| format!("creating {}", path))?;
            write_csv(&coverage, file)?;
            info!("Coverage written to {}", path);
        }
        None => println!("{}", serde_json::to_string_pretty(&coverage)?),
    }
    Ok(())
}

/// Measurements from either a `{"results": [...]}` envelope or a bare array.
pub fn parse_measurements(body: &str) -> anyhow::Result<Vec<Measurement>> {
    if let Ok(envelope) = serde_json::from_str::<Results<Measurement>>(body) {
        return Ok(envelope.results);
    }
    serde_json::from_str(body).context("expected a results envelope or an array of measurements")
}

/// Bin one parameter's measurements, optionally limited to `range`.
///
/// Timestamps that do not parse are kept so binning reports them.
pub fn compute_coverage(
    measurements: &[Measurement],
    parameter: &str,
    range: Option<&DateRange>,
    fill: bool,
) -> anyhow::Result<TemporalCoverage> {
    let selected: Vec<Measurement> = match range {
        Some(range) => measurements
            .iter()
            .filter(|m| {
                parse_local_timestamp(m.timestamp_local()).map_or(true, |ts| range.contains(&ts))
            })
            .cloned()
            .collect(),
        None => measurements.to_vec(),
    };
    let coverage = coverage_for_parameter(&selected, parameter)?;
    if !fill {
        return Ok(coverage);
    }
    Ok(TemporalCoverage {
        hour: coverage.hour.with_all_buckets(),
        day: coverage.day.with_all_buckets(),
        month: coverage.month.with_all_buckets(),
    })
}

/// Write `histogram,bucket,count` rows, hours first, then days, then months.
pub fn write_csv<W: Write>(coverage: &TemporalCoverage, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["histogram", "bucket", "count"])?;
    write_rows(&mut wtr, "hour", &coverage.hour)?;
    write_rows(&mut wtr, "day", &coverage.day)?;
    write_rows(&mut wtr, "month", &coverage.month)?;
    wtr.flush()?;
    Ok(())
}

fn write_rows<W: Write, B: Bucket>(
    wtr: &mut csv::Writer<W>,
    name: &str,
    histogram: &Histogram<B>,
) -> anyhow::Result<()> {
    for (bucket, count) in histogram.iter() {
        wtr.write_record([name.to_string(), bucket.to_string(), count.to_string()])?;
    }
    Ok(())
}
