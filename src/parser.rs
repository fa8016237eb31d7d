//! Parser for `station;timestamp;value` measurement lines.

use chrono::{NaiveDate, NaiveDateTime};
use nom::{
    bytes::complete::take_till1,
    character::complete::char,
    combinator::all_consuming,
    number::complete::double,
    sequence::{terminated, tuple},
    IResult,
};

use crate::error::IngestError;
use crate::series::Sample;
use crate::table::StationTable;

pub type ChunkRecords = StationTable<Vec<Sample>>;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

fn field(input: &str) -> IResult<&str, &str> {
    terminated(take_till1(|c: char| c == ';'), char(';'))(input)
}

fn record(input: &str) -> IResult<&str, (&str, &str, f64)> {
    all_consuming(tuple((field, field, double)))(input)
}

/// Accepts a date (taken as midnight) or a date with a time of day.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parses one line into `(station, sample)`; `Ok(None)` for blank and
/// comment lines.
pub fn parse_line(line: &str, number: usize) -> Result<Option<(&str, Sample)>, IngestError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (_, (station, timestamp, value)) =
        record(line).map_err(|_| IngestError::parse(number, format!("malformed record `{line}`")))?;
    let timestamp = parse_timestamp(timestamp.trim())
        .ok_or_else(|| IngestError::parse(number, format!("invalid timestamp `{timestamp}`")))?;
    if !value.is_finite() {
        return Err(IngestError::parse(number, format!("non-finite value `{value}`")));
    }
    Ok(Some((station.trim(), Sample::new(timestamp, value))))
}

/// Parses every line of `chunk`, grouping samples by station in file order.
///
/// `first_line` is the 1-based number of the chunk's first line. A trailing
/// line without a newline is parsed too.
pub fn parse_chunk(chunk: &[u8], first_line: usize) -> Result<ChunkRecords, IngestError> {
    let mut results = ChunkRecords::new();

    let mut start = 0;
    let mut number = first_line;
    let ends = memchr::memchr_iter(b'\n', chunk).chain(
        (chunk.last().is_some_and(|&b| b != b'\n')).then_some(chunk.len()),
    );
    for end in ends {
        let line = std::str::from_utf8(&chunk[start..end])
            .map_err(|_| IngestError::parse(number, "line is not valid UTF-8"))?;
        if let Some((station, sample)) = parse_line(line, number)? {
            results.get_or_insert_with(station, Vec::new).push(sample);
        }
        start = end + 1;
        number += 1;
    }

    Ok(results)
}
