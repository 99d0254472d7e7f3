// Primitives for reading the survey export.

use std::fs::File;

use log::debug;
use snafu::prelude::*;

use crate::split::*;

/// Administrative columns preceding the first candidate column.
pub const LEADING_ADMIN_COLS: usize = 10;
/// Administrative columns following the last candidate column.
pub const TRAILING_ADMIN_COLS: usize = 1;

/// Reads a survey export. The first and third rows carry the export's question ids and
/// import metadata and are dropped, the second row is the header, everything after is
/// one ballot per row. Header and ballots come back with the administrative columns
/// removed.
pub fn read_survey_csv(path: &str) -> BSplitResult<ParsedSurvey> {
    let records = get_records(path)?;

    let mut raw: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_survey_csv: lineno: {:?} width: {:?}", lineno, line.len());
        raw.push(line.iter().map(|s| s.to_string()).collect());
    }
    ensure!(
        raw.len() >= 3,
        TooFewRowsSnafu {
            path,
            rows: raw.len()
        }
    );

    let header = trim_admin_columns(&raw[1], 2)?;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, fields) in raw.iter().enumerate().skip(3) {
        rows.push(trim_admin_columns(fields, idx + 1)?);
    }
    Ok(ParsedSurvey { header, rows })
}

fn get_records(path: &str) -> BSplitResult<csv::StringRecordsIntoIter<File>> {
    // The source rows are not all the same width, hence the flexible reader.
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    Ok(rdr.into_records())
}

fn trim_admin_columns(fields: &[String], lineno: usize) -> SplitResult<Vec<String>> {
    let width = fields.len();
    ensure!(
        width >= LEADING_ADMIN_COLS + TRAILING_ADMIN_COLS,
        CsvLineTooShortSnafu { lineno, width }
    );
    Ok(fields[LEADING_ADMIN_COLS..width - TRAILING_ADMIN_COLS].to_vec())
}
