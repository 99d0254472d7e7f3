use log::info;
use snafu::{prelude::*, Snafu};

use std::path::{Path, PathBuf};

pub mod header;
pub mod io_survey;
pub mod writer;

pub use self::header::RoleColumns;

#[derive(Debug, Snafu)]
pub enum SplitError {
    #[snafu(display("Error opening survey file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing line {lineno} of the survey file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("The survey file {path} has {rows} rows, expected at least 3"))]
    TooFewRows { path: String, rows: usize },
    #[snafu(display("Line {lineno} has {width} columns, expected at least the 11 administrative columns"))]
    CsvLineTooShort { lineno: usize, width: usize },
    #[snafu(display("Column {column} of the header does not name a role and a candidate: {title}"))]
    TitleParse { column: usize, title: String },
    #[snafu(display(
        "The columns of role {role} are not contiguous: column {column} reopens a role last seen at column {last}"
    ))]
    NonContiguousRole {
        role: String,
        column: usize,
        last: usize,
    },
    #[snafu(display("Error creating output directory {path}"))]
    CreatingOutputDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing ballot file {path}"))]
    BallotWrite { source: csv::Error, path: String },
    #[snafu(display("Error flushing ballot file {path}"))]
    BallotFlush {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SplitResult<T> = Result<T, SplitError>;
pub type BSplitResult<T> = Result<T, Box<SplitError>>;

/// A survey export, after dropping the administrative rows and columns.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedSurvey {
    /// The question titles of the candidate columns.
    pub header: Vec<String>,
    /// The ranking cells of each ballot, in file order.
    pub rows: Vec<Vec<String>>,
}

/// Splits the survey export at `input_path` into one ballot file per role.
///
/// The ballot files land in `out_dir` if provided, otherwise in a directory named
/// after the input file. Existing ballot files are overwritten.
pub fn run_split(input_path: String, out_dir: Option<String>) -> BSplitResult<()> {
    let survey = io_survey::read_survey_csv(&input_path)?;
    info!(
        "run_split: {} candidate columns, {} ballots",
        survey.header.len(),
        survey.rows.len()
    );

    let roles = header::extract_roles(&survey.header)?;
    info!("run_split: detected {} roles", roles.len());

    let out_p = match out_dir {
        Some(d) => PathBuf::from(d),
        None => default_output_dir(&input_path)?,
    };
    writer::write_role_ballots(out_p.as_path(), &roles, &survey.rows)?;
    Ok(())
}

// The output directory is named after the input file and is created relative to the
// invocation directory.
fn default_output_dir(input_path: &str) -> SplitResult<PathBuf> {
    match Path::new(input_path).file_stem() {
        Some(stem) => Ok(PathBuf::from(stem)),
        None => whatever!("Cannot name an output directory after {:?}", input_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn title(role: &str, candidate: &str) -> String {
        format!(
            "Rank the candidates standing for the position of {}. If you have no preference for a candidate leave the row blank. <strong>{}</strong>",
            role, candidate
        )
    }

    fn admin_cells(n: usize, tag: &str) -> Vec<String> {
        (0..n).map(|i| format!("{}{}", tag, i)).collect()
    }

    /// Lays out a survey export the way the provider does: question ids, then the
    /// question titles, then import metadata, then one row per ballot.
    fn write_survey(path: &Path, titles: &[String], ballots: &[Vec<&str>]) {
        let width = titles.len() + 11;
        let mut lines: Vec<String> = Vec::new();
        lines.push(admin_cells(width, "Q").join(","));
        let mut header = admin_cells(10, "meta");
        header.extend(titles.iter().cloned());
        header.push("notes".to_string());
        lines.push(header.join(","));
        lines.push(admin_cells(width, "import").join(","));
        for ballot in ballots {
            let mut cells = admin_cells(10, "x");
            cells.extend(ballot.iter().map(|s| s.to_string()));
            cells.push("done".to_string());
            lines.push(cells.join(","));
        }
        fs::write(path, lines.join("\n")).unwrap();
    }

    fn read_back(path: &Path) -> Vec<Vec<String>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .unwrap();
        rdr.records()
            .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn two_role_titles() -> Vec<String> {
        vec![
            title("President", "Alice Moreau"),
            title("President", "Bob Tan"),
            title("Treasurer", "Carol Osei"),
        ]
    }

    fn run(input: &Path, out: &Path) -> BSplitResult<()> {
        run_split(
            input.to_str().unwrap().to_string(),
            Some(out.to_str().unwrap().to_string()),
        )
    }

    #[test]
    fn splits_one_file_per_role() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("spring_committee.csv");
        let out = tmp.path().join("out");
        let ballots = vec![vec!["1", "2", "1"], vec!["2", "1", ""], vec!["", "", "1"]];
        write_survey(&input, &two_role_titles(), &ballots);

        run(&input, &out).unwrap();

        let mut names: Vec<String> = fs::read_dir(&out)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["President.csv", "Treasurer.csv"]);

        let president = read_back(&out.join("President.csv"));
        assert_eq!(president[0], vec!["Alice Moreau", "Bob Tan"]);
        assert_eq!(president.len(), 1 + ballots.len());

        let treasurer = read_back(&out.join("Treasurer.csv"));
        assert_eq!(treasurer[0], vec!["Carol Osei"]);
        assert_eq!(treasurer.len(), 1 + ballots.len());
    }

    #[test]
    fn concatenated_outputs_reproduce_the_trimmed_ballots() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("spring_committee.csv");
        let out = tmp.path().join("out");
        let ballots = vec![vec!["1", "2", "1"], vec!["2", "1", ""], vec!["", "", "1"]];
        write_survey(&input, &two_role_titles(), &ballots);

        run(&input, &out).unwrap();

        let president = read_back(&out.join("President.csv"));
        let treasurer = read_back(&out.join("Treasurer.csv"));
        for (i, ballot) in ballots.iter().enumerate() {
            let mut rebuilt: Vec<String> = president[i + 1].clone();
            rebuilt.extend(treasurer[i + 1].clone());
            assert_eq!(rebuilt, *ballot);
        }
    }

    #[test]
    fn rerunning_overwrites_previous_outputs() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("spring_committee.csv");
        let out = tmp.path().join("out");
        let ballots = vec![vec!["1", "2", "1"]];
        write_survey(&input, &two_role_titles(), &ballots);

        run(&input, &out).unwrap();
        run(&input, &out).unwrap();

        let president = read_back(&out.join("President.csv"));
        assert_eq!(president.len(), 2);
        assert_eq!(president[1], vec!["1", "2"]);
    }

    #[test]
    fn reports_files_with_too_few_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("truncated.csv");
        let out = tmp.path().join("out");
        fs::write(&input, "a,b,c\nd,e,f\n").unwrap();

        let err = run(&input, &out).unwrap_err();
        assert!(matches!(*err, SplitError::TooFewRows { rows: 2, .. }));
    }

    #[test]
    fn reports_missing_input_files() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("does_not_exist.csv");
        let out = tmp.path().join("out");

        let err = run(&input, &out).unwrap_err();
        assert!(matches!(*err, SplitError::CsvOpen { .. }));
    }

    #[test]
    fn default_output_directory_strips_the_extension() {
        assert_eq!(
            default_output_dir("results/spring_committee.csv").unwrap(),
            PathBuf::from("spring_committee")
        );
        assert_eq!(
            default_output_dir("ballots").unwrap(),
            PathBuf::from("ballots")
        );
    }
}
