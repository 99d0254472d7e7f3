use clap::Parser;

/// This program splits an exported ranked-choice survey into one ballot file per role.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The survey export containing the ranking data. The second row must hold
    /// the question titles, with one question per (role, candidate) pair.
    #[clap(value_parser)]
    pub input: String,

    /// (directory path or empty) If specified, the directory where the per-role ballot files
    /// will be written. By default, a directory named after the input file (extension
    /// stripped) is created in the current directory.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
