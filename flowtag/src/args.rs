use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::lookup_table::DuplicatePolicy;

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// The path to the flow log file (version 2 records)
    pub flow_log: PathBuf,

    /// The path to the CSV lookup table with dstport, protocol and tag columns
    pub lookup: PathBuf,

    /// Output method
    #[clap(short, long, value_enum)]
    pub output: Option<ExportMethodType>,

    /// File path for the report (used if method is File, default: output_results.txt)
    #[clap(long)]
    pub export_path: Option<PathBuf>,

    /// Fail when the lookup table maps the same port/protocol twice
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub reject_duplicate_keys: bool,

    /// Configuration file with default output settings
    #[clap(long)]
    pub config_file: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMethodType {
    /// The report will be printed to the console
    Print,

    /// The report will be written to a file
    #[default]
    File,
}

/// Settings read from `--config-file`. Command line flags take precedence.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigFile {
    pub output: ExportMethodType,
    pub export_path: Option<PathBuf>,
    pub reject_duplicate_keys: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub flow_log: PathBuf,
    pub lookup: PathBuf,
    pub output: ExportMethodType,
    pub export_path: Option<PathBuf>,
    pub duplicate_policy: DuplicatePolicy,
}

impl Config {
    pub fn resolve(cli: Cli, file: ConfigFile) -> Self {
        let reject = cli.reject_duplicate_keys || file.reject_duplicate_keys;
        Config {
            flow_log: cli.flow_log,
            lookup: cli.lookup,
            output: cli.output.unwrap_or(file.output),
            export_path: cli.export_path.or(file.export_path),
            duplicate_policy: if reject {
                DuplicatePolicy::Reject
            } else {
                DuplicatePolicy::LastWins
            },
        }
    }
}
