use std::fmt;
use std::path::PathBuf;

use tracing::level_filters::LevelFilter;

use crate::options::QueryKind;

/// Raw dump written when the tool is started without arguments
pub const DEFAULT_RAW_FILE: &str = "raw.txt";
/// Report written when the tool is started without arguments
pub const DEFAULT_REPORT_FILE: &str = "report.txt";
/// Upper bound on query switches per invocation
pub const MAX_REQUESTS: usize = 32;

/// A file argument; `-` selects stdin or stdout depending on direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    Stdio,
    File(PathBuf),
}

impl PathSpec {
    pub fn parse(s: &str) -> Self {
        if s == "-" {
            PathSpec::Stdio
        } else {
            PathSpec::File(PathBuf::from(s))
        }
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSpec::Stdio => f.write_str("-"),
            PathSpec::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Where raw CPUID data comes from or goes to. Loading and saving are
/// mutually exclusive, so they share one slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawFile {
    #[default]
    None,
    Load(PathSpec),
    Save(PathSpec),
}

/// Everything one invocation was asked to do. Built once by the argument
/// parser and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunConfig {
    pub raw_file: RawFile,
    /// Report destination; `None` means stdout
    pub out_file: Option<PathSpec>,
    pub quiet: bool,
    pub verbose: u32,
    pub report: bool,
    pub clock_report: bool,
    pub timed_clock_report: bool,
    pub version: bool,
    pub cpu_list: bool,
    /// Query switches in command line order
    pub queries: Vec<QueryKind>,
}

impl RunConfig {
    /// The "double-click" configuration: dump raw data and a report to the
    /// default files, as if invoked with
    /// `--save=raw.txt --outfile=report.txt --report --verbose`.
    pub fn first_run_default() -> Self {
        Self {
            raw_file: RawFile::Save(PathSpec::parse(DEFAULT_RAW_FILE)),
            out_file: Some(PathSpec::parse(DEFAULT_REPORT_FILE)),
            report: true,
            verbose: 1,
            ..Default::default()
        }
    }

    pub fn load_from(&self) -> Option<&PathSpec> {
        match &self.raw_file {
            RawFile::Load(p) => Some(p),
            _ => None,
        }
    }

    pub fn save_to(&self) -> Option<&PathSpec> {
        match &self.raw_file {
            RawFile::Save(p) => Some(p),
            _ => None,
        }
    }

    /// True when every query is a clock query a report already answers.
    /// `--clock-os` is not one of them.
    pub fn only_clock_queries(&self) -> bool {
        self.queries
            .iter()
            .all(|q| matches!(q, QueryKind::Clock | QueryKind::ClockRdtsc))
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::OFF;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
