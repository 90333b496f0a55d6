//! Command line parsing
//!
//! Query switches must be replayed in the order they were given and `-vvv`
//! counts as three steps of verbosity, so arguments are walked by hand
//! rather than through a declarative parser. One argument may match more
//! than one rule (`--clock` is both a report flag and a query).

use thiserror::Error;

use crate::config::{PathSpec, RawFile, RunConfig, MAX_REQUESTS};
use crate::options;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    #[error("Too many `--load' options!")]
    TooManyLoads,

    #[error("Too many `--save' options!")]
    TooManySaves,

    #[error("Cannot have both `--load' and `--save' options!")]
    LoadSaveConflict,

    #[error("--{0}: bad file specification!")]
    BadFile(&'static str),

    #[error("Too many requests!")]
    TooManyRequests,

    #[error("Unrecognized option: `{0}'")]
    Unrecognized(String),
}

impl ArgError {
    /// Text for stderr, including the pointer to `-h`.
    pub fn message(&self) -> String {
        let head = match self {
            ArgError::Unrecognized(_) => self.to_string(),
            _ => format!("Error: {self}"),
        };
        format!("{head}\n\nUse -h to get a list of supported options")
    }
}

/// Outcome of a successful parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Run(RunConfig),
    Help,
}

/// Parse the arguments that follow the program name.
pub fn parse_from<S: AsRef<str>>(args: &[S]) -> Result<Parsed, ArgError> {
    if args.is_empty() {
        return Ok(Parsed::Run(RunConfig::first_run_default()));
    }

    let mut config = RunConfig::default();
    for arg in args {
        let arg: &str = arg.as_ref();
        let mut recognized = false;

        if arg == "-h" || arg == "--help" {
            return Ok(Parsed::Help);
        }

        if let Some(path) = arg.strip_prefix("--load=") {
            match config.raw_file {
                RawFile::Load(_) => return Err(ArgError::TooManyLoads),
                RawFile::Save(_) => return Err(ArgError::LoadSaveConflict),
                RawFile::None => {}
            }
            if path.is_empty() {
                return Err(ArgError::BadFile("load"));
            }
            config.raw_file = RawFile::Load(PathSpec::parse(path));
            recognized = true;
        }

        if let Some(path) = arg.strip_prefix("--save=") {
            match config.raw_file {
                RawFile::Save(_) => return Err(ArgError::TooManySaves),
                RawFile::Load(_) => return Err(ArgError::LoadSaveConflict),
                RawFile::None => {}
            }
            if path.is_empty() {
                return Err(ArgError::BadFile("save"));
            }
            config.raw_file = RawFile::Save(PathSpec::parse(path));
            recognized = true;
        }

        if let Some(path) = arg.strip_prefix("--outfile=") {
            if path.is_empty() {
                return Err(ArgError::BadFile("outfile"));
            }
            config.out_file = Some(PathSpec::parse(path));
            recognized = true;
        }

        match arg {
            "--report" | "--all" => {
                config.report = true;
                recognized = true;
            }
            "--clock" => {
                config.clock_report = true;
                recognized = true;
            }
            "--clock-rdtsc" => {
                config.clock_report = true;
                config.timed_clock_report = true;
                recognized = true;
            }
            "--quiet" => {
                config.quiet = true;
                recognized = true;
            }
            "--verbose" => {
                config.verbose += 1;
                recognized = true;
            }
            "--version" => {
                config.version = true;
                recognized = true;
            }
            "--cpulist" => {
                config.cpu_list = true;
                recognized = true;
            }
            _ => {}
        }

        if let Some(vs) = arg.strip_prefix('-') {
            if !vs.is_empty() && vs.bytes().all(|b| b == b'v') {
                config.verbose += vs.len() as u32;
                recognized = true;
            }
        }

        if let Some(entry) = options::lookup(arg) {
            if config.queries.len() >= MAX_REQUESTS {
                return Err(ArgError::TooManyRequests);
            }
            config.queries.push(entry.kind);
            recognized = true;
        }

        if !recognized {
            return Err(ArgError::Unrecognized(arg.to_string()));
        }
    }

    Ok(Parsed::Run(config))
}
