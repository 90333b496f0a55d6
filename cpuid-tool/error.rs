use std::io;
use std::path::PathBuf;

use cpuid_raw::CpuidError;
use thiserror::Error;

use crate::args::ArgError;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Args(#[from] ArgError),

    /// Loading or capturing the raw snapshot failed
    #[error("{context}")]
    Acquire {
        context: String,
        #[source]
        source: CpuidError,
    },

    #[error("{context}")]
    Serialize {
        context: String,
        #[source]
        source: CpuidError,
    },

    #[error("Error identifying the CPU: {0}")]
    Identify(String),

    #[error("Cannot open `{}' for writing!", .path.display())]
    OutFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write output: {0}")]
    Io(#[from] io::Error),
}

impl ToolError {
    /// Lines printed to stderr when the run fails and is not quiet
    pub fn message(&self) -> String {
        match self {
            ToolError::Args(e) => e.message(),
            ToolError::Acquire { source, .. } | ToolError::Serialize { source, .. } => {
                format!("{self}\nError: {source}")
            }
            _ => self.to_string(),
        }
    }

    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        255
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_message_has_detail_line() {
        let err = ToolError::Acquire {
            context: "Cannot obtain raw CPU data!".to_string(),
            source: CpuidError::NoCpuid,
        };
        assert_eq!(
            err.message(),
            "Cannot obtain raw CPU data!\nError: CPUID instruction is not supported"
        );
        assert_eq!(err.exit_code(), 255);
    }

    #[test]
    fn test_outfile_message() {
        let err = ToolError::OutFile {
            path: PathBuf::from("/nonexistent/report.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.message(), "Cannot open `/nonexistent/report.txt' for writing!");
    }
}
