use std::io;
use thiserror::Error;

/// Errors reported by snapshot capture, (de)serialization and identification
#[derive(Error, Debug)]
pub enum CpuidError {
    #[error("CPUID instruction is not supported")]
    NoCpuid,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid file format at line {line}: {reason}")]
    BadFormat { line: usize, reason: String },

    #[error("Raw data does not contain basic CPUID leaf 0")]
    EmptyDump,
}

pub type Result<T> = std::result::Result<T, CpuidError>;
