//! Command line front-end for the `cpuid-raw` identification library
//!
//! The binary is a thin wrapper: [`args::parse_from`] turns argv into a
//! [`RunConfig`], and [`driver::run`] carries it out against the live CPU.
//! Both halves are usable on their own, which is how the tests drive the
//! tool with recorded snapshots instead of the host processor.

pub mod acquire;
pub mod args;
pub mod config;
pub mod driver;
pub mod error;
pub mod options;
pub mod report;

pub use acquire::{LiveCpu, RawSource};
pub use args::{parse_from, ArgError, Parsed};
pub use config::RunConfig;
pub use error::{Result, ToolError};
