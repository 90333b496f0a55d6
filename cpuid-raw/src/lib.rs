//! # cpuid-raw
//!
//! CPU identification for x86 processors.
//!
//! This crate captures raw CPUID register snapshots, reads and writes them in
//! a plain text dump format, and decodes them into vendor, model, cache and
//! feature information. It also exposes the clock measurement helpers and
//! MSR access used by the `cpuid_tool` command line front-end.
//!
//! ## Usage
//!
//! ```no_run
//! use cpuid_raw::{identify, RawCpuData};
//!
//! let raw = RawCpuData::capture()?;
//! let id = identify(&raw)?;
//! println!("{} ({})", id.brand_str, id.codename);
//! # Ok::<(), cpuid_raw::CpuidError>(())
//! ```
//!
//! Snapshots taken elsewhere decode the same way:
//!
//! ```
//! use cpuid_raw::{identify, samples, RawCpuData};
//!
//! let raw = RawCpuData::deserialize(samples::ALDER_LAKE_I7_12700K.as_bytes())?;
//! assert_eq!(identify(&raw)?.codename, "Core (Alder Lake)");
//! # Ok::<(), cpuid_raw::CpuidError>(())
//! ```

pub mod affinity;
pub mod clock;
pub mod codename;
pub mod error;
pub mod features;
pub mod identify;
pub mod leaf;
pub mod msr;
pub mod native;
pub mod raw;
pub mod samples;
pub mod vendor;

pub use codename::{codename, cpu_list, CpuList};
pub use error::{CpuidError, Result};
pub use features::{feature_name, num_features, FeatureFlags};
pub use identify::{identify, CacheInfo, CpuId};
pub use msr::{MsrDriver, MsrError};
pub use native::cpuid_present;
pub use raw::RawCpuData;
pub use vendor::Vendor;

/// Library version string
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
