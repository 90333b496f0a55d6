//! Obtaining the raw snapshot and writing it back out

use std::io;

use cpuid_raw::RawCpuData;
use tracing::{debug, info};

use crate::config::{PathSpec, RunConfig};
use crate::error::{Result, ToolError};

/// Where a live snapshot comes from
pub trait RawSource {
    fn capture(&self) -> cpuid_raw::Result<RawCpuData>;
}

/// The CPU this process runs on
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveCpu;

impl RawSource for LiveCpu {
    fn capture(&self) -> cpuid_raw::Result<RawCpuData> {
        RawCpuData::capture()
    }
}

/// True if anything in this run reads the snapshot.
pub fn needs_raw_data(config: &RunConfig) -> bool {
    config.save_to().is_some()
        || config.report
        || config.queries.iter().any(|q| q.ident_required())
}

/// Load the snapshot from `--load`, capture it live if the run needs one,
/// or return `None`.
pub fn acquire(config: &RunConfig, source: &dyn RawSource) -> Result<Option<RawCpuData>> {
    if let Some(from) = config.load_from() {
        return load(from).map(Some);
    }
    if !needs_raw_data(config) {
        debug!("No raw CPUID data needed");
        return Ok(None);
    }
    source
        .capture()
        .map(Some)
        .map_err(|source| ToolError::Acquire {
            context: "Cannot obtain raw CPU data!".to_string(),
            source,
        })
}

fn load(from: &PathSpec) -> Result<RawCpuData> {
    let (result, context) = match from {
        PathSpec::Stdio => (
            RawCpuData::deserialize(io::stdin().lock()),
            "Cannot deserialize raw data from stdin".to_string(),
        ),
        PathSpec::File(path) => (
            RawCpuData::load_from_file(path),
            format!("Cannot deserialize raw data from file `{}'", path.display()),
        ),
    };
    result.map_err(|source| ToolError::Acquire { context, source })
}

/// Serialize `raw` to a file, or stdout for `-`.
pub fn save(raw: &RawCpuData, to: &PathSpec) -> Result<()> {
    info!("Writing raw CPUID dump to `{to}'");
    let (result, context) = match to {
        PathSpec::Stdio => (
            raw.serialize(io::stdout().lock()),
            "Cannot serialize raw data to stdout".to_string(),
        ),
        PathSpec::File(path) => (
            raw.save_to_file(path),
            format!("Cannot serialize raw data to file `{}'", path.display()),
        ),
    };
    result.map_err(|source| ToolError::Serialize { context, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawFile;
    use crate::options::QueryKind;
    use cpuid_raw::{samples, CpuidError};
    use std::cell::Cell;
    use std::path::PathBuf;

    struct Fixture {
        raw: Option<RawCpuData>,
        calls: Cell<u32>,
    }

    impl Fixture {
        fn new(raw: Option<RawCpuData>) -> Self {
            Self {
                raw,
                calls: Cell::new(0),
            }
        }
    }

    impl RawSource for Fixture {
        fn capture(&self) -> cpuid_raw::Result<RawCpuData> {
            self.calls.set(self.calls.get() + 1);
            self.raw.clone().ok_or(CpuidError::NoCpuid)
        }
    }

    fn alder_lake() -> RawCpuData {
        RawCpuData::deserialize(samples::ALDER_LAKE_I7_12700K.as_bytes()).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cpuid-tool-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_needs_raw_data() {
        let mut config = RunConfig::default();
        assert!(!needs_raw_data(&config));

        config.queries = vec![QueryKind::CpuidPresent, QueryKind::Clock, QueryKind::Rdmsr];
        assert!(!needs_raw_data(&config));

        config.queries.push(QueryKind::Codename);
        assert!(needs_raw_data(&config));

        let config = RunConfig {
            raw_file: RawFile::Save(PathSpec::Stdio),
            ..Default::default()
        };
        assert!(needs_raw_data(&config));
    }

    #[test]
    fn test_skip_when_unneeded() {
        let fixture = Fixture::new(Some(alder_lake()));
        let config = RunConfig {
            queries: vec![QueryKind::ClockOs],
            ..Default::default()
        };
        assert!(acquire(&config, &fixture).unwrap().is_none());
        assert_eq!(fixture.calls.get(), 0);
    }

    #[test]
    fn test_capture_failure() {
        let fixture = Fixture::new(None);
        let config = RunConfig {
            report: true,
            ..Default::default()
        };
        let err = acquire(&config, &fixture).unwrap_err();
        assert_eq!(
            err.message(),
            "Cannot obtain raw CPU data!\nError: CPUID instruction is not supported"
        );
    }

    #[test]
    fn test_save_then_load_without_capture() {
        let path = temp_path("acquire-roundtrip.txt");
        let raw = alder_lake();
        save(&raw, &PathSpec::File(path.clone())).unwrap();

        let fixture = Fixture::new(None);
        let config = RunConfig {
            raw_file: RawFile::Load(PathSpec::File(path.clone())),
            report: true,
            ..Default::default()
        };
        let loaded = acquire(&config, &fixture).unwrap();
        assert_eq!(loaded, Some(raw));
        assert_eq!(fixture.calls.get(), 0);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_path("does-not-exist.txt");
        let config = RunConfig {
            raw_file: RawFile::Load(PathSpec::File(path.clone())),
            ..Default::default()
        };
        let err = acquire(&config, &LiveCpu).unwrap_err();
        let message = err.message();
        assert!(message.starts_with(&format!(
            "Cannot deserialize raw data from file `{}'\nError: ",
            path.display()
        )));
    }

    #[test]
    fn test_save_to_unwritable_path() {
        let path = temp_path("no-such-dir").join("raw.txt");
        let err = save(&alder_lake(), &PathSpec::File(path)).unwrap_err();
        assert!(matches!(err, ToolError::Serialize { .. }));
        assert!(err.message().starts_with("Cannot serialize raw data to file `"));
    }
}
