//! One run of the tool: acquire, save, report, answer queries, list CPUs

use std::fs::File;
use std::io::{self, BufWriter, Write};

use cpuid_raw::{identify, CpuId, CpuidError, RawCpuData};
use once_cell::unsync::OnceCell;
use tracing::{debug, info};

use crate::acquire::{self, RawSource};
use crate::config::{PathSpec, RunConfig};
use crate::error::{Result, ToolError};
use crate::report::{self, ClockMode};

/// Run `config` with its report going to `--outfile` or stdout.
pub fn run(config: RunConfig, source: &dyn RawSource) -> Result<()> {
    match &config.out_file {
        Some(PathSpec::File(path)) => {
            let file = File::create(path).map_err(|source| ToolError::OutFile {
                path: path.clone(),
                source,
            })?;
            let mut out = BufWriter::new(file);
            run_with_output(&config, source, &mut out)?;
            out.flush()?;
        }
        Some(PathSpec::Stdio) | None => {
            let mut out = io::stdout().lock();
            run_with_output(&config, source, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn describe_output(config: &RunConfig) -> String {
    match &config.out_file {
        Some(PathSpec::File(path)) => path.display().to_string(),
        Some(PathSpec::Stdio) | None => "stdout".to_string(),
    }
}

fn identify_once<'a>(
    cell: &'a OnceCell<cpuid_raw::Result<CpuId>>,
    raw: Option<&RawCpuData>,
) -> &'a cpuid_raw::Result<CpuId> {
    cell.get_or_init(|| match raw {
        Some(raw) => identify(raw),
        None => Err(CpuidError::NoCpuid),
    })
}

/// Run `config` writing everything but the raw dump to `out`.
pub fn run_with_output(
    config: &RunConfig,
    source: &dyn RawSource,
    out: &mut dyn Write,
) -> Result<()> {
    if config.version {
        writeln!(out, "{}", cpuid_raw::version())?;
    }

    let raw = acquire::acquire(config, source)?;
    if let (Some(to), Some(raw)) = (config.save_to(), raw.as_ref()) {
        acquire::save(raw, to)?;
    }

    let decoded = OnceCell::new();

    if config.report {
        info!("Writing decoded CPU report to `{}'", describe_output(config));
        let clock_mode = config.clock_report.then_some(if config.timed_clock_report {
            ClockMode::Timed
        } else {
            ClockMode::Os
        });
        let identified = identify_once(&decoded, raw.as_ref());
        report::write_report(out, identified.as_ref(), clock_mode)?;
    }

    if config.queries.is_empty() {
        debug!("No queries");
    } else if config.report && config.only_clock_queries() {
        debug!("Clock queries already answered by the report");
    } else {
        let id = if acquire::needs_raw_data(config) {
            match identify_once(&decoded, raw.as_ref()) {
                Ok(id) => Some(id),
                Err(e) => return Err(ToolError::Identify(e.to_string())),
            }
        } else {
            None
        };
        for &kind in &config.queries {
            report::answer_query(out, kind, id)?;
        }
    }

    if config.cpu_list {
        report::write_cpu_list(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{parse_from, Parsed};
    use cpuid_raw::samples;

    struct Snapshot(Option<&'static str>);

    impl RawSource for Snapshot {
        fn capture(&self) -> cpuid_raw::Result<RawCpuData> {
            match self.0 {
                Some(dump) => RawCpuData::deserialize(dump.as_bytes()),
                None => Err(CpuidError::NoCpuid),
            }
        }
    }

    fn config(args: &[&str]) -> RunConfig {
        match parse_from(args).unwrap() {
            Parsed::Run(config) => config,
            Parsed::Help => panic!("unexpected help"),
        }
    }

    fn output(args: &[&str], source: &dyn RawSource) -> Result<String> {
        let mut buf = Vec::new();
        run_with_output(&config(args), source, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    const INTEL: Snapshot = Snapshot(Some(samples::ALDER_LAKE_I7_12700K));

    #[test]
    fn test_version_line_comes_first() {
        let text = output(&["--version", "--cpulist", "--family"], &INTEL).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(cpuid_raw::version()));
        assert_eq!(lines.next(), Some("6"));
        assert_eq!(lines.next(), Some("-----Intel-----"));
    }

    #[test]
    fn test_queries_in_command_line_order() {
        let text = output(&["--model", "--vendorstr", "--model", "--extmodel"], &INTEL).unwrap();
        assert_eq!(text, "7\nGenuineIntel\n7\n151\n");
    }

    #[test]
    fn test_report_then_queries() {
        let text = output(&["--codename", "--report"], &INTEL).unwrap();
        assert!(text.starts_with("CPUID is present\n"));
        assert!(text.ends_with("\nCore (Alder Lake)\n"));
    }

    #[test]
    fn test_report_suppresses_clock_only_queries() {
        let with_report = output(&["--report", "--clock"], &INTEL).unwrap();
        let report_only = output(&["--report"], &INTEL).unwrap();
        assert_eq!(
            with_report.lines().count(),
            report_only.lines().count() + 1
        );
        assert!(with_report.lines().last().unwrap().starts_with("  cpu clock  : "));
    }

    #[test]
    fn test_clock_os_is_not_suppressed() {
        let with_report = output(&["--report", "--clock-os"], &INTEL).unwrap();
        let report_only = output(&["--report"], &INTEL).unwrap();
        assert_eq!(
            with_report.lines().count(),
            report_only.lines().count() + 1
        );
        assert!(!with_report.contains("cpu clock"));
    }

    #[test]
    fn test_identification_failure_is_inline_in_report() {
        let empty = Snapshot(Some("version=0.3.0\nbasic_cpuid[0]=00000000 00000000 00000000 00000000\n"));
        let text = output(&["--report"], &empty).unwrap();
        assert!(text.contains("Error identifying the CPU: "));
    }

    #[test]
    fn test_identification_failure_is_fatal_for_queries() {
        let empty = Snapshot(Some("version=0.3.0\nbasic_cpuid[0]=00000000 00000000 00000000 00000000\n"));
        let err = output(&["--family"], &empty).unwrap_err();
        assert!(matches!(err, ToolError::Identify(_)));
        assert!(err.message().starts_with("Error identifying the CPU: "));
    }

    #[test]
    fn test_capture_failure_is_fatal() {
        let err = output(&["--report"], &Snapshot(None)).unwrap_err();
        assert!(matches!(err, ToolError::Acquire { .. }));
    }

    #[test]
    fn test_no_capture_for_unidentified_queries() {
        let text = output(&["--cpuid"], &Snapshot(None)).unwrap();
        assert!(text == "1\n" || text == "0\n");
    }

    #[test]
    fn test_outfile_open_failure() {
        let dir = std::env::temp_dir().join(format!("cpuid-tool-{}-missing", std::process::id()));
        let path = dir.join("report.txt");
        let config = RunConfig {
            out_file: Some(PathSpec::File(path.clone())),
            report: true,
            ..Default::default()
        };
        let err = run(config, &INTEL).unwrap_err();
        assert_eq!(
            err.message(),
            format!("Cannot open `{}' for writing!", path.display())
        );
    }
}
