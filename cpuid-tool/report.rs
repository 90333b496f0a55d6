//! Text output: the full report, single-line query answers, the CPU list

use std::io::{self, Write};

use cpuid_raw::msr::IA32_TIME_STAMP_COUNTER;
use cpuid_raw::{clock, cpu_list, CpuId, CpuidError, MsrDriver, Vendor};

use crate::options::QueryKind;

/// Busy-wait used by RDTSC based clock answers
const TIMED_CLOCK_MILLIS: u64 = 400;

/// How the report's clock line is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// OS information, falling back to a short measurement
    Os,
    /// TSC measurement with the quad check
    Timed,
}

/// Unknown values print as -1.
fn num(value: Option<u32>) -> i64 {
    value.map_or(-1, i64::from)
}

fn clock_mhz(mode: ClockMode) -> i64 {
    num(match mode {
        ClockMode::Os => clock::clock(),
        ClockMode::Timed => clock::clock_measure(TIMED_CLOCK_MILLIS, true),
    })
}

fn write_flags<W: Write + ?Sized>(out: &mut W, id: &CpuId) -> io::Result<()> {
    for name in id.flags.names() {
        write!(out, " {name}")?;
    }
    writeln!(out)
}

/// Write the full report. A failed identification is noted inline and the
/// report continues with empty values.
pub fn write_report<W: Write + ?Sized>(
    out: &mut W,
    identified: std::result::Result<&CpuId, &CpuidError>,
    clock_mode: Option<ClockMode>,
) -> io::Result<()> {
    writeln!(out, "CPUID is present")?;
    let fallback = CpuId::default();
    let id = match identified {
        Ok(id) => id,
        Err(e) => {
            writeln!(out, "Error identifying the CPU: {e}")?;
            &fallback
        }
    };

    writeln!(out, "CPU Info:\n------------------")?;
    writeln!(out, "  vendor_str : `{}'", id.vendor_str)?;
    writeln!(out, "  vendor id  : {}", id.vendor.id())?;
    writeln!(out, "  brand_str  : `{}'", id.brand_str)?;
    writeln!(out, "  family     : {0} ({0:02X}h)", id.family)?;
    writeln!(out, "  model      : {0} ({0:02X}h)", id.model)?;
    writeln!(out, "  stepping   : {0} ({0:02X}h)", id.stepping)?;
    writeln!(out, "  ext_family : {0} ({0:02X}h)", id.ext_family)?;
    writeln!(out, "  ext_model  : {0} ({0:02X}h)", id.ext_model)?;
    writeln!(out, "  num_cores  : {}", num(id.num_cores))?;
    writeln!(out, "  num_logical: {}", num(id.num_logical_cpus))?;
    writeln!(out, "  tot_logical: {}", num(id.total_logical_cpus))?;
    writeln!(out, "  L1 D cache : {} KB", num(id.l1d.size_kb))?;
    writeln!(out, "  L1 I cache : {} KB", num(id.l1i.size_kb))?;
    writeln!(out, "  L2 cache   : {} KB", num(id.l2.size_kb))?;
    writeln!(out, "  L3 cache   : {} KB", num(id.l3.size_kb))?;
    writeln!(out, "  L1D assoc. : {}-way", num(id.l1d.assoc))?;
    writeln!(out, "  L2 assoc.  : {}-way", num(id.l2.assoc))?;
    writeln!(out, "  L3 assoc.  : {}-way", num(id.l3.assoc))?;
    writeln!(out, "  L1D line sz: {} bytes", num(id.l1d.line_size))?;
    writeln!(out, "  L2 line sz : {} bytes", num(id.l2.line_size))?;
    writeln!(out, "  L3 line sz : {} bytes", num(id.l3.line_size))?;
    writeln!(out, "  code name  : `{}'", id.codename)?;
    write!(out, "  features   :")?;
    write_flags(out, id)?;

    if let Some(mode) = clock_mode {
        writeln!(out, "  cpu clock  : {} MHz", clock_mhz(mode))?;
    }
    Ok(())
}

/// Answer one query on one line. `id` is `None` only when no query in the
/// run needs identification; such kinds then print their -1/empty value.
pub fn answer_query<W: Write + ?Sized>(
    out: &mut W,
    kind: QueryKind,
    id: Option<&CpuId>,
) -> io::Result<()> {
    let fallback = CpuId::default();
    let id = id.unwrap_or(&fallback);

    match kind {
        QueryKind::CpuidPresent => writeln!(out, "{}", u8::from(cpuid_raw::cpuid_present())),
        QueryKind::VendorStr => writeln!(out, "{}", id.vendor_str),
        QueryKind::VendorId => writeln!(out, "{}", id.vendor.id()),
        QueryKind::BrandString => writeln!(out, "{}", id.brand_str),
        QueryKind::Family => writeln!(out, "{}", id.family),
        QueryKind::Model => writeln!(out, "{}", id.model),
        QueryKind::Stepping => writeln!(out, "{}", id.stepping),
        QueryKind::ExtFamily => writeln!(out, "{}", id.ext_family),
        QueryKind::ExtModel => writeln!(out, "{}", id.ext_model),
        QueryKind::NumCores => writeln!(out, "{}", num(id.num_cores)),
        QueryKind::NumLogical => writeln!(out, "{}", num(id.num_logical_cpus)),
        QueryKind::TotalCpus => writeln!(out, "{}", num(id.total_logical_cpus)),
        QueryKind::L1dSize => writeln!(out, "{}", num(id.l1d.size_kb)),
        QueryKind::L1iSize => writeln!(out, "{}", num(id.l1i.size_kb)),
        QueryKind::L2Size => writeln!(out, "{}", num(id.l2.size_kb)),
        QueryKind::L3Size => writeln!(out, "{}", num(id.l3.size_kb)),
        QueryKind::L1dAssoc => writeln!(out, "{}", num(id.l1d.assoc)),
        QueryKind::L2Assoc => writeln!(out, "{}", num(id.l2.assoc)),
        QueryKind::L3Assoc => writeln!(out, "{}", num(id.l3.assoc)),
        QueryKind::L1dCacheline => writeln!(out, "{}", num(id.l1d.line_size)),
        QueryKind::L2Cacheline => writeln!(out, "{}", num(id.l2.line_size)),
        QueryKind::L3Cacheline => writeln!(out, "{}", num(id.l3.line_size)),
        QueryKind::Codename => writeln!(out, "{}", id.codename),
        QueryKind::Features => write_flags(out, id),
        QueryKind::Clock => writeln!(out, "{}", clock_mhz(ClockMode::Os)),
        QueryKind::ClockOs => writeln!(out, "{}", num(clock::clock_by_os())),
        QueryKind::ClockRdtsc => writeln!(out, "{}", clock_mhz(ClockMode::Timed)),
        QueryKind::Rdmsr => write_tsc_msr(out),
    }
}

/// MSR failures are part of the answer, not errors of the run.
fn write_tsc_msr<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    let mut driver = match MsrDriver::open(0) {
        Ok(driver) => driver,
        Err(e) => return writeln!(out, "Cannot open MSR driver: {e}"),
    };
    match driver.read(IA32_TIME_STAMP_COUNTER) {
        Ok(value) => writeln!(out, "{value}"),
        Err(e) => writeln!(out, "Cannot read MSR: {e}"),
    }
}

/// Every known model name, grouped by vendor.
pub fn write_cpu_list<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    for (vendor, name) in Vendor::LISTED {
        writeln!(out, "-----{name}-----")?;
        let list = cpu_list(vendor);
        for model in &list.names {
            writeln!(out, "{model}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpuid_raw::{identify, samples, RawCpuData};

    fn identified(dump: &str) -> CpuId {
        let raw = RawCpuData::deserialize(dump.as_bytes()).unwrap();
        identify(&raw).unwrap()
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_report_layout() {
        let id = identified(samples::ALDER_LAKE_I7_12700K);
        let text = render(|out| write_report(out, Ok(&id), None));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "CPUID is present");
        assert_eq!(lines[1], "CPU Info:");
        assert_eq!(lines[2], "------------------");
        assert_eq!(lines[3], "  vendor_str : `GenuineIntel'");
        assert_eq!(lines[4], "  vendor id  : 0");
        assert!(text.contains("  family     : 6 (06h)\n"));
        assert!(text.contains("  ext_model  : 151 (97h)\n"));
        assert!(text.contains("  num_cores  : 10\n"));
        assert!(text.contains("  L1 D cache : 48 KB\n"));
        assert!(text.contains("  L2 cache   : 1280 KB\n"));
        assert!(text.contains("  L1D assoc. : 12-way\n"));
        assert!(text.contains("  L1D line sz: 64 bytes\n"));
        assert!(text.contains("  code name  : `Core (Alder Lake)'\n"));
        assert!(lines.last().unwrap().starts_with("  features   : fpu vme"));
        assert!(!text.contains("cpu clock"));
    }

    #[test]
    fn test_report_after_failed_identification() {
        let err = CpuidError::NoCpuid;
        let text = render(|out| write_report(out, Err(&err), None));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "CPUID is present");
        assert_eq!(
            lines[1],
            "Error identifying the CPU: CPUID instruction is not supported"
        );
        assert_eq!(lines[2], "CPU Info:");
        assert!(text.contains("  vendor id  : -1\n"));
        assert!(text.contains("  L3 cache   : -1 KB\n"));
        assert!(text.contains("  features   :\n"));
    }

    #[test]
    fn test_report_clock_line() {
        let id = identified(samples::VERMEER_RYZEN_9_5900X);
        let text = render(|out| write_report(out, Ok(&id), Some(ClockMode::Os)));
        let last = text.lines().last().unwrap();
        assert!(last.starts_with("  cpu clock  : "), "{last:?}");
        assert!(last.ends_with(" MHz"));
    }

    #[test]
    fn test_query_answers() {
        let id = identified(samples::VERMEER_RYZEN_9_5900X);
        let text = render(|out| {
            for kind in [
                QueryKind::VendorStr,
                QueryKind::VendorId,
                QueryKind::ExtFamily,
                QueryKind::NumCores,
                QueryKind::L3Size,
                QueryKind::Codename,
            ] {
                answer_query(out, kind, Some(&id))?;
            }
            Ok(())
        });
        assert_eq!(
            text,
            "AuthenticAMD\n1\n25\n12\n32768\nRyzen (Vermeer)\n"
        );
    }

    #[test]
    fn test_features_query_leads_with_space() {
        let id = identified(samples::ALDER_LAKE_I7_12700K);
        let text = render(|out| answer_query(out, QueryKind::Features, Some(&id)));
        assert!(text.starts_with(" fpu vme "));
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_unknown_values_print_minus_one() {
        let text = render(|out| {
            answer_query(out, QueryKind::L3Assoc, Some(&CpuId::default()))?;
            answer_query(out, QueryKind::NumCores, None)
        });
        assert_eq!(text, "-1\n-1\n");
    }

    #[test]
    fn test_rdmsr_is_one_line() {
        let text = render(|out| answer_query(out, QueryKind::Rdmsr, None));
        assert_eq!(text.lines().count(), 1);
        let line = text.trim_end();
        assert!(
            line.parse::<u64>().is_ok()
                || line.starts_with("Cannot open MSR driver: ")
                || line.starts_with("Cannot read MSR: "),
            "{line:?}"
        );
    }

    #[test]
    fn test_cpu_list_framing() {
        let text = render(|out| write_cpu_list(out));
        let headers: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("-----"))
            .collect();
        assert_eq!(
            headers,
            [
                "-----Intel-----",
                "-----AMD-----",
                "-----Cyrix-----",
                "-----NexGen-----",
                "-----Transmeta-----",
                "-----UMC-----",
                "-----Centaur/VIA-----",
                "-----Rise-----",
                "-----SiS-----",
                "-----NSC-----",
            ]
        );
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("-----Intel-----"));
        assert_eq!(lines.next(), Some("i486"));
    }
}
