//! Query switches and the usage text built from them

use std::fmt::Write as _;

/// A single fact a query switch asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    CpuidPresent,
    VendorStr,
    VendorId,
    BrandString,
    Family,
    Model,
    Stepping,
    ExtFamily,
    ExtModel,
    NumCores,
    NumLogical,
    TotalCpus,
    L1dSize,
    L1iSize,
    L2Size,
    L3Size,
    L1dAssoc,
    L2Assoc,
    L3Assoc,
    L1dCacheline,
    L2Cacheline,
    L3Cacheline,
    Codename,
    Features,
    Clock,
    ClockOs,
    ClockRdtsc,
    Rdmsr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionEntry {
    pub kind: QueryKind,
    pub synopsis: &'static str,
    /// Whether answering needs a decoded CPU
    pub ident_required: bool,
}

const fn entry(kind: QueryKind, synopsis: &'static str, ident_required: bool) -> OptionEntry {
    OptionEntry {
        kind,
        synopsis,
        ident_required,
    }
}

use QueryKind::*;

/// All query switches, in the order usage lists them
pub static OPTION_TABLE: &[OptionEntry] = &[
    entry(CpuidPresent, "--cpuid", false),
    entry(VendorStr, "--vendorstr", true),
    entry(VendorId, "--vendorid", true),
    entry(BrandString, "--brandstr", true),
    entry(Family, "--family", true),
    entry(Model, "--model", true),
    entry(Stepping, "--stepping", true),
    entry(ExtFamily, "--extfamily", true),
    entry(ExtModel, "--extmodel", true),
    entry(NumCores, "--cores", true),
    entry(NumLogical, "--logical", true),
    entry(TotalCpus, "--total-cpus", true),
    entry(L1dSize, "--l1d-cache", true),
    entry(L1iSize, "--l1i-cache", true),
    entry(L2Size, "--cache", true),
    entry(L2Size, "--l2-cache", true),
    entry(L3Size, "--l3-cache", true),
    entry(L1dAssoc, "--l1d-assoc", true),
    entry(L2Assoc, "--l2-assoc", true),
    entry(L3Assoc, "--l3-assoc", true),
    entry(L1dCacheline, "--l1d-cacheline", true),
    entry(L2Cacheline, "--l2-cacheline", true),
    entry(L3Cacheline, "--l3-cacheline", true),
    entry(Codename, "--codename", true),
    entry(Features, "--flags", true),
    entry(Clock, "--clock", false),
    entry(ClockOs, "--clock-os", false),
    entry(ClockRdtsc, "--clock-rdtsc", true),
    entry(Rdmsr, "--rdmsr", false),
];

/// Exact match on the synopsis; no abbreviations.
pub fn lookup(arg: &str) -> Option<&'static OptionEntry> {
    OPTION_TABLE.iter().find(|e| e.synopsis == arg)
}

impl QueryKind {
    /// Taken from the first table entry of this kind.
    pub fn ident_required(self) -> bool {
        OPTION_TABLE
            .iter()
            .find(|e| e.kind == self)
            .is_some_and(|e| e.ident_required)
    }
}

const WRAP_COLUMN: usize = 76;

/// The `--help` text
pub fn usage() -> String {
    let mut text = String::from(
        "Usage: cpuid_tool [options]\n\
         \n\
         Options:\n\
         \x20 -h, --help       - Show this help\n\
         \x20 --load=<file>    - Load raw CPUID data from file\n\
         \x20 --save=<file>    - Acquire raw CPUID data and write it to file\n\
         \x20 --report, --all  - Report all decoded CPU info (w/o clock)\n\
         \x20 --clock          - in conjunction to --report: print CPU clock as well\n\
         \x20 --clock-rdtsc    - same as --clock, but use RDTSC for clock detection\n\
         \x20 --cpulist        - list all known CPUs\n\
         \x20 --quiet          - disable warnings\n\
         \x20 --outfile=<file> - redirect all output to this file, instead of stdout\n\
         \x20 --verbose, -v    - be extra verbose (more keys increase verbosity level)\n\
         \x20 --version        - print library version\n\
         \n\
         Query switches (generate 1 line of output per switch; in order of appearance):",
    );

    // Starting past the limit forces the first synopsis onto a new line.
    let mut line_fill = WRAP_COLUMN + 4;
    for (i, entry) in OPTION_TABLE.iter().enumerate() {
        let len = entry.synopsis.len();
        if line_fill + len > WRAP_COLUMN {
            line_fill = 2;
            text.push_str("\n  ");
        }
        text.push_str(entry.synopsis);
        if i + 1 < OPTION_TABLE.len() {
            line_fill += len + 2;
            text.push_str(", ");
        }
    }

    let _ = write!(
        text,
        "\n\n\
         If `-' is used for <file>, then stdin/stdout will be used instead of files.\n\
         When no options are present, the program behaves as if it was invoked with\n\
         \x20 cpuid_tool \"--save={} --outfile={} --report --verbose\"\n",
        crate::config::DEFAULT_RAW_FILE,
        crate::config::DEFAULT_REPORT_FILE,
    );
    text
}
