//! Raw CPUID snapshots: capture, lookup and the text dump format
//!
//! A dump holds one line per register set:
//!
//! ```text
//! version=0.3.0
//! basic_cpuid[0]=00000020 756e6547 6c65746e 49656e69
//! ext_cpuid[2]=68743231 6e654720 746e4920 52286c65
//! intel_fn4[0]=fc004121 02c0003f 0000003f 00000000
//! ```
//!
//! Registers are written in EAX EBX ECX EDX order as 8-digit hex.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use raw_cpuid::CpuIdResult;

use crate::affinity::PinGuard;
use crate::error::{CpuidError, Result};
use crate::native;

pub const MAX_BASIC_LEAVES: usize = 32;
pub const MAX_EXT_LEAVES: usize = 32;
pub const MAX_LEAF4_SUBLEAVES: usize = 8;
pub const MAX_LEAFB_SUBLEAVES: usize = 4;
pub const MAX_AMD_1D_SUBLEAVES: usize = 8;

const EXT_BASE: u32 = 0x8000_0000;
const LEAF_CACHE_PARAMS: u32 = 0x4;
const LEAF_EXT_TOPOLOGY: u32 = 0xB;
const LEAF_AMD_CACHE_TOPOLOGY: u32 = 0x8000_001D;

/// EAX, EBX, ECX, EDX
pub type Regs = [u32; 4];

const ZERO: Regs = [0; 4];

/// Register tables making up a snapshot, named as in the dump format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Table {
    Basic,
    Ext,
    Leaf4,
    LeafB,
    Amd1D,
}

impl Table {
    const ALL: [Table; 5] = [
        Table::Basic,
        Table::Ext,
        Table::Leaf4,
        Table::LeafB,
        Table::Amd1D,
    ];

    fn key(&self) -> &'static str {
        match self {
            Table::Basic => "basic_cpuid",
            Table::Ext => "ext_cpuid",
            Table::Leaf4 => "intel_fn4",
            Table::LeafB => "intel_fn11",
            Table::Amd1D => "amd_fn8000001dh",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}

/// Unprocessed register outputs across every leaf the identifier reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCpuData {
    pub basic: [Regs; MAX_BASIC_LEAVES],
    pub ext: [Regs; MAX_EXT_LEAVES],
    /// Leaf 4 (deterministic cache parameters), one entry per subleaf
    pub leaf4: [Regs; MAX_LEAF4_SUBLEAVES],
    /// Leaf 0xB (extended topology), one entry per level
    pub leaf_b: [Regs; MAX_LEAFB_SUBLEAVES],
    /// Leaf 0x8000_001D (AMD cache topology)
    pub amd_1d: [Regs; MAX_AMD_1D_SUBLEAVES],
}

impl Default for RawCpuData {
    fn default() -> Self {
        Self {
            basic: [ZERO; MAX_BASIC_LEAVES],
            ext: [ZERO; MAX_EXT_LEAVES],
            leaf4: [ZERO; MAX_LEAF4_SUBLEAVES],
            leaf_b: [ZERO; MAX_LEAFB_SUBLEAVES],
            amd_1d: [ZERO; MAX_AMD_1D_SUBLEAVES],
        }
    }
}

impl RawCpuData {
    /// Execute CPUID across all relevant leaves on the current machine.
    pub fn capture() -> Result<Self> {
        if !native::cpuid_present() {
            return Err(CpuidError::NoCpuid);
        }

        let _pin = match PinGuard::first_allowed_cpu().map(PinGuard::new) {
            Some(Ok(guard)) => Some(guard),
            Some(Err(e)) => {
                tracing::warn!("Could not pin snapshot capture to one CPU: {e}");
                None
            }
            None => None,
        };

        let mut raw = Self::default();
        let to_regs = |r: CpuIdResult| [r.eax, r.ebx, r.ecx, r.edx];

        let max_basic = native::cpuid(0, 0).eax;
        for leaf in 0..=max_basic.min(MAX_BASIC_LEAVES as u32 - 1) {
            raw.basic[leaf as usize] = to_regs(native::cpuid(leaf, 0));
        }

        let max_ext = native::cpuid(EXT_BASE, 0).eax;
        if max_ext >= EXT_BASE {
            for i in 0..=(max_ext - EXT_BASE).min(MAX_EXT_LEAVES as u32 - 1) {
                raw.ext[i as usize] = to_regs(native::cpuid(EXT_BASE + i, 0));
            }
        }

        if max_basic >= LEAF_CACHE_PARAMS {
            for (i, slot) in raw.leaf4.iter_mut().enumerate() {
                *slot = to_regs(native::cpuid(LEAF_CACHE_PARAMS, i as u32));
            }
        }
        if max_basic >= LEAF_EXT_TOPOLOGY {
            for (i, slot) in raw.leaf_b.iter_mut().enumerate() {
                *slot = to_regs(native::cpuid(LEAF_EXT_TOPOLOGY, i as u32));
            }
        }
        if max_ext >= LEAF_AMD_CACHE_TOPOLOGY {
            for (i, slot) in raw.amd_1d.iter_mut().enumerate() {
                *slot = to_regs(native::cpuid(LEAF_AMD_CACHE_TOPOLOGY, i as u32));
            }
        }

        tracing::debug!(
            "Captured CPUID snapshot: max basic leaf 0x{:X}, max extended leaf 0x{:X}",
            max_basic,
            max_ext
        );
        Ok(raw)
    }

    pub fn max_basic_leaf(&self) -> u32 {
        self.basic[0][0]
    }

    pub fn max_ext_leaf(&self) -> u32 {
        self.ext[0][0]
    }

    /// Answer a CPUID request from the snapshot.
    ///
    /// Leaves that were never captured, and subleaves other than 0 outside the
    /// subleaf tables, read as all zeroes.
    pub fn lookup(&self, leaf: u32, subleaf: u32) -> CpuIdResult {
        let regs = match leaf {
            LEAF_CACHE_PARAMS => self.leaf4.get(subleaf as usize),
            LEAF_EXT_TOPOLOGY => self.leaf_b.get(subleaf as usize),
            LEAF_AMD_CACHE_TOPOLOGY => self.amd_1d.get(subleaf as usize),
            _ if subleaf != 0 => None,
            l if l < EXT_BASE => {
                if l <= self.max_basic_leaf() {
                    self.basic.get(l as usize)
                } else {
                    None
                }
            }
            l => {
                if l <= self.max_ext_leaf() {
                    self.ext.get((l - EXT_BASE) as usize)
                } else {
                    None
                }
            }
        }
        .copied()
        .unwrap_or(ZERO);

        CpuIdResult {
            eax: regs[0],
            ebx: regs[1],
            ecx: regs[2],
            edx: regs[3],
        }
    }

    fn table(&self, table: Table) -> &[Regs] {
        match table {
            Table::Basic => &self.basic,
            Table::Ext => &self.ext,
            Table::Leaf4 => &self.leaf4,
            Table::LeafB => &self.leaf_b,
            Table::Amd1D => &self.amd_1d,
        }
    }

    fn table_mut(&mut self, table: Table) -> &mut [Regs] {
        match table {
            Table::Basic => &mut self.basic,
            Table::Ext => &mut self.ext,
            Table::Leaf4 => &mut self.leaf4,
            Table::LeafB => &mut self.leaf_b,
            Table::Amd1D => &mut self.amd_1d,
        }
    }

    /// Write the snapshot in dump format.
    pub fn serialize<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "version={}", crate::version())?;
        for table in Table::ALL {
            for (i, r) in self.table(table).iter().enumerate() {
                writeln!(
                    out,
                    "{}[{}]={:08x} {:08x} {:08x} {:08x}",
                    table.key(),
                    i,
                    r[0],
                    r[1],
                    r[2],
                    r[3]
                )?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Parse a dump. Unknown keys and out-of-range indices are skipped with a
    /// warning so dumps from newer writers still load.
    pub fn deserialize<R: BufRead>(input: R) -> Result<Self> {
        let mut raw = Self::default();
        let mut seen_leaf0 = false;

        for (n, line) in input.lines().enumerate() {
            let line = line?;
            let line_no = n + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((lhs, rhs)) = line.split_once('=') else {
                return Err(CpuidError::BadFormat {
                    line: line_no,
                    reason: "missing `='".to_string(),
                });
            };

            if lhs == "version" {
                tracing::debug!("Dump written by version {rhs}");
                continue;
            }

            let Some((key, index)) = parse_key(lhs) else {
                return Err(CpuidError::BadFormat {
                    line: line_no,
                    reason: format!("malformed key `{lhs}'"),
                });
            };

            let Some(table) = Table::from_key(key) else {
                tracing::warn!("Line {line_no}: unknown key `{key}', skipping");
                continue;
            };

            let regs = parse_regs(rhs).ok_or_else(|| CpuidError::BadFormat {
                line: line_no,
                reason: "expected 4 hexadecimal registers".to_string(),
            })?;

            match raw.table_mut(table).get_mut(index) {
                Some(slot) => {
                    *slot = regs;
                    if table == Table::Basic && index == 0 {
                        seen_leaf0 = true;
                    }
                }
                None => {
                    tracing::warn!("Line {line_no}: index {index} out of range for `{key}', skipping");
                }
            }
        }

        if !seen_leaf0 {
            return Err(CpuidError::EmptyDump);
        }
        Ok(raw)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.serialize(BufWriter::new(file))
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::deserialize(BufReader::new(file))
    }
}

/// Split `name[idx]` into its parts
fn parse_key(s: &str) -> Option<(&str, usize)> {
    let (name, rest) = s.split_once('[')?;
    let index = rest.strip_suffix(']')?.parse().ok()?;
    Some((name, index))
}

fn parse_regs(s: &str) -> Option<Regs> {
    let mut regs = ZERO;
    let mut fields = s.split_whitespace();
    for slot in regs.iter_mut() {
        *slot = u32::from_str_radix(fields.next()?, 16).ok()?;
    }
    if fields.next().is_some() {
        return None;
    }
    Some(regs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;

    fn alder_lake() -> RawCpuData {
        RawCpuData::deserialize(samples::ALDER_LAKE_I7_12700K.as_bytes()).unwrap()
    }

    #[test]
    fn test_deserialize_sample() {
        let raw = alder_lake();
        assert_eq!(raw.max_basic_leaf(), 0x20);
        assert_eq!(raw.max_ext_leaf(), 0x8000_0008);
        assert_eq!(raw.basic[1], [0x0009_0672, 0x0080_0800, 0x7ffa_fbff, 0xbfeb_fbff]);
        assert_eq!(raw.leaf_b[1][1], 0x14);
    }

    #[test]
    fn test_serialize_then_deserialize_is_identity() {
        let raw = alder_lake();
        let mut buf = Vec::new();
        raw.serialize(&mut buf).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("version="));
        assert!(text.contains("intel_fn4[3]=fc1fc163 0240003f 00009fff 00000004"));
        assert_eq!(RawCpuData::deserialize(buf.as_slice()).unwrap(), raw);
    }

    #[test]
    fn test_lookup_routes_subleaf_tables() {
        let raw = alder_lake();
        let l3 = raw.lookup(4, 3);
        assert_eq!(l3.eax, 0xfc1f_c163);
        assert_eq!(raw.lookup(0xB, 1).ebx, 0x14);
        // Beyond the captured subleaves
        assert_eq!(raw.lookup(4, 100).eax, 0);
        // Leaf 7 subleaf 1 is not part of the snapshot
        assert_eq!(raw.lookup(7, 1).eax, 0);
        // Above the max extended leaf
        assert_eq!(raw.lookup(0x8000_0010, 0).eax, 0);
        assert_eq!(raw.lookup(0x8000_0002, 0).eax, 0x6874_3231);
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let text = "basic_cpuid[0]=00000001 756e6547 6c65746e 49656e69\n\
                    intel_fn12h[0]=00000001 00000000 00000000 00000000\n\
                    basic_cpuid[99]=00000001 00000000 00000000 00000000\n";
        let raw = RawCpuData::deserialize(text.as_bytes()).unwrap();
        assert_eq!(raw.max_basic_leaf(), 1);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let text = "basic_cpuid[0]=00000001 756e6547 6c65746e 49656e69\n\
                    basic_cpuid[1]=zzzz 0 0 0\n";
        match RawCpuData::deserialize(text.as_bytes()) {
            Err(CpuidError::BadFormat { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected BadFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_dump_is_rejected() {
        assert!(matches!(
            RawCpuData::deserialize("version=0.3.0\n".as_bytes()),
            Err(CpuidError::EmptyDump)
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let raw = alder_lake();
        let path = std::env::temp_dir().join(format!("cpuid-raw-{}.txt", std::process::id()));
        raw.save_to_file(&path).unwrap();
        let loaded = RawCpuData::load_from_file(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), raw);
    }

    #[test]
    fn test_missing_file() {
        let err = RawCpuData::load_from_file(Path::new("/nonexistent/raw.txt")).unwrap_err();
        assert!(matches!(err, CpuidError::Io(_)));
    }

    #[test]
    fn test_live_capture() {
        if !native::cpuid_present() {
            assert!(matches!(RawCpuData::capture(), Err(CpuidError::NoCpuid)));
            return;
        }
        let raw = RawCpuData::capture().unwrap();
        assert!(raw.max_basic_leaf() >= 1);
    }
}
