//! Decoding a raw snapshot into structured CPU information

use crate::codename::codename;
use crate::error::{CpuidError, Result};
use crate::features::FeatureFlags;
use crate::leaf::{CacheDescriptor, CacheKind, LeafLayout, Signature, TopologyLevel, TopologyLevelType};
use crate::raw::RawCpuData;
use crate::vendor::Vendor;

const EXT_BASE: u32 = 0x8000_0000;

/// Geometry of one cache level. `None` means the snapshot does not say.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheInfo {
    pub size_kb: Option<u32>,
    pub assoc: Option<u32>,
    pub line_size: Option<u32>,
}

impl CacheInfo {
    fn fill_missing(&mut self, other: CacheInfo) {
        self.size_kb = self.size_kb.or(other.size_kb);
        self.assoc = self.assoc.or(other.assoc);
        self.line_size = self.line_size.or(other.line_size);
    }
}

/// Decoded CPU information
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuId {
    pub vendor_str: String,
    pub vendor: Vendor,
    pub brand_str: String,
    pub family: u32,
    pub model: u32,
    pub stepping: u32,
    pub ext_family: u32,
    pub ext_model: u32,
    pub num_cores: Option<u32>,
    /// Logical CPUs per package
    pub num_logical_cpus: Option<u32>,
    /// Logical CPUs online in the whole system, from the OS
    pub total_logical_cpus: Option<u32>,
    pub l1d: CacheInfo,
    pub l1i: CacheInfo,
    pub l2: CacheInfo,
    pub l3: CacheInfo,
    pub codename: String,
    pub flags: FeatureFlags,
}

/// Decode `raw`.
///
/// # Errors
///
/// [`CpuidError::NoCpuid`] when the snapshot holds no leaf 0 data, i.e. it
/// was taken on (or claims to be from) a CPU without CPUID.
pub fn identify(raw: &RawCpuData) -> Result<CpuId> {
    if raw.basic[0] == [0; 4] {
        return Err(CpuidError::NoCpuid);
    }

    let cpuid = raw_cpuid::CpuId::with_cpuid_reader(|eax: u32, ecx: u32| raw.lookup(eax, ecx));

    let vendor_str = cpuid
        .get_vendor_info()
        .map(|v| v.as_str().to_string())
        .unwrap_or_default();
    let vendor = Vendor::from_vendor_str(&vendor_str);
    if vendor == Vendor::Unknown {
        tracing::warn!("Unknown CPU vendor `{vendor_str}'");
    }

    let brand_str = cpuid
        .get_processor_brand_string()
        .map(|b| b.as_str().trim_matches(|c: char| c == '\0' || c.is_whitespace()).to_string())
        .unwrap_or_default();

    let sig = if raw.max_basic_leaf() >= 1 {
        Signature::from_register(raw.basic[1][0])
    } else {
        Signature::default()
    };

    let flags = FeatureFlags::detect(raw);
    let ext_family = sig.display_family(vendor.is_amd_like());
    let ext_model = sig.display_model();

    let htt = cpuid.get_feature_info().map(|fi| (fi.has_htt(), fi.max_logical_processor_ids() as u32));
    let (num_cores, num_logical_cpus) = if vendor.is_amd_like() {
        amd_topology(raw, &flags, htt)
    } else {
        intel_topology(raw, htt)
    };

    let mut id = CpuId {
        vendor_str,
        vendor,
        brand_str,
        family: sig.base_family as u32,
        model: sig.base_model as u32,
        stepping: sig.stepping as u32,
        ext_family,
        ext_model,
        num_cores,
        num_logical_cpus,
        total_logical_cpus: total_logical_cpus(),
        codename: codename(vendor, ext_family, ext_model),
        flags,
        ..Default::default()
    };

    let descriptors = if vendor.is_amd_like() {
        if id.flags.has_named("topoext") && raw.max_ext_leaf() >= 0x8000_001D {
            &raw.amd_1d[..]
        } else {
            &[][..]
        }
    } else if raw.max_basic_leaf() >= 4 {
        &raw.leaf4[..]
    } else {
        &[][..]
    };
    apply_cache_descriptors(&mut id, descriptors);
    apply_legacy_amd_caches(&mut id, raw);

    tracing::debug!(
        "Identified {} family {:X}h model {:X}h as {}",
        id.vendor_str,
        id.ext_family,
        id.ext_model,
        id.codename
    );
    Ok(id)
}

/// Walk leaf 4 / 0x8000_001D style descriptors up to the first null entry.
fn apply_cache_descriptors(id: &mut CpuId, descriptors: &[[u32; 4]]) {
    for regs in descriptors {
        let d = CacheDescriptor::from_registers(regs[0], regs[1], regs[2]);
        let slot = match (d.level, d.kind) {
            (_, CacheKind::Null) => break,
            (1, CacheKind::Data) => &mut id.l1d,
            (1, CacheKind::Instruction) => &mut id.l1i,
            (2, CacheKind::Data | CacheKind::Unified) => &mut id.l2,
            (3, CacheKind::Data | CacheKind::Unified) => &mut id.l3,
            _ => continue,
        };
        *slot = CacheInfo {
            size_kb: Some(d.size_kb() as u32),
            assoc: Some(d.ways),
            line_size: Some(d.line_size),
        };
    }
}

/// Fill gaps from AMD leaves 0x8000_0005 (L1) and 0x8000_0006 (L2/L3).
fn apply_legacy_amd_caches(id: &mut CpuId, raw: &RawCpuData) {
    let max_ext = raw.max_ext_leaf();

    if id.vendor.is_amd_like() && max_ext >= EXT_BASE + 5 {
        let r = raw.ext[5];
        let l1 = |reg: u32| CacheInfo {
            size_kb: nonzero(reg >> 24),
            assoc: match (reg >> 16) & 0xFF {
                0 => None,
                0xFF => Some(0xFF),
                n => Some(n),
            },
            line_size: nonzero(reg & 0xFF),
        };
        id.l1d.fill_missing(l1(r[2]));
        id.l1i.fill_missing(l1(r[3]));
    }

    if max_ext >= EXT_BASE + 6 {
        let r = raw.ext[6];
        id.l2.fill_missing(CacheInfo {
            size_kb: nonzero(r[2] >> 16),
            assoc: amd_assoc((r[2] >> 12) & 0xF),
            line_size: nonzero(r[2] & 0xFF),
        });
        if id.vendor.is_amd_like() {
            id.l3.fill_missing(CacheInfo {
                size_kb: nonzero((r[3] >> 18) * 512),
                assoc: amd_assoc((r[3] >> 12) & 0xF),
                line_size: nonzero(r[3] & 0xFF),
            });
        }
    }
}

/// Decode the 4-bit associativity field of leaf 0x8000_0006.
fn amd_assoc(field: u32) -> Option<u32> {
    match field {
        1 => Some(1),
        2 => Some(2),
        3 => Some(3),
        4 => Some(4),
        5 => Some(6),
        6 => Some(8),
        8 => Some(16),
        0xA => Some(32),
        0xB => Some(48),
        0xC => Some(64),
        0xD => Some(96),
        0xE => Some(128),
        0xF => Some(0xFF),
        _ => None,
    }
}

fn nonzero(v: u32) -> Option<u32> {
    (v != 0).then_some(v)
}

fn intel_topology(raw: &RawCpuData, htt: Option<(bool, u32)>) -> (Option<u32>, Option<u32>) {
    if raw.max_basic_leaf() >= 0xB && raw.leaf_b[0][1] & 0xFFFF != 0 {
        let mut threads_per_core = 1;
        let mut logical_per_package = None;
        for regs in &raw.leaf_b {
            let level = TopologyLevel::from_register(regs[2]);
            let count = regs[1] & 0xFFFF;
            match level.level_type {
                TopologyLevelType::Smt => threads_per_core = count.max(1),
                TopologyLevelType::Core => logical_per_package = Some(count),
                TopologyLevelType::Invalid => break,
                TopologyLevelType::Other(_) => {}
            }
        }
        if let Some(logical) = logical_per_package {
            return (Some(logical / threads_per_core), Some(logical));
        }
    }

    let logical = match htt {
        Some((true, n)) if n > 0 => n,
        Some(_) => 1,
        None => return (None, None),
    };
    if raw.max_basic_leaf() >= 4 {
        let d = CacheDescriptor::from_registers(raw.leaf4[0][0], raw.leaf4[0][1], raw.leaf4[0][2]);
        if d.kind != CacheKind::Null {
            let cores = ((raw.leaf4[0][0] >> 26) & 0x3F) + 1;
            return (Some(cores.min(logical)), Some(logical));
        }
    }
    (Some(1), Some(logical))
}

fn amd_topology(
    raw: &RawCpuData,
    flags: &FeatureFlags,
    htt: Option<(bool, u32)>,
) -> (Option<u32>, Option<u32>) {
    let logical = if raw.max_ext_leaf() >= EXT_BASE + 8 {
        (raw.ext[8][2] & 0xFF) + 1
    } else {
        match htt {
            Some((true, n)) if n > 0 => n,
            Some(_) => 1,
            None => return (None, None),
        }
    };

    let threads_per_core = if flags.has_named("topoext") && raw.max_ext_leaf() >= EXT_BASE + 0x1E {
        ((raw.ext[0x1E][1] >> 8) & 0xFF) + 1
    } else {
        1
    };
    (Some(logical / threads_per_core), Some(logical))
}

/// Online logical CPUs in the system
fn total_logical_cpus() -> Option<u32> {
    // SAFETY: sysconf has no memory-safety preconditions.
    let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
    (n > 0).then_some(n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;

    fn load(text: &str) -> CpuId {
        let raw = RawCpuData::deserialize(text.as_bytes()).unwrap();
        identify(&raw).unwrap()
    }

    #[test]
    fn test_identify_alder_lake() {
        let id = load(samples::ALDER_LAKE_I7_12700K);
        assert_eq!(id.vendor_str, "GenuineIntel");
        assert_eq!(id.vendor, Vendor::Intel);
        assert_eq!(id.brand_str, "12th Gen Intel(R) Core(TM) i7-12700K");
        assert_eq!((id.family, id.model, id.stepping), (6, 7, 2));
        assert_eq!((id.ext_family, id.ext_model), (6, 0x97));
        assert_eq!(id.num_logical_cpus, Some(20));
        assert_eq!(id.num_cores, Some(10));
        assert_eq!(id.codename, "Core (Alder Lake)");
    }

    #[test]
    fn test_alder_lake_caches() {
        let id = load(samples::ALDER_LAKE_I7_12700K);
        assert_eq!(
            id.l1d,
            CacheInfo {
                size_kb: Some(48),
                assoc: Some(12),
                line_size: Some(64)
            }
        );
        assert_eq!(id.l1i.size_kb, Some(32));
        assert_eq!(id.l2.size_kb, Some(1280));
        assert_eq!(id.l2.assoc, Some(10));
        assert_eq!(id.l3.size_kb, Some(25600));
        assert_eq!(id.l3.line_size, Some(64));
    }

    #[test]
    fn test_identify_vermeer() {
        let id = load(samples::VERMEER_RYZEN_9_5900X);
        assert_eq!(id.vendor, Vendor::Amd);
        assert_eq!(id.brand_str, "AMD Ryzen 9 5900X 12-Core Processor");
        assert_eq!((id.family, id.model, id.stepping), (0xF, 1, 0));
        assert_eq!((id.ext_family, id.ext_model), (0x19, 0x21));
        assert_eq!(id.num_cores, Some(12));
        assert_eq!(id.num_logical_cpus, Some(24));
        assert_eq!(id.codename, "Ryzen (Vermeer)");
    }

    #[test]
    fn test_vermeer_caches_from_cache_topology_leaf() {
        let id = load(samples::VERMEER_RYZEN_9_5900X);
        assert_eq!(id.l1d.size_kb, Some(32));
        assert_eq!(id.l1d.assoc, Some(8));
        assert_eq!(id.l2.size_kb, Some(512));
        assert_eq!(id.l3.size_kb, Some(32768));
        assert_eq!(id.l3.assoc, Some(16));
    }

    #[test]
    fn test_legacy_amd_cache_leaves() {
        let mut raw = RawCpuData::deserialize(samples::VERMEER_RYZEN_9_5900X.as_bytes()).unwrap();
        // Hide the cache topology leaf so only 0x8000_0005/6 remain
        raw.amd_1d = [[0; 4]; crate::raw::MAX_AMD_1D_SUBLEAVES];
        let id = identify(&raw).unwrap();
        assert_eq!(id.l1d.size_kb, Some(32));
        assert_eq!(id.l1d.assoc, Some(8));
        assert_eq!(id.l1i.line_size, Some(64));
        assert_eq!(id.l2.size_kb, Some(512));
        assert_eq!(id.l2.assoc, Some(8));
        assert_eq!(id.l3.size_kb, Some(65536));
        assert_eq!(id.l3.assoc, Some(16));
    }

    #[test]
    fn test_empty_snapshot_has_no_cpuid() {
        let raw = RawCpuData::default();
        assert!(matches!(identify(&raw), Err(CpuidError::NoCpuid)));
    }

    #[test]
    fn test_amd_assoc_encoding() {
        assert_eq!(amd_assoc(6), Some(8));
        assert_eq!(amd_assoc(8), Some(16));
        assert_eq!(amd_assoc(9), None);
        assert_eq!(amd_assoc(0), None);
    }
}
