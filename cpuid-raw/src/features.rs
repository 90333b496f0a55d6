//! Feature flag table
//!
//! Flags are stored as a bit vector indexed by position in [`FEATURES`], so
//! the table order is the order names are printed in and must stay fixed.

use crate::raw::RawCpuData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    Eax,
    Ebx,
    Ecx,
    Edx,
}

/// Where a feature bit lives in the CPUID register space
#[derive(Debug, Clone, Copy)]
pub struct FeatureBit {
    pub name: &'static str,
    pub leaf: u32,
    pub reg: Reg,
    pub bit: u8,
}

const fn f(name: &'static str, leaf: u32, reg: Reg, bit: u8) -> FeatureBit {
    FeatureBit {
        name,
        leaf,
        reg,
        bit,
    }
}

use Reg::{Ebx, Ecx, Edx};

pub static FEATURES: &[FeatureBit] = &[
    // Leaf 1 EDX
    f("fpu", 1, Edx, 0),
    f("vme", 1, Edx, 1),
    f("de", 1, Edx, 2),
    f("pse", 1, Edx, 3),
    f("tsc", 1, Edx, 4),
    f("msr", 1, Edx, 5),
    f("pae", 1, Edx, 6),
    f("mce", 1, Edx, 7),
    f("cx8", 1, Edx, 8),
    f("apic", 1, Edx, 9),
    f("sep", 1, Edx, 11),
    f("mtrr", 1, Edx, 12),
    f("pge", 1, Edx, 13),
    f("mca", 1, Edx, 14),
    f("cmov", 1, Edx, 15),
    f("pat", 1, Edx, 16),
    f("pse36", 1, Edx, 17),
    f("pn", 1, Edx, 18),
    f("clflush", 1, Edx, 19),
    f("dts", 1, Edx, 21),
    f("acpi", 1, Edx, 22),
    f("mmx", 1, Edx, 23),
    f("fxsr", 1, Edx, 24),
    f("sse", 1, Edx, 25),
    f("sse2", 1, Edx, 26),
    f("ss", 1, Edx, 27),
    f("ht", 1, Edx, 28),
    f("tm", 1, Edx, 29),
    f("ia64", 1, Edx, 30),
    f("pbe", 1, Edx, 31),
    // Leaf 1 ECX
    f("pni", 1, Ecx, 0),
    f("pclmul", 1, Ecx, 1),
    f("dts64", 1, Ecx, 2),
    f("monitor", 1, Ecx, 3),
    f("ds_cpl", 1, Ecx, 4),
    f("vmx", 1, Ecx, 5),
    f("smx", 1, Ecx, 6),
    f("est", 1, Ecx, 7),
    f("tm2", 1, Ecx, 8),
    f("ssse3", 1, Ecx, 9),
    f("cid", 1, Ecx, 10),
    f("fma3", 1, Ecx, 12),
    f("cx16", 1, Ecx, 13),
    f("xtpr", 1, Ecx, 14),
    f("pdcm", 1, Ecx, 15),
    f("pcid", 1, Ecx, 17),
    f("dca", 1, Ecx, 18),
    f("sse4_1", 1, Ecx, 19),
    f("sse4_2", 1, Ecx, 20),
    f("x2apic", 1, Ecx, 21),
    f("movbe", 1, Ecx, 22),
    f("popcnt", 1, Ecx, 23),
    f("tsc_deadline", 1, Ecx, 24),
    f("aes", 1, Ecx, 25),
    f("xsave", 1, Ecx, 26),
    f("osxsave", 1, Ecx, 27),
    f("avx", 1, Ecx, 28),
    f("f16c", 1, Ecx, 29),
    f("rdrand", 1, Ecx, 30),
    f("hypervisor", 1, Ecx, 31),
    // Leaf 7 subleaf 0 EBX
    f("fsgsbase", 7, Ebx, 0),
    f("sgx", 7, Ebx, 2),
    f("bmi1", 7, Ebx, 3),
    f("hle", 7, Ebx, 4),
    f("avx2", 7, Ebx, 5),
    f("smep", 7, Ebx, 7),
    f("bmi2", 7, Ebx, 8),
    f("erms", 7, Ebx, 9),
    f("invpcid", 7, Ebx, 10),
    f("rtm", 7, Ebx, 11),
    f("mpx", 7, Ebx, 14),
    f("avx512f", 7, Ebx, 16),
    f("avx512dq", 7, Ebx, 17),
    f("rdseed", 7, Ebx, 18),
    f("adx", 7, Ebx, 19),
    f("smap", 7, Ebx, 20),
    f("avx512ifma", 7, Ebx, 21),
    f("clflushopt", 7, Ebx, 23),
    f("clwb", 7, Ebx, 24),
    f("avx512pf", 7, Ebx, 26),
    f("avx512er", 7, Ebx, 27),
    f("avx512cd", 7, Ebx, 28),
    f("sha_ni", 7, Ebx, 29),
    f("avx512bw", 7, Ebx, 30),
    f("avx512vl", 7, Ebx, 31),
    // Leaf 7 subleaf 0 ECX
    f("avx512vbmi", 7, Ecx, 1),
    f("umip", 7, Ecx, 2),
    f("pku", 7, Ecx, 3),
    f("waitpkg", 7, Ecx, 5),
    f("avx512vbmi2", 7, Ecx, 6),
    f("cet_ss", 7, Ecx, 7),
    f("gfni", 7, Ecx, 8),
    f("vaes", 7, Ecx, 9),
    f("vpclmulqdq", 7, Ecx, 10),
    f("avx512vnni", 7, Ecx, 11),
    f("avx512bitalg", 7, Ecx, 12),
    f("avx512vpopcntdq", 7, Ecx, 14),
    f("rdpid", 7, Ecx, 22),
    f("movdiri", 7, Ecx, 27),
    f("movdir64b", 7, Ecx, 28),
    // Leaf 7 subleaf 0 EDX
    f("avx512_4vnniw", 7, Edx, 2),
    f("avx512_4fmaps", 7, Edx, 3),
    f("fsrm", 7, Edx, 4),
    f("avx512vp2intersect", 7, Edx, 8),
    f("serialize", 7, Edx, 14),
    f("hybrid", 7, Edx, 15),
    f("amx_bf16", 7, Edx, 22),
    f("amx_tile", 7, Edx, 24),
    f("amx_int8", 7, Edx, 25),
    // Leaf 0x8000_0001 EDX
    f("syscall", 0x8000_0001, Edx, 11),
    f("mp", 0x8000_0001, Edx, 19),
    f("nx", 0x8000_0001, Edx, 20),
    f("mmxext", 0x8000_0001, Edx, 22),
    f("fxsr_opt", 0x8000_0001, Edx, 25),
    f("pdpe1gb", 0x8000_0001, Edx, 26),
    f("rdtscp", 0x8000_0001, Edx, 27),
    f("lm", 0x8000_0001, Edx, 29),
    f("3dnowext", 0x8000_0001, Edx, 30),
    f("3dnow", 0x8000_0001, Edx, 31),
    // Leaf 0x8000_0001 ECX
    f("lahf_lm", 0x8000_0001, Ecx, 0),
    f("cmp_legacy", 0x8000_0001, Ecx, 1),
    f("svm", 0x8000_0001, Ecx, 2),
    f("extapic", 0x8000_0001, Ecx, 3),
    f("cr8_legacy", 0x8000_0001, Ecx, 4),
    f("abm", 0x8000_0001, Ecx, 5),
    f("sse4a", 0x8000_0001, Ecx, 6),
    f("misalignsse", 0x8000_0001, Ecx, 7),
    f("3dnowprefetch", 0x8000_0001, Ecx, 8),
    f("osvw", 0x8000_0001, Ecx, 9),
    f("ibs", 0x8000_0001, Ecx, 10),
    f("xop", 0x8000_0001, Ecx, 11),
    f("skinit", 0x8000_0001, Ecx, 12),
    f("wdt", 0x8000_0001, Ecx, 13),
    f("lwp", 0x8000_0001, Ecx, 15),
    f("fma4", 0x8000_0001, Ecx, 16),
    f("tce", 0x8000_0001, Ecx, 17),
    f("nodeid_msr", 0x8000_0001, Ecx, 19),
    f("tbm", 0x8000_0001, Ecx, 21),
    f("topoext", 0x8000_0001, Ecx, 22),
    f("perfctr_core", 0x8000_0001, Ecx, 23),
    f("perfctr_nb", 0x8000_0001, Ecx, 24),
    // Leaf 0x8000_0007 EDX (advanced power management)
    f("ts", 0x8000_0007, Edx, 0),
    f("fid", 0x8000_0007, Edx, 1),
    f("vid", 0x8000_0007, Edx, 2),
    f("ttp", 0x8000_0007, Edx, 3),
    f("tm_amd", 0x8000_0007, Edx, 4),
    f("stc", 0x8000_0007, Edx, 5),
    f("100mhzsteps", 0x8000_0007, Edx, 6),
    f("hwpstate", 0x8000_0007, Edx, 7),
    f("constant_tsc", 0x8000_0007, Edx, 8),
    f("cpb", 0x8000_0007, Edx, 9),
];

pub fn num_features() -> usize {
    FEATURES.len()
}

/// Name of the feature at table position `index`
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURES.get(index).map(|f| f.name)
}

/// Feature bit vector, indexed by position in [`FEATURES`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    bits: Vec<bool>,
}

impl FeatureFlags {
    pub fn detect(raw: &RawCpuData) -> Self {
        let bits = FEATURES
            .iter()
            .map(|feat| {
                let r = raw.lookup(feat.leaf, 0);
                let value = match feat.reg {
                    Reg::Eax => r.eax,
                    Reg::Ebx => r.ebx,
                    Reg::Ecx => r.ecx,
                    Reg::Edx => r.edx,
                };
                value & (1 << feat.bit) != 0
            })
            .collect();
        Self { bits }
    }

    pub fn has(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    pub fn has_named(&self, name: &str) -> bool {
        FEATURES
            .iter()
            .position(|f| f.name == name)
            .is_some_and(|i| self.has(i))
    }

    /// Names of all set flags, in table order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .filter_map(|(i, _)| feature_name(i))
    }
}
