//! Typed layouts for the CPUID registers the identifier decodes by hand
//!
//! `raw-cpuid` covers most leaves, but the signature arithmetic (libcpuid
//! style extended family/model) and the topology fallbacks need the raw
//! fields, so they are spelled out here.

/// Trait for register layouts that can be converted to/from a raw CPUID register
///
/// # Example
///
/// ```
/// use cpuid_raw::leaf::{LeafLayout, Signature};
///
/// let sig = Signature::from_register(0x0009_0672);
/// assert_eq!(sig.base_family, 6);
/// assert_eq!(sig.ext_model, 9);
/// assert_eq!(Signature::from_register(sig.to_register()), sig);
/// ```
pub trait LeafLayout: Sized {
    /// Convert this layout back to the 32-bit register value
    fn to_register(&self) -> u32;

    /// Parse a 32-bit register value into this layout
    fn from_register(value: u32) -> Self;
}

/// Processor signature, CPUID leaf 1 EAX
///
/// | Bits   | Field       |
/// |--------|-------------|
/// | 0-3    | stepping    |
/// | 4-7    | base model  |
/// | 8-11   | base family |
/// | 12-13  | type        |
/// | 16-19  | ext model   |
/// | 20-27  | ext family  |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signature {
    pub stepping: u8,
    pub base_model: u8,
    pub base_family: u8,
    pub processor_type: u8,
    pub ext_model: u8,
    pub ext_family: u8,
}

impl LeafLayout for Signature {
    fn to_register(&self) -> u32 {
        (self.stepping as u32 & 0xF)
            | ((self.base_model as u32 & 0xF) << 4)
            | ((self.base_family as u32 & 0xF) << 8)
            | ((self.processor_type as u32 & 0x3) << 12)
            | ((self.ext_model as u32 & 0xF) << 16)
            | ((self.ext_family as u32) << 20)
    }

    fn from_register(value: u32) -> Self {
        Self {
            stepping: (value & 0xF) as u8,
            base_model: ((value >> 4) & 0xF) as u8,
            base_family: ((value >> 8) & 0xF) as u8,
            processor_type: ((value >> 12) & 0x3) as u8,
            ext_model: ((value >> 16) & 0xF) as u8,
            ext_family: ((value >> 20) & 0xFF) as u8,
        }
    }
}

impl Signature {
    /// Family as reported in the `ext_family` field of the report.
    ///
    /// AMD parts below family 0xF ignore the extended family field.
    pub fn display_family(&self, amd: bool) -> u32 {
        if amd && self.base_family < 0xF {
            self.base_family as u32
        } else {
            self.base_family as u32 + self.ext_family as u32
        }
    }

    pub fn display_model(&self) -> u32 {
        self.base_model as u32 + ((self.ext_model as u32) << 4)
    }
}

/// Level type field of CPUID leaf 0xB ECX[15:8]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyLevelType {
    Invalid,
    Smt,
    Core,
    Other(u8),
}

/// One extended topology level, CPUID leaf 0xB ECX[15:8] / EBX[15:0]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyLevel {
    pub level_type: TopologyLevelType,
    pub level_number: u8,
}

impl LeafLayout for TopologyLevel {
    fn to_register(&self) -> u32 {
        let ty = match self.level_type {
            TopologyLevelType::Invalid => 0,
            TopologyLevelType::Smt => 1,
            TopologyLevelType::Core => 2,
            TopologyLevelType::Other(v) => v,
        };
        (self.level_number as u32) | ((ty as u32) << 8)
    }

    fn from_register(value: u32) -> Self {
        let level_type = match (value >> 8) & 0xFF {
            0 => TopologyLevelType::Invalid,
            1 => TopologyLevelType::Smt,
            2 => TopologyLevelType::Core,
            other => TopologyLevelType::Other(other as u8),
        };
        Self {
            level_type,
            level_number: (value & 0xFF) as u8,
        }
    }
}

/// Cache type field shared by leaf 4 and AMD leaf 0x8000_001D, EAX[4:0]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
    Null,
    Data,
    Instruction,
    Unified,
    Reserved(u8),
}

/// Cache descriptor returned by leaf 4 / 0x8000_001D
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheDescriptor {
    pub kind: CacheKind,
    pub level: u8,
    /// EBX[31:22] + 1
    pub ways: u32,
    /// EBX[21:12] + 1
    pub partitions: u32,
    /// EBX[11:0] + 1
    pub line_size: u32,
    /// ECX + 1
    pub sets: u32,
}

impl CacheDescriptor {
    pub fn from_registers(eax: u32, ebx: u32, ecx: u32) -> Self {
        let kind = match eax & 0x1F {
            0 => CacheKind::Null,
            1 => CacheKind::Data,
            2 => CacheKind::Instruction,
            3 => CacheKind::Unified,
            other => CacheKind::Reserved(other as u8),
        };
        Self {
            kind,
            level: ((eax >> 5) & 0x7) as u8,
            ways: ((ebx >> 22) & 0x3FF) + 1,
            partitions: ((ebx >> 12) & 0x3FF) + 1,
            line_size: (ebx & 0xFFF) + 1,
            sets: ecx.wrapping_add(1),
        }
    }

    /// Total size in KB
    pub fn size_kb(&self) -> u64 {
        self.ways as u64 * self.partitions as u64 * self.line_size as u64 * self.sets as u64 / 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_alder_lake() {
        let sig = Signature::from_register(0x0009_0672);
        assert_eq!(sig.stepping, 2);
        assert_eq!(sig.base_model, 7);
        assert_eq!(sig.base_family, 6);
        assert_eq!(sig.display_family(false), 6);
        assert_eq!(sig.display_model(), 0x97);
    }

    #[test]
    fn test_signature_amd_family_rules() {
        // Zen 3: base family F, ext family A
        let zen3 = Signature::from_register(0x00A2_0F10);
        assert_eq!(zen3.display_family(true), 0x19);
        assert_eq!(zen3.display_model(), 0x21);

        // K7: base family 6, ext family ignored on AMD
        let k7 = Signature {
            base_family: 6,
            ext_family: 3,
            ..Default::default()
        };
        assert_eq!(k7.display_family(true), 6);
        assert_eq!(k7.display_family(false), 9);
    }

    #[test]
    fn test_topology_level_round_trip() {
        let level = TopologyLevel::from_register(0x0000_0201);
        assert_eq!(level.level_type, TopologyLevelType::Core);
        assert_eq!(level.level_number, 1);
        assert_eq!(level.to_register(), 0x0000_0201);
    }

    #[test]
    fn test_cache_descriptor_l1d() {
        // Alder Lake P-core L1D: 12 ways, 64B lines, 64 sets
        let d = CacheDescriptor::from_registers(0xfc00_4121, 0x02c0_003f, 0x0000_003f);
        assert_eq!(d.kind, CacheKind::Data);
        assert_eq!(d.level, 1);
        assert_eq!(d.ways, 12);
        assert_eq!(d.line_size, 64);
        assert_eq!(d.size_kb(), 48);
    }
}
