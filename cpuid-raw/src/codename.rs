//! Microarchitecture codename table
//!
//! Matching is by vendor, display family and display model only. Entries name
//! the core, not the SKU.

use crate::vendor::Vendor;

struct Codename {
    vendor: Vendor,
    family: u32,
    /// Display models; empty matches every model of the family
    models: &'static [u32],
    name: &'static str,
}

const fn c(vendor: Vendor, family: u32, models: &'static [u32], name: &'static str) -> Codename {
    Codename {
        vendor,
        family,
        models,
        name,
    }
}

use Vendor::{Amd, Centaur, Cyrix, Hygon, Intel, NexGen, Nsc, Rise, Sis, Transmeta, Umc};

static CODENAMES: &[Codename] = &[
    // Intel
    c(Intel, 4, &[], "i486"),
    c(Intel, 5, &[0, 1, 2, 3], "Pentium"),
    c(Intel, 5, &[4, 7, 8], "Pentium MMX"),
    c(Intel, 6, &[1], "Pentium Pro"),
    c(Intel, 6, &[3, 5], "Pentium II (Klamath/Deschutes)"),
    c(Intel, 6, &[6], "Celeron (Mendocino)"),
    c(Intel, 6, &[7, 8], "Pentium III (Katmai/Coppermine)"),
    c(Intel, 6, &[0xA, 0xB], "Pentium III (Tualatin)"),
    c(Intel, 6, &[9, 0xD], "Pentium M (Banias/Dothan)"),
    c(Intel, 6, &[0xE], "Core (Yonah)"),
    c(Intel, 6, &[0xF, 0x16], "Core 2 (Conroe/Merom)"),
    c(Intel, 6, &[0x17, 0x1D], "Core 2 (Penryn)"),
    c(Intel, 6, &[0x1C, 0x26, 0x27, 0x35, 0x36], "Atom (Bonnell)"),
    c(Intel, 6, &[0x1A, 0x1E, 0x1F, 0x2E], "Core i7 (Nehalem)"),
    c(Intel, 6, &[0x25, 0x2C, 0x2F], "Core i7 (Westmere)"),
    c(Intel, 6, &[0x2A, 0x2D], "Core (Sandy Bridge)"),
    c(Intel, 6, &[0x3A, 0x3E], "Core (Ivy Bridge)"),
    c(Intel, 6, &[0x3C, 0x3F, 0x45, 0x46], "Core (Haswell)"),
    c(Intel, 6, &[0x3D, 0x47, 0x4F, 0x56], "Core (Broadwell)"),
    c(Intel, 6, &[0x37, 0x4A, 0x4D, 0x5A, 0x5D], "Atom (Silvermont)"),
    c(Intel, 6, &[0x4E, 0x5E], "Core (Skylake)"),
    c(Intel, 6, &[0x55], "Xeon (Skylake-SP)"),
    c(Intel, 6, &[0x5C, 0x5F, 0x7A], "Atom (Goldmont)"),
    c(Intel, 6, &[0x8E, 0x9E], "Core (Kaby Lake/Coffee Lake)"),
    c(Intel, 6, &[0x66], "Core (Cannon Lake)"),
    c(Intel, 6, &[0x7D, 0x7E], "Core (Ice Lake)"),
    c(Intel, 6, &[0x6A, 0x6C], "Xeon (Ice Lake-SP)"),
    c(Intel, 6, &[0xA5, 0xA6], "Core (Comet Lake)"),
    c(Intel, 6, &[0x8C, 0x8D], "Core (Tiger Lake)"),
    c(Intel, 6, &[0xA7], "Core (Rocket Lake)"),
    c(Intel, 6, &[0x97, 0x9A], "Core (Alder Lake)"),
    c(Intel, 6, &[0xB7, 0xBA, 0xBF], "Core (Raptor Lake)"),
    c(Intel, 6, &[0x8F], "Xeon (Sapphire Rapids)"),
    c(Intel, 6, &[0xAA, 0xAC], "Core Ultra (Meteor Lake)"),
    c(Intel, 0xF, &[0, 1, 2], "Pentium 4 (Willamette/Northwood)"),
    c(Intel, 0xF, &[3, 4], "Pentium 4 (Prescott)"),
    c(Intel, 0xF, &[6], "Pentium D (Presler)"),
    // AMD
    c(Amd, 4, &[], "Am486/Am5x86"),
    c(Amd, 5, &[0, 1, 2, 3], "K5"),
    c(Amd, 5, &[6, 7], "K6"),
    c(Amd, 5, &[8], "K6-2"),
    c(Amd, 5, &[9, 0xD], "K6-III"),
    c(Amd, 6, &[1, 2], "Athlon (Argon/Pluto)"),
    c(Amd, 6, &[3], "Duron (Spitfire)"),
    c(Amd, 6, &[4], "Athlon (Thunderbird)"),
    c(Amd, 6, &[6], "Athlon XP (Palomino)"),
    c(Amd, 6, &[7], "Duron (Morgan)"),
    c(Amd, 6, &[8], "Athlon XP (Thoroughbred)"),
    c(Amd, 6, &[0xA], "Athlon XP (Barton)"),
    c(Amd, 0xF, &[], "Athlon 64/Opteron (K8)"),
    c(Amd, 0x10, &[], "Phenom (K10)"),
    c(Amd, 0x11, &[], "Turion X2 Ultra (Griffin)"),
    c(Amd, 0x12, &[], "A-Series (Llano)"),
    c(Amd, 0x14, &[], "E-Series (Bobcat)"),
    c(Amd, 0x15, &[0x01], "FX (Bulldozer)"),
    c(Amd, 0x15, &[0x02, 0x10, 0x13], "FX/A-Series (Piledriver)"),
    c(Amd, 0x15, &[0x30, 0x38], "A-Series (Steamroller)"),
    c(Amd, 0x15, &[0x60, 0x65, 0x70], "A-Series (Excavator)"),
    c(Amd, 0x16, &[0x00], "Athlon/Sempron (Jaguar)"),
    c(Amd, 0x16, &[0x30], "A-Series (Puma)"),
    c(Amd, 0x17, &[0x01], "Ryzen (Summit Ridge)"),
    c(Amd, 0x17, &[0x08], "Ryzen (Pinnacle Ridge)"),
    c(Amd, 0x17, &[0x11, 0x18], "Ryzen (Raven Ridge/Picasso)"),
    c(Amd, 0x17, &[0x31], "EPYC (Rome)"),
    c(Amd, 0x17, &[0x60], "Ryzen (Renoir)"),
    c(Amd, 0x17, &[0x71], "Ryzen (Matisse)"),
    c(Amd, 0x19, &[0x01], "EPYC (Milan)"),
    c(Amd, 0x19, &[0x21], "Ryzen (Vermeer)"),
    c(Amd, 0x19, &[0x50], "Ryzen (Cezanne)"),
    c(Amd, 0x19, &[0x11], "EPYC (Genoa)"),
    c(Amd, 0x19, &[0x61], "Ryzen (Raphael)"),
    c(Amd, 0x19, &[0x74, 0x75], "Ryzen (Phoenix)"),
    c(Amd, 0x1A, &[0x44], "Ryzen (Granite Ridge)"),
    // Others
    c(Cyrix, 4, &[], "Cx486/MediaGX"),
    c(Cyrix, 5, &[], "6x86/GXm"),
    c(Cyrix, 6, &[], "6x86MX/MII"),
    c(NexGen, 5, &[], "Nx586"),
    c(Transmeta, 5, &[], "Crusoe"),
    c(Transmeta, 0xF, &[], "Efficeon"),
    c(Umc, 4, &[], "U5D/U5S"),
    c(Centaur, 5, &[4], "WinChip C6"),
    c(Centaur, 5, &[8, 9], "WinChip 2"),
    c(Centaur, 6, &[6, 7, 8, 9], "C3"),
    c(Centaur, 6, &[0xA, 0xD], "C7"),
    c(Centaur, 6, &[0xF], "Nano"),
    c(Rise, 5, &[], "mP6"),
    c(Sis, 5, &[], "55x"),
    c(Nsc, 5, &[4], "Geode GX1/GXLV/GXm"),
    c(Nsc, 5, &[5], "Geode GX2"),
    c(Hygon, 0x18, &[], "Dhyana"),
];

/// Codename for a processor, or a generic "Unknown ..." label.
pub fn codename(vendor: Vendor, family: u32, model: u32) -> String {
    CODENAMES
        .iter()
        .find(|e| {
            e.vendor == vendor
                && e.family == family
                && (e.models.is_empty() || e.models.contains(&model))
        })
        .map(|e| e.name.to_string())
        .unwrap_or_else(|| {
            match Vendor::LISTED.iter().find(|(v, _)| *v == vendor) {
                Some((_, name)) => format!("Unknown {name} CPU"),
                None => "Unknown CPU".to_string(),
            }
        })
}

/// Known model names for one vendor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuList {
    pub names: Vec<&'static str>,
}

impl CpuList {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Every distinct codename the table knows for `vendor`, in table order.
pub fn cpu_list(vendor: Vendor) -> CpuList {
    let mut names: Vec<&'static str> = Vec::new();
    for entry in CODENAMES.iter().filter(|e| e.vendor == vendor) {
        if !names.contains(&entry.name) {
            names.push(entry.name);
        }
    }
    CpuList { names }
}
