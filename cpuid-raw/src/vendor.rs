/// CPU vendors known to the identifier
///
/// Numeric ids are stable and show up in `--vendorid` output and in reports,
/// so variants must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Vendor {
    Intel,
    Amd,
    Cyrix,
    NexGen,
    Transmeta,
    Umc,
    Centaur,
    Rise,
    Sis,
    Nsc,
    Hygon,
    #[default]
    Unknown,
}

impl Vendor {
    /// Vendors in the order the CPU list prints them, with their display names.
    pub const LISTED: [(Vendor, &'static str); 10] = [
        (Vendor::Intel, "Intel"),
        (Vendor::Amd, "AMD"),
        (Vendor::Cyrix, "Cyrix"),
        (Vendor::NexGen, "NexGen"),
        (Vendor::Transmeta, "Transmeta"),
        (Vendor::Umc, "UMC"),
        (Vendor::Centaur, "Centaur/VIA"),
        (Vendor::Rise, "Rise"),
        (Vendor::Sis, "SiS"),
        (Vendor::Nsc, "NSC"),
    ];

    pub fn id(&self) -> i32 {
        match self {
            Vendor::Intel => 0,
            Vendor::Amd => 1,
            Vendor::Cyrix => 2,
            Vendor::NexGen => 3,
            Vendor::Transmeta => 4,
            Vendor::Umc => 5,
            Vendor::Centaur => 6,
            Vendor::Rise => 7,
            Vendor::Sis => 8,
            Vendor::Nsc => 9,
            Vendor::Hygon => 10,
            Vendor::Unknown => -1,
        }
    }

    /// Map the 12-byte vendor string from leaf 0.
    pub fn from_vendor_str(s: &str) -> Self {
        match s {
            "GenuineIntel" => Vendor::Intel,
            "AuthenticAMD" | "AMDisbetter!" => Vendor::Amd,
            "CyrixInstead" => Vendor::Cyrix,
            "NexGenDriven" => Vendor::NexGen,
            "GenuineTMx86" | "TransmetaCPU" => Vendor::Transmeta,
            "UMC UMC UMC " => Vendor::Umc,
            "CentaurHauls" => Vendor::Centaur,
            "RiseRiseRise" => Vendor::Rise,
            "SiS SiS SiS " => Vendor::Sis,
            "Geode by NSC" => Vendor::Nsc,
            "HygonGenuine" => Vendor::Hygon,
            _ => Vendor::Unknown,
        }
    }

    /// Whether the vendor follows AMD's extended leaf conventions.
    pub fn is_amd_like(&self) -> bool {
        matches!(self, Vendor::Amd | Vendor::Hygon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_strings() {
        assert_eq!(Vendor::from_vendor_str("GenuineIntel"), Vendor::Intel);
        assert_eq!(Vendor::from_vendor_str("AuthenticAMD"), Vendor::Amd);
        assert_eq!(Vendor::from_vendor_str("Geode by NSC"), Vendor::Nsc);
        assert_eq!(Vendor::from_vendor_str("KVMKVMKVM"), Vendor::Unknown);
    }

    #[test]
    fn test_vendor_ids_are_stable() {
        assert_eq!(Vendor::Intel.id(), 0);
        assert_eq!(Vendor::Amd.id(), 1);
        assert_eq!(Vendor::Nsc.id(), 9);
        assert_eq!(Vendor::Unknown.id(), -1);
    }

    #[test]
    fn test_listed_order() {
        let names: Vec<&str> = Vendor::LISTED.iter().map(|(_, n)| *n).collect();
        assert_eq!(names.first(), Some(&"Intel"));
        assert_eq!(names.last(), Some(&"NSC"));
        assert_eq!(names.len(), 10);
    }
}
