//! Direct execution of the CPUID instruction on the current core

use raw_cpuid::CpuIdResult;

/// Returns whether the processor implements CPUID at all.
///
/// Every x86_64 part does. 32-bit parts older than the late 486 do not, which
/// the `has_cpuid` intrinsic detects by toggling EFLAGS.ID.
pub fn cpuid_present() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        true
    }

    #[cfg(target_arch = "x86")]
    {
        core::arch::x86::has_cpuid()
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    {
        false
    }
}

#[cfg(target_arch = "x86_64")]
pub fn cpuid(leaf: u32, subleaf: u32) -> CpuIdResult {
    // SAFETY: CPUID is available on every x86_64 processor.
    let r = unsafe { core::arch::x86_64::__cpuid_count(leaf, subleaf) };
    CpuIdResult {
        eax: r.eax,
        ebx: r.ebx,
        ecx: r.ecx,
        edx: r.edx,
    }
}

#[cfg(target_arch = "x86")]
pub fn cpuid(leaf: u32, subleaf: u32) -> CpuIdResult {
    if !cpuid_present() {
        return CpuIdResult {
            eax: 0,
            ebx: 0,
            ecx: 0,
            edx: 0,
        };
    }
    // SAFETY: presence checked above.
    let r = unsafe { core::arch::x86::__cpuid_count(leaf, subleaf) };
    CpuIdResult {
        eax: r.eax,
        ebx: r.ebx,
        ecx: r.ecx,
        edx: r.edx,
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
pub fn cpuid(_leaf: u32, _subleaf: u32) -> CpuIdResult {
    CpuIdResult {
        eax: 0,
        ebx: 0,
        ecx: 0,
        edx: 0,
    }
}
