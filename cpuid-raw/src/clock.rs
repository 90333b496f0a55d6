//! Processor clock detection
//!
//! All entry points return the frequency in MHz, or `None` when it cannot be
//! determined. Callers that need the `-1` convention map `None` themselves.

use std::fs;
use std::time::{Duration, Instant};

const CPUFREQ_MAX: &str = "/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq";
const PROC_CPUINFO: &str = "/proc/cpuinfo";

/// Clock as reported by the operating system.
///
/// Prefers the cpufreq maximum (kHz) over the `cpu MHz` line of
/// `/proc/cpuinfo`, which tracks the current, possibly throttled, frequency.
pub fn clock_by_os() -> Option<u32> {
    if let Some(khz) = fs::read_to_string(CPUFREQ_MAX)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
    {
        return Some((khz / 1000) as u32);
    }

    match fs::read_to_string(PROC_CPUINFO) {
        Ok(text) => parse_cpuinfo_mhz(&text),
        Err(e) => {
            tracing::debug!("Cannot read {PROC_CPUINFO}: {e}");
            None
        }
    }
}

fn parse_cpuinfo_mhz(text: &str) -> Option<u32> {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim() == "cpu MHz")
        .and_then(|(_, value)| value.trim().parse::<f64>().ok())
        .map(|mhz| mhz.round() as u32)
}

#[cfg(target_arch = "x86_64")]
fn read_tsc() -> Option<u64> {
    // SAFETY: RDTSC is unprivileged on every x86_64 OS we run on.
    Some(unsafe { core::arch::x86_64::_rdtsc() })
}

#[cfg(target_arch = "x86")]
fn read_tsc() -> Option<u64> {
    if !crate::native::cpuid_present() || crate::native::cpuid(1, 0).edx & (1 << 4) == 0 {
        return None;
    }
    // SAFETY: TSC support checked above.
    Some(unsafe { core::arch::x86::_rdtsc() })
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn read_tsc() -> Option<u64> {
    None
}

/// TSC ticks per microsecond across a busy-wait of `duration`.
fn measure_once(duration: Duration) -> Option<u32> {
    let start_tsc = read_tsc()?;
    let start = Instant::now();
    while start.elapsed() < duration {
        std::hint::spin_loop();
    }
    let end_tsc = read_tsc()?;
    let elapsed_us = start.elapsed().as_micros() as u64;
    if elapsed_us == 0 {
        return None;
    }
    Some((end_tsc.wrapping_sub(start_tsc) / elapsed_us) as u32)
}

/// Clock measured with the TSC over a busy-wait of `millis` milliseconds.
///
/// With `quad_check` the interval is split into four runs and the median of
/// those is returned.
pub fn clock_measure(millis: u64, quad_check: bool) -> Option<u32> {
    if !quad_check {
        return measure_once(Duration::from_millis(millis));
    }

    let slice = Duration::from_millis((millis / 4).max(1));
    let mut runs = Vec::with_capacity(4);
    for _ in 0..4 {
        runs.push(measure_once(slice)?);
    }
    runs.sort_unstable();
    let median = (runs[1] + runs[2]) / 2;
    tracing::debug!("TSC clock runs {:?} MHz, median {median} MHz", runs);
    Some(median)
}

/// Best-effort clock: the OS value, falling back to a short measurement.
pub fn clock() -> Option<u32> {
    clock_by_os().or_else(|| {
        tracing::debug!("No OS clock information, measuring");
        clock_measure(200, false)
    })
}
