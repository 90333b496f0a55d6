//! MSR (Model-Specific Register) reads through `/dev/cpu/*/msr`
//!
//! The device needs the `msr` kernel module and root or `CAP_SYS_RAWIO`.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;

/// IA32_TIME_STAMP_COUNTER
pub const IA32_TIME_STAMP_COUNTER: u32 = 0x10;

pub type Result<T> = std::result::Result<T, MsrError>;

/// Errors that can occur during MSR operations
#[derive(Debug, thiserror::Error)]
pub enum MsrError {
    #[error("Failed to open {path} for CPU {cpu}: {source}")]
    OpenFailed {
        cpu: u32,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to seek to MSR 0x{msr:X} on CPU {cpu}: {source}")]
    SeekFailed {
        cpu: u32,
        msr: u32,
        source: std::io::Error,
    },

    #[error("Failed to read MSR 0x{msr:X} on CPU {cpu}: {source}")]
    ReadFailed {
        cpu: u32,
        msr: u32,
        source: std::io::Error,
    },
}

/// An open handle to one CPU's MSR device. Closed on drop.
#[derive(Debug)]
pub struct MsrDriver {
    file: File,
    cpu: u32,
}

impl MsrDriver {
    /// Open the MSR device of `cpu`.
    ///
    /// # Errors
    ///
    /// Returns [`MsrError::OpenFailed`] if the module is not loaded or the
    /// process lacks the privilege to open the device.
    pub fn open(cpu: u32) -> Result<Self> {
        let path = PathBuf::from(format!("/dev/cpu/{cpu}/msr"));
        let file = File::open(&path).map_err(|source| MsrError::OpenFailed {
            cpu,
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Opened MSR driver {} for CPU {}", path.display(), cpu);
        Ok(Self { file, cpu })
    }

    /// Read a 64-bit value from an MSR
    ///
    /// # Example
    ///
    /// ```ignore
    /// use cpuid_raw::msr::{MsrDriver, IA32_TIME_STAMP_COUNTER};
    ///
    /// let mut driver = MsrDriver::open(0)?;
    /// let tsc = driver.read(IA32_TIME_STAMP_COUNTER)?;
    /// println!("TSC = {tsc}");
    /// ```
    pub fn read(&mut self, msr: u32) -> Result<u64> {
        let cpu = self.cpu;
        self.file
            .seek(SeekFrom::Start(msr as u64))
            .map_err(|source| MsrError::SeekFailed { cpu, msr, source })?;

        let mut buffer = [0u8; 8];
        self.file
            .read_exact(&mut buffer)
            .map_err(|source| MsrError::ReadFailed { cpu, msr, source })?;

        let value = u64::from_le_bytes(buffer);
        tracing::debug!("MSR read: CPU {} MSR 0x{:08x} = 0x{:016x}", cpu, msr, value);
        Ok(value)
    }

    pub fn cpu(&self) -> u32 {
        self.cpu
    }
}

impl Drop for MsrDriver {
    fn drop(&mut self) {
        tracing::trace!("Closing MSR driver for CPU {}", self.cpu);
    }
}
