// PL Image Processor Register Driver
// SPDX-License-Identifier: MIT

//! Register I/O backends.
//!
//! The driver core talks to hardware through the [`RegisterIo`] trait. Two
//! backends are provided:
//!
//! - [`DevMem`] (Linux only): maps the core's physical register window from
//!   `/dev/mem` and performs volatile 32-bit accesses.
//! - [`RamRegisters`] (all platforms): a software register file, used for
//!   tests and host-side simulation.
//!
//! Offsets are byte offsets into the mapped window. They must be 32-bit
//! aligned and inside the window; violations are programming errors and
//! panic immediately rather than being reported as recoverable errors.

use std::sync::{Arc, Mutex};

#[cfg(target_os = "linux")]
use crate::error::DriverError;
#[cfg(target_os = "linux")]
use std::os::unix::io::AsRawFd;

/// 32-bit register access over one mapped address window.
///
/// Methods take `&self`: MMIO accesses are volatile and need no exclusive
/// borrow. The trait provides no atomicity across registers; callers that
/// share a backend across threads must serialize externally.
pub trait RegisterIo: Send + Sync {
    /// Read the 32-bit register at `offset`.
    fn read(&self, offset: usize) -> u32;

    /// Write the 32-bit register at `offset`.
    fn write(&self, offset: usize, value: u32);

    /// Test a single bit of the register at `offset`.
    fn is_bit_set(&self, offset: usize, bit: u32) -> bool {
        (self.read(offset) >> bit) & 1 != 0
    }
}

impl<T: RegisterIo> RegisterIo for Arc<T> {
    fn read(&self, offset: usize) -> u32 {
        (**self).read(offset)
    }

    fn write(&self, offset: usize, value: u32) {
        (**self).write(offset, value)
    }
}

fn check_offset(offset: usize, span: usize) {
    assert_eq!(offset % 4, 0, "register offset {offset:#x} not word-aligned");
    assert!(
        offset + 4 <= span,
        "register offset {offset:#x} outside mapped span {span:#x}"
    );
}

// ============================================================================
// /dev/mem Backend (Linux)
// ============================================================================

/// Memory-mapped physical register window, backed by `/dev/mem`.
///
/// The mapping covers `[base, base + span)` and is released on drop. The
/// requested base need not be page-aligned; the mapping is extended down to
/// the containing page boundary internally.
#[cfg(target_os = "linux")]
pub struct DevMem {
    ptr: *mut u8,
    span: usize,
    page_offset: usize,
}

// SAFETY: DevMem only exposes &self methods performing volatile accesses on
// a mapping it owns for its whole lifetime. The registers belong to the
// hardware core, not to other host threads.
#[cfg(target_os = "linux")]
unsafe impl Send for DevMem {}

// SAFETY: see above; cross-register serialization is the caller's contract.
#[cfg(target_os = "linux")]
unsafe impl Sync for DevMem {}

#[cfg(target_os = "linux")]
impl DevMem {
    /// Map the physical window `[base, base + span)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `/dev/mem` cannot be opened (permissions, missing
    /// device node) or the mapping fails.
    pub fn map(base: u64, span: usize) -> Result<Self, DriverError> {
        let file = std::fs::File::options()
            .read(true)
            .write(true)
            .open("/dev/mem")
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::PermissionDenied {
                    DriverError::PermissionDenied("/dev/mem".to_string())
                } else {
                    DriverError::Io(e)
                }
            })?;

        let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) as u64 };
        let page_offset = (base % page_size) as usize;
        let map_base = base - page_offset as u64;
        let map_size = span + page_offset;

        let ptr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                map_size,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                map_base as libc::off_t,
            )
        };

        if ptr == libc::MAP_FAILED {
            return Err(DriverError::MmapFailed(format!(
                "mmap failed for physical address {base:#x} (span {span:#x})"
            )));
        }

        log::debug!("mapped {span:#x} bytes at physical address {base:#x}");

        Ok(Self {
            ptr: unsafe { (ptr as *mut u8).add(page_offset) },
            span,
            page_offset,
        })
    }

    /// Size of the mapped window in bytes.
    pub fn span(&self) -> usize {
        self.span
    }
}

#[cfg(target_os = "linux")]
impl RegisterIo for DevMem {
    fn read(&self, offset: usize) -> u32 {
        check_offset(offset, self.span);
        unsafe { std::ptr::read_volatile(self.ptr.add(offset) as *const u32) }
    }

    fn write(&self, offset: usize, value: u32) {
        check_offset(offset, self.span);
        unsafe { std::ptr::write_volatile(self.ptr.add(offset) as *mut u32, value) }
    }
}

#[cfg(target_os = "linux")]
impl Drop for DevMem {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(
                self.ptr.sub(self.page_offset) as *mut libc::c_void,
                self.span + self.page_offset,
            );
        }
    }
}

// ============================================================================
// Software Register File
// ============================================================================

/// In-memory register file with the same access contract as real MMIO.
///
/// All registers reset to zero. The internal mutex only makes the backend a
/// sound stand-in for volatile hardware access; it does not add atomicity
/// across registers.
pub struct RamRegisters {
    words: Mutex<Vec<u32>>,
    span: usize,
}

impl RamRegisters {
    /// Create a zeroed register file spanning `span` bytes.
    pub fn new(span: usize) -> Self {
        Self {
            words: Mutex::new(vec![0; span / 4]),
            span,
        }
    }

    /// Size of the register file in bytes.
    pub fn span(&self) -> usize {
        self.span
    }
}

impl RegisterIo for RamRegisters {
    fn read(&self, offset: usize) -> u32 {
        check_offset(offset, self.span);
        self.words.lock().unwrap()[offset / 4]
    }

    fn write(&self, offset: usize, value: u32) {
        check_offset(offset, self.span);
        self.words.lock().unwrap()[offset / 4] = value;
    }
}
