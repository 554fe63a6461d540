// PL Image Processor Register Driver
// SPDX-License-Identifier: MIT

//! Error types for driver operations.

use thiserror::Error;

/// Errors that can occur while binding or mapping an image processor core.
///
/// Register reads and writes after construction do not produce errors:
/// MMIO is assumed reliable, and an out-of-range or misaligned offset is a
/// programming error that panics immediately in the backend.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The named IP core is not present in the overlay's registry.
    #[error("no image processor core named {0:?} in the overlay")]
    DeviceNotFound(String),

    /// Permission denied opening the memory device.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Memory mapping failed.
    #[error("mmap failed: {0}")]
    MmapFailed(String),

    /// I/O error from system calls.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;
