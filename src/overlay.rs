// PL Image Processor Register Driver
// SPDX-License-Identifier: MIT

//! IP core registries and the [`DeviceLocator`] capability.
//!
//! An overlay exposes its IP cores as named entries mapping to a physical
//! base address and address span. Rather than consulting a process-wide
//! registry, the driver takes a [`DeviceLocator`] at construction and
//! resolves its core through it, so the same driver runs against `/dev/mem`
//! on the target and against a software register file on the host.

use crate::error::DriverError;
use crate::mmio::{RamRegisters, RegisterIo};
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(target_os = "linux")]
use crate::mmio::DevMem;

/// One IP core entry in an overlay's address map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpCore {
    /// Physical base address of the core's register window.
    pub base: u64,
    /// Size of the register window in bytes.
    pub span: usize,
}

/// Resolves an IP core name to a register window.
///
/// Resolution is the only fallible step in the driver's life: an unknown
/// name fails with [`DriverError::DeviceNotFound`] and nothing is mapped.
pub trait DeviceLocator {
    /// Resolve `name` to an exclusive register I/O handle.
    fn resolve(&self, name: &str) -> Result<Box<dyn RegisterIo>, DriverError>;
}

// ============================================================================
// Hardware Overlay (Linux)
// ============================================================================

/// Address map of a loaded overlay, resolving cores through `/dev/mem`.
///
/// Entries are registered programmatically; reading them out of the
/// platform's overlay metadata (device tree, HWH file) is the caller's
/// concern.
#[cfg(target_os = "linux")]
#[derive(Debug, Default)]
pub struct Overlay {
    cores: HashMap<String, IpCore>,
}

#[cfg(target_os = "linux")]
impl Overlay {
    /// Create an empty address map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a core under `name`.
    pub fn add_core(&mut self, name: &str, core: IpCore) {
        self.cores.insert(name.to_string(), core);
    }

    /// Whether `name` is present in the address map.
    pub fn contains(&self, name: &str) -> bool {
        self.cores.contains_key(name)
    }

    /// Look up the address map entry for `name`.
    pub fn core(&self, name: &str) -> Option<IpCore> {
        self.cores.get(name).copied()
    }

    /// Number of registered cores.
    pub fn core_count(&self) -> usize {
        self.cores.len()
    }
}

#[cfg(target_os = "linux")]
impl DeviceLocator for Overlay {
    fn resolve(&self, name: &str) -> Result<Box<dyn RegisterIo>, DriverError> {
        let core = self
            .cores
            .get(name)
            .ok_or_else(|| DriverError::DeviceNotFound(name.to_string()))?;
        Ok(Box::new(DevMem::map(core.base, core.span)?))
    }
}

// ============================================================================
// Software Overlay
// ============================================================================

/// Overlay stand-in backed by software register files.
///
/// Each registered core owns one [`RamRegisters`] file that persists across
/// resolves of the same name, so register state behaves like hardware state
/// rather than resetting per handle.
pub struct RamOverlay {
    cores: HashMap<String, (IpCore, Arc<RamRegisters>)>,
}

impl RamOverlay {
    /// Create an empty overlay.
    pub fn new() -> Self {
        Self {
            cores: HashMap::new(),
        }
    }

    /// Register a core under `name` with a zeroed register file.
    pub fn add_core(&mut self, name: &str, core: IpCore) {
        let regs = Arc::new(RamRegisters::new(core.span));
        self.cores.insert(name.to_string(), (core, regs));
    }

    /// Whether `name` is present in the overlay.
    pub fn contains(&self, name: &str) -> bool {
        self.cores.contains_key(name)
    }

    /// Look up the address map entry for `name`.
    pub fn core(&self, name: &str) -> Option<IpCore> {
        self.cores.get(name).map(|(core, _)| *core)
    }

    /// Direct handle to a core's register file.
    ///
    /// Lets a test or simulation act as the hardware side, e.g. setting the
    /// done/idle/ready status bits the core would set on its own.
    pub fn registers(&self, name: &str) -> Option<Arc<RamRegisters>> {
        self.cores.get(name).map(|(_, regs)| Arc::clone(regs))
    }
}

impl Default for RamOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceLocator for RamOverlay {
    fn resolve(&self, name: &str) -> Result<Box<dyn RegisterIo>, DriverError> {
        let (_, regs) = self
            .cores
            .get(name)
            .ok_or_else(|| DriverError::DeviceNotFound(name.to_string()))?;
        Ok(Box::new(Arc::clone(regs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_unknown_name_fails() {
        let overlay = RamOverlay::new();
        let result = overlay.resolve("image_proc_0");
        assert!(matches!(
            result,
            Err(DriverError::DeviceNotFound(name)) if name == "image_proc_0"
        ));
    }

    #[test]
    fn test_core_lookup() {
        let mut overlay = RamOverlay::new();
        let entry = IpCore {
            base: 0x4000_0000,
            span: 0x1_0000,
        };
        overlay.add_core("image_proc_0", entry);

        assert!(overlay.contains("image_proc_0"));
        assert!(!overlay.contains("image_proc_1"));
        assert_eq!(overlay.core("image_proc_0"), Some(entry));
    }

    #[test]
    fn test_register_state_persists_across_resolves() {
        let mut overlay = RamOverlay::new();
        overlay.add_core(
            "image_proc_0",
            IpCore {
                base: 0x4000_0000,
                span: 0x1_0000,
            },
        );

        let first = overlay.resolve("image_proc_0").unwrap();
        first.write(0x1C, 640);
        drop(first);

        let second = overlay.resolve("image_proc_0").unwrap();
        assert_eq!(second.read(0x1C), 640);
    }
}
