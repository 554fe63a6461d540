// PL Image Processor Register Driver
// SPDX-License-Identifier: MIT

//! Register map of the image processor core.
//!
//! Offsets and bit positions are fixed by the HLS core generator output and
//! must match it exactly. All registers are 32 bits wide.

use bitflags::bitflags;

/// Control/status register.
pub const CONTROL: usize = 0x00;

/// Global interrupt enable register. Declared by the core but not driven by
/// any driver operation.
pub const GLOBAL_INTERRUPT_ENABLE: usize = 0x04;

/// Per-channel interrupt enable register. Declared but not driven.
pub const INTERRUPT_CHANNEL_ENABLE: usize = 0x08;

/// Per-channel interrupt status register. Declared but not driven.
pub const INTERRUPT_CHANNEL_STATUS: usize = 0x0C;

/// Image height configuration register.
pub const IMAGE_ROWS: usize = 0x14;

/// Image width configuration register.
pub const IMAGE_COLS: usize = 0x1C;

/// Bit position of the start bit within [`CONTROL`].
pub const CONTROL_START_BIT: u32 = 0;

/// Bit position of the auto-restart bit within [`CONTROL`].
pub const CONTROL_AUTO_RESTART_BIT: u32 = 7;

bitflags! {
    /// Bit layout of the [`CONTROL`] register.
    ///
    /// `START` and `AUTO_RESTART` are written by software; `DONE`, `IDLE`
    /// and `READY` are set by the core and read back as status.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Control: u32 {
        /// Start the core.
        const START = 1 << 0;
        /// The core finished the current frame.
        const DONE = 1 << 1;
        /// The core is idle.
        const IDLE = 1 << 2;
        /// The core can accept a new frame.
        const READY = 1 << 3;
        /// Re-trigger automatically after each frame completes.
        const AUTO_RESTART = 1 << 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_offsets() {
        assert_eq!(CONTROL, 0x00);
        assert_eq!(GLOBAL_INTERRUPT_ENABLE, 0x04);
        assert_eq!(INTERRUPT_CHANNEL_ENABLE, 0x08);
        assert_eq!(INTERRUPT_CHANNEL_STATUS, 0x0C);
        assert_eq!(IMAGE_ROWS, 0x14);
        assert_eq!(IMAGE_COLS, 0x1C);
    }

    #[test]
    fn test_control_bit_values() {
        assert_eq!(Control::START.bits(), 0x01);
        assert_eq!(Control::DONE.bits(), 0x02);
        assert_eq!(Control::IDLE.bits(), 0x04);
        assert_eq!(Control::READY.bits(), 0x08);
        assert_eq!(Control::AUTO_RESTART.bits(), 0x80);
        assert_eq!(Control::START.bits(), 1 << CONTROL_START_BIT);
        assert_eq!(Control::AUTO_RESTART.bits(), 1 << CONTROL_AUTO_RESTART_BIT);
    }
}
