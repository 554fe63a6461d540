// PL Image Processor Register Driver
// SPDX-License-Identifier: MIT

//! Image processor driver.

use crate::error::DriverError;
use crate::mmio::RegisterIo;
use crate::overlay::DeviceLocator;
use crate::regs::{self, Control};

/// Driver for one image processor core.
///
/// Binds a named core out of an overlay and exposes typed accessors over its
/// register window. Every operation is a single direct register access: no
/// blocking, no retries, and no atomicity across registers. Callers sharing
/// one instance across threads must serialize externally.
///
/// # Example
///
/// ```rust
/// use pl_imgproc::{ImageProcessor, IpCore, RamOverlay};
///
/// fn main() -> Result<(), pl_imgproc::DriverError> {
///     let mut overlay = RamOverlay::new();
///     overlay.add_core("image_proc_0", IpCore { base: 0x4000_0000, span: 0x1_0000 });
///
///     let imgproc = ImageProcessor::new(&overlay, "image_proc_0")?;
///     imgproc.set_image_width(1920);
///     imgproc.set_image_height(1080);
///     imgproc.enable(true, true);
///     assert!(imgproc.is_enabled());
///     Ok(())
/// }
/// ```
pub struct ImageProcessor {
    regs: Box<dyn RegisterIo>,
}

impl ImageProcessor {
    /// Bind the core registered as `name` in the locator.
    ///
    /// The resolved register window is owned exclusively by the driver for
    /// its lifetime and released when the driver is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::DeviceNotFound`] if `name` is not registered,
    /// or a mapping error from the locator's backend.
    pub fn new(locator: &dyn DeviceLocator, name: &str) -> Result<Self, DriverError> {
        let regs = locator.resolve(name)?;
        log::debug!("bound image processor core {name:?}");
        Ok(Self { regs })
    }

    /// Raw value of the CONTROL register.
    pub fn control(&self) -> u32 {
        self.regs.read(regs::CONTROL)
    }

    /// CONTROL register as typed flags.
    ///
    /// The done/idle/ready bits are set by hardware and exposed read-only
    /// here; the driver never acts on them.
    pub fn control_flags(&self) -> Control {
        Control::from_bits_truncate(self.control())
    }

    /// Start or stop the core.
    ///
    /// The control word is rebuilt from the two flags on every call and
    /// written whole: bits not covered by the parameters are cleared, not
    /// preserved. With `auto_restart` set the core keeps processing frames
    /// until explicitly disabled.
    pub fn enable(&self, enable: bool, auto_restart: bool) {
        let mut control = Control::empty();
        if enable {
            control |= Control::START;
        }
        if auto_restart {
            control |= Control::AUTO_RESTART;
        }
        log::debug!(
            "control ({:#04x}) <- {:#010x}",
            regs::CONTROL,
            control.bits()
        );
        self.regs.write(regs::CONTROL, control.bits());
    }

    /// Whether the core's start bit is set.
    pub fn is_enabled(&self) -> bool {
        self.regs.is_bit_set(regs::CONTROL, regs::CONTROL_START_BIT)
    }

    /// Set the image width in pixels.
    pub fn set_image_width(&self, width: u32) {
        self.regs.write(regs::IMAGE_COLS, width);
    }

    /// Set the image height in pixels.
    pub fn set_image_height(&self, height: u32) {
        self.regs.write(regs::IMAGE_ROWS, height);
    }

    /// Image width in pixels.
    pub fn image_width(&self) -> u32 {
        self.regs.read(regs::IMAGE_COLS)
    }

    /// Image height in pixels.
    pub fn image_height(&self) -> u32 {
        self.regs.read(regs::IMAGE_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mmio::RegisterIo;
    use crate::overlay::{IpCore, RamOverlay};

    fn test_overlay() -> RamOverlay {
        let mut overlay = RamOverlay::new();
        overlay.add_core(
            "image_proc_0",
            IpCore {
                base: 0x4000_0000,
                span: 0x1_0000,
            },
        );
        overlay
    }

    #[test]
    fn test_unknown_core_name_fails() {
        let overlay = RamOverlay::new();
        let result = ImageProcessor::new(&overlay, "image_proc_0");
        assert!(matches!(
            result,
            Err(DriverError::DeviceNotFound(name)) if name == "image_proc_0"
        ));
    }

    #[test]
    fn test_enable_truth_table() {
        let overlay = test_overlay();
        let imgproc = ImageProcessor::new(&overlay, "image_proc_0").unwrap();

        for enable in [false, true] {
            for auto_restart in [false, true] {
                imgproc.enable(enable, auto_restart);
                let expected = (enable as u32) | ((auto_restart as u32) << 7);
                assert_eq!(imgproc.control(), expected);
                assert_eq!(imgproc.is_enabled(), enable);
            }
        }
    }

    #[test]
    fn test_enable_overwrites_previous_control_word() {
        let overlay = test_overlay();
        let imgproc = ImageProcessor::new(&overlay, "image_proc_0").unwrap();

        imgproc.enable(true, false);
        assert_eq!(imgproc.control(), 0x01);

        // The second write rebuilds the word from scratch; the start bit
        // from the first call must be gone.
        imgproc.enable(false, true);
        assert_eq!(imgproc.control(), 0x80);
        assert!(!imgproc.is_enabled());
    }

    #[test]
    fn test_image_size_round_trips() {
        let overlay = test_overlay();
        let imgproc = ImageProcessor::new(&overlay, "image_proc_0").unwrap();

        for value in [0, 1, 65_535, u32::MAX] {
            imgproc.set_image_width(value);
            assert_eq!(imgproc.image_width(), value);
            imgproc.set_image_height(value);
            assert_eq!(imgproc.image_height(), value);
        }
    }

    #[test]
    fn test_width_and_height_are_independent() {
        let overlay = test_overlay();
        let imgproc = ImageProcessor::new(&overlay, "image_proc_0").unwrap();

        imgproc.set_image_width(1920);
        imgproc.set_image_height(1080);
        assert_eq!(imgproc.image_width(), 1920);
        assert_eq!(imgproc.image_height(), 1080);
    }

    #[test]
    fn test_configure_and_start_scenario() {
        let overlay = test_overlay();
        let imgproc = ImageProcessor::new(&overlay, "image_proc_0").unwrap();

        imgproc.set_image_width(1920);
        imgproc.set_image_height(1080);
        imgproc.enable(true, true);

        assert_eq!(imgproc.image_width(), 1920);
        assert_eq!(imgproc.image_height(), 1080);
        assert_eq!(imgproc.control(), 0x81);
        assert!(imgproc.is_enabled());
    }

    #[test]
    fn test_status_bits_are_exposed_read_only() {
        let overlay = test_overlay();
        let imgproc = ImageProcessor::new(&overlay, "image_proc_0").unwrap();

        // Act as the hardware side: set done and idle directly.
        let regs = overlay.registers("image_proc_0").unwrap();
        regs.write(crate::regs::CONTROL, 0x06);

        let flags = imgproc.control_flags();
        assert!(flags.contains(Control::DONE));
        assert!(flags.contains(Control::IDLE));
        assert!(!flags.contains(Control::START));
        assert!(!imgproc.is_enabled());
    }
}
