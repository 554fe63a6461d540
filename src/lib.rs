// PL Image Processor Register Driver
// SPDX-License-Identifier: MIT

//! # PL Image Processor Register Driver
//!
//! Userspace driver for an HLS-generated image-processor core exposed as a
//! named IP on a reconfigurable-logic (PL) overlay. The core is controlled
//! entirely through a small fixed-offset register window: a control/status
//! register and image width/height configuration registers.
//!
//! ## Register Map
//!
//! | Register | Offset | Contents |
//! |----------|--------|----------|
//! | CONTROL | `0x00` | bit0 start, bit1 done, bit2 idle, bit3 ready, bit7 auto-restart |
//! | GLOBAL_INTERRUPT_ENABLE | `0x04` | declared, unused |
//! | INTERRUPT_CHANNEL_ENABLE | `0x08` | declared, unused |
//! | INTERRUPT_CHANNEL_STATUS | `0x0C` | declared, unused |
//! | IMAGE_ROWS | `0x14` | image height |
//! | IMAGE_COLS | `0x1C` | image width |
//!
//! ## Backends
//!
//! The driver resolves its core through a [`DeviceLocator`] passed at
//! construction, so the register backend is pluggable:
//!
//! - [`Overlay`] + [`DevMem`] (Linux): maps the core's physical register
//!   window from `/dev/mem`.
//! - [`RamOverlay`] + [`RamRegisters`] (all platforms): software register
//!   files for tests and host-side simulation.
//!
//! ## Example
//!
//! ```rust
//! use pl_imgproc::{ImageProcessor, IpCore, RamOverlay};
//!
//! fn main() -> Result<(), pl_imgproc::DriverError> {
//!     let mut overlay = RamOverlay::new();
//!     overlay.add_core("image_proc_0", IpCore { base: 0x4000_0000, span: 0x1_0000 });
//!
//!     let imgproc = ImageProcessor::new(&overlay, "image_proc_0")?;
//!     imgproc.set_image_width(1920);
//!     imgproc.set_image_height(1080);
//!     imgproc.enable(true, true);
//!
//!     assert_eq!(imgproc.control(), 0x81);
//!     Ok(())
//! }
//! ```
//!
//! On the target the same flow runs against hardware by registering the
//! core's physical address in an [`Overlay`] instead (root or `/dev/mem`
//! access required).

// Module declarations
pub mod error;
pub mod imgproc;
pub mod mmio;
pub mod overlay;
pub mod regs;

// Re-exports for convenient access
pub use error::{DriverError, DriverResult};
pub use imgproc::ImageProcessor;
pub use mmio::{RamRegisters, RegisterIo};
pub use overlay::{DeviceLocator, IpCore, RamOverlay};
pub use regs::Control;

#[cfg(target_os = "linux")]
pub use mmio::DevMem;
#[cfg(target_os = "linux")]
pub use overlay::Overlay;
