// PL Image Processor Register Driver
// SPDX-License-Identifier: MIT

//! Basic example walking the image processor configure/enable flow.
//!
//! Runs against a software overlay so it works on any host. On the target,
//! register the core's physical address in a `pl_imgproc::Overlay` instead
//! and run with access to `/dev/mem`.
//!
//! Run with: `cargo run --example basic`

use pl_imgproc::{ImageProcessor, IpCore, RamOverlay};

fn main() {
    println!("PL Image Processor Basic Example");
    println!("================================\n");

    // Build the overlay address map
    println!("Registering IP cores...");
    let mut overlay = RamOverlay::new();
    overlay.add_core(
        "image_proc_0",
        IpCore {
            base: 0x4000_0000,
            span: 0x1_0000,
        },
    );
    let core = overlay.core("image_proc_0").unwrap();
    println!(
        "  image_proc_0 at {:#010x} (span {:#x})",
        core.base, core.span
    );
    println!();

    // Binding an unknown name fails at construction
    println!("Binding a core that is not in the overlay...");
    match ImageProcessor::new(&overlay, "image_proc_9") {
        Ok(_) => println!("  Unexpectedly succeeded!"),
        Err(e) => println!("  Failed as expected: {e}"),
    }
    println!();

    // Bind the real core
    println!("Binding image_proc_0...");
    let imgproc = match ImageProcessor::new(&overlay, "image_proc_0") {
        Ok(imgproc) => {
            println!("  Bound.");
            imgproc
        }
        Err(e) => {
            println!("  Failed to bind: {e}");
            return;
        }
    };
    println!();

    // Configure the frame geometry
    println!("Configuring a 1920x1080 frame...");
    imgproc.set_image_width(1920);
    imgproc.set_image_height(1080);
    println!("  Width readback:  {}", imgproc.image_width());
    println!("  Height readback: {}", imgproc.image_height());
    println!();

    // Start with auto-restart
    println!("Enabling the core with auto-restart...");
    imgproc.enable(true, true);
    println!("  CONTROL: {:#010x}", imgproc.control());
    println!("  Flags:   {:?}", imgproc.control_flags());
    println!("  Enabled: {}", imgproc.is_enabled());
    println!();

    // Stop it again; the whole control word is rewritten
    println!("Disabling the core...");
    imgproc.enable(false, false);
    println!("  CONTROL: {:#010x}", imgproc.control());
    println!("  Enabled: {}", imgproc.is_enabled());
    println!();

    println!("Done!");
}
