//! Build script for the system monitor overlay
//!
//! Embeds the Windows application manifest so the overlay is DPI aware
//! and its geometry is expressed in real pixels.

fn main() {
    // Only run on Windows
    if std::env::var("CARGO_CFG_TARGET_OS").unwrap() != "windows" {
        return;
    }

    embed_resource::compile("resources/app.rc", embed_resource::NONE);

    println!("cargo:rerun-if-changed=resources/app.rc");
    println!("cargo:rerun-if-changed=resources/app.manifest");
}
