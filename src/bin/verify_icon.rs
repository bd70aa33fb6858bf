use anyhow::{Context, Result};
use png_icon_gen::icon_gen::{Palette, DEFAULT_OUTPUT};
use png_icon_gen::verify::verify_png;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    println!("Checking icon: {}", path);

    let bytes = std::fs::read(&path).with_context(|| format!("Failed to read {}", path))?;
    let report = verify_png(&bytes, &Palette::default())?;

    println!(
        "Image dimensions: {}x{}",
        report.header.width, report.header.height
    );
    println!("  {} chunks, all CRCs valid", report.chunk_count);
    println!("  {} glyph pixels", report.foreground_pixels);
    println!("✓ Icon matches the expected pattern");

    Ok(())
}
