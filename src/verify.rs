//! Validation of a generated icon: container structure first, then every
//! pixel as decoded by the `image` crate.

use crate::glyph::is_foreground;
use crate::icon_gen::{Palette, ICON_SIZE};
use crate::png_chunk::{read_chunks, ImageHeader, IDAT, IEND, IHDR};
use anyhow::{Context, Result};
use image::{ColorType, ImageFormat};

/// Summary of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub chunk_count: usize,
    pub header: ImageHeader,
    pub foreground_pixels: usize,
}

pub fn verify_png(bytes: &[u8], palette: &Palette) -> Result<VerifyReport> {
    let chunks = read_chunks(bytes).context("Invalid PNG container")?;

    let kinds: Vec<[u8; 4]> = chunks.iter().map(|chunk| chunk.kind).collect();
    if kinds != [IHDR, IDAT, IEND] {
        let found: Vec<String> = chunks.iter().map(|chunk| chunk.kind_str()).collect();
        anyhow::bail!("Expected chunks IHDR, IDAT, IEND but found {}", found.join(", "));
    }

    let header = ImageHeader::from_bytes(&chunks[0].data)?;
    let expected_header = ImageHeader::rgba8(ICON_SIZE, ICON_SIZE);
    if header != expected_header {
        anyhow::bail!(
            "Unexpected image header: {:?} (expected {:?})",
            header,
            expected_header
        );
    }

    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .context("Failed to decode PNG")?;
    if decoded.color() != ColorType::Rgba8 {
        anyhow::bail!("Decoded color type is {:?}, expected Rgba8", decoded.color());
    }

    let rgba = decoded.to_rgba8();
    let mut foreground_pixels = 0;
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let expected = palette.color_at(x, y);
        if *pixel != expected {
            anyhow::bail!(
                "Pixel ({}, {}) is {:?}, expected {:?}",
                x,
                y,
                pixel.0,
                expected.0
            );
        }
        if is_foreground(x, y) {
            foreground_pixels += 1;
        }
    }

    Ok(VerifyReport {
        chunk_count: chunks.len(),
        header,
        foreground_pixels,
    })
}
