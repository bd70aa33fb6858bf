use crate::glyph::is_foreground;
use crate::png_chunk::{Chunk, ImageHeader, IDAT, IEND, PNG_SIGNATURE};
use anyhow::{Context, Result};
use flate2::{write::ZlibEncoder, Compression};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::{
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Width and height of the generated icon
pub const ICON_SIZE: u32 = 32;

/// Where the icon is written when no output path is given
pub const DEFAULT_OUTPUT: &str = "src-tauri/icons/32x32.png";

pub const FOREGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BACKGROUND: Rgba<u8> = Rgba([0, 100, 200, 255]);

/// PNG filter type 0: scanline stored as-is
const FILTER_NONE: u8 = 0;

#[derive(Debug)]
pub struct Options {
    pub output: PathBuf,
    pub palette: Palette,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            palette: Palette::default(),
        }
    }
}

/// Colors for glyph and background pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub foreground: Rgba<u8>,
    pub background: Rgba<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: FOREGROUND,
            background: BACKGROUND,
        }
    }
}

impl Palette {
    /// Build a palette from optional CSS color strings, falling back to the
    /// default colors for any that are not given
    pub fn from_css(foreground: Option<&str>, background: Option<&str>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            foreground: foreground
                .map(parse_css_color)
                .transpose()?
                .unwrap_or(defaults.foreground),
            background: background
                .map(parse_css_color)
                .transpose()?
                .unwrap_or(defaults.background),
        })
    }

    pub fn color_at(&self, x: u32, y: u32) -> Rgba<u8> {
        if is_foreground(x, y) {
            self.foreground
        } else {
            self.background
        }
    }
}

/// Parse a CSS color into an opaque pixel
fn parse_css_color(color: &str) -> Result<Rgba<u8>> {
    let srgb = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow::anyhow!("Invalid CSS color: {}", color))?;

    Ok(Rgba([
        (srgb.red * 255.).round() as u8,
        (srgb.green * 255.).round() as u8,
        (srgb.blue * 255.).round() as u8,
        255,
    ]))
}

/// Render the glyph into a row-major RGBA pixel grid
pub fn render_pixels(palette: &Palette) -> RgbaImage {
    ImageBuffer::from_fn(ICON_SIZE, ICON_SIZE, |x, y| palette.color_at(x, y))
}

/// Prefix every row with a "none" filter byte, producing the uncompressed image data stream
pub fn filter_scanlines(image: &RgbaImage) -> Vec<u8> {
    let row_len = image.width() as usize * 4;
    let mut filtered = Vec::with_capacity((row_len + 1) * image.height() as usize);

    for row in image.as_raw().chunks_exact(row_len) {
        filtered.push(FILTER_NONE);
        filtered.extend_from_slice(row);
    }

    filtered
}

/// Serialize a pixel grid as signature ++ IHDR ++ IDAT ++ IEND
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let header = ImageHeader::rgba8(image.width(), image.height());

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&filter_scanlines(image))
        .context("Failed to compress image data")?;
    let compressed = encoder.finish().context("Failed to compress image data")?;

    let chunks = [
        header.to_chunk(),
        Chunk::new(IDAT, compressed),
        Chunk::new(IEND, Vec::new()),
    ];

    let mut png = Vec::with_capacity(
        PNG_SIGNATURE.len() + chunks.iter().map(Chunk::encoded_len).sum::<usize>(),
    );
    png.extend_from_slice(&PNG_SIGNATURE);
    for chunk in &chunks {
        chunk.write_to(&mut png)?;
    }

    Ok(png)
}

/// The default icon as PNG bytes
pub fn generate() -> Result<Vec<u8>> {
    encode_png(&render_pixels(&Palette::default()))
}

pub fn generate_icon(options: &Options) -> Result<()> {
    println!("Generating {}x{} icon...", ICON_SIZE, ICON_SIZE);

    let png = encode_png(&render_pixels(&options.palette))?;
    write_icon(&options.output, &png)?;

    println!("✓ Generated {}", options.output.display());
    Ok(())
}

/// Write the icon, replacing any existing file. The parent directory must already exist.
fn write_icon(path: &Path, png: &[u8]) -> Result<()> {
    std::fs::write(path, png).with_context(|| format!("Failed to write {}", path.display()))
}
