pub mod glyph;
pub mod icon_gen;
pub mod png_chunk;
pub mod verify;
