//! PNG container framing: the file signature, length/type/CRC chunks and the
//! IHDR payload.
//!
//! Each chunk is laid out as:
//! - length: u32 big-endian, payload bytes only
//! - type: 4 ASCII bytes
//! - payload
//! - crc: u32 big-endian CRC-32 over type ++ payload

use anyhow::{Context, Result};
use std::io::Write;

/// The fixed 8-byte PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub const IHDR: [u8; 4] = *b"IHDR";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";

/// Size of the IHDR payload
pub const IHDR_LEN: usize = 13;

/// Truecolor with alpha
pub const COLOR_TYPE_RGBA: u8 = 6;

/// A single PNG chunk, stored without its length and CRC fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub kind: [u8; 4],
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn new(kind: [u8; 4], data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// CRC-32 over the chunk type followed by the payload
    pub fn crc(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&self.kind);
        hasher.update(&self.data);
        hasher.finalize()
    }

    /// Size of the chunk on disk, including length, type and CRC
    pub fn encoded_len(&self) -> usize {
        4 + 4 + self.data.len() + 4
    }

    /// The chunk type as text, for diagnostics
    pub fn kind_str(&self) -> String {
        String::from_utf8_lossy(&self.kind).into_owned()
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        w.write_all(&(self.data.len() as u32).to_be_bytes())?;
        w.write_all(&self.kind)?;
        w.write_all(&self.data)?;
        w.write_all(&self.crc().to_be_bytes())?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.extend_from_slice(&(self.data.len() as u32).to_be_bytes());
        buf.extend_from_slice(&self.kind);
        buf.extend_from_slice(&self.data);
        buf.extend_from_slice(&self.crc().to_be_bytes());
        buf
    }
}

/// The 13-byte IHDR payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub compression: u8,
    pub filter: u8,
    pub interlace: u8,
}

impl ImageHeader {
    /// Header for an 8-bit RGBA, non-interlaced image
    pub fn rgba8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            color_type: COLOR_TYPE_RGBA,
            compression: 0,
            filter: 0,
            interlace: 0,
        }
    }

    pub fn to_bytes(&self) -> [u8; IHDR_LEN] {
        let mut buf = [0u8; IHDR_LEN];
        buf[0..4].copy_from_slice(&self.width.to_be_bytes());
        buf[4..8].copy_from_slice(&self.height.to_be_bytes());
        buf[8] = self.bit_depth;
        buf[9] = self.color_type;
        buf[10] = self.compression;
        buf[11] = self.filter;
        buf[12] = self.interlace;
        buf
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != IHDR_LEN {
            anyhow::bail!(
                "IHDR payload must be {} bytes, found {}",
                IHDR_LEN,
                data.len()
            );
        }

        Ok(Self {
            width: read_u32_be(&data[0..4]),
            height: read_u32_be(&data[4..8]),
            bit_depth: data[8],
            color_type: data[9],
            compression: data[10],
            filter: data[11],
            interlace: data[12],
        })
    }

    pub fn to_chunk(&self) -> Chunk {
        Chunk::new(IHDR, self.to_bytes().to_vec())
    }
}

fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Split a PNG byte stream into its chunks, validating every CRC.
///
/// Reading stops at IEND; bytes after it are rejected, as is a stream that ends
/// without one.
pub fn read_chunks(bytes: &[u8]) -> Result<Vec<Chunk>> {
    if bytes.len() < PNG_SIGNATURE.len() || bytes[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        anyhow::bail!("Missing PNG signature");
    }

    let mut chunks = Vec::new();
    let mut offset = PNG_SIGNATURE.len();

    while offset < bytes.len() {
        let header = bytes
            .get(offset..offset + 8)
            .with_context(|| format!("Truncated chunk header at offset {offset}"))?;
        let len = read_u32_be(&header[0..4]) as usize;
        let kind = [header[4], header[5], header[6], header[7]];

        let data_start = offset + 8;
        let data_end = data_start
            .checked_add(len)
            .context("Chunk length overflows")?;
        let data = bytes
            .get(data_start..data_end)
            .with_context(|| format!("Truncated chunk payload at offset {offset}"))?;
        let stored_crc = bytes
            .get(data_end..data_end + 4)
            .map(read_u32_be)
            .with_context(|| format!("Truncated chunk CRC at offset {offset}"))?;

        let chunk = Chunk::new(kind, data.to_vec());
        let actual_crc = chunk.crc();
        if stored_crc != actual_crc {
            anyhow::bail!(
                "CRC mismatch in {} chunk: stored {:#010x}, computed {:#010x}",
                chunk.kind_str(),
                stored_crc,
                actual_crc
            );
        }

        offset = data_end + 4;
        let is_end = chunk.kind == IEND;
        chunks.push(chunk);

        if is_end {
            if offset != bytes.len() {
                anyhow::bail!("{} trailing bytes after IEND", bytes.len() - offset);
            }
            return Ok(chunks);
        }
    }

    anyhow::bail!("PNG stream ends without an IEND chunk")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_png() -> Vec<u8> {
        let mut buf = PNG_SIGNATURE.to_vec();
        buf.extend(ImageHeader::rgba8(1, 1).to_chunk().to_bytes());
        buf.extend(Chunk::new(IDAT, vec![1, 2, 3]).to_bytes());
        buf.extend(Chunk::new(IEND, Vec::new()).to_bytes());
        buf
    }

    #[test]
    fn test_signature_bytes() {
        assert_eq!(
            PNG_SIGNATURE,
            [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
        );
    }

    #[test]
    fn test_iend_chunk_bytes() {
        // The IEND CRC is a well-known constant
        let bytes = Chunk::new(IEND, Vec::new()).to_bytes();
        assert_eq!(
            bytes,
            [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
    }

    #[test]
    fn test_chunk_layout() {
        let chunk = Chunk::new(IDAT, vec![0xAA, 0xBB]);
        let bytes = chunk.to_bytes();

        assert_eq!(bytes.len(), chunk.encoded_len());
        assert_eq!(bytes[0..4], [0u8, 0, 0, 2]);
        assert_eq!(bytes[4..8], *b"IDAT");
        assert_eq!(bytes[8..10], [0xAAu8, 0xBB]);
        assert_eq!(bytes[10..14], chunk.crc().to_be_bytes());

        let mut written: Vec<u8> = Vec::new();
        chunk.write_to(&mut written).unwrap();
        assert_eq!(written, bytes);
    }

    #[test]
    fn test_crc_covers_type_and_payload() {
        let chunk = Chunk::new(IDAT, vec![1, 2, 3]);
        let mut covered = b"IDAT".to_vec();
        covered.extend_from_slice(&[1, 2, 3]);
        assert_eq!(chunk.crc(), crc32fast::hash(&covered));
        assert_ne!(chunk.crc(), crc32fast::hash(&[1, 2, 3]));
    }

    #[test]
    fn test_ihdr_payload() {
        let header = ImageHeader::rgba8(32, 32);
        assert_eq!(
            header.to_bytes(),
            [0, 0, 0, 32, 0, 0, 0, 32, 8, 6, 0, 0, 0]
        );
        assert_eq!(ImageHeader::from_bytes(&header.to_bytes()).unwrap(), header);
    }

    #[test]
    fn test_ihdr_rejects_wrong_length() {
        let err = ImageHeader::from_bytes(&[0; 12]).unwrap_err();
        assert!(err.to_string().contains("13 bytes"));
    }

    #[test]
    fn test_read_chunks() {
        let chunks = read_chunks(&minimal_png()).unwrap();
        let kinds: Vec<_> = chunks.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, [IHDR, IDAT, IEND]);
        assert_eq!(chunks[1].data, [1, 2, 3]);
    }

    #[test]
    fn test_read_chunks_rejects_bad_signature() {
        let mut png = minimal_png();
        png[1] = b'X';
        assert!(read_chunks(&png).is_err());
        assert!(read_chunks(&[0x89]).is_err());
    }

    #[test]
    fn test_read_chunks_rejects_corrupted_payload() {
        let mut png = minimal_png();
        // First payload byte of IDAT: signature + IHDR chunk + IDAT length/type
        let idat_payload = 8 + (12 + 13) + 8;
        png[idat_payload] ^= 0xFF;

        let err = read_chunks(&png).unwrap_err();
        assert!(err.to_string().contains("CRC mismatch in IDAT"), "{err}");
    }

    #[test]
    fn test_read_chunks_rejects_truncation() {
        let png = minimal_png();
        assert!(read_chunks(&png[..png.len() - 1]).is_err());
        assert!(read_chunks(&png[..png.len() - 12]).is_err());
    }

    #[test]
    fn test_read_chunks_rejects_trailing_bytes() {
        let mut png = minimal_png();
        png.push(0);
        let err = read_chunks(&png).unwrap_err();
        assert!(err.to_string().contains("trailing"), "{err}");
    }
}
