// decompress.rs
//
// Copyright (c) 2020-2026  Douglas Lau
//
//! Lempel-Ziv-Welch decompression for GIF image data
use crate::error::{Error, Result};

/// Image data decompressor.
///
/// Decoded color indices are handed to `sink` in pixel order, in runs of any
/// length.
pub trait Decompress {
    /// Decompress `data`, which was compressed with `min_code_size`.
    fn decompress(
        &mut self,
        min_code_size: u8,
        data: &[u8],
        sink: &mut dyn FnMut(&[u8]),
    ) -> Result<()>;
}

/// LZW decompressor using the `lzw` crate
#[derive(Debug, Default)]
pub struct Lzw;

impl Decompress for Lzw {
    fn decompress(
        &mut self,
        min_code_size: u8,
        data: &[u8],
        sink: &mut dyn FnMut(&[u8]),
    ) -> Result<()> {
        // must be >= 2
        let min_code_size = min_code_size.max(2);
        let mut dec = lzw::Decoder::new(lzw::LsbReader::new(), min_code_size);
        let mut s = 0;
        while s < data.len() {
            let (consumed, buf) = dec
                .decode_bytes(&data[s..])
                .map_err(|_| Error::InvalidLzwData)?;
            if !buf.is_empty() {
                sink(buf);
            }
            s += consumed;
        }
        // Codes remaining in the bit reader
        loop {
            let (_, buf) =
                dec.decode_bytes(&[]).map_err(|_| Error::InvalidLzwData)?;
            if buf.is_empty() {
                break;
            }
            sink(buf);
        }
        Ok(())
    }
}
