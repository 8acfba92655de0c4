// test_gif.rs
//
// Copyright (c) 2026  Douglas Lau
//
//! GIF stream builder for tests.
//!
//! Image data is stored uncompressed; decode it with [Raw](struct.Raw.html).
use crate::decompress::Decompress;
use crate::error::Result;

/// 10x10 two-color pattern with a 4 entry global color table
pub const SIMPLE_1: [u8; 69] = [
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x0A, 0x00, 0x0A, 0x00, 0x91, 0x00,
    0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00,
    0x00, 0x21, 0xF9, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00,
    0x00, 0x00, 0x0A, 0x00, 0x0A, 0x00, 0x00, 0x02, 0x16, 0x8C, 0x2D, 0x99,
    0x87, 0x2A, 0x1C, 0xDC, 0x33, 0xA0, 0x02, 0x75, 0xEC, 0x95, 0xFA, 0xA8,
    0xDE, 0x60, 0x8C, 0x04, 0x91, 0x4C, 0x01, 0x00, 0x3B,
];

/// Decoded pixels of `SIMPLE_1`
pub const SIMPLE_1_IMAGE: [u8; 100] = [
    1, 1, 1, 1, 1, 2, 2, 2, 2, 2, //
    1, 1, 1, 1, 1, 2, 2, 2, 2, 2, //
    1, 1, 1, 1, 1, 2, 2, 2, 2, 2, //
    1, 1, 1, 0, 0, 0, 0, 2, 2, 2, //
    1, 1, 1, 0, 0, 0, 0, 2, 2, 2, //
    2, 2, 2, 0, 0, 0, 0, 1, 1, 1, //
    2, 2, 2, 0, 0, 0, 0, 1, 1, 1, //
    2, 2, 2, 2, 2, 1, 1, 1, 1, 1, //
    2, 2, 2, 2, 2, 1, 1, 1, 1, 1, //
    2, 2, 2, 2, 2, 1, 1, 1, 1, 1, //
];

/// Pass-through "decompressor" for uncompressed test data
#[derive(Debug, Default)]
pub struct Raw;

impl Decompress for Raw {
    fn decompress(
        &mut self,
        _min_code_size: u8,
        data: &[u8],
        sink: &mut dyn FnMut(&[u8]),
    ) -> Result<()> {
        sink(data);
        Ok(())
    }
}

/// GIF89a stream builder
pub struct GifBuilder {
    buf: Vec<u8>,
}

/// Color table size bits for a table length
fn table_bits(len: usize) -> u8 {
    assert!(len >= 2 && len <= 256 && len.is_power_of_two());
    (len.trailing_zeros() - 1) as u8
}

impl GifBuilder {
    /// Start a stream without a global color table
    pub fn new(width: u16, height: u16) -> Self {
        let mut buf = b"GIF89a".to_vec();
        buf.extend_from_slice(&width.to_le_bytes());
        buf.extend_from_slice(&height.to_le_bytes());
        buf.extend_from_slice(&[0x00, 0x00, 0x00]);
        GifBuilder { buf }
    }

    /// Start a stream with a global color table
    pub fn with_colors(
        width: u16,
        height: u16,
        bg: u8,
        colors: &[[u8; 3]],
    ) -> Self {
        let mut buf = b"GIF89a".to_vec();
        buf.extend_from_slice(&width.to_le_bytes());
        buf.extend_from_slice(&height.to_le_bytes());
        buf.push(0x80 | table_bits(colors.len()));
        buf.push(bg);
        buf.push(0x00);
        for c in colors {
            buf.extend_from_slice(c);
        }
        GifBuilder { buf }
    }

    /// Append raw bytes
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Append data as sub-blocks, with terminator
    fn sub_blocks(mut self, data: &[u8]) -> Self {
        for chunk in data.chunks(255) {
            self.buf.push(chunk.len() as u8);
            self.buf.extend_from_slice(chunk);
        }
        self.buf.push(0);
        self
    }

    /// Append a NETSCAPE2.0 looping extension
    pub fn loop_count(self, count: u16) -> Self {
        let c = count.to_le_bytes();
        self.raw(&[0x21, 0xFF, 0x0B])
            .raw(b"NETSCAPE2.0")
            .raw(&[0x03, 0x01, c[0], c[1], 0x00])
    }

    /// Append a comment extension
    pub fn comment(self, text: &[u8]) -> Self {
        self.raw(&[0x21, 0xFE]).sub_blocks(text)
    }

    /// Append a graphic control extension
    pub fn graphic_control(self, flags: u8, delay: u16, transparent: u8) -> Self {
        let d = delay.to_le_bytes();
        self.raw(&[0x21, 0xF9, 0x04, flags, d[0], d[1], transparent, 0x00])
    }

    fn image_desc(self, left: u16, top: u16, width: u16, height: u16, flags: u8) -> Self {
        let mut b = vec![0x2C];
        b.extend_from_slice(&left.to_le_bytes());
        b.extend_from_slice(&top.to_le_bytes());
        b.extend_from_slice(&width.to_le_bytes());
        b.extend_from_slice(&height.to_le_bytes());
        b.push(flags);
        self.raw(&b)
    }

    /// Append an image with uncompressed pixels
    pub fn image(self, left: u16, top: u16, width: u16, height: u16, pixels: &[u8]) -> Self {
        self.image_desc(left, top, width, height, 0x00)
            .raw(&[0x08])
            .sub_blocks(pixels)
    }

    /// Append an image with a local color table
    pub fn local_image(
        self,
        left: u16,
        top: u16,
        width: u16,
        height: u16,
        colors: &[[u8; 3]],
        pixels: &[u8],
    ) -> Self {
        let flags = 0x80 | table_bits(colors.len());
        let mut s = self.image_desc(left, top, width, height, flags);
        for c in colors {
            s = s.raw(c);
        }
        s.raw(&[0x08]).sub_blocks(pixels)
    }

    /// Append the trailer and finish
    pub fn trailer(self) -> Vec<u8> {
        self.raw(&[0x3B]).buf
    }
}
