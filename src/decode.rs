// decode.rs
//
// Copyright (c) 2019-2026  Douglas Lau
//
use crate::block::*;
use crate::error::{Error, Result};
use std::io::Read;

/// Maximum LZW minimum code size
const MAX_CODE_SIZE: u8 = 11;

/// Length of the header block (signature + version)
const HEADER_LEN: usize = 6;

/// Length of an application identifier + authentication code
const APP_ID_LEN: usize = 11;

/// A decoded GIF stream: screen information plus all frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gif {
    pub header: Header,
    pub logical_screen_desc: LogicalScreenDesc,
    pub global_color_table: Option<ColorTable>,
    /// Loop count from a looping application extension (zero means loop
    /// forever).  `None` when no such extension exists.
    pub loop_count: Option<u16>,
    /// Comment extension text
    pub comments: Vec<Vec<u8>>,
    pub frames: Vec<Frame>,
}

impl Gif {
    /// Check whether the animation loops forever
    pub fn loops_forever(&self) -> bool {
        self.loop_count == Some(0)
    }
}

/// GIF stream decoder.
///
/// The whole stream is read into memory, then parsed into a
/// [Gif](struct.Gif.html).
///
/// ## Example
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let gif = &[
/// #   0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00,
/// #   0x02, 0x00, 0x80, 0x01, 0x00, 0x00, 0x00, 0x00,
/// #   0xff, 0xff, 0xff, 0x2c, 0x00, 0x00, 0x00, 0x00,
/// #   0x02, 0x00, 0x02, 0x00, 0x00, 0x02, 0x03, 0x0c,
/// #   0x10, 0x05, 0x00, 0x3b,
/// # ][..];
/// let gif = gifsplash::Decoder::new(gif).decode()?;
/// assert_eq!(gif.frames.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct Decoder<R: Read> {
    /// Reader for input data
    reader: R,
    /// Maximum image size, in pixels
    max_image_sz: Option<usize>,
}

impl<R: Read> Decoder<R> {
    /// Create a new decoder
    pub fn new(reader: R) -> Self {
        Decoder {
            reader,
            max_image_sz: Some(1 << 25),
        }
    }

    /// Set the maximum image size (in pixels) to allow for decoding.
    pub fn max_image_sz(mut self, max_image_sz: Option<usize>) -> Self {
        self.max_image_sz = max_image_sz;
        self
    }

    /// Read and decode the entire stream
    pub fn decode(mut self) -> Result<Gif> {
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf)?;
        Parser::new(&buf, self.max_image_sz).parse()
    }
}

/// Bounds-checked cursor over stream bytes
struct Bytes<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Bytes<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Bytes { buf, pos: 0 }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Take a slice of `n` bytes
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n <= self.remaining() {
            let b = &self.buf[self.pos..self.pos + n];
            self.pos += n;
            Ok(b)
        } else {
            self.pos = self.buf.len();
            Err(Error::UnexpectedEndOfFile)
        }
    }

    fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn take_u16_le(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    /// Take one data sub-block, or `None` at the block terminator
    fn sub_block(&mut self) -> Result<Option<&'a [u8]>> {
        let sz = self.take_u8()? as usize;
        if sz > 0 {
            Ok(Some(self.take(sz)?))
        } else {
            Ok(None)
        }
    }

    /// Skip sub-blocks through the block terminator
    fn skip_sub_blocks(&mut self) -> Result<()> {
        while self.sub_block()?.is_some() {}
        Ok(())
    }
}

/// Stream parser
struct Parser<'a> {
    bytes: Bytes<'a>,
    max_image_sz: Option<usize>,
    /// Graphic control waiting for its image descriptor
    graphic_control_ext: Option<GraphicControl>,
}

impl<'a> Parser<'a> {
    fn new(buf: &'a [u8], max_image_sz: Option<usize>) -> Self {
        Parser {
            bytes: Bytes::new(buf),
            max_image_sz,
            graphic_control_ext: None,
        }
    }

    /// Parse the whole stream
    fn parse(mut self) -> Result<Gif> {
        let header = self.header()?;
        let logical_screen_desc = self.logical_screen_desc()?;
        let global_color_table = match logical_screen_desc.color_table_len() {
            Some(len) => Some(self.color_table(len)?),
            None => None,
        };
        let mut gif = Gif {
            header,
            logical_screen_desc,
            global_color_table,
            loop_count: None,
            comments: vec![],
            frames: vec![],
        };
        loop {
            let pos = self.bytes.position();
            let code = self.bytes.take_u8()?;
            match BlockCode::from_u8(code) {
                Some(BlockCode::Extension_) => self.extension(&mut gif)?,
                Some(BlockCode::ImageDesc_) => {
                    let frame = self.frame()?;
                    debug!("  frame  : {} @ {}", gif.frames.len(), pos);
                    gif.frames.push(frame);
                }
                Some(BlockCode::Trailer_) => break,
                _ => {
                    debug!("invalid block code {:#04x} @ {}", code, pos);
                    return Err(Error::InvalidBlockCode);
                }
            }
        }
        if self.graphic_control_ext.take().is_some() {
            debug!("graphic control without image discarded");
        }
        Ok(gif)
    }

    /// Parse the header block
    fn header(&mut self) -> Result<Header> {
        let buf = self
            .bytes
            .take(HEADER_LEN)
            .map_err(|_| Error::MalformedHeader)?;
        if &buf[..3] == b"GIF" {
            let version = [buf[3], buf[4], buf[5]];
            match &version {
                b"87a" | b"89a" => Ok(Header::with_version(version)),
                _ => Err(Error::UnsupportedVersion(version)),
            }
        } else {
            Err(Error::MalformedHeader)
        }
    }

    /// Parse the logical screen descriptor
    fn logical_screen_desc(&mut self) -> Result<LogicalScreenDesc> {
        let width = self.bytes.take_u16_le()?;
        let height = self.bytes.take_u16_le()?;
        let flags = self.bytes.take_u8()?;
        let bg_color = self.bytes.take_u8()?;
        let aspect = self.bytes.take_u8()?;
        debug!("  screen : {}x{} flags {:#04x}", width, height, flags);
        Ok(LogicalScreenDesc::default()
            .with_screen_width(width)
            .with_screen_height(height)
            .with_flags(flags)
            .with_background_color_idx(bg_color)
            .with_pixel_aspect_ratio(aspect))
    }

    /// Parse a color table with `len` entries
    fn color_table(&mut self, len: usize) -> Result<ColorTable> {
        let buf = self.bytes.take(len * CHANNELS)?;
        Ok(ColorTable::with_rgb(buf))
    }

    /// Parse an extension block (after the introducer)
    fn extension(&mut self, gif: &mut Gif) -> Result<()> {
        use crate::block::ExtensionCode::*;
        let et: ExtensionCode = self.bytes.take_u8()?.into();
        debug!("  block  : {:?}", et);
        match et {
            GraphicControl_ => {
                let gc = self.graphic_control()?;
                if self.graphic_control_ext.replace(gc).is_some() {
                    debug!("graphic control replaced before image");
                }
                Ok(())
            }
            PlainText_ => {
                // text grid header, then text sub-blocks
                let sz = self.bytes.take_u8()? as usize;
                self.bytes.skip(sz)?;
                self.bytes.skip_sub_blocks()
            }
            Application_ => self.application(gif),
            Comment_ => {
                let mut comment = vec![];
                while let Some(b) = self.bytes.sub_block()? {
                    comment.extend_from_slice(b);
                }
                gif.comments.push(comment);
                Ok(())
            }
            Unknown_(n) => {
                debug!("unknown extension {:#04x} skipped", n);
                self.bytes.skip_sub_blocks()
            }
        }
    }

    /// Parse a graphic control extension
    fn graphic_control(&mut self) -> Result<GraphicControl> {
        if self.bytes.take_u8()? != 4 {
            return Err(Error::MalformedGraphicControlExtension);
        }
        let mut gc = GraphicControl::default();
        gc.set_flags(self.bytes.take_u8()?);
        gc.set_delay_time_cs(self.bytes.take_u16_le()?);
        gc.set_transparent_color_idx(self.bytes.take_u8()?);
        self.bytes.skip_sub_blocks()?;
        match gc.disposal_method() {
            DisposalMethod::Previous | DisposalMethod::Reserved(_) => {
                warn!(
                    "disposal method {:?} unsupported, ignored",
                    gc.disposal_method()
                );
            }
            _ => {}
        }
        Ok(gc)
    }

    /// Check for a looping application identifier
    fn is_looping(app_id: &[u8]) -> bool {
        app_id == b"NETSCAPE2.0" || app_id == b"ANIMEXTS1.0"
    }

    /// Parse an application extension.
    ///
    /// Anything other than a looping extension is skipped the same way as a
    /// comment.
    fn application(&mut self, gif: &mut Gif) -> Result<()> {
        let sz = self.bytes.take_u8()? as usize;
        if sz == APP_ID_LEN {
            let app_id = self.bytes.take(APP_ID_LEN)?;
            if Self::is_looping(app_id) {
                if let Some(b) = self.bytes.sub_block()? {
                    // sub-block ID 1: loop count
                    if b.len() == 3 && b[0] == 1 {
                        let c = u16::from_le_bytes([b[1], b[2]]);
                        debug!("  loop   : {}", c);
                        gif.loop_count = Some(c);
                    }
                    self.bytes.skip_sub_blocks()?;
                }
                return Ok(());
            }
            debug!(
                "application {:?} skipped",
                String::from_utf8_lossy(app_id)
            );
        } else {
            self.bytes.skip(sz)?;
        }
        self.bytes.skip_sub_blocks()
    }

    /// Parse an image descriptor and the blocks following it
    fn frame(&mut self) -> Result<Frame> {
        let image_desc = self.image_desc()?;
        if let Some(sz) = self.max_image_sz {
            if image_desc.image_sz() > sz {
                return Err(Error::TooLargeImage);
            }
        }
        if image_desc.interlaced() {
            warn!("interlaced frame drawn without row reordering");
        }
        let local_color_table = match image_desc.color_table_len() {
            Some(len) => Some(self.color_table(len)?),
            None => None,
        };
        let min_code_size = self.bytes.take_u8()?;
        if min_code_size > MAX_CODE_SIZE {
            return Err(Error::InvalidCodeSize);
        }
        let mut image_data = ImageData::new(min_code_size);
        while let Some(b) = self.bytes.sub_block()? {
            image_data.add_data(b);
        }
        Ok(Frame {
            graphic_control_ext: self.graphic_control_ext.take(),
            image_desc,
            local_color_table,
            image_data,
        })
    }

    /// Parse an image descriptor (after the separator)
    fn image_desc(&mut self) -> Result<ImageDesc> {
        let left = self.bytes.take_u16_le()?;
        let top = self.bytes.take_u16_le()?;
        let width = self.bytes.take_u16_le()?;
        let height = self.bytes.take_u16_le()?;
        let flags = self.bytes.take_u8()?;
        Ok(ImageDesc::default()
            .with_left(left)
            .with_top(top)
            .with_width(width)
            .with_height(height)
            .with_flags(flags))
    }
}
