// block.rs
//
// Copyright (c) 2019-2026  Douglas Lau
//
//! GIF block structures, as decoded from a stream

/// Number of bytes in an RGB color table entry
pub(crate) const CHANNELS: usize = 3;

/// Disposal method from a graphic control extension
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DisposalMethod {
    /// No disposal specified
    NoAction,
    /// Leave frame in place
    Keep,
    /// Fill the surface with the background color
    Background,
    /// Restore previous contents (unsupported; treated as `NoAction`)
    Previous,
    /// Reserved value
    Reserved(u8),
}

impl Default for DisposalMethod {
    fn default() -> Self {
        DisposalMethod::NoAction
    }
}

impl From<u8> for DisposalMethod {
    fn from(n: u8) -> Self {
        use self::DisposalMethod::*;
        match n & 0b0111 {
            0 => NoAction,
            1 => Keep,
            2 => Background,
            3 => Previous,
            _ => Reserved(n & 0b0111),
        }
    }
}

impl From<DisposalMethod> for u8 {
    fn from(d: DisposalMethod) -> Self {
        use self::DisposalMethod::*;
        match d {
            NoAction => 0,
            Keep => 1,
            Background => 2,
            Previous => 3,
            Reserved(n) => n & 0b0111,
        }
    }
}

/// Top-level block codes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum BlockCode {
    Extension_,
    ImageDesc_,
    Trailer_,
}

impl BlockCode {
    pub fn from_u8(t: u8) -> Option<Self> {
        use self::BlockCode::*;
        match t {
            b',' => Some(ImageDesc_), // (0x2C) Image separator
            b'!' => Some(Extension_), // (0x21) Extension introducer
            b';' => Some(Trailer_),   // (0x3B) GIF trailer
            _ => None,
        }
    }
}

/// Extension labels
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ExtensionCode {
    PlainText_,
    GraphicControl_,
    Comment_,
    Application_,
    Unknown_(u8),
}

impl From<u8> for ExtensionCode {
    fn from(n: u8) -> Self {
        use self::ExtensionCode::*;
        match n {
            0x01 => PlainText_,
            0xF9 => GraphicControl_,
            0xFE => Comment_,
            0xFF => Application_,
            _ => Unknown_(n),
        }
    }
}

/// GIF header (signature and version)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    version: [u8; 3],
}

impl Header {
    pub fn with_version(version: [u8; 3]) -> Self {
        Header { version }
    }
    pub fn version(&self) -> [u8; 3] {
        self.version
    }
}

/// Logical screen descriptor
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LogicalScreenDesc {
    screen_width: u16,
    screen_height: u16,
    flags: u8,
    background_color_idx: u8, // index into global color table
    pixel_aspect_ratio: u8,
}

impl LogicalScreenDesc {
    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const COLOR_RESOLUTION: u8 = 0b0111_0000;
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    pub fn with_screen_width(mut self, screen_width: u16) -> Self {
        self.screen_width = screen_width;
        self
    }
    pub fn screen_width(&self) -> u16 {
        self.screen_width
    }
    pub fn with_screen_height(mut self, screen_height: u16) -> Self {
        self.screen_height = screen_height;
        self
    }
    pub fn screen_height(&self) -> u16 {
        self.screen_height
    }
    pub fn with_flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }
    pub fn flags(&self) -> u8 {
        self.flags
    }
    /// Color bit depth
    pub fn color_resolution(&self) -> u8 {
        ((self.flags & Self::COLOR_RESOLUTION) >> 4) + 1
    }
    /// Number of global color table entries, if present
    pub fn color_table_len(&self) -> Option<usize> {
        if self.flags & Self::COLOR_TABLE_PRESENT != 0 {
            Some(2 << (self.flags & Self::COLOR_TABLE_SIZE) as usize)
        } else {
            None
        }
    }
    pub fn with_background_color_idx(
        mut self,
        background_color_idx: u8,
    ) -> Self {
        self.background_color_idx = background_color_idx;
        self
    }
    pub fn background_color_idx(&self) -> u8 {
        self.background_color_idx
    }
    pub fn with_pixel_aspect_ratio(mut self, pixel_aspect_ratio: u8) -> Self {
        self.pixel_aspect_ratio = pixel_aspect_ratio;
        self
    }
    pub fn pixel_aspect_ratio(&self) -> u8 {
        self.pixel_aspect_ratio
    }
}

/// Color table, packed for a 16-bit hardware palette.
///
/// Each entry holds 5 bits per channel (red in bits 0-4, green in 5-9, blue
/// in 10-14) with bit 15 set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<u16>,
}

impl ColorTable {
    /// Opaque marker bit
    pub const OPAQUE: u16 = 1 << 15;

    /// Pack one 24-bit color
    pub fn pack(red: u8, green: u8, blue: u8) -> u16 {
        (red >> 3) as u16
            | ((green >> 3) as u16) << 5
            | ((blue >> 3) as u16) << 10
            | Self::OPAQUE
    }
    /// Build a table from RGB triples
    pub fn with_rgb(colors: &[u8]) -> Self {
        assert_eq!(colors.len() / CHANNELS * CHANNELS, colors.len());
        let entries = colors
            .chunks_exact(CHANNELS)
            .map(|c| Self::pack(c[0], c[1], c[2]))
            .collect();
        ColorTable { entries }
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn entries(&self) -> &[u16] {
        &self.entries
    }
}

/// Graphic control extension
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GraphicControl {
    flags: u8,
    delay_time_cs: u16, // delay in centiseconds (hundredths of a second)
    transparent_color_idx: u8,
}

impl GraphicControl {
    const DISPOSAL_METHOD: u8 = 0b0001_1100;
    const USER_INPUT: u8 = 0b0000_0010;
    const TRANSPARENT_COLOR: u8 = 0b0000_0001;

    pub fn set_flags(&mut self, flags: u8) {
        self.flags = flags;
    }
    pub fn flags(&self) -> u8 {
        self.flags
    }
    pub fn disposal_method(&self) -> DisposalMethod {
        ((self.flags & Self::DISPOSAL_METHOD) >> 2).into()
    }
    pub fn set_disposal_method(&mut self, disposal_method: DisposalMethod) {
        let d: u8 = disposal_method.into();
        self.flags = (self.flags & !Self::DISPOSAL_METHOD) | (d << 2);
    }
    pub fn user_input(&self) -> bool {
        (self.flags & Self::USER_INPUT) != 0
    }
    pub fn set_user_input(&mut self, user_input: bool) {
        let u = (user_input as u8) << 1;
        self.flags = (self.flags & !Self::USER_INPUT) | u;
    }
    pub fn delay_time_cs(&self) -> u16 {
        self.delay_time_cs
    }
    pub fn set_delay_time_cs(&mut self, delay_time_cs: u16) {
        self.delay_time_cs = delay_time_cs;
    }
    pub fn transparent_color(&self) -> Option<u8> {
        if self.flags & Self::TRANSPARENT_COLOR != 0 {
            Some(self.transparent_color_idx)
        } else {
            None
        }
    }
    pub fn transparent_color_idx(&self) -> u8 {
        self.transparent_color_idx
    }
    pub fn set_transparent_color_idx(&mut self, transparent_color_idx: u8) {
        self.transparent_color_idx = transparent_color_idx;
    }
    pub fn set_transparent_color(&mut self, transparent_color: Option<u8>) {
        match transparent_color {
            Some(t) => {
                self.flags |= Self::TRANSPARENT_COLOR;
                self.transparent_color_idx = t;
            }
            None => {
                self.flags &= !Self::TRANSPARENT_COLOR;
                self.transparent_color_idx = 0;
            }
        }
    }
}

/// Image descriptor
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImageDesc {
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    flags: u8,
}

impl ImageDesc {
    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const INTERLACED: u8 = 0b0100_0000;
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    pub fn with_left(mut self, left: u16) -> Self {
        self.left = left;
        self
    }
    pub fn left(&self) -> u16 {
        self.left
    }
    pub fn with_top(mut self, top: u16) -> Self {
        self.top = top;
        self
    }
    pub fn top(&self) -> u16 {
        self.top
    }
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }
    pub fn width(&self) -> u16 {
        self.width
    }
    pub fn with_height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }
    pub fn height(&self) -> u16 {
        self.height
    }
    pub fn with_flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }
    pub fn flags(&self) -> u8 {
        self.flags
    }
    pub fn interlaced(&self) -> bool {
        (self.flags & Self::INTERLACED) != 0
    }
    /// Number of local color table entries, if present
    pub fn color_table_len(&self) -> Option<usize> {
        if self.flags & Self::COLOR_TABLE_PRESENT != 0 {
            Some(2 << (self.flags & Self::COLOR_TABLE_SIZE) as usize)
        } else {
            None
        }
    }
    pub fn image_sz(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Compressed image data
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImageData {
    min_code_size: u8,
    data: Vec<u8>,
}

impl ImageData {
    pub fn new(min_code_size: u8) -> Self {
        ImageData {
            min_code_size,
            data: Vec::new(),
        }
    }
    pub fn add_data(&mut self, data: &[u8]) {
        self.data.extend_from_slice(data);
    }
    pub fn min_code_size(&self) -> u8 {
        self.min_code_size
    }
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// One frame of an animation: an image descriptor plus the blocks which
/// belong to it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Frame {
    pub graphic_control_ext: Option<GraphicControl>,
    pub image_desc: ImageDesc,
    pub local_color_table: Option<ColorTable>,
    pub image_data: ImageData,
}

impl Frame {
    /// Get the disposal method (`NoAction` without a graphic control)
    pub fn disposal_method(&self) -> DisposalMethod {
        self.graphic_control_ext
            .as_ref()
            .map(|gc| gc.disposal_method())
            .unwrap_or_default()
    }
    /// Get the transparent color index, if any
    pub fn transparent_color(&self) -> Option<u8> {
        self.graphic_control_ext
            .as_ref()
            .and_then(|gc| gc.transparent_color())
    }
}
