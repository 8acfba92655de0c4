// surface.rs
//
// Copyright (c) 2026  Douglas Lau
//
//! Target surfaces: palette and raster memory for each screen

/// Surface width, in pixels (also the raster stride)
pub const SCREEN_WIDTH: usize = 256;

/// Surface height, in pixels
pub const SCREEN_HEIGHT: usize = 192;

/// Number of palette entries per screen
pub const PALETTE_LEN: usize = 256;

/// Screen selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Top screen
    Top,
    /// Bottom screen
    Bottom,
}

impl Screen {
    /// Path of the splash image for this screen
    pub fn path(self) -> &'static str {
        match self {
            Screen::Top => "sd:/hiya/splashtop.gif",
            Screen::Bottom => "sd:/hiya/splashbottom.gif",
        }
    }
}

/// Palette and raster memory for both screens.
///
/// Rasters hold one color index per pixel, `SCREEN_WIDTH` bytes per row.
/// Palette entries are packed 16-bit colors (see
/// [ColorTable](block/struct.ColorTable.html)).
pub trait Display {
    /// Get palette memory for a screen
    fn palette_mut(&mut self, screen: Screen) -> &mut [u16];

    /// Get raster memory for a screen
    fn raster_mut(&mut self, screen: Screen) -> &mut [u8];
}

/// Palette and raster for one screen
#[derive(Clone, Debug)]
struct Surface {
    palette: Vec<u16>,
    raster: Vec<u8>,
}

impl Default for Surface {
    fn default() -> Self {
        Surface {
            palette: vec![0; PALETTE_LEN],
            raster: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }
}

/// In-memory [Display](trait.Display.html)
#[derive(Clone, Debug, Default)]
pub struct Screens {
    top: Surface,
    bottom: Surface,
}

impl Screens {
    /// Create cleared screens
    pub fn new() -> Self {
        Self::default()
    }

    fn surface(&self, screen: Screen) -> &Surface {
        match screen {
            Screen::Top => &self.top,
            Screen::Bottom => &self.bottom,
        }
    }

    fn surface_mut(&mut self, screen: Screen) -> &mut Surface {
        match screen {
            Screen::Top => &mut self.top,
            Screen::Bottom => &mut self.bottom,
        }
    }

    /// Get the palette of a screen
    pub fn palette(&self, screen: Screen) -> &[u16] {
        &self.surface(screen).palette
    }

    /// Get the raster of a screen
    pub fn raster(&self, screen: Screen) -> &[u8] {
        &self.surface(screen).raster
    }

    /// Get one pixel (color index) of a screen
    pub fn pixel(&self, screen: Screen, x: usize, y: usize) -> u8 {
        assert!(x < SCREEN_WIDTH && y < SCREEN_HEIGHT);
        self.raster(screen)[y * SCREEN_WIDTH + x]
    }
}

impl Display for Screens {
    fn palette_mut(&mut self, screen: Screen) -> &mut [u16] {
        &mut self.surface_mut(screen).palette
    }

    fn raster_mut(&mut self, screen: Screen) -> &mut [u8] {
        &mut self.surface_mut(screen).raster
    }
}
