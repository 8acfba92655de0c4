// compose.rs
//
// Copyright (c) 2026  Douglas Lau
//
//! Frame compositor
use crate::block::{DisposalMethod, Frame, ImageDesc, LogicalScreenDesc};
use crate::decode::Gif;
use crate::decompress::Decompress;
use crate::surface::{Display, Screen, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Get the surface position of a frame's top-left pixel.
///
/// A logical screen smaller than the surface is centered on it.
pub fn origin(screen_desc: &LogicalScreenDesc, image_desc: &ImageDesc) -> (i32, i32) {
    let cx = (SCREEN_WIDTH as i32 - i32::from(screen_desc.screen_width())) / 2;
    let cy = (SCREEN_HEIGHT as i32 - i32::from(screen_desc.screen_height())) / 2;
    (
        i32::from(image_desc.left()) + cx,
        i32::from(image_desc.top()) + cy,
    )
}

/// Pixel sink writing one frame into a raster
struct Blit<'a> {
    raster: &'a mut [u8],
    /// Surface column of frame's left edge
    left: i32,
    /// Surface row being written
    row: i32,
    /// Frame column being written
    col: u16,
    width: u16,
    /// Frame rows not yet complete
    rows_left: u16,
    transparent: Option<u8>,
}

impl<'a> Blit<'a> {
    /// Write a run of decoded pixels
    fn write(&mut self, pixels: &[u8]) {
        for &px in pixels {
            if self.rows_left == 0 {
                return;
            }
            if self.transparent != Some(px) {
                self.put(self.left + i32::from(self.col), px);
            }
            self.col += 1;
            if self.col >= self.width {
                self.col = 0;
                self.row += 1;
                self.rows_left -= 1;
            }
        }
    }

    /// Put one pixel on the current row, if it lies on the surface
    fn put(&mut self, x: i32, px: u8) {
        let y = self.row;
        if x >= 0 && (x as usize) < SCREEN_WIDTH && y >= 0 {
            let i = y as usize * SCREEN_WIDTH + x as usize;
            if let Some(dst) = self.raster.get_mut(i) {
                *dst = px;
            }
        }
    }
}

/// Render one frame of `gif` onto a screen.
///
/// The frame's color table (local, or else global) is loaded into the
/// palette, then the decompressed pixels are drawn at the frame's
/// [origin](fn.origin.html).  Pixels matching the transparent color are
/// skipped.  With `Background` disposal, the whole raster is first filled
/// with the background color.
pub fn render<D, Z>(
    gif: &Gif,
    frame: &Frame,
    screen: Screen,
    display: &mut D,
    decompressor: &mut Z,
) where
    D: Display + ?Sized,
    Z: Decompress + ?Sized,
{
    let table = frame
        .local_color_table
        .as_ref()
        .or_else(|| gif.global_color_table.as_ref());
    if let Some(table) = table {
        let palette = display.palette_mut(screen);
        let n = table.len().min(palette.len());
        palette[..n].copy_from_slice(&table.entries()[..n]);
    }
    let raster = display.raster_mut(screen);
    if frame.disposal_method() == DisposalMethod::Background {
        let bg = gif.logical_screen_desc.background_color_idx();
        for px in raster.iter_mut() {
            *px = bg;
        }
    }
    let desc = &frame.image_desc;
    if desc.width() == 0 || desc.height() == 0 {
        return;
    }
    let (left, top) = origin(&gif.logical_screen_desc, desc);
    debug!(
        "render {}x{} @ {},{} on {:?}",
        desc.width(),
        desc.height(),
        left,
        top,
        screen
    );
    let mut blit = Blit {
        raster,
        left,
        row: top,
        col: 0,
        width: desc.width(),
        rows_left: desc.height(),
        transparent: frame.transparent_color(),
    };
    let data = &frame.image_data;
    if let Err(e) = decompressor.decompress(
        data.min_code_size(),
        data.data(),
        &mut |px| blit.write(px),
    ) {
        warn!("frame data: {}", e);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::decode::Decoder;
    use crate::decompress::Lzw;
    use crate::surface::Screens;
    use crate::test_gif::{GifBuilder, Raw, SIMPLE_1, SIMPLE_1_IMAGE};
    use std::error::Error;

    const COLORS: [[u8; 3]; 4] =
        [[0, 0, 0], [255, 0, 0], [0, 255, 0], [0, 0, 255]];

    fn render_all(buf: &[u8], display: &mut Screens) -> Result<(), Box<dyn Error>> {
        let gif = Decoder::new(buf).decode()?;
        for frame in &gif.frames {
            render(&gif, frame, Screen::Top, display, &mut Raw);
        }
        Ok(())
    }

    #[test]
    fn centered_origin() {
        let sd = LogicalScreenDesc::default()
            .with_screen_width(100)
            .with_screen_height(50);
        let id = ImageDesc::default().with_left(3).with_top(4);
        assert_eq!(origin(&sd, &id), (78 + 3, 71 + 4));
        let sd = LogicalScreenDesc::default()
            .with_screen_width(256)
            .with_screen_height(192);
        assert_eq!(origin(&sd, &id), (3, 4));
        let sd = LogicalScreenDesc::default()
            .with_screen_width(261)
            .with_screen_height(192);
        assert_eq!(origin(&sd, &ImageDesc::default()), (-2, 0));
    }

    #[test]
    fn simple_1_lzw() -> Result<(), Box<dyn Error>> {
        let gif = Decoder::new(&SIMPLE_1[..]).decode()?;
        let mut s = Screens::new();
        render(&gif, &gif.frames[0], Screen::Bottom, &mut s, &mut Lzw);
        let (x0, y0) = (123, 91);
        for y in 0..10 {
            for x in 0..10 {
                let px = s.pixel(Screen::Bottom, x0 + x, y0 + y);
                assert_eq!(px, SIMPLE_1_IMAGE[y * 10 + x]);
            }
        }
        assert_eq!(&s.palette(Screen::Bottom)[..4], &[0xFFFF, 0x801F, 0xFC00, 0x8000]);
        assert_eq!(s.pixel(Screen::Bottom, x0 - 1, y0), 0);
        assert!(s.raster(Screen::Top).iter().all(|px| *px == 0));
        Ok(())
    }

    #[test]
    fn local_table_overrides_global() -> Result<(), Box<dyn Error>> {
        let buf = GifBuilder::with_colors(256, 192, 0, &COLORS)
            .local_image(0, 0, 1, 1, &[[255, 255, 255], [0, 0, 0]], &[1])
            .trailer();
        let mut s = Screens::new();
        render_all(&buf, &mut s)?;
        assert_eq!(&s.palette(Screen::Top)[..3], &[0xFFFF, 0x8000, 0]);
        let buf = GifBuilder::with_colors(256, 192, 0, &COLORS)
            .image(0, 0, 1, 1, &[1])
            .trailer();
        render_all(&buf, &mut s)?;
        assert_eq!(&s.palette(Screen::Top)[..4], &[0x8000, 0x801F, 0x83E0, 0xFC00]);
        Ok(())
    }

    #[test]
    fn row_wrap() -> Result<(), Box<dyn Error>> {
        let buf = GifBuilder::with_colors(256, 192, 0, &COLORS)
            .image(10, 20, 3, 2, &[1, 2, 3, 3, 2, 1])
            .trailer();
        let mut s = Screens::new();
        render_all(&buf, &mut s)?;
        assert_eq!(s.pixel(Screen::Top, 10, 20), 1);
        assert_eq!(s.pixel(Screen::Top, 11, 20), 2);
        assert_eq!(s.pixel(Screen::Top, 12, 20), 3);
        assert_eq!(s.pixel(Screen::Top, 13, 20), 0);
        assert_eq!(s.pixel(Screen::Top, 10, 21), 3);
        assert_eq!(s.pixel(Screen::Top, 12, 21), 1);
        let total: usize = s.raster(Screen::Top).iter().map(|p| *p as usize).sum();
        assert_eq!(total, 12);
        Ok(())
    }

    #[test]
    fn transparency() -> Result<(), Box<dyn Error>> {
        let buf = GifBuilder::with_colors(256, 192, 0, &COLORS)
            .image(0, 0, 2, 2, &[1, 1, 1, 1])
            .graphic_control(0x01, 10, 2)
            .image(0, 0, 2, 2, &[2, 3, 3, 2])
            .trailer();
        let mut s = Screens::new();
        render_all(&buf, &mut s)?;
        assert_eq!(s.pixel(Screen::Top, 0, 0), 1);
        assert_eq!(s.pixel(Screen::Top, 1, 0), 3);
        assert_eq!(s.pixel(Screen::Top, 0, 1), 3);
        assert_eq!(s.pixel(Screen::Top, 1, 1), 1);
        Ok(())
    }

    #[test]
    fn transparent_index_without_flag() -> Result<(), Box<dyn Error>> {
        let buf = GifBuilder::with_colors(256, 192, 0, &COLORS)
            .image(0, 0, 1, 1, &[1])
            .graphic_control(0x00, 10, 2)
            .image(0, 0, 1, 1, &[2])
            .trailer();
        let mut s = Screens::new();
        render_all(&buf, &mut s)?;
        assert_eq!(s.pixel(Screen::Top, 0, 0), 2);
        Ok(())
    }

    #[test]
    fn disposal_background() -> Result<(), Box<dyn Error>> {
        let buf = GifBuilder::with_colors(256, 192, 3, &COLORS)
            .image(0, 0, 2, 1, &[1, 1])
            .graphic_control(0b0000_1000, 10, 0)
            .image(100, 100, 1, 1, &[2])
            .trailer();
        let mut s = Screens::new();
        render_all(&buf, &mut s)?;
        assert_eq!(s.pixel(Screen::Top, 0, 0), 3);
        assert_eq!(s.pixel(Screen::Top, 1, 0), 3);
        assert_eq!(s.pixel(Screen::Top, 100, 100), 2);
        let threes = s.raster(Screen::Top).iter().filter(|p| **p == 3).count();
        assert_eq!(threes, SCREEN_WIDTH * SCREEN_HEIGHT - 1);
        Ok(())
    }

    #[test]
    fn disposal_keep() -> Result<(), Box<dyn Error>> {
        for flags in &[0b0000_0000, 0b0000_0100] {
            let buf = GifBuilder::with_colors(256, 192, 3, &COLORS)
                .image(0, 0, 2, 1, &[1, 1])
                .graphic_control(*flags, 10, 0)
                .image(100, 100, 1, 1, &[2])
                .trailer();
            let mut s = Screens::new();
            render_all(&buf, &mut s)?;
            assert_eq!(s.pixel(Screen::Top, 0, 0), 1);
            assert_eq!(s.pixel(Screen::Top, 1, 0), 1);
            assert_eq!(s.pixel(Screen::Top, 100, 100), 2);
            assert_eq!(s.pixel(Screen::Top, 2, 0), 0);
        }
        Ok(())
    }

    #[test]
    fn clipped() -> Result<(), Box<dyn Error>> {
        // frame hangs off the right and bottom edges
        let buf = GifBuilder::with_colors(256, 192, 0, &COLORS)
            .image(255, 191, 2, 2, &[1, 2, 3, 1])
            .trailer();
        let mut s = Screens::new();
        render_all(&buf, &mut s)?;
        assert_eq!(s.pixel(Screen::Top, 255, 191), 1);
        let total: usize = s.raster(Screen::Top).iter().map(|p| *p as usize).sum();
        assert_eq!(total, 1);
        // logical screen larger than the surface
        let buf = GifBuilder::with_colors(260, 200, 0, &COLORS)
            .image(0, 0, 3, 5, &[1; 15])
            .trailer();
        let mut s = Screens::new();
        render_all(&buf, &mut s)?;
        assert_eq!(s.pixel(Screen::Top, 0, 0), 1);
        assert_eq!(s.pixel(Screen::Top, 1, 0), 0);
        assert_eq!(s.pixel(Screen::Top, 0, 1), 0);
        let total: usize = s.raster(Screen::Top).iter().map(|p| *p as usize).sum();
        assert_eq!(total, 1);
        Ok(())
    }

    #[test]
    fn extra_pixels_dropped() -> Result<(), Box<dyn Error>> {
        let buf = GifBuilder::with_colors(256, 192, 0, &COLORS)
            .image(0, 0, 2, 1, &[1, 1, 2, 2, 2])
            .trailer();
        let mut s = Screens::new();
        render_all(&buf, &mut s)?;
        assert_eq!(s.pixel(Screen::Top, 0, 1), 0);
        assert_eq!(s.pixel(Screen::Top, 2, 0), 0);
        Ok(())
    }
}
