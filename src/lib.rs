// lib.rs      gifsplash crate.
//
// Copyright (c) 2019-2026  Douglas Lau
//
//! Animated GIF splash screens for fixed-size indexed-color surfaces.
//!
//! A GIF stream is decoded into [Frame](block/struct.Frame.html)s, then
//! played by an [Animation](struct.Animation.html) onto one
//! [Screen](enum.Screen.html) of a [Display](trait.Display.html).  A
//! [Scheduler](struct.Scheduler.html) ticks every registered animation from a
//! periodic timer.
#[macro_use]
extern crate log;

mod animation;
pub mod block;
mod compose;
mod decode;
mod decompress;
mod error;
mod scheduler;
mod surface;
#[cfg(test)]
mod test_gif;

pub use crate::animation::{Animation, State};
pub use crate::compose::{origin, render};
pub use crate::decode::{Decoder, Gif};
pub use crate::decompress::{Decompress, Lzw};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::scheduler::{Handle, Scheduler};
pub use crate::surface::{
    Display, Screen, Screens, PALETTE_LEN, SCREEN_HEIGHT, SCREEN_WIDTH,
};
