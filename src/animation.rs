// animation.rs
//
// Copyright (c) 2026  Douglas Lau
//
//! Animation playback state
use crate::compose;
use crate::decode::{Decoder, Gif};
use crate::decompress::Decompress;
use crate::error::Result;
use crate::surface::{Display, Screen};
use std::fs::File;
use std::io::{BufReader, Read};

/// Playback state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Frames advance on each tick
    Playing,
    /// Paused until [acknowledge_input](struct.Animation.html#method.acknowledge_input)
    WaitingForInput,
    /// Playback has ended
    Finished,
}

/// Animated GIF playing on one screen.
///
/// Each [tick](#method.tick) counts one hundredth of a second toward the
/// current frame's delay.
#[derive(Debug)]
pub struct Animation {
    gif: Gif,
    screen: Screen,
    /// Index of next frame to display
    frame_idx: usize,
    /// Ticks elapsed on the current frame
    delay_progress: u32,
    /// Delay of the current frame, in ticks
    delay: u16,
    /// Completed passes through all frames
    loop_idx: u32,
    paused: bool,
    finished: bool,
    waiting_for_input: bool,
}

impl Animation {
    /// Create an animation from a decoded GIF
    pub fn new(gif: Gif, screen: Screen) -> Self {
        let finished = gif.loops_forever();
        Animation {
            gif,
            screen,
            frame_idx: 0,
            delay_progress: 0,
            delay: 0,
            loop_idx: 0,
            paused: false,
            finished,
            waiting_for_input: false,
        }
    }

    /// Load an animation from a reader
    pub fn load<R: Read>(reader: R, screen: Screen) -> Result<Self> {
        let gif = Decoder::new(reader).decode()?;
        info!(
            "loaded {:?}: {}x{}, {} frames, loop {:?}",
            screen,
            gif.logical_screen_desc.screen_width(),
            gif.logical_screen_desc.screen_height(),
            gif.frames.len(),
            gif.loop_count
        );
        Ok(Self::new(gif, screen))
    }

    /// Load the splash animation for a screen from its fixed path
    pub fn open(screen: Screen) -> Result<Self> {
        let file = File::open(screen.path())?;
        Self::load(BufReader::new(file), screen)
    }

    /// Get the decoded GIF
    pub fn gif(&self) -> &Gif {
        &self.gif
    }

    /// Get the target screen
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Get the index of the next frame to display
    pub fn frame_idx(&self) -> usize {
        self.frame_idx
    }

    /// Get the number of completed loops
    pub fn loop_idx(&self) -> u32 {
        self.loop_idx
    }

    /// Check whether the animation loops forever
    pub fn loops_forever(&self) -> bool {
        self.gif.loops_forever()
    }

    /// Check whether the caller no longer needs to wait for playback.
    ///
    /// This is `true` from the start for animations which loop forever,
    /// otherwise once playback has ended.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Check whether ticks are ignored
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Get the playback state
    pub fn state(&self) -> State {
        if !self.paused {
            State::Playing
        } else if self.waiting_for_input {
            State::WaitingForInput
        } else {
            State::Finished
        }
    }

    /// Resume playback after waiting for user input.
    ///
    /// Returns `true` if the animation was waiting.
    pub fn acknowledge_input(&mut self) -> bool {
        if self.waiting_for_input {
            self.waiting_for_input = false;
            self.paused = false;
            true
        } else {
            false
        }
    }

    /// Check whether all loops have been played
    fn loops_done(&self) -> bool {
        match self.gif.loop_count {
            Some(0) => false,
            Some(count) => self.loop_idx > u32::from(count),
            None => self.loop_idx > 0,
        }
    }

    /// End playback
    fn finish(&mut self) {
        info!("{:?} animation finished", self.screen);
        self.finished = true;
        self.paused = true;
    }

    /// Advance playback by one tick, rendering a frame when one is due.
    ///
    /// Returns `true` if a frame was rendered.
    pub fn tick<D, Z>(&mut self, display: &mut D, decompressor: &mut Z) -> bool
    where
        D: Display + ?Sized,
        Z: Decompress + ?Sized,
    {
        if self.paused {
            return false;
        }
        self.delay_progress += 1;
        if self.delay_progress <= u32::from(self.delay) {
            return false;
        }
        self.delay_progress = 0;
        if self.frame_idx >= self.gif.frames.len() {
            self.frame_idx = 0;
            self.loop_idx = self.loop_idx.saturating_add(1);
        }
        if self.gif.frames.is_empty() || self.loops_done() {
            self.loop_idx = 0;
            self.finish();
            return false;
        }
        let idx = self.frame_idx;
        self.frame_idx += 1;
        let control = self.gif.frames[idx]
            .graphic_control_ext
            .as_ref()
            .map(|gc| (gc.delay_time_cs(), gc.user_input()));
        if let Some((delay, user_input)) = control {
            self.delay = delay;
            if delay == 0 {
                self.finish();
            } else if user_input {
                info!("{:?} animation waiting for input", self.screen);
                self.waiting_for_input = true;
                self.paused = true;
            }
        }
        debug!("{:?} frame {}", self.screen, idx);
        let frame = &self.gif.frames[idx];
        compose::render(&self.gif, frame, self.screen, display, decompressor);
        true
    }
}
