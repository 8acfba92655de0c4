// scheduler.rs
//
// Copyright (c) 2026  Douglas Lau
//
//! Tick scheduling for registered animations
use crate::animation::Animation;
use crate::decompress::{Decompress, Lzw};
use crate::error::Result;
use crate::surface::{Display, Screen};
use std::cell::RefCell;
use std::io::Read;
use std::rc::{Rc, Weak};

/// Registration handle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle(u64);

/// Scheduler for animations.
///
/// Animations are held by weak reference: dropping the last `Rc` of an
/// animation removes it on the next [tick](#method.tick).
///
/// ## Example
/// ```
/// use gifsplash::{Scheduler, Screen, Screens};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let gif = &[
/// #   0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00,
/// #   0x02, 0x00, 0x80, 0x01, 0x00, 0x00, 0x00, 0x00,
/// #   0xff, 0xff, 0xff, 0x2c, 0x00, 0x00, 0x00, 0x00,
/// #   0x02, 0x00, 0x02, 0x00, 0x00, 0x02, 0x03, 0x0c,
/// #   0x10, 0x05, 0x00, 0x3b,
/// # ][..];
/// let mut screens = Screens::new();
/// let mut scheduler = Scheduler::new();
/// let anim = scheduler.load_from(gif, Screen::Top)?;
/// // ... call from a 100 Hz timer
/// for _ in 0..2 {
///     scheduler.tick(&mut screens);
/// }
/// assert!(anim.borrow().is_finished());
/// # Ok(())
/// # }
/// ```
pub struct Scheduler<Z: Decompress = Lzw> {
    decompressor: Z,
    entries: Vec<(Handle, Weak<RefCell<Animation>>)>,
    next_id: u64,
}

impl Default for Scheduler<Lzw> {
    fn default() -> Self {
        Self::with_decompressor(Lzw)
    }
}

impl Scheduler<Lzw> {
    /// Create a scheduler with the LZW decompressor
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Z: Decompress> Scheduler<Z> {
    /// Create a scheduler with a decompressor
    pub fn with_decompressor(decompressor: Z) -> Self {
        Scheduler {
            decompressor,
            entries: vec![],
            next_id: 0,
        }
    }

    /// Get the number of registered animations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no animations are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register an animation to receive ticks.
    ///
    /// Registering an animation again returns its existing handle.
    pub fn register(&mut self, animation: &Rc<RefCell<Animation>>) -> Handle {
        let weak = Rc::downgrade(animation);
        if let Some((handle, _)) =
            self.entries.iter().find(|(_, w)| w.ptr_eq(&weak))
        {
            return *handle;
        }
        let handle = Handle(self.next_id);
        self.next_id += 1;
        self.entries.push((handle, weak));
        debug!("registered {:?}", handle);
        handle
    }

    /// Unregister an animation.
    ///
    /// Returns `true` if it was registered.
    pub fn unregister(&mut self, handle: Handle) -> bool {
        let len = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() < len
    }

    /// Load an animation from a reader and register it
    pub fn load_from<R: Read>(
        &mut self,
        reader: R,
        screen: Screen,
    ) -> Result<Rc<RefCell<Animation>>> {
        let animation = Rc::new(RefCell::new(Animation::load(reader, screen)?));
        self.register(&animation);
        Ok(animation)
    }

    /// Load the splash animation for a screen and register it
    pub fn load(&mut self, screen: Screen) -> Result<Rc<RefCell<Animation>>> {
        let animation = Rc::new(RefCell::new(Animation::open(screen)?));
        self.register(&animation);
        Ok(animation)
    }

    /// Tick all registered animations, in registration order
    pub fn tick<D: Display + ?Sized>(&mut self, display: &mut D) {
        self.entries.retain(|(_, w)| w.strong_count() > 0);
        for (handle, weak) in &self.entries {
            if let Some(animation) = weak.upgrade() {
                match animation.try_borrow_mut() {
                    Ok(mut anim) => {
                        anim.tick(display, &mut self.decompressor);
                    }
                    Err(_) => debug!("{:?} busy, tick skipped", handle),
                }
            }
        }
    }
}
