// cargo fuzz run load corpus/load -- -timeout=30

#![no_main]

use libfuzzer_sys::fuzz_target;

use gifsplash::{Animation, Screen, Screens};

fuzz_target!(|data: &[u8]| {
    if let Ok(mut anim) = Animation::load(data, Screen::Top) {
        let mut screens = Screens::new();
        let mut lzw = gifsplash::Lzw;
        for _ in 0..64 {
            anim.tick(&mut screens, &mut lzw);
        }
    }
});
