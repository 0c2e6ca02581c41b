//! One-way bridge from the window's real fullscreen state into playback.

use raylib::prelude::*;

use crate::playback::Playback;

/// Whatever owns the real fullscreen state. Toggle requests go out through
/// here and may be ignored; the host's answer is the only source of truth.
pub trait FullscreenHost {
    fn is_fullscreen(&self) -> bool;
    fn request_toggle(&mut self);
}

impl FullscreenHost for RaylibHandle {
    fn is_fullscreen(&self) -> bool {
        self.is_window_fullscreen()
    }

    fn request_toggle(&mut self) {
        self.toggle_fullscreen();
    }
}

/// Adopt the host's current state. Returns true when the mirrored flag
/// changed, whether from a granted request or an external exit.
pub fn sync(playback: &mut Playback, host: &impl FullscreenHost) -> bool {
    let changed = playback.set_fullscreen(host.is_fullscreen());
    if changed {
        log::debug!("fullscreen is now {}", playback.fullscreen());
    }
    changed
}
