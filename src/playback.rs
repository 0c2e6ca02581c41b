//! Playback state: current slide, autoplay countdown, mute and fullscreen
//! flags. Pure state transitions; rendering and process IO live elsewhere.

use crate::constants::MIN_AUTOPLAY_INTERVAL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Next,
    Prev,
    GoTo(usize),
    TogglePlay,
    ToggleMute,
    ToggleFullscreen,
}

/// Side effect a transition asks the caller to perform. Fullscreen is owned
/// by the windowing environment, so toggling it is a request, not a flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    RequestFullscreenToggle,
}

#[derive(Debug)]
struct AutoplayTimer {
    elapsed: f32,
}

/// The timer exists exactly while the slideshow is playing, so there is
/// never more than one countdown no matter how play is toggled.
#[derive(Debug)]
pub struct Playback {
    len: usize,
    current: usize,
    muted: bool,
    fullscreen: bool,
    interval: f32,
    timer: Option<AutoplayTimer>,
}

impl Playback {
    pub fn new(len: usize, interval_secs: f32) -> Self {
        debug_assert!(len > 0, "playback needs a non-empty deck");
        Self {
            len,
            current: 0,
            muted: true,
            fullscreen: false,
            interval: interval_secs.max(MIN_AUTOPLAY_INTERVAL),
            timer: Some(AutoplayTimer { elapsed: 0.0 }),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn playing(&self) -> bool {
        self.timer.is_some()
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn apply(&mut self, transition: Transition) -> Effect {
        match transition {
            Transition::Next => {
                self.current = (self.current + 1) % self.len;
                self.rearm();
            }
            Transition::Prev => {
                self.current = (self.current + self.len - 1) % self.len;
                self.rearm();
            }
            Transition::GoTo(index) => {
                // Out-of-range targets are ignored rather than clamped.
                if index < self.len {
                    self.current = index;
                    self.rearm();
                }
            }
            Transition::TogglePlay => {
                self.timer = match self.timer {
                    Some(_) => None,
                    None => Some(AutoplayTimer { elapsed: 0.0 }),
                };
            }
            Transition::ToggleMute => self.muted = !self.muted,
            Transition::ToggleFullscreen => return Effect::RequestFullscreenToggle,
        }
        Effect::None
    }

    /// Advance the autoplay countdown by `dt` seconds. Returns how many
    /// slides were advanced (more than one only after a long stall).
    pub fn tick(&mut self, dt: f32) -> u32 {
        let Some(timer) = &mut self.timer else {
            return 0;
        };
        timer.elapsed += dt;
        let mut fired = 0u32;
        while timer.elapsed >= self.interval {
            timer.elapsed -= self.interval;
            fired += 1;
        }
        if fired > 0 {
            self.current = (self.current + fired as usize) % self.len;
        }
        fired
    }

    /// Adopt the environment's fullscreen state. Returns true on a change.
    pub fn set_fullscreen(&mut self, fullscreen: bool) -> bool {
        if self.fullscreen == fullscreen {
            return false;
        }
        self.fullscreen = fullscreen;
        true
    }

    /// End-of-life: stop the countdown and mute so media teardown has
    /// nothing left to race with.
    pub fn teardown(&mut self) {
        self.timer = None;
        self.muted = true;
    }

    // Manual navigation restarts the countdown instead of letting a
    // nearly-expired timer yank the slide away right after a click.
    fn rearm(&mut self) {
        if let Some(timer) = &mut self.timer {
            timer.elapsed = 0.0;
        }
    }
}
