//! Ties the pieces together: routes input into playback, keeps the media
//! window mounted, paces the active video and draws one frame.

use std::path::Path;

use raylib::prelude::*;

use crate::constants::CONTENT_RISE_OFFSET;
use crate::deck::{Deck, Media, Slide};
use crate::fullscreen::{self, FullscreenHost};
use crate::input::{self, ClickAction};
use crate::layout::{self, ContentLayout, ControlId, ControlLayout};
use crate::playback::{Effect, Playback, Transition};
use crate::render;
use crate::selector::{self, SlideVisual};
use crate::texture;
use crate::video::{AudioSidecar, VideoPlayer};

enum MediaSlot {
    Empty,
    Image(Texture2D),
    Video(VideoPlayer),
    Missing,
}

struct AudioSlot {
    index: usize,
    // None after a failed spawn; not retried until mute or slide changes.
    _sidecar: Option<AudioSidecar>,
}

pub struct HeroEngine {
    deck: Deck,
    playback: Playback,
    visuals: Vec<SlideVisual>,
    media: Vec<MediaSlot>,
    audio: Option<AudioSlot>,
    controls: ControlLayout,
    content: ContentLayout,
    hover: Option<ControlId>,
}

impl HeroEngine {
    pub fn new(rl: &mut RaylibHandle, thread: &RaylibThread, deck: Deck) -> Self {
        let len = deck.slides.len();
        let playback = Playback::new(len, deck.options.interval_secs);
        let reduced = deck.options.reduced_motion;
        let visuals = (0..len)
            .map(|index| SlideVisual::new(index == 0, reduced))
            .collect();
        let media = (0..len).map(|_| MediaSlot::Empty).collect();

        let screen_w = rl.get_screen_width() as f32;
        let screen_h = rl.get_screen_height() as f32;
        let first = &deck.slides[0];
        let show_mute = deck.options.show_mute_button && first.media.is_video();
        let controls = layout::control_layout(
            screen_w,
            screen_h,
            len,
            0,
            show_mute,
            deck.options.show_fullscreen_button,
        );
        let content = layout::content_layout(screen_w, screen_h, first, render::text_width);

        let mut engine = Self {
            deck,
            playback,
            visuals,
            media,
            audio: None,
            controls,
            content,
            hover: None,
        };
        engine.sync_media(rl, thread);
        engine
    }

    pub fn update(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let dt = rl.get_frame_time();

        // --- Input ---
        for key in input::ROUTED_KEYS {
            if rl.is_key_pressed(key) {
                if let Some(routed) = input::route_key(key) {
                    log::debug!(
                        "key {:?} -> {:?} (consumed: {})",
                        key,
                        routed.transition,
                        routed.consumed
                    );
                    self.dispatch(routed.transition, rl);
                }
            }
        }

        // Clicks are resolved against the layout the user is looking at,
        // which is the one from the previous frame.
        let mouse = rl.get_mouse_position();
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(control) = self.control_under(mouse) {
                match input::route_click(control) {
                    ClickAction::Apply(transition) => self.dispatch(transition, rl),
                    ClickAction::ActivateCta => {
                        let slide = &self.deck.slides[self.playback.current()];
                        log::info!("call to action '{}' -> {}", slide.cta_text, slide.cta_link);
                    }
                }
            }
        }

        // --- Autoplay ---
        let fired = self.playback.tick(dt);
        if fired > 0 {
            log::debug!("autoplay advanced to slide {}", self.playback.current());
        }

        // --- Environment ---
        fullscreen::sync(&mut self.playback, &*rl);

        // --- Visuals and media ---
        let current = self.playback.current();
        for (index, visual) in self.visuals.iter_mut().enumerate() {
            visual.set_active(index == current);
            visual.update(dt);
        }
        self.sync_media(rl, thread);
        if let MediaSlot::Video(player) = &mut self.media[current] {
            player.advance();
        }
        self.sync_audio();

        // --- Layout for this frame's draw and the next frame's clicks ---
        let screen_w = rl.get_screen_width() as f32;
        let screen_h = rl.get_screen_height() as f32;
        self.refresh_layout(screen_w, screen_h);
        self.hover = self.control_under(mouse);
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        d.clear_background(Color::BLACK);
        let screen_w = d.get_screen_width() as f32;
        let screen_h = d.get_screen_height() as f32;
        let current = self.playback.current();
        let len = self.deck.slides.len();

        // Painter's order: fading neighbours first, the active slide on top.
        let mut order: Vec<usize> = (0..len).filter(|&index| index != current).collect();
        order.push(current);
        for index in order {
            let visual = &self.visuals[index];
            if visual.opacity() <= 0.0 {
                continue;
            }
            match &self.media[index] {
                MediaSlot::Image(texture) => render::draw_slide_media(
                    d,
                    texture,
                    visual.opacity(),
                    visual.zoom(),
                    screen_w,
                    screen_h,
                ),
                MediaSlot::Video(player) => render::draw_slide_media(
                    d,
                    player.texture(),
                    visual.opacity(),
                    1.0,
                    screen_w,
                    screen_h,
                ),
                MediaSlot::Missing => render::draw_placeholder(
                    d,
                    &self.deck.slides[index].id,
                    visual.opacity(),
                    screen_w,
                    screen_h,
                ),
                MediaSlot::Empty => {}
            }
        }

        render::draw_scrim(d, screen_w, screen_h);

        // Each visible slide's text rides its own fade; during a cross-fade
        // the outgoing block dissolves under the incoming one.
        for (index, visual) in self.visuals.iter().enumerate() {
            let alpha = visual.opacity() * visual.content();
            if alpha <= 0.0 {
                continue;
            }
            let slide = &self.deck.slides[index];
            let computed;
            let content = if index == current {
                &self.content
            } else {
                computed = layout::content_layout(screen_w, screen_h, slide, render::text_width);
                &computed
            };
            let rise = (1.0 - visual.content()) * CONTENT_RISE_OFFSET;
            let counter = layout::counter_text(index, len);
            let hover_cta = index == current && self.hover == Some(ControlId::Cta);
            render::draw_content(d, slide, content, &counter, alpha, rise, hover_cta);
        }

        if let Some(church) = &self.deck.church {
            render::draw_banner(d, church, screen_w);
        }

        render::draw_progress(
            d,
            &self.controls.progress_track,
            layout::progress_fraction(current, len),
        );
        render::draw_controls(d, &self.controls, &self.playback, self.hover);

        if let Some(control) = self.hover {
            if let Some(anchor) = self.controls.rect_of(control) {
                let label =
                    layout::control_label(control, self.playback.playing(), self.playback.muted());
                render::draw_tooltip(d, &label, &anchor, screen_w);
            }
        }
    }

    fn dispatch(&mut self, transition: Transition, host: &mut impl FullscreenHost) {
        match self.playback.apply(transition) {
            Effect::RequestFullscreenToggle => host.request_toggle(),
            Effect::None => {}
        }
    }

    fn control_under(&self, point: Vector2) -> Option<ControlId> {
        if let Some(control) = self.controls.hit_test(point) {
            return Some(control);
        }
        if self.content.cta.check_collision_point_rec(point) {
            return Some(ControlId::Cta);
        }
        None
    }

    fn refresh_layout(&mut self, screen_w: f32, screen_h: f32) {
        let current = self.playback.current();
        let slide = &self.deck.slides[current];
        let show_mute = self.deck.options.show_mute_button && slide.media.is_video();
        self.controls = layout::control_layout(
            screen_w,
            screen_h,
            self.deck.slides.len(),
            current,
            show_mute,
            self.deck.options.show_fullscreen_button,
        );
        self.content = layout::content_layout(screen_w, screen_h, slide, render::text_width);
    }

    /// Mount media inside the window around the current slide, drop it
    /// outside. Dropping a slot is what frees the texture or kills the
    /// decoder process.
    fn sync_media(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let current = self.playback.current();
        let len = self.deck.slides.len();
        for index in 0..len {
            let wanted = selector::should_mount(index, current, len);
            let slot = &mut self.media[index];
            match (wanted, &*slot) {
                (true, MediaSlot::Empty) => {
                    *slot = Self::mount(rl, thread, &self.deck.slides[index]);
                }
                (false, MediaSlot::Empty) => {}
                (false, _) => {
                    log::debug!("unmounting media of slide {}", self.deck.slides[index].id);
                    *slot = MediaSlot::Empty;
                }
                (true, _) => {}
            }
        }
    }

    fn mount(rl: &mut RaylibHandle, thread: &RaylibThread, slide: &Slide) -> MediaSlot {
        let mounted = match &slide.media {
            Media::Image(path) => {
                texture::load_slide_texture(rl, thread, Path::new(path)).map(MediaSlot::Image)
            }
            Media::Video(path) => {
                VideoPlayer::spawn(rl, thread, Path::new(path)).map(MediaSlot::Video)
            }
        };
        match mounted {
            Ok(slot) => {
                log::debug!("mounted media of slide {}", slide.id);
                slot
            }
            Err(e) => {
                log::warn!("media of slide {} failed: {:#}", slide.id, e);
                MediaSlot::Missing
            }
        }
    }

    /// The sidecar exists exactly while the active slide is an unmuted,
    /// successfully decoding video.
    fn sync_audio(&mut self) {
        let current = self.playback.current();
        let want = !self.playback.muted() && matches!(self.media[current], MediaSlot::Video(_));
        let keep = want && matches!(&self.audio, Some(slot) if slot.index == current);
        if keep {
            return;
        }
        self.audio = None;
        if want {
            let slide = &self.deck.slides[current];
            let sidecar = match AudioSidecar::spawn(Path::new(slide.media.path())) {
                Ok(sidecar) => Some(sidecar),
                Err(e) => {
                    log::warn!("audio of slide {} failed: {:#}", slide.id, e);
                    None
                }
            };
            self.audio = Some(AudioSlot { index: current, _sidecar: sidecar });
        }
    }
}

impl Drop for HeroEngine {
    fn drop(&mut self) {
        // Stop the countdown and audio first; media slots drop right after,
        // killing any decoder still running.
        self.playback.teardown();
        self.audio = None;
        log::debug!("slideshow torn down");
    }
}
