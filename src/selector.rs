//! Decides which slides stay mounted and drives their enter/exit motion.

use raylib::prelude::*;

use crate::constants::{
    CONTENT_RISE_DURATION, SETTLE_ZOOM_DURATION, SETTLE_ZOOM_FROM, SLIDE_FADE_DURATION,
};

/// A slide keeps its media mounted while it is the current slide, one of
/// its circular neighbours, or an endpoint of the deck (endpoints border
/// the wrap-around, so they are always warm).
pub fn should_mount(index: usize, current: usize, len: usize) -> bool {
    if len == 0 || index >= len {
        return false;
    }
    let prev = (current + len - 1) % len;
    let next = (current + 1) % len;
    index == current || index == prev || index == next || index == 0 || index == len - 1
}

struct ActiveTween {
    tween: ease::Tween,
    elapsed: f32,
    duration: f32,
    target: f32,
}

/// A value that eases toward a target. The tween is not trusted past its
/// duration; the value is pinned to the target once time runs out.
pub struct Eased {
    value: f32,
    anim: Option<ActiveTween>,
}

impl Eased {
    pub fn new(value: f32) -> Self {
        Self { value, anim: None }
    }

    /// Jump straight to the target, cancelling any running animation.
    pub fn snap(&mut self, target: f32) {
        self.value = target;
        self.anim = None;
    }

    /// Ease from the current value to the target over `duration` seconds.
    /// Retargeting mid-flight starts from wherever the value is now.
    pub fn ease_to(&mut self, target: f32, duration: f32) {
        if (target - self.value).abs() < f32::EPSILON {
            self.anim = None;
            return;
        }
        self.anim = Some(ActiveTween {
            tween: ease::Tween::new(ease::cubic_out, self.value, target, duration),
            elapsed: 0.0,
            duration,
            target,
        });
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(anim) = &mut self.anim {
            anim.elapsed += dt;
            if anim.elapsed >= anim.duration {
                self.value = anim.target;
                self.anim = None;
            } else {
                self.value = anim.tween.apply(dt);
            }
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

/// Visual state of one slide: media opacity, image settle zoom and the
/// text block's rise-in progress. With reduced motion every change lands
/// instantly on its end state.
pub struct SlideVisual {
    opacity: Eased,
    zoom: Eased,
    content: Eased,
    reduced_motion: bool,
    active: bool,
}

impl SlideVisual {
    pub fn new(active: bool, reduced_motion: bool) -> Self {
        let mut visual = Self {
            opacity: Eased::new(if active { 1.0 } else { 0.0 }),
            zoom: Eased::new(1.0),
            content: Eased::new(0.0),
            reduced_motion,
            active,
        };
        if active {
            // The first slide is visible right away but its text still
            // rises in, matching the page-load entrance.
            if reduced_motion {
                visual.content.snap(1.0);
            } else {
                visual.content.ease_to(1.0, CONTENT_RISE_DURATION);
            }
        }
        visual
    }

    pub fn set_active(&mut self, active: bool) {
        if active == self.active {
            return;
        }
        self.active = active;
        if self.reduced_motion {
            let shown = if active { 1.0 } else { 0.0 };
            self.opacity.snap(shown);
            self.zoom.snap(1.0);
            self.content.snap(shown);
            return;
        }
        if active {
            self.opacity.ease_to(1.0, SLIDE_FADE_DURATION);
            self.zoom = Eased::new(SETTLE_ZOOM_FROM);
            self.zoom.ease_to(1.0, SETTLE_ZOOM_DURATION);
            self.content = Eased::new(0.0);
            self.content.ease_to(1.0, CONTENT_RISE_DURATION);
        } else {
            // Outgoing text rides the slide fade; only opacity retargets.
            self.opacity.ease_to(0.0, SLIDE_FADE_DURATION);
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.opacity.update(dt);
        self.zoom.update(dt);
        self.content.update(dt);
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom.value()
    }

    pub fn content(&self) -> f32 {
        self.content.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(current: usize, len: usize) -> Vec<usize> {
        (0..len).filter(|&i| should_mount(i, current, len)).collect()
    }

    #[test]
    fn mounts_active_neighbours_and_endpoints() {
        assert_eq!(mounted(2, 6), vec![0, 1, 2, 3, 5]);
        assert_eq!(mounted(3, 7), vec![0, 2, 3, 4, 6]);
    }

    #[test]
    fn window_wraps_at_the_deck_edges() {
        assert_eq!(mounted(0, 6), vec![0, 1, 5]);
        assert_eq!(mounted(5, 6), vec![0, 4, 5]);
    }

    #[test]
    fn tiny_decks_stay_fully_mounted() {
        assert_eq!(mounted(0, 1), vec![0]);
        assert_eq!(mounted(0, 2), vec![0, 1]);
        assert_eq!(mounted(1, 3), vec![0, 1, 2]);
    }

    #[test]
    fn out_of_range_indices_never_mount() {
        assert!(!should_mount(6, 0, 6));
        assert!(!should_mount(0, 0, 0));
    }

    #[test]
    fn eased_value_reaches_its_target_and_stays_there() {
        let mut eased = Eased::new(0.0);
        eased.ease_to(1.0, 1.0);
        eased.update(0.5);
        let mid = eased.value();
        assert!(mid > 0.0 && mid < 1.0);
        eased.update(0.6);
        assert_eq!(eased.value(), 1.0);
        eased.update(5.0);
        assert_eq!(eased.value(), 1.0);
    }

    #[test]
    fn eased_snap_cancels_the_animation() {
        let mut eased = Eased::new(0.0);
        eased.ease_to(1.0, 1.0);
        eased.snap(0.25);
        assert_eq!(eased.value(), 0.25);
        eased.update(2.0);
        assert_eq!(eased.value(), 0.25);
    }

    #[test]
    fn eased_retarget_starts_from_the_current_value() {
        let mut eased = Eased::new(0.0);
        eased.ease_to(1.0, 1.0);
        eased.update(0.5);
        let before = eased.value();
        eased.ease_to(0.0, 1.0);
        assert_eq!(eased.value(), before);
        eased.update(1.1);
        assert_eq!(eased.value(), 0.0);
    }

    #[test]
    fn incoming_slide_fades_in_and_settles() {
        let mut visual = SlideVisual::new(false, false);
        assert_eq!(visual.opacity(), 0.0);
        visual.set_active(true);
        assert_eq!(visual.zoom(), SETTLE_ZOOM_FROM);
        visual.update(SLIDE_FADE_DURATION / 2.0);
        let mid = visual.opacity();
        assert!(mid > 0.0 && mid < 1.0);
        visual.update(SETTLE_ZOOM_DURATION);
        assert_eq!(visual.opacity(), 1.0);
        assert_eq!(visual.zoom(), 1.0);
        assert_eq!(visual.content(), 1.0);
    }

    #[test]
    fn outgoing_slide_fades_from_where_it_was() {
        let mut visual = SlideVisual::new(false, false);
        visual.set_active(true);
        visual.update(SLIDE_FADE_DURATION / 2.0);
        let mid = visual.opacity();
        visual.set_active(false);
        assert_eq!(visual.opacity(), mid);
        visual.update(SLIDE_FADE_DURATION / 4.0);
        assert!(visual.opacity() < mid);
        visual.update(SLIDE_FADE_DURATION);
        assert_eq!(visual.opacity(), 0.0);
    }

    #[test]
    fn first_slide_is_visible_immediately() {
        let visual = SlideVisual::new(true, false);
        assert_eq!(visual.opacity(), 1.0);
        assert_eq!(visual.zoom(), 1.0);
        assert_eq!(visual.content(), 0.0);
    }

    #[test]
    fn reduced_motion_snaps_both_directions() {
        let mut visual = SlideVisual::new(false, true);
        visual.set_active(true);
        assert_eq!(visual.opacity(), 1.0);
        assert_eq!(visual.zoom(), 1.0);
        assert_eq!(visual.content(), 1.0);
        visual.set_active(false);
        assert_eq!(visual.opacity(), 0.0);
        assert_eq!(visual.content(), 0.0);
    }

    #[test]
    fn reduced_motion_first_slide_needs_no_updates() {
        let visual = SlideVisual::new(true, true);
        assert_eq!(visual.opacity(), 1.0);
        assert_eq!(visual.content(), 1.0);
    }
}
