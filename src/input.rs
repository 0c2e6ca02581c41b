//! Maps key presses and clicked controls onto playback transitions.

use raylib::prelude::*;

use crate::layout::ControlId;
use crate::playback::Transition;

/// Keys the slideshow reacts to; everything else passes through untouched.
pub const ROUTED_KEYS: [KeyboardKey; 5] = [
    KeyboardKey::KEY_LEFT,
    KeyboardKey::KEY_RIGHT,
    KeyboardKey::KEY_SPACE,
    KeyboardKey::KEY_M,
    KeyboardKey::KEY_F,
];

/// A routed key press. `consumed` marks keys the slideshow claims
/// exclusively; a host embedding the controller must not let its own
/// bindings (page scroll on Space, typically) see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutedKey {
    pub transition: Transition,
    pub consumed: bool,
}

pub fn route_key(key: KeyboardKey) -> Option<RoutedKey> {
    let (transition, consumed) = match key {
        KeyboardKey::KEY_LEFT => (Transition::Prev, false),
        KeyboardKey::KEY_RIGHT => (Transition::Next, false),
        KeyboardKey::KEY_SPACE => (Transition::TogglePlay, true),
        KeyboardKey::KEY_M => (Transition::ToggleMute, false),
        KeyboardKey::KEY_F => (Transition::ToggleFullscreen, false),
        _ => return None,
    };
    Some(RoutedKey { transition, consumed })
}

/// What a click on a control does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    Apply(Transition),
    ActivateCta,
}

pub fn route_click(control: ControlId) -> ClickAction {
    match control {
        ControlId::Play => ClickAction::Apply(Transition::TogglePlay),
        ControlId::Mute => ClickAction::Apply(Transition::ToggleMute),
        ControlId::Prev => ClickAction::Apply(Transition::Prev),
        ControlId::Next => ClickAction::Apply(Transition::Next),
        ControlId::Dot(index) => ClickAction::Apply(Transition::GoTo(index)),
        ControlId::Fullscreen => ClickAction::Apply(Transition::ToggleFullscreen),
        ControlId::Cta => ClickAction::ActivateCta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_navigate_without_being_consumed() {
        let left = route_key(KeyboardKey::KEY_LEFT).unwrap();
        assert_eq!(left.transition, Transition::Prev);
        assert!(!left.consumed);

        let right = route_key(KeyboardKey::KEY_RIGHT).unwrap();
        assert_eq!(right.transition, Transition::Next);
        assert!(!right.consumed);
    }

    #[test]
    fn space_toggles_play_and_is_consumed() {
        let space = route_key(KeyboardKey::KEY_SPACE).unwrap();
        assert_eq!(space.transition, Transition::TogglePlay);
        assert!(space.consumed);
    }

    #[test]
    fn letter_keys_toggle_mute_and_fullscreen() {
        let m = route_key(KeyboardKey::KEY_M).unwrap();
        assert_eq!(m.transition, Transition::ToggleMute);
        let f = route_key(KeyboardKey::KEY_F).unwrap();
        assert_eq!(f.transition, Transition::ToggleFullscreen);
    }

    #[test]
    fn unmapped_keys_pass_through() {
        assert_eq!(route_key(KeyboardKey::KEY_A), None);
        assert_eq!(route_key(KeyboardKey::KEY_UP), None);
        assert_eq!(route_key(KeyboardKey::KEY_ENTER), None);
    }

    #[test]
    fn clicks_map_to_their_transitions() {
        assert_eq!(
            route_click(ControlId::Play),
            ClickAction::Apply(Transition::TogglePlay)
        );
        assert_eq!(
            route_click(ControlId::Mute),
            ClickAction::Apply(Transition::ToggleMute)
        );
        assert_eq!(
            route_click(ControlId::Prev),
            ClickAction::Apply(Transition::Prev)
        );
        assert_eq!(
            route_click(ControlId::Next),
            ClickAction::Apply(Transition::Next)
        );
        assert_eq!(
            route_click(ControlId::Dot(4)),
            ClickAction::Apply(Transition::GoTo(4))
        );
        assert_eq!(
            route_click(ControlId::Fullscreen),
            ClickAction::Apply(Transition::ToggleFullscreen)
        );
        assert_eq!(route_click(ControlId::Cta), ClickAction::ActivateCta);
    }
}
