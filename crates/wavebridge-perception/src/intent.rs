//! Gesture-to-direction mapping.
//!
//! The primary (`sign`) and secondary (`gesture`) classifiers can disagree,
//! so the rules below are checked in a fixed priority order and the first
//! match wins. That order is part of the contract with the gesture client
//! and must not be rearranged.

use wavebridge_types::{Direction, GestureEvent};

/// Map a decoded [`GestureEvent`] to a movement [`Direction`].
///
/// Priority order, first match wins:
///
/// | # | Rule | Direction |
/// |---|------|-----------|
/// | 1 | sign `Open` | FORWARD |
/// | 2 | sign `Close` | STOP |
/// | 3 | gesture `Left` or sign `Left` | LEFT |
/// | 4 | gesture `Right` or sign `Right` | RIGHT |
/// | 5 | sign `Peace sign` | BACKWARD |
/// | 6 | anything else | STOP |
///
/// Total and deterministic; unrecognised or unknown input stops the robot.
pub fn map_direction(event: &GestureEvent) -> Direction {
    if event.sign == "Open" {
        Direction::Forward
    } else if event.sign == "Close" {
        Direction::Stop
    } else if event.gesture == "Left" || event.sign == "Left" {
        Direction::Left
    } else if event.gesture == "Right" || event.sign == "Right" {
        Direction::Right
    } else if event.sign == "Peace sign" {
        Direction::Backward
    } else {
        Direction::Stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavebridge_types::UNKNOWN_LABEL;

    fn event(sign: &str, gesture: &str) -> GestureEvent {
        GestureEvent {
            hand: UNKNOWN_LABEL.to_string(),
            sign: sign.to_string(),
            gesture: gesture.to_string(),
        }
    }

    /// The full (sign × gesture) grid the mapper contract is specified
    /// over. Each row encodes one consequence of the priority order.
    #[test]
    fn priority_grid_is_exact() {
        let cases = [
            ("Open", "Left", Direction::Forward),
            ("Open", "Right", Direction::Forward),
            ("Open", "Unknown", Direction::Forward),
            ("Close", "Left", Direction::Stop),
            ("Close", "Right", Direction::Stop),
            ("Close", "Unknown", Direction::Stop),
            ("Left", "Left", Direction::Left),
            ("Left", "Right", Direction::Left),
            ("Left", "Unknown", Direction::Left),
            ("Right", "Left", Direction::Left),
            ("Right", "Right", Direction::Right),
            ("Right", "Unknown", Direction::Right),
            ("Peace sign", "Left", Direction::Left),
            ("Peace sign", "Right", Direction::Right),
            ("Peace sign", "Unknown", Direction::Backward),
            ("Unknown", "Left", Direction::Left),
            ("Unknown", "Right", Direction::Right),
            ("Unknown", "Unknown", Direction::Stop),
        ];

        for (sign, gesture, expected) in cases {
            assert_eq!(
                map_direction(&event(sign, gesture)),
                expected,
                "sign={sign} gesture={gesture}"
            );
        }
    }

    #[test]
    fn open_sign_outranks_left_gesture() {
        // Rule 1 precedes rule 3 even though both match.
        assert_eq!(map_direction(&event("Open", "Left")), Direction::Forward);
    }

    #[test]
    fn left_gesture_outranks_right_sign() {
        // Rule 3 fires on the gesture before rule 4 can see the sign.
        assert_eq!(map_direction(&event("Right", "Left")), Direction::Left);
    }

    #[test]
    fn unrecognised_sign_falls_through_to_stop() {
        assert_eq!(map_direction(&event("Wiggle", "Unknown")), Direction::Stop);
    }

    #[test]
    fn hand_field_never_influences_the_direction() {
        let mut with_hand = event("Open", "Unknown");
        with_hand.hand = "Left".to_string();
        assert_eq!(map_direction(&with_hand), Direction::Forward);

        with_hand.hand = "Right".to_string();
        assert_eq!(map_direction(&with_hand), Direction::Forward);
    }

    #[test]
    fn default_event_maps_to_stop() {
        assert_eq!(map_direction(&GestureEvent::default()), Direction::Stop);
    }
}
