//! Gesture-to-expression mapping for the status display collaborator.
//!
//! Purely advisory: which face an attached display should pull while the
//! command is handled. The display itself (and whether one exists at all)
//! is outside the bridge.

use wavebridge_types::{Expression, GestureEvent};

/// Select the [`Expression`] a status display should show for `event`.
///
/// The sign picks the base expression; a recognised secondary `gesture`
/// value overrides it. Unrecognised input shows the neutral face.
pub fn expression_for(event: &GestureEvent) -> Expression {
    let mut expression = face_of(&event.sign).unwrap_or(Expression::Neutral);
    if let Some(secondary) = face_of(&event.gesture) {
        expression = secondary;
    }
    expression
}

fn face_of(label: &str) -> Option<Expression> {
    match label {
        "Peace sign" => Some(Expression::Happy),
        "Close" => Some(Expression::Neutral),
        "Open" => Some(Expression::Focused),
        "Left" | "Right" => Some(Expression::Spinning),
        "OK" => Some(Expression::Excited),
        _ => None,
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

    #[test]
    fn sign_selects_the_base_expression() {
        assert_eq!(expression_for(&event("Peace sign", "Unknown")), Expression::Happy);
        assert_eq!(expression_for(&event("Close", "Unknown")), Expression::Neutral);
        assert_eq!(expression_for(&event("Open", "Unknown")), Expression::Focused);
        assert_eq!(expression_for(&event("Left", "Unknown")), Expression::Spinning);
        assert_eq!(expression_for(&event("OK", "Unknown")), Expression::Excited);
    }

    #[test]
    fn recognised_gesture_overrides_the_sign() {
        assert_eq!(expression_for(&event("Open", "Left")), Expression::Spinning);
        assert_eq!(expression_for(&event("Close", "OK")), Expression::Excited);
    }

    #[test]
    fn unrecognised_gesture_keeps_the_sign_expression() {
        assert_eq!(expression_for(&event("Open", "Wiggle")), Expression::Focused);
    }

    #[test]
    fn unknown_everything_is_neutral() {
        assert_eq!(expression_for(&GestureEvent::default()), Expression::Neutral);
    }
}
