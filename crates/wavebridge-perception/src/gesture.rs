//! Wire-payload decoder for gesture events.
//!
//! The gesture client sends one UTF-8 text payload per connection:
//! `|`-separated `Label:Value` segments with labels drawn from
//! `{Hand, Sign, Gesture}`. Labels are order-independent, any subset may be
//! present, and a repeated label resolves last-write-wins. Decoding is
//! total: there is no payload for which it fails.

use tracing::trace;
use wavebridge_types::GestureEvent;

/// Decode one wire payload into a [`GestureEvent`].
///
/// Fields whose labeled segment is absent keep the `"Unknown"` default. A
/// segment without a `:` delimiter is ignored, as is any unrecognised
/// label; neither is an error. Only the first value chunk after the label
/// is kept, so `Sign:Open:junk` decodes the sign as `Open`.
///
/// Value domains are not validated here; an unrecognised sign name passes
/// through untouched and falls into the mapper's default-stop case.
pub fn decode_payload(payload: &str) -> GestureEvent {
    let mut event = GestureEvent::default();

    for segment in payload.split('|') {
        let mut parts = segment.split(':');
        let (Some(label), Some(value)) = (parts.next(), parts.next()) else {
            trace!(segment, "ignoring segment without label delimiter");
            continue;
        };
        match label {
            "Hand" => event.hand = value.to_string(),
            "Sign" => event.sign = value.to_string(),
            "Gesture" => event.gesture = value.to_string(),
            _ => {}
        }
    }

    event
}
