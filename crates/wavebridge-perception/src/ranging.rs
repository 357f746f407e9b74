//! Parser for ranging status reports.
//!
//! The external ranging process publishes its zone state as a single line of
//! the form `Front:0|Left:1|Right:0`, either through a shared status file or
//! on the stdout of a one-shot probe. This module turns that line into an
//! [`ObstacleSnapshot`].

use tracing::trace;
use wavebridge_types::ObstacleSnapshot;

/// Parse one `KEY:V|KEY:V|...` status line into an [`ObstacleSnapshot`].
///
/// Keys are matched case-insensitively among `front`, `left` and `right`;
/// a zone is obstructed only when its value is exactly `"1"`. Absent keys
/// default to clear, as does a line with no parseable segments at all:
/// absence of evidence is not evidence of obstruction. Segments without a
/// `:` delimiter and unrecognised keys are skipped; duplicates resolve
/// last-write-wins.
///
/// Total over all inputs. Callers that need to distinguish "unreadable
/// source" from "clear" must do so before calling.
pub fn parse_status_line(line: &str) -> ObstacleSnapshot {
    let mut snapshot = ObstacleSnapshot::default();

    for segment in line.trim().split('|') {
        let Some((key, value)) = segment.split_once(':') else {
            trace!(segment, "ignoring status segment without delimiter");
            continue;
        };
        let blocked = value == "1";
        match key.to_ascii_lowercase().as_str() {
            "front" => snapshot.front = blocked,
            "left" => snapshot.left = blocked,
            "right" => snapshot.right = blocked,
            _ => {}
        }
    }

    snapshot
}
