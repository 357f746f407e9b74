//! Obstacle-gated arbitration between movement intent and motion command.
//!
//! The gate checks only the zones the ranging sensor actually covers.
//!
//! | Direction | Vetoed when | Command if safe | Command if vetoed |
//! |-----------|-------------|-----------------|-------------------|
//! | FORWARD   | `front`     | `F`             | `S`               |
//! | LEFT      | `left`      | `L`             | `S`               |
//! | RIGHT     | `right`     | `R`             | `S`               |
//! | BACKWARD  | never       | `B`             | –                 |
//! | STOP      | never       | `S`             | –                 |
//!
//! Backward motion is never gated because the sensor has no rear coverage;
//! an explicit stop is always allowed. This is not a general
//! collision-avoidance system and must not grow into one here.

use tracing::debug;
use wavebridge_types::{Direction, MotionCommand, ObstacleSnapshot};

/// Outcome of one arbitration: the command to dispatch and whether the
/// original intent was vetoed into a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyVerdict {
    pub command: MotionCommand,
    pub vetoed: bool,
}

/// Arbitrate `direction` against `obstacles`.
///
/// Returns the command for the intended direction when its zone is clear,
/// or [`MotionCommand::Stop`] with `vetoed = true` when the zone is
/// obstructed. [`Direction::Backward`] and [`Direction::Stop`] pass
/// unconditionally.
pub fn arbitrate(direction: Direction, obstacles: &ObstacleSnapshot) -> SafetyVerdict {
    let blocked = match direction {
        Direction::Forward => obstacles.front,
        Direction::Left => obstacles.left,
        Direction::Right => obstacles.right,
        Direction::Backward | Direction::Stop => false,
    };

    let verdict = if blocked {
        SafetyVerdict {
            command: MotionCommand::Stop,
            vetoed: true,
        }
    } else {
        SafetyVerdict {
            command: MotionCommand::from(direction),
            vetoed: false,
        }
    };

    debug!(
        %direction,
        front = obstacles.front,
        left = obstacles.left,
        right = obstacles.right,
        vetoed = verdict.vetoed,
        "safety arbitration"
    );

    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every combination of the three zone booleans.
    fn all_snapshots() -> Vec<ObstacleSnapshot> {
        let mut snaps = Vec::new();
        for front in [false, true] {
            for left in [false, true] {
                for right in [false, true] {
                    snaps.push(ObstacleSnapshot { front, left, right });
                }
            }
        }
        snaps
    }

    #[test]
    fn forward_is_vetoed_exactly_when_front_is_blocked() {
        for snap in all_snapshots() {
            let verdict = arbitrate(Direction::Forward, &snap);
            assert_eq!(verdict.vetoed, snap.front, "snapshot {snap:?}");
            let expected = if snap.front {
                MotionCommand::Stop
            } else {
                MotionCommand::Forward
            };
            assert_eq!(verdict.command, expected, "snapshot {snap:?}");
        }
    }

    #[test]
    fn left_is_vetoed_exactly_when_left_is_blocked() {
        for snap in all_snapshots() {
            let verdict = arbitrate(Direction::Left, &snap);
            assert_eq!(verdict.vetoed, snap.left, "snapshot {snap:?}");
            let expected = if snap.left {
                MotionCommand::Stop
            } else {
                MotionCommand::Left
            };
            assert_eq!(verdict.command, expected, "snapshot {snap:?}");
        }
    }

    #[test]
    fn right_is_vetoed_exactly_when_right_is_blocked() {
        for snap in all_snapshots() {
            let verdict = arbitrate(Direction::Right, &snap);
            assert_eq!(verdict.vetoed, snap.right, "snapshot {snap:?}");
            let expected = if snap.right {
                MotionCommand::Stop
            } else {
                MotionCommand::Right
            };
            assert_eq!(verdict.command, expected, "snapshot {snap:?}");
        }
    }

    #[test]
    fn backward_is_never_vetoed() {
        for snap in all_snapshots() {
            let verdict = arbitrate(Direction::Backward, &snap);
            assert!(!verdict.vetoed, "snapshot {snap:?}");
            assert_eq!(verdict.command, MotionCommand::Backward);
        }
    }

    #[test]
    fn stop_is_never_vetoed() {
        for snap in all_snapshots() {
            let verdict = arbitrate(Direction::Stop, &snap);
            assert!(!verdict.vetoed, "snapshot {snap:?}");
            assert_eq!(verdict.command, MotionCommand::Stop);
        }
    }

    #[test]
    fn clear_zones_pass_the_intended_command_through() {
        let clear = ObstacleSnapshot::all_clear();
        assert_eq!(
            arbitrate(Direction::Forward, &clear),
            SafetyVerdict {
                command: MotionCommand::Forward,
                vetoed: false
            }
        );
        assert_eq!(
            arbitrate(Direction::Left, &clear),
            SafetyVerdict {
                command: MotionCommand::Left,
                vetoed: false
            }
        );
        assert_eq!(
            arbitrate(Direction::Right, &clear),
            SafetyVerdict {
                command: MotionCommand::Right,
                vetoed: false
            }
        );
    }

    #[test]
    fn unrelated_zone_blockage_does_not_veto() {
        // A left-side obstacle must not stop a forward command.
        let snap = ObstacleSnapshot {
            front: false,
            left: true,
            right: true,
        };
        let verdict = arbitrate(Direction::Forward, &snap);
        assert!(!verdict.vetoed);
        assert_eq!(verdict.command, MotionCommand::Forward);
    }
}
