//! Coordinate-to-Action Mapping
//!
//! Maps a normalized gaze coordinate into at most one directional action
//! per axis. Each axis partitions `[0, 1]` into a central dead zone and two
//! outer action zones, with Schmitt-trigger hysteresis around the zone
//! boundaries so a coordinate hovering near a boundary cannot flood the
//! target application with alternating key events.

use crate::gaze::sample::GazeSample;
use serde::{Deserialize, Serialize};

/// The two emitter channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One discrete directional control signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectionalAction {
    Up,
    Down,
    Left,
    Right,
}

impl DirectionalAction {
    /// The axis this action belongs to
    pub fn axis(&self) -> Axis {
        match self {
            DirectionalAction::Left | DirectionalAction::Right => Axis::Horizontal,
            DirectionalAction::Up | DirectionalAction::Down => Axis::Vertical,
        }
    }
}

/// Which axes the bridge follows
///
/// Mutated only by the caller; the tick loop reads a copy at the start of
/// each tick. Both axes default to off, matching a freshly opened bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisFollowConfig {
    /// Follow horizontal gaze position
    pub follow_x: bool,
    /// Follow vertical gaze position
    pub follow_y: bool,
}

/// The mapper's verdict for one tick: at most one action per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickDecision {
    pub horizontal: Option<DirectionalAction>,
    pub vertical: Option<DirectionalAction>,
}

impl TickDecision {
    /// A decision with no action on either axis
    pub const NONE: TickDecision = TickDecision {
        horizontal: None,
        vertical: None,
    };

    /// The decision for a given axis
    pub fn for_axis(&self, axis: Axis) -> Option<DirectionalAction> {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

/// Maps gaze coordinates to directional actions
///
/// Stateless: hysteresis is computed from the previous decision the caller
/// passes in, so `map` stays a pure function.
#[derive(Debug, Clone, Copy)]
pub struct ActionMapper {
    dead_zone_width: f64,
    hysteresis_margin: f64,
}

impl ActionMapper {
    /// Default width of the central dead zone, centered on 0.5
    pub const DEFAULT_DEAD_ZONE_WIDTH: f64 = 0.30;

    /// Default extra distance beyond a zone boundary required to flip
    pub const DEFAULT_HYSTERESIS_MARGIN: f64 = 0.02;

    /// Create a mapper with the given zone geometry.
    ///
    /// Callers are expected to pass validated values (see
    /// `BridgeConfig::validate`): the dead zone must be wider than twice the
    /// margin, and dead zone plus margins must leave room for the outer
    /// zones.
    pub fn new(dead_zone_width: f64, hysteresis_margin: f64) -> Self {
        Self {
            dead_zone_width,
            hysteresis_margin,
        }
    }

    /// Map one sample to a per-axis decision.
    ///
    /// Disabled axes always yield `None`. The previous decision is consulted
    /// only for hysteresis: at exactly a nominal zone boundary the previous
    /// decision wins, and flipping requires moving beyond the boundary by
    /// more than the margin.
    pub fn map(
        &self,
        sample: &GazeSample,
        axes: AxisFollowConfig,
        previous: TickDecision,
    ) -> TickDecision {
        TickDecision {
            horizontal: if axes.follow_x {
                self.map_axis(sample.x, Axis::Horizontal, previous.horizontal)
            } else {
                None
            },
            vertical: if axes.follow_y {
                self.map_axis(sample.y, Axis::Vertical, previous.vertical)
            } else {
                None
            },
        }
    }

    /// Map one coordinate on one axis.
    ///
    /// Zone layout (normalized coordinate, low to high):
    /// low action | dead zone | high action, with the dead zone centered on
    /// 0.5. Horizontal low is Left; vertical low is Up (screen-normalized y
    /// grows downward).
    fn map_axis(
        &self,
        value: f64,
        axis: Axis,
        previous: Option<DirectionalAction>,
    ) -> Option<DirectionalAction> {
        let lo = 0.5 - self.dead_zone_width / 2.0;
        let hi = 0.5 + self.dead_zone_width / 2.0;
        let margin = self.hysteresis_margin;

        let (low_action, high_action) = match axis {
            Axis::Horizontal => (DirectionalAction::Left, DirectionalAction::Right),
            Axis::Vertical => (DirectionalAction::Up, DirectionalAction::Down),
        };

        // Schmitt trigger per boundary: a held direction releases only once
        // the coordinate re-crosses the boundary by more than the margin,
        // and engaging from the dead zone requires overshooting it likewise.
        let engaged_low = match previous {
            Some(a) if a == low_action => value <= lo + margin,
            _ => value < lo - margin,
        };
        let engaged_high = match previous {
            Some(a) if a == high_action => value >= hi - margin,
            _ => value > hi + margin,
        };

        if engaged_low {
            Some(low_action)
        } else if engaged_high {
            Some(high_action)
        } else {
            None
        }
    }
}

impl Default for ActionMapper {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_DEAD_ZONE_WIDTH,
            Self::DEFAULT_HYSTERESIS_MARGIN,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn sample(x: f64, y: f64) -> GazeSample {
        GazeSample {
            x,
            y,
            read_at: Instant::now(),
            produced_at: None,
        }
    }

    const BOTH: AxisFollowConfig = AxisFollowConfig {
        follow_x: true,
        follow_y: true,
    };

    #[test]
    fn test_disabled_axes_always_none() {
        let mapper = ActionMapper::default();
        let axes = AxisFollowConfig::default();

        for (x, y) in [(0.0, 0.0), (0.5, 0.5), (1.0, 1.0), (0.95, 0.05)] {
            let decision = mapper.map(&sample(x, y), axes, TickDecision::NONE);
            assert_eq!(decision, TickDecision::NONE);
        }
    }

    #[test]
    fn test_center_maps_to_none() {
        let mapper = ActionMapper::default();
        let decision = mapper.map(&sample(0.5, 0.5), BOTH, TickDecision::NONE);
        assert_eq!(decision, TickDecision::NONE);
    }

    #[test]
    fn test_far_right_maps_to_right() {
        let mapper = ActionMapper::default();
        let axes = AxisFollowConfig {
            follow_x: true,
            follow_y: false,
        };

        let decision = mapper.map(&sample(0.95, 0.5), axes, TickDecision::NONE);
        assert_eq!(decision.horizontal, Some(DirectionalAction::Right));
        assert_eq!(decision.vertical, None);
    }

    #[test]
    fn test_all_four_directions() {
        let mapper = ActionMapper::default();

        let d = mapper.map(&sample(0.05, 0.5), BOTH, TickDecision::NONE);
        assert_eq!(d.horizontal, Some(DirectionalAction::Left));

        let d = mapper.map(&sample(0.95, 0.5), BOTH, TickDecision::NONE);
        assert_eq!(d.horizontal, Some(DirectionalAction::Right));

        let d = mapper.map(&sample(0.5, 0.05), BOTH, TickDecision::NONE);
        assert_eq!(d.vertical, Some(DirectionalAction::Up));

        let d = mapper.map(&sample(0.5, 0.95), BOTH, TickDecision::NONE);
        assert_eq!(d.vertical, Some(DirectionalAction::Down));
    }

    #[test]
    fn test_dead_zone_edges_inside_margin_keep_none() {
        let mapper = ActionMapper::default();
        // Nominal boundaries are 0.35 and 0.65; within the 0.02 margin the
        // previous None must be retained.
        for x in [0.34, 0.35, 0.36, 0.64, 0.65, 0.66] {
            let d = mapper.map(&sample(x, 0.5), BOTH, TickDecision::NONE);
            assert_eq!(d.horizontal, None, "x = {}", x);
        }
    }

    #[test]
    fn test_boundary_does_not_oscillate() {
        let mapper = ActionMapper::default();
        let s = sample(0.35, 0.5); // exactly the nominal low boundary

        // Whatever the previous decision was, it must be retained at the
        // exact boundary.
        let from_none = mapper.map(&s, BOTH, TickDecision::NONE);
        assert_eq!(from_none.horizontal, None);

        let held_left = TickDecision {
            horizontal: Some(DirectionalAction::Left),
            vertical: None,
        };
        let from_left = mapper.map(&s, BOTH, held_left);
        assert_eq!(from_left.horizontal, Some(DirectionalAction::Left));

        // Repeated alternation of the previous value never flips the result
        for _ in 0..10 {
            assert_eq!(mapper.map(&s, BOTH, TickDecision::NONE).horizontal, None);
            assert_eq!(
                mapper.map(&s, BOTH, held_left).horizontal,
                Some(DirectionalAction::Left)
            );
        }
    }

    #[test]
    fn test_flip_requires_exceeding_margin() {
        let mapper = ActionMapper::default();
        let held_left = TickDecision {
            horizontal: Some(DirectionalAction::Left),
            vertical: None,
        };

        // 0.36 is past the nominal boundary but within the margin: held
        assert_eq!(
            mapper.map(&sample(0.36, 0.5), BOTH, held_left).horizontal,
            Some(DirectionalAction::Left)
        );

        // 0.38 exceeds boundary + margin: released
        assert_eq!(
            mapper.map(&sample(0.38, 0.5), BOTH, held_left).horizontal,
            None
        );

        // Engaging from None needs boundary - margin overshoot
        assert_eq!(
            mapper.map(&sample(0.34, 0.5), BOTH, TickDecision::NONE).horizontal,
            None
        );
        assert_eq!(
            mapper.map(&sample(0.32, 0.5), BOTH, TickDecision::NONE).horizontal,
            Some(DirectionalAction::Left)
        );
    }

    #[test]
    fn test_direct_flip_across_both_zones() {
        let mapper = ActionMapper::default();
        let held_right = TickDecision {
            horizontal: Some(DirectionalAction::Right),
            vertical: None,
        };

        // A saccade from far right to far left flips in a single tick
        let d = mapper.map(&sample(0.05, 0.5), BOTH, held_right);
        assert_eq!(d.horizontal, Some(DirectionalAction::Left));
    }

    #[test]
    fn test_axes_are_independent() {
        let mapper = ActionMapper::default();
        let d = mapper.map(&sample(0.95, 0.05), BOTH, TickDecision::NONE);
        assert_eq!(d.horizontal, Some(DirectionalAction::Right));
        assert_eq!(d.vertical, Some(DirectionalAction::Up));
    }

    #[test]
    fn test_custom_zone_geometry() {
        // A narrow dead zone with a wide margin
        let mapper = ActionMapper::new(0.10, 0.04);

        let d = mapper.map(&sample(0.40, 0.5), BOTH, TickDecision::NONE);
        assert_eq!(d.horizontal, Some(DirectionalAction::Left));

        // Within the margin of the 0.45 boundary: previous None retained
        let d = mapper.map(&sample(0.42, 0.5), BOTH, TickDecision::NONE);
        assert_eq!(d.horizontal, None);
    }

    #[test]
    fn test_action_axis() {
        assert_eq!(DirectionalAction::Left.axis(), Axis::Horizontal);
        assert_eq!(DirectionalAction::Right.axis(), Axis::Horizontal);
        assert_eq!(DirectionalAction::Up.axis(), Axis::Vertical);
        assert_eq!(DirectionalAction::Down.axis(), Axis::Vertical);
    }

    #[test]
    fn test_tick_decision_for_axis() {
        let d = TickDecision {
            horizontal: Some(DirectionalAction::Right),
            vertical: None,
        };
        assert_eq!(d.for_axis(Axis::Horizontal), Some(DirectionalAction::Right));
        assert_eq!(d.for_axis(Axis::Vertical), None);
    }
}
