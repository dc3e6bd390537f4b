// SPDX-License-Identifier: MIT
//
// Rotary drag: turning the pointer around an anchor dials a value in [0, 1].
//
// A press inside the thin ring around an anchor starts an adjustment. Each
// move measures the pointer's angle around the anchor centre, unwraps the
// step across ±π, and accumulates it. One full turn moves the value by
// 1 / turns_to_full. Values within `snap_epsilon` of a bound snap onto it,
// and while the drag keeps pushing past a bound the accumulator is rebased
// there, so turning back responds on the very next move.
//
// The state machine is a pure function, `reduce(state, event) → (state,
// effect)`. It never touches the path: the caller applies the effect.

use std::f64::consts::{PI, TAU};

use bitflags::bitflags;
use hue_space::Position;
use hue_space::cylinder::planar_distance;

use crate::anchor::{AnchorId, AnchorSet};

bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        /// Fine adjustment: more turns for the full range.
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const META  = 0b0000_1000;
    }
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Hit region and sensitivity of the rotary control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotaryConfig {
    /// Exclusive inner edge of the ring, as a planar distance from the anchor.
    pub inner_radius: f64,
    /// Inclusive outer edge of the ring.
    pub outer_radius: f64,
    /// Turns for the full 0 → 1 range.
    pub turns_to_full: f64,
    /// Turns for the full range with [`Modifiers::SHIFT`] held.
    pub turns_to_full_fine: f64,
    /// Values this close to a bound snap onto it.
    pub snap_epsilon: f64,
}

impl Default for RotaryConfig {
    fn default() -> Self {
        Self {
            inner_radius: 0.02,
            outer_radius: 0.05,
            turns_to_full: 1.0,
            turns_to_full_fine: 2.5,
            snap_epsilon: 0.01,
        }
    }
}

impl RotaryConfig {
    /// Whether `distance` from an anchor centre falls on the ring.
    #[must_use]
    pub fn in_ring(&self, distance: f64) -> bool {
        distance > self.inner_radius && distance <= self.outer_radius
    }

    #[must_use]
    pub const fn sensitivity(&self, modifiers: Modifiers) -> f64 {
        if modifiers.contains(Modifiers::SHIFT) {
            self.turns_to_full_fine
        } else {
            self.turns_to_full
        }
    }
}

// ─── State, events, effects ──────────────────────────────────────────────────

/// An adjustment in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub anchor: AnchorId,
    /// Value the accumulated angle is measured from.
    pub start_value: f64,
    /// Pointer angle at the previous event, radians in `(−π, π]`.
    pub previous_angle: f64,
    /// Unwrapped rotation since `start_value` was taken, radians.
    pub accumulated_angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RotaryState {
    #[default]
    Idle,
    Adjusting(Adjustment),
}

/// Input to the reducer.
///
/// Positions are normalized picker coordinates. `center` is the anchor's
/// position at the time of the event; it moves as the value changes, so
/// the caller passes it fresh each time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotaryEvent {
    Press {
        anchor: AnchorId,
        center: Position,
        pointer: Position,
        /// The anchor's current value.
        value: f64,
    },
    Drag {
        center: Position,
        pointer: Position,
        modifiers: Modifiers,
    },
    Release,
}

/// What the caller should do after an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotaryEffect {
    None,
    Started { anchor: AnchorId },
    SetValue { anchor: AnchorId, value: f64 },
    Finished { anchor: AnchorId },
}

// ─── Reducer ─────────────────────────────────────────────────────────────────

/// Advance the rotary state machine by one event.
#[allow(clippy::float_cmp)]
#[must_use]
pub fn reduce(
    state: RotaryState,
    event: RotaryEvent,
    config: &RotaryConfig,
) -> (RotaryState, RotaryEffect) {
    match (state, event) {
        (
            _,
            RotaryEvent::Press {
                anchor,
                center,
                pointer,
                value,
            },
        ) => {
            let angle = pointer_angle(center, pointer);
            let adjustment = Adjustment {
                anchor,
                start_value: value.clamp(0.0, 1.0),
                previous_angle: angle,
                accumulated_angle: 0.0,
            };
            (
                RotaryState::Adjusting(adjustment),
                RotaryEffect::Started { anchor },
            )
        }

        (
            RotaryState::Adjusting(adj),
            RotaryEvent::Drag {
                center,
                pointer,
                modifiers,
            },
        ) => {
            let angle = pointer_angle(center, pointer);
            let accumulated = adj.accumulated_angle + wrap_angle(angle - adj.previous_angle);
            let delta = accumulated / TAU / config.sensitivity(modifiers);

            let mut value = (adj.start_value + delta).clamp(0.0, 1.0);
            if value > 1.0 - config.snap_epsilon {
                value = 1.0;
            } else if value < config.snap_epsilon {
                value = 0.0;
            }

            let pushing_past = (value == 1.0 && delta > 0.0) || (value == 0.0 && delta < 0.0);
            let next = if pushing_past {
                Adjustment {
                    start_value: value,
                    previous_angle: angle,
                    accumulated_angle: 0.0,
                    ..adj
                }
            } else {
                Adjustment {
                    previous_angle: angle,
                    accumulated_angle: accumulated,
                    ..adj
                }
            };

            (
                RotaryState::Adjusting(next),
                RotaryEffect::SetValue {
                    anchor: adj.anchor,
                    value,
                },
            )
        }

        (RotaryState::Adjusting(adj), RotaryEvent::Release) => (
            RotaryState::Idle,
            RotaryEffect::Finished { anchor: adj.anchor },
        ),

        (RotaryState::Idle, RotaryEvent::Drag { .. } | RotaryEvent::Release) => {
            (RotaryState::Idle, RotaryEffect::None)
        }
    }
}

/// Shortest signed form of an angle step between two `atan2` results.
#[must_use]
pub fn wrap_angle(delta: f64) -> f64 {
    if delta > PI {
        delta - TAU
    } else if delta < -PI {
        delta + TAU
    } else {
        delta
    }
}

/// Angle of `pointer` around `center` in the picker plane.
#[must_use]
pub fn pointer_angle(center: Position, pointer: Position) -> f64 {
    (pointer.y - center.y).atan2(pointer.x - center.x)
}

/// The first anchor, in path order, whose ring contains `pointer`.
#[must_use]
pub fn hit_ring(anchors: &AnchorSet, pointer: Position, config: &RotaryConfig) -> Option<AnchorId> {
    anchors
        .iter()
        .find(|a| config.in_ring(planar_distance(a.position(), pointer)))
        .map(|a| a.id())
}

// ─── Controller ──────────────────────────────────────────────────────────────

/// [`reduce`] with its state held in place.
#[derive(Debug, Clone, Default)]
pub struct RotaryController {
    state: RotaryState,
    config: RotaryConfig,
}

impl RotaryController {
    #[must_use]
    pub const fn new(config: RotaryConfig) -> Self {
        Self {
            state: RotaryState::Idle,
            config,
        }
    }

    #[must_use]
    pub const fn state(&self) -> RotaryState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &RotaryConfig {
        &self.config
    }

    #[must_use]
    pub const fn is_adjusting(&self) -> bool {
        matches!(self.state, RotaryState::Adjusting(_))
    }

    /// Feed one event and return the effect to apply.
    pub fn handle(&mut self, event: RotaryEvent) -> RotaryEffect {
        let (state, effect) = reduce(self.state, event, &self.config);
        self.state = state;
        effect
    }

    /// Drop any adjustment without an effect (its anchor went away).
    pub fn cancel(&mut self) {
        self.state = RotaryState::Idle;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use hue_space::Hsl;
    use pretty_assertions::assert_eq;

    const CENTER: Position = Position::new(0.5, 0.5, 0.5);
    const STEP: f64 = PI / 6.0;

    fn id() -> AnchorId {
        AnchorId::from_raw(0)
    }

    fn on_ring(angle: f64) -> Position {
        Position::new(0.04f64.mul_add(angle.cos(), 0.5), 0.04f64.mul_add(angle.sin(), 0.5), 0.0)
    }

    /// Press at angle 0 with `value`, then return the controller.
    fn pressed(value: f64) -> RotaryController {
        let mut c = RotaryController::default();
        let effect = c.handle(RotaryEvent::Press {
            anchor: id(),
            center: CENTER,
            pointer: on_ring(0.0),
            value,
        });
        assert_eq!(effect, RotaryEffect::Started { anchor: id() });
        c
    }

    fn drag(c: &mut RotaryController, angle: f64, modifiers: Modifiers) -> f64 {
        match c.handle(RotaryEvent::Drag {
            center: CENTER,
            pointer: on_ring(angle),
            modifiers,
        }) {
            RotaryEffect::SetValue { value, .. } => value,
            other => panic!("expected SetValue, got {other:?}"),
        }
    }

    // ── Angle helpers ────────────────────────────────────────

    #[test]
    fn wrap_angle_crosses_pi() {
        assert!((wrap_angle(1.9 * PI) - (-0.1 * PI)).abs() < 1e-12);
        assert!((wrap_angle(-1.9 * PI) - 0.1 * PI).abs() < 1e-12);
        assert_eq!(wrap_angle(0.5), 0.5);
        assert_eq!(wrap_angle(PI), PI);
    }

    #[test]
    fn ring_bounds() {
        let c = RotaryConfig::default();
        assert!(!c.in_ring(0.02));
        assert!(c.in_ring(0.021));
        assert!(c.in_ring(0.05));
        assert!(!c.in_ring(0.051));
        assert!(!c.in_ring(0.0));
    }

    #[test]
    fn hit_ring_picks_first_matching_anchor() {
        // Anchors at (0.1, 0.5) and (0.9, 0.5).
        let set = AnchorSet::new([Hsl::new(180.0, 0.8, 0.5), Hsl::new(0.0, 0.8, 0.5)], false)
            .unwrap();
        let cfg = RotaryConfig::default();
        let first = set.as_slice()[0].id();
        let second = set.as_slice()[1].id();
        assert_eq!(hit_ring(&set, Position::new(0.14, 0.5, 0.0), &cfg), Some(first));
        assert_eq!(hit_ring(&set, Position::new(0.9, 0.53, 0.0), &cfg), Some(second));
        // Inside the dead centre, and outside the ring.
        assert_eq!(hit_ring(&set, Position::new(0.11, 0.5, 0.0), &cfg), None);
        assert_eq!(hit_ring(&set, Position::new(0.5, 0.5, 0.0), &cfg), None);
    }

    // ── Reducer ──────────────────────────────────────────────

    #[test]
    fn quarter_turn_moves_a_quarter() {
        let mut c = pressed(0.25);
        let v = drag(&mut c, PI / 2.0, Modifiers::empty());
        assert!((v - 0.5).abs() < 1e-9);
    }

    #[test]
    fn shift_is_finer() {
        let mut c = pressed(0.25);
        let v = drag(&mut c, PI / 2.0, Modifiers::SHIFT);
        assert!((v - 0.35).abs() < 1e-9);
    }

    #[test]
    fn accumulates_across_the_pi_boundary() {
        let mut c = pressed(0.1);
        // Eight steps of 30° pass through ±π.
        let v = (1..=8).fold(0.0, |_, i| drag(&mut c, f64::from(i) * STEP, Modifiers::empty()));
        assert!((v - (0.1 + 8.0 / 12.0)).abs() < 1e-9, "{v}");
    }

    /// Drive 0.5 past 1.0: it lands on exactly 1.0, stays there while the
    /// drag continues, and drops on the first reverse step.
    #[test]
    fn upper_bound_snaps_and_releases_immediately() {
        let mut c = pressed(0.5);
        let v = (1..=6).fold(0.0, |_, i| drag(&mut c, f64::from(i) * STEP, Modifiers::empty()));
        assert_eq!(v, 1.0);

        for i in 7..=12 {
            let v = drag(&mut c, f64::from(i) * STEP, Modifiers::empty());
            assert_eq!(v, 1.0, "step {i}");
        }

        let back = drag(&mut c, 11.0 * STEP, Modifiers::empty());
        assert!(back < 1.0);
        assert!((back - (1.0 - 1.0 / 12.0)).abs() < 1e-9, "{back}");
    }

    #[test]
    fn lower_bound_snaps_and_releases_immediately() {
        let mut c = pressed(0.3);
        let v = (1..=8).fold(1.0, |_, i| drag(&mut c, -f64::from(i) * STEP, Modifiers::empty()));
        assert_eq!(v, 0.0);

        let forward = drag(&mut c, -7.0 * STEP, Modifiers::empty());
        assert!((forward - 1.0 / 12.0).abs() < 1e-9, "{forward}");
    }

    #[test]
    fn near_bound_snaps() {
        let mut c = pressed(0.0);
        // 3° is 1/120 of a turn, under the 0.01 snap.
        let v = drag(&mut c, 3f64.to_radians(), Modifiers::empty());
        assert_eq!(v, 0.0);
    }

    #[test]
    fn release_finishes() {
        let mut c = pressed(0.5);
        assert_eq!(c.handle(RotaryEvent::Release), RotaryEffect::Finished { anchor: id() });
        assert_eq!(c.state(), RotaryState::Idle);
        assert!(!c.is_adjusting());
    }

    #[test]
    fn idle_ignores_drag_and_release() {
        let state = RotaryState::Idle;
        let cfg = RotaryConfig::default();
        let drag = RotaryEvent::Drag {
            center: CENTER,
            pointer: on_ring(1.0),
            modifiers: Modifiers::empty(),
        };
        assert_eq!(reduce(state, drag, &cfg), (RotaryState::Idle, RotaryEffect::None));
        assert_eq!(
            reduce(state, RotaryEvent::Release, &cfg),
            (RotaryState::Idle, RotaryEffect::None)
        );
    }

    #[test]
    fn press_captures_clamped_start() {
        let c = pressed(1.7);
        match c.state() {
            RotaryState::Adjusting(adj) => {
                assert_eq!(adj.start_value, 1.0);
                assert_eq!(adj.accumulated_angle, 0.0);
            }
            RotaryState::Idle => panic!("expected Adjusting"),
        }
    }
}
