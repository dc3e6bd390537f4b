//! Interactive editing session over one [`ColorPath`].
//!
//! Holds the pointer state a picker needs between events: the grabbed
//! anchor, the last selected anchor, the rotary adjustment, the hovered
//! ring. Pointer coordinates are normalized to the picker square, so they
//! share units with anchor positions.
//!
//! ```text
//!   pointer_down ──▶ ring hit? ──yes──▶ rotary adjusting ─┐
//!        │               │                                 │ pointer_move
//!        │               no                                ▼
//!        │               ▼                        saturation updates
//!        │        grab nearest anchor ──▶ pointer_move drags it (x, y)
//!        │
//!   pointer_up ──▶ release everything, refresh ring hover
//! ```
//!
//! Methods that can change what a renderer shows return `true` when they did.

use hue_space::{Hsl, Position};

use crate::anchor::{Anchor, AnchorId, AnchorRef, AnchorSpec};
use crate::engine::ColorPath;
use crate::error::Result;
use crate::rotary::{
    self, Modifiers, RotaryConfig, RotaryController, RotaryEffect, RotaryEvent, RotaryState,
};

/// Grab radius while rotary rings are shown.
pub const GRAB_DISTANCE_WITH_RINGS: f64 = 0.05;
/// Grab radius with rings hidden.
pub const GRAB_DISTANCE: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct Session {
    path: ColorPath,
    rotary: RotaryController,
    grabbed: Option<AnchorId>,
    selected: Option<AnchorId>,
    pointer: (f64, f64),
    rings_enabled: bool,
    ring_hover: Option<AnchorId>,
}

impl Session {
    /// A session with rings enabled and the default rotary config.
    #[must_use]
    pub fn new(path: ColorPath) -> Self {
        Self::with_rotary_config(path, RotaryConfig::default())
    }

    #[must_use]
    pub const fn with_rotary_config(path: ColorPath, config: RotaryConfig) -> Self {
        Self {
            path,
            rotary: RotaryController::new(config),
            grabbed: None,
            selected: None,
            pointer: (0.0, 0.0),
            rings_enabled: true,
            ring_hover: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────

    #[must_use]
    pub const fn path(&self) -> &ColorPath {
        &self.path
    }

    /// Direct access for edits outside the pointer model.
    pub const fn path_mut(&mut self) -> &mut ColorPath {
        &mut self.path
    }

    #[must_use]
    pub fn into_path(self) -> ColorPath {
        self.path
    }

    #[must_use]
    pub const fn grabbed(&self) -> Option<AnchorId> {
        self.grabbed
    }

    /// The anchor that keyboard-style edits (remove, recolor) act on.
    #[must_use]
    pub const fn selected(&self) -> Option<AnchorId> {
        self.selected
    }

    #[must_use]
    pub const fn ring_hover(&self) -> Option<AnchorId> {
        self.ring_hover
    }

    #[must_use]
    pub const fn rings_enabled(&self) -> bool {
        self.rings_enabled
    }

    #[must_use]
    pub const fn rotary_state(&self) -> RotaryState {
        self.rotary.state()
    }

    /// Last pointer position seen by any pointer event.
    #[must_use]
    pub const fn pointer(&self) -> (f64, f64) {
        self.pointer
    }

    // ── Pointer events ───────────────────────────────────────

    /// Press at `(x, y)`.
    ///
    /// A ring hit starts a rotary adjustment. Otherwise the nearest anchor
    /// in grab range is grabbed and selected; pressing again while holding
    /// one lets go of it.
    pub fn pointer_down(&mut self, x: f64, y: f64, _modifiers: Modifiers) -> bool {
        self.pointer = (x, y);
        let at = Position::new(x, y, 0.0);

        if self.rings_enabled {
            let hit = rotary::hit_ring(self.path.anchors(), at, self.rotary.config())
                .and_then(|id| self.path.anchors().get(id));
            if let Some(anchor) = hit {
                let event = RotaryEvent::Press {
                    anchor: anchor.id(),
                    center: anchor.position(),
                    pointer: at,
                    value: anchor.color().s,
                };
                self.ring_hover = Some(anchor.id());
                self.rotary.handle(event);
                return true;
            }
        }

        if self.grabbed.is_some() {
            self.grabbed = None;
        } else {
            let reach = if self.rings_enabled {
                GRAB_DISTANCE_WITH_RINGS
            } else {
                GRAB_DISTANCE
            };
            self.grabbed = self.path.nearest_anchor(at, reach).map(Anchor::id);
            self.selected = self.grabbed;
        }
        false
    }

    /// Move to `(x, y)`: turn the active ring, drag the grabbed anchor, or
    /// track ring hover, in that order of precedence.
    ///
    /// # Errors
    ///
    /// Propagates anchor update failures; a grabbed or adjusted anchor that
    /// has been removed is dropped instead.
    pub fn pointer_move(&mut self, x: f64, y: f64, modifiers: Modifiers) -> Result<bool> {
        self.pointer = (x, y);
        let at = Position::new(x, y, 0.0);

        if let RotaryState::Adjusting(adj) = self.rotary.state() {
            let Some(anchor) = self.path.anchors().get(adj.anchor) else {
                self.rotary.cancel();
                return Ok(false);
            };
            let (center, color) = (anchor.position(), anchor.color());
            let effect = self.rotary.handle(RotaryEvent::Drag {
                center,
                pointer: at,
                modifiers,
            });
            return self.apply_rotary(effect, color);
        }

        if let Some(id) = self.grabbed {
            let Some(anchor) = self.path.anchors().get(id) else {
                self.grabbed = None;
                return Ok(false);
            };
            let position = Position::new(x, y, anchor.position().z);
            self.path.update_anchor(
                id.into(),
                AnchorSpec::Position {
                    position,
                    clamp: true,
                },
            )?;
            return Ok(true);
        }

        Ok(self.refresh_hover(at))
    }

    /// Release at `(x, y)`: ends any rotary adjustment and drops the grab.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.pointer = (x, y);
        let finished = matches!(
            self.rotary.handle(RotaryEvent::Release),
            RotaryEffect::Finished { .. }
        );
        self.grabbed = None;
        let hover_changed = self.refresh_hover(Position::new(x, y, 0.0));
        finished || hover_changed
    }

    // ── Editing ──────────────────────────────────────────────

    /// Add an anchor under the last pointer position and select it. The
    /// pointer's vertical coordinate doubles as the height.
    pub fn add_anchor_at_pointer(&mut self) -> AnchorId {
        let (x, y) = self.pointer;
        let id = self.path.add_anchor(AnchorSpec::Position {
            position: Position::new(x, y, y),
            clamp: true,
        });
        self.selected = Some(id);
        id
    }

    /// Remove the selected anchor. `Ok(None)` when nothing is selected.
    ///
    /// # Errors
    ///
    /// [`PathError::MinimumAnchors`](crate::PathError::MinimumAnchors) with
    /// two anchors left; the selection is kept.
    pub fn remove_selected(&mut self) -> Result<Option<Anchor>> {
        let Some(id) = self.selected else {
            return Ok(None);
        };
        let removed = self.path.remove_anchor(AnchorRef::Id(id))?;
        self.selected = None;
        if self.grabbed == Some(id) {
            self.grabbed = None;
        }
        if self.ring_hover == Some(id) {
            self.ring_hover = None;
        }
        Ok(Some(removed))
    }

    /// Recolor the selected anchor. Returns `false` when nothing is selected.
    ///
    /// # Errors
    ///
    /// [`PathError::AnchorNotFound`](crate::PathError::AnchorNotFound) if
    /// the selection went stale through [`path_mut`](Self::path_mut).
    pub fn set_selected_color(&mut self, color: Hsl) -> Result<bool> {
        let Some(id) = self.selected else {
            return Ok(false);
        };
        self.path.update_anchor(AnchorRef::Id(id), color.into())?;
        Ok(true)
    }

    /// Shift every hue by `degrees`.
    pub fn nudge_hue(&mut self, degrees: f64) {
        self.path.shift_hue(degrees);
    }

    /// Show or hide the rotary rings; returns the new state.
    pub fn toggle_rings(&mut self) -> bool {
        self.rings_enabled = !self.rings_enabled;
        if !self.rings_enabled {
            self.ring_hover = None;
        }
        tracing::debug!(rings_enabled = self.rings_enabled, "rings toggled");
        self.rings_enabled
    }

    // ── Internals ────────────────────────────────────────────

    fn apply_rotary(&mut self, effect: RotaryEffect, current: Hsl) -> Result<bool> {
        match effect {
            RotaryEffect::SetValue { anchor, value } => {
                self.path
                    .update_anchor(anchor.into(), current.with_saturation(value).into())?;
                Ok(true)
            }
            RotaryEffect::None | RotaryEffect::Started { .. } | RotaryEffect::Finished { .. } => {
                Ok(false)
            }
        }
    }

    fn refresh_hover(&mut self, at: Position) -> bool {
        if !self.rings_enabled {
            return false;
        }
        let hover = rotary::hit_ring(self.path.anchors(), at, self.rotary.config());
        if hover == self.ring_hover {
            return false;
        }
        self.ring_hover = hover;
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PathConfig, PathError};
    use pretty_assertions::assert_eq;

    /// Anchors at (0.1, 0.5) and (0.9, 0.5).
    fn session() -> Session {
        let path = ColorPath::new(
            [Hsl::new(180.0, 0.8, 0.5), Hsl::new(0.0, 0.8, 0.5)],
            PathConfig::default(),
        )
        .unwrap();
        Session::new(path)
    }

    fn first(s: &Session) -> AnchorId {
        s.path().anchors().as_slice()[0].id()
    }

    const NONE: Modifiers = Modifiers::empty();

    #[test]
    fn grab_and_drag_keeps_height() {
        let mut s = session();
        // Dead centre of the anchor is inside the inner ring edge: a grab.
        assert!(!s.pointer_down(0.1, 0.5, NONE));
        assert_eq!(s.grabbed(), Some(first(&s)));
        assert_eq!(s.selected(), Some(first(&s)));

        assert!(s.pointer_move(0.5, 0.2, NONE).unwrap());
        let anchor = s.path().anchors().as_slice()[0];
        assert!((anchor.position().x - 0.5).abs() < 1e-9);
        assert!((anchor.position().y - 0.2).abs() < 1e-9);
        assert!((anchor.position().z - 0.5).abs() < 1e-12);
        assert!((anchor.color().s - 0.6).abs() < 1e-9);

        s.pointer_up(0.5, 0.2);
        assert_eq!(s.grabbed(), None);
        assert_eq!(s.selected(), Some(first(&s)));
    }

    #[test]
    fn drag_outside_disc_is_clamped() {
        let mut s = session();
        s.pointer_down(0.1, 0.5, NONE);
        s.pointer_move(-0.5, 0.5, NONE).unwrap();
        let c = s.path().anchors().as_slice()[0].color();
        assert!((c.s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn second_press_releases_grab() {
        let mut s = session();
        s.pointer_down(0.1, 0.5, NONE);
        assert!(s.grabbed().is_some());
        s.pointer_down(0.5, 0.5, NONE);
        assert_eq!(s.grabbed(), None);
        assert_eq!(s.selected(), Some(first(&s)));
    }

    #[test]
    fn press_on_empty_space_clears_selection() {
        let mut s = session();
        s.pointer_down(0.1, 0.5, NONE);
        s.pointer_up(0.1, 0.5);
        s.pointer_down(0.5, 0.5, NONE);
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn grab_reach_depends_on_rings() {
        let mut s = session();
        // 0.08 away: out of reach with rings, in reach without.
        s.pointer_down(0.1, 0.58, NONE);
        assert_eq!(s.grabbed(), None);
        assert!(!s.toggle_rings());
        s.pointer_down(0.1, 0.58, NONE);
        assert_eq!(s.grabbed(), Some(first(&s)));
    }

    #[test]
    fn ring_press_turns_saturation() {
        let mut s = session();
        assert!(s.pointer_down(0.14, 0.5, NONE));
        assert!(matches!(s.rotary_state(), RotaryState::Adjusting(_)));
        assert_eq!(s.grabbed(), None);
        assert_eq!(s.ring_hover(), Some(first(&s)));

        // Quarter turn around the anchor centre: +0.25, capped at 1.
        assert!(s.pointer_move(0.1, 0.54, NONE).unwrap());
        let c = s.path().anchors().as_slice()[0].color();
        assert_eq!(c.s, 1.0);
        assert_eq!(c.h, 180.0);
        assert_eq!(c.l, 0.5);

        assert!(s.pointer_up(0.1, 0.54));
        assert_eq!(s.rotary_state(), RotaryState::Idle);
    }

    #[test]
    fn rings_off_press_grabs_instead() {
        let mut s = session();
        s.toggle_rings();
        s.pointer_down(0.14, 0.5, NONE);
        assert_eq!(s.rotary_state(), RotaryState::Idle);
        assert_eq!(s.grabbed(), Some(first(&s)));
    }

    #[test]
    fn hover_tracks_ring() {
        let mut s = session();
        assert!(s.pointer_move(0.9, 0.53, NONE).unwrap());
        let second = s.path().anchors().as_slice()[1].id();
        assert_eq!(s.ring_hover(), Some(second));
        assert!(!s.pointer_move(0.9, 0.535, NONE).unwrap());
        assert!(s.pointer_move(0.5, 0.5, NONE).unwrap());
        assert_eq!(s.ring_hover(), None);
    }

    #[test]
    fn add_at_pointer_selects_new_anchor() {
        let mut s = session();
        s.pointer_move(0.5, 0.25, NONE).unwrap();
        let id = s.add_anchor_at_pointer();
        assert_eq!(s.selected(), Some(id));
        let anchor = s.path().anchors().get(id).copied().unwrap();
        assert!((anchor.position().z - 0.25).abs() < 1e-12);
        assert!((anchor.color().l - 0.25).abs() < 1e-12);
        assert_eq!(s.path().anchors().len(), 3);
    }

    #[test]
    fn remove_selected_respects_minimum() {
        let mut s = session();
        s.pointer_move(0.5, 0.5, NONE).unwrap();
        s.add_anchor_at_pointer();
        assert!(s.remove_selected().unwrap().is_some());
        assert_eq!(s.selected(), None);
        assert_eq!(s.remove_selected().unwrap(), None);

        s.pointer_down(0.1, 0.5, NONE);
        let err = s.remove_selected().unwrap_err();
        assert_eq!(err, PathError::MinimumAnchors { remaining: 1 });
        assert_eq!(s.selected(), Some(first(&s)));
    }

    #[test]
    fn set_selected_color_recolors() {
        let mut s = session();
        assert!(!s.set_selected_color(Hsl::new(10.0, 0.5, 0.5)).unwrap());
        s.pointer_down(0.9, 0.5, NONE);
        assert!(s.set_selected_color(Hsl::new(10.0, 0.5, 0.5)).unwrap());
        assert_eq!(
            s.path().anchors().as_slice()[1].color(),
            Hsl::new(10.0, 0.5, 0.5)
        );
    }

    #[test]
    fn nudge_hue_shifts_all() {
        let mut s = session();
        s.nudge_hue(-2.0);
        let hues: Vec<f64> = s.path().anchors().iter().map(|a| a.color().h).collect();
        assert!((hues[0] - 178.0).abs() < 1e-12);
        assert!((hues[1] - 358.0).abs() < 1e-12);
    }

    #[test]
    fn removed_anchor_drops_grab() {
        let mut s = session();
        s.pointer_move(0.5, 0.5, NONE).unwrap();
        let id = s.add_anchor_at_pointer();
        s.pointer_down(0.5, 0.5, NONE);
        assert_eq!(s.grabbed(), Some(id));
        s.path_mut().remove_anchor(id.into()).unwrap();
        assert!(!s.pointer_move(0.6, 0.6, NONE).unwrap());
        assert_eq!(s.grabbed(), None);
    }

    #[test]
    fn into_path_keeps_edits() {
        let mut s = session();
        s.path_mut().shift_hue(30.0);
        let revision = s.path().revision();

        let path = s.into_path();
        assert_eq!(path.revision(), revision);
        assert_eq!(path.anchors().as_slice()[0].color(), Hsl::new(210.0, 0.8, 0.5));
        assert_eq!(path.anchors().len(), 2);
    }
}
