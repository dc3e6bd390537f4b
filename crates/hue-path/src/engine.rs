//! Interpolation engine: turns an anchor set into a dense color sequence.
//!
//! The path is a chain of segments, anchor `i` to anchor `i + 1`, plus one
//! segment from the last anchor back to the first when the loop is closed.
//! Each segment is a chord through the color cylinder. Every axis of that
//! chord is walked with its own easing curve, so a segment bends even
//! though each coordinate moves monotonically from one end to the other.
//!
//! # Sample layout
//!
//! The sample budget is shared equally between segments; the remainder goes
//! one extra sample each to the earliest segments. A segment holding `m`
//! samples places them at `t = k/(m − 1)` for `k = 0..m`, or at `t = 0`
//! when it holds one. Interior anchors therefore appear twice, once as the
//! end of a segment and once as the start of the next.
//!
//! ```text
//!   open, 3 anchors, 6 points         closed, 3 anchors, 6 points
//!
//!   A ─ · ─ B   B ─ · ─ C             A ── B   B ── C   C ── · ──┐
//!   segment 0   segment 1             └──────────────────────────┘
//!   t = 0, ½, 1 on each               closing segment at t = 0, ½
//! ```
//!
//! The closing segment of a loop spaces its samples at `t = k/m` so the
//! path stops short of the first anchor instead of repeating it. An open
//! path always finishes on its last anchor, even when the budget runs out
//! before the last segment.
//!
//! # Caching
//!
//! Samples are computed on first request and kept until the next mutation.
//! Every mutation bumps [`ColorPath::revision`], which callers can use to
//! skip redundant redraws.

use std::cell::OnceCell;

use hue_space::cylinder::{self, Position};
use hue_space::{AxisFunctions, Hsl, PositionFunction};
use rand::Rng;
use serde::Serialize;

use crate::anchor::{Anchor, AnchorId, AnchorRef, AnchorSet, AnchorSpec};
use crate::config::{PathConfig, PathSnapshot, validate_num_points};
use crate::error::Result;
use crate::random;

/// One concrete sample along the path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlattenedPoint {
    /// Interpolated cylinder position.
    pub position: Position,
    /// Color at that position.
    pub color: Hsl,
    /// Index of the segment the sample lies on.
    pub segment: usize,
    /// Raw progress within the segment, before easing.
    pub t: f64,
}

/// A cylinder axis, for addressing one position function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

// ---------------------------------------------------------------------------
// ColorPath
// ---------------------------------------------------------------------------

/// Anchors plus configuration: the whole state of one palette.
#[derive(Debug, Clone)]
pub struct ColorPath {
    anchors: AnchorSet,
    config: PathConfig,
    revision: u64,
    samples: OnceCell<Vec<FlattenedPoint>>,
}

impl ColorPath {
    /// Build a path through `anchor_colors`.
    ///
    /// # Errors
    ///
    /// [`PathError::MinimumAnchors`] with fewer than two colors,
    /// [`PathError::InvalidSampleCount`] when `config.num_points` is zero.
    ///
    /// [`PathError::MinimumAnchors`]: crate::PathError::MinimumAnchors
    /// [`PathError::InvalidSampleCount`]: crate::PathError::InvalidSampleCount
    pub fn new<I>(anchor_colors: I, config: PathConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Hsl>,
    {
        config.validate()?;
        let anchors = AnchorSet::new(anchor_colors, config.inverted_lightness)?;
        tracing::debug!(
            anchors = anchors.len(),
            num_points = config.num_points,
            closed_loop = config.closed_loop,
            "color path created"
        );
        Ok(Self {
            anchors,
            config,
            revision: 0,
            samples: OnceCell::new(),
        })
    }

    /// Two random anchors from [`random::random_hsl_pair`] with a random
    /// starting hue.
    ///
    /// # Errors
    ///
    /// [`PathError::InvalidSampleCount`] when `config.num_points` is zero.
    ///
    /// [`PathError::InvalidSampleCount`]: crate::PathError::InvalidSampleCount
    pub fn random_pair<R: Rng + ?Sized>(rng: &mut R, config: PathConfig) -> Result<Self> {
        let start_hue = rng.random::<f64>() * 360.0;
        Self::new(random::random_hsl_pair(start_hue, rng), config)
    }

    /// Rebuild a path from a snapshot.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn from_snapshot(snapshot: &PathSnapshot) -> Result<Self> {
        Self::new(snapshot.anchors.iter().copied(), snapshot.config)
    }

    #[must_use]
    pub fn snapshot(&self) -> PathSnapshot {
        PathSnapshot {
            anchors: self.anchors.colors(),
            config: self.config,
        }
    }

    // ── Queries ──────────────────────────────────────────────

    /// Anchors in path order, with their positions for rendering.
    #[must_use]
    pub const fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    #[must_use]
    pub const fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Monotonic counter bumped by every change to anchors or config.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of segments: one per consecutive anchor pair, plus the
    /// closing segment in a loop.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        if self.config.closed_loop {
            self.anchors.len()
        } else {
            self.anchors.len() - 1
        }
    }

    /// All samples along the path, computed on first use after a change.
    #[must_use]
    pub fn samples(&self) -> &[FlattenedPoint] {
        self.samples.get_or_init(|| self.compute_samples())
    }

    /// Sample colors in path order.
    #[must_use]
    pub fn colors(&self) -> Vec<Hsl> {
        self.samples().iter().map(|p| p.color).collect()
    }

    /// The sample at global progress `t`, without resampling the path.
    ///
    /// `t` is clamped to `[0, 1]` (NaN counts as 0). In a closed loop,
    /// `t = 1` is back on the first anchor.
    #[must_use]
    pub fn point_at(&self, t: f64) -> FlattenedPoint {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let segments = self.segment_count();
        let scaled = t * segments as f64;
        let segment = (scaled.floor() as usize).min(segments - 1);
        self.sample(segment, scaled - segment as f64)
    }

    /// The color at global progress `t`; see [`point_at`](Self::point_at).
    #[must_use]
    pub fn color_at(&self, t: f64) -> Hsl {
        self.point_at(t).color
    }

    /// The anchor nearest `position` in the disc plane, within `max_distance`.
    #[must_use]
    pub fn nearest_anchor(&self, position: Position, max_distance: f64) -> Option<&Anchor> {
        self.anchors.nearest(position, max_distance)
    }

    // ── Anchor mutation ──────────────────────────────────────

    /// Append an anchor.
    pub fn add_anchor(&mut self, spec: AnchorSpec) -> AnchorId {
        let id = self.anchors.add(spec);
        self.invalidate();
        id
    }

    /// Insert an anchor at a path index (clamped to the end).
    pub fn insert_anchor(&mut self, index: usize, spec: AnchorSpec) -> AnchorId {
        let id = self.anchors.insert(index, spec);
        self.invalidate();
        id
    }

    /// # Errors
    ///
    /// See [`AnchorSet::remove`].
    pub fn remove_anchor(&mut self, anchor: AnchorRef) -> Result<Anchor> {
        let removed = self.anchors.remove(anchor)?;
        self.invalidate();
        Ok(removed)
    }

    /// # Errors
    ///
    /// See [`AnchorSet::update`].
    pub fn update_anchor(&mut self, anchor: AnchorRef, spec: AnchorSpec) -> Result<AnchorId> {
        let id = self.anchors.update(anchor, spec)?;
        self.invalidate();
        Ok(id)
    }

    /// Rotate every anchor's hue by `degrees`.
    pub fn shift_hue(&mut self, degrees: f64) {
        self.anchors.shift_hue(degrees);
        self.invalidate();
    }

    /// Give every anchor the same saturation.
    pub fn set_saturation_all(&mut self, saturation: f64) {
        self.anchors.set_saturation_all(saturation);
        self.invalidate();
    }

    /// Replace every anchor color with `f(color)`.
    pub fn recolor_all(&mut self, f: impl FnMut(Hsl) -> Hsl) {
        self.anchors.recolor_all(f);
        self.invalidate();
    }

    // ── Configuration ────────────────────────────────────────

    /// # Errors
    ///
    /// [`PathError::InvalidSampleCount`] for zero; the old value is kept.
    ///
    /// [`PathError::InvalidSampleCount`]: crate::PathError::InvalidSampleCount
    pub fn set_num_points(&mut self, num_points: usize) -> Result<()> {
        validate_num_points(num_points)?;
        if self.config.num_points != num_points {
            self.config.num_points = num_points;
            tracing::debug!(num_points, "sample count changed");
            self.invalidate();
        }
        Ok(())
    }

    pub fn set_closed_loop(&mut self, closed_loop: bool) {
        if self.config.closed_loop != closed_loop {
            self.config.closed_loop = closed_loop;
            tracing::debug!(closed_loop, "loop mode changed");
            self.invalidate();
        }
    }

    /// Flip lightness inversion. Anchor colors are untouched; positions and
    /// therefore samples are re-derived.
    pub fn set_inverted_lightness(&mut self, inverted: bool) {
        if self.config.inverted_lightness != inverted {
            self.config.inverted_lightness = inverted;
            self.anchors.set_inverted_lightness(inverted);
            tracing::debug!(inverted, "lightness inversion changed");
            self.invalidate();
        }
    }

    pub fn set_mirror_alternate_segments(&mut self, mirror: bool) {
        if self.config.mirror_alternate_segments != mirror {
            self.config.mirror_alternate_segments = mirror;
            self.invalidate();
        }
    }

    pub fn set_position_function(&mut self, axis: Axis, f: PositionFunction) {
        let slot = match axis {
            Axis::X => &mut self.config.functions.x,
            Axis::Y => &mut self.config.functions.y,
            Axis::Z => &mut self.config.functions.z,
        };
        if *slot != f {
            *slot = f;
            tracing::debug!(?axis, function = %f, "position function changed");
            self.invalidate();
        }
    }

    /// Set one axis by function name.
    ///
    /// # Errors
    ///
    /// [`PathError::UnknownFunction`] if the name is not registered; the
    /// current function stays in place.
    ///
    /// [`PathError::UnknownFunction`]: crate::PathError::UnknownFunction
    pub fn set_position_function_named(&mut self, axis: Axis, name: &str) -> Result<()> {
        let f = PositionFunction::from_name(name)?;
        self.set_position_function(axis, f);
        Ok(())
    }

    pub fn set_position_function_x(&mut self, f: PositionFunction) {
        self.set_position_function(Axis::X, f);
    }

    pub fn set_position_function_y(&mut self, f: PositionFunction) {
        self.set_position_function(Axis::Y, f);
    }

    pub fn set_position_function_z(&mut self, f: PositionFunction) {
        self.set_position_function(Axis::Z, f);
    }

    pub fn set_position_functions(&mut self, functions: AxisFunctions) {
        if self.config.functions != functions {
            self.config.functions = functions;
            self.invalidate();
        }
    }

    // ── Internals ────────────────────────────────────────────

    fn invalidate(&mut self) {
        self.revision += 1;
        self.samples.take();
    }

    fn compute_samples(&self) -> Vec<FlattenedPoint> {
        let num_points = self.config.num_points;
        let segments = self.segment_count();
        let mut out = Vec::with_capacity(num_points);

        let closing = self.config.closed_loop.then_some(segments - 1);
        for (segment, count) in distribute(num_points, segments).into_iter().enumerate() {
            // The closing segment never reaches t = 1: that is the first anchor.
            let steps = if closing == Some(segment) {
                count
            } else {
                count.saturating_sub(1)
            };
            for k in 0..count {
                let t = if steps == 0 { 0.0 } else { k as f64 / steps as f64 };
                out.push(self.sample(segment, t));
            }
        }

        // A short budget can leave the last segment empty or at t = 0.
        if !self.config.closed_loop
            && num_points > 1
            && let Some(last) = out.last_mut()
        {
            *last = self.sample(segments - 1, 1.0);
        }

        tracing::trace!(
            num_points,
            segments,
            closed_loop = self.config.closed_loop,
            revision = self.revision,
            "path resampled"
        );
        out
    }

    /// Interpolate on `segment` at raw progress `t`.
    #[allow(clippy::float_cmp)]
    fn sample(&self, segment: usize, t: f64) -> FlattenedPoint {
        let anchors = self.anchors.as_slice();
        let a = &anchors[segment];
        let b = &anchors[(segment + 1) % anchors.len()];

        let reversed = self.config.mirror_alternate_segments && segment % 2 == 1;
        let (tx, ty, tz) = self.config.functions.apply(t, reversed);
        let position = a.position().lerp_per_axis(b.position(), tx, ty, tz);

        // On an endpoint, hand back the anchor's own color: exact, and it
        // keeps the hue of an achromatic anchor that the disc centre loses.
        let color = if tx == 0.0 && ty == 0.0 && tz == 0.0 {
            a.color()
        } else if tx == 1.0 && ty == 1.0 && tz == 1.0 {
            b.color()
        } else {
            cylinder::from_position(position, self.config.inverted_lightness)
        };

        FlattenedPoint {
            position,
            color,
            segment,
            t,
        }
    }
}

/// Split `budget` samples over `segments`: equal shares, remainder to the
/// earliest segments one each.
#[must_use]
pub fn distribute(budget: usize, segments: usize) -> Vec<usize> {
    if segments == 0 {
        return Vec::new();
    }
    let base = budget / segments;
    let extra = budget % segments;
    (0..segments).map(|i| base + usize::from(i < extra)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
