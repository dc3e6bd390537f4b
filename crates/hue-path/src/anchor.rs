//! Anchor set: the ordered list of colors a path passes through.
//!
//! Anchors are addressed by [`AnchorId`], an opaque handle handed out from a
//! monotonic counter. Ids survive insertions and removals of *other*
//! anchors, so a caller can hold "the last selected anchor" across any
//! number of edits without it silently pointing at a neighbour.
//!
//! Each anchor's cylinder position is derived from its color and the set's
//! inversion flag. It is recomputed on every color change and every flag
//! change, and never written on its own.

use std::fmt;

use hue_space::cylinder::{self, Position};
use hue_space::Hsl;

use crate::error::{MIN_ANCHORS, PathError, Result};

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Stable identity of an anchor within one [`AnchorSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(u32);

impl AnchorId {
    /// Rebuild an id from its raw value (e.g. one echoed back by a UI).
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a caller points at an anchor: by identity or by path index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorRef {
    Id(AnchorId),
    Index(usize),
}

impl From<AnchorId> for AnchorRef {
    fn from(id: AnchorId) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for AnchorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Index(i) => write!(f, "index {i}"),
        }
    }
}

/// Where a new or updated anchor should sit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorSpec {
    /// An explicit color. Hue wraps, saturation and lightness clamp.
    Color(Hsl),
    /// A point on the cylinder, converted back to a color. With `clamp`
    /// the point is first pulled onto the solid cylinder; without it a
    /// point outside the disc keeps its oversaturated color.
    Position { position: Position, clamp: bool },
}

impl From<Hsl> for AnchorSpec {
    fn from(color: Hsl) -> Self {
        Self::Color(color)
    }
}

// ---------------------------------------------------------------------------
// Anchor
// ---------------------------------------------------------------------------

/// One anchor: a color plus its derived cylinder position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    id: AnchorId,
    color: Hsl,
    position: Position,
}

impl Anchor {
    fn new(id: AnchorId, color: Hsl, inverted_lightness: bool) -> Self {
        Self {
            id,
            color,
            position: cylinder::to_position(color, inverted_lightness),
        }
    }

    #[must_use]
    pub const fn id(&self) -> AnchorId {
        self.id
    }

    #[must_use]
    pub const fn color(&self) -> Hsl {
        self.color
    }

    /// Cylinder position, for rendering and hit-testing.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    fn recolor(&mut self, color: Hsl, inverted_lightness: bool) {
        self.color = color;
        self.position = cylinder::to_position(color, inverted_lightness);
    }
}

// ---------------------------------------------------------------------------
// AnchorSet
// ---------------------------------------------------------------------------

/// Ordered anchors; insertion order is path order. Never fewer than two.
#[derive(Debug, Clone)]
pub struct AnchorSet {
    anchors: Vec<Anchor>,
    next_id: u32,
    inverted_lightness: bool,
}

impl AnchorSet {
    /// Build a set from colors, in path order.
    ///
    /// # Errors
    ///
    /// [`PathError::MinimumAnchors`] if fewer than two colors are given.
    pub fn new<I>(colors: I, inverted_lightness: bool) -> Result<Self>
    where
        I: IntoIterator<Item = Hsl>,
    {
        let mut set = Self {
            anchors: Vec::new(),
            next_id: 0,
            inverted_lightness,
        };
        for color in colors {
            set.add(AnchorSpec::Color(color));
        }
        if set.anchors.len() < MIN_ANCHORS {
            return Err(PathError::MinimumAnchors {
                remaining: set.anchors.len(),
            });
        }
        Ok(set)
    }

    // ── Queries ──────────────────────────────────────────────

    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Always `false` for a constructed set; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Anchor> {
        self.anchors.iter()
    }

    /// Anchor colors in path order.
    #[must_use]
    pub fn colors(&self) -> Vec<Hsl> {
        self.anchors.iter().map(Anchor::color).collect()
    }

    #[must_use]
    pub fn get(&self, id: AnchorId) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn by_index(&self, index: usize) -> Option<&Anchor> {
        self.anchors.get(index)
    }

    #[must_use]
    pub fn index_of(&self, id: AnchorId) -> Option<usize> {
        self.anchors.iter().position(|a| a.id == id)
    }

    /// Resolve a reference to a path index.
    ///
    /// # Errors
    ///
    /// [`PathError::AnchorNotFound`] for an unknown id or out-of-range index.
    pub fn resolve(&self, anchor: AnchorRef) -> Result<usize> {
        let index = match anchor {
            AnchorRef::Id(id) => self.index_of(id),
            AnchorRef::Index(i) => (i < self.anchors.len()).then_some(i),
        };
        index.ok_or(PathError::AnchorNotFound { anchor })
    }

    #[must_use]
    pub const fn inverted_lightness(&self) -> bool {
        self.inverted_lightness
    }

    /// The anchor closest to `query` in the `(x, y)` plane, if one lies
    /// within `max_distance`. Lightness plays no part: the control surface
    /// is a flat disc. Ties go to the earlier anchor.
    #[must_use]
    pub fn nearest(&self, query: Position, max_distance: f64) -> Option<&Anchor> {
        let mut best: Option<(&Anchor, f64)> = None;
        for anchor in &self.anchors {
            let d = cylinder::planar_distance(anchor.position, query);
            if d > max_distance {
                continue;
            }
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((anchor, d));
            }
        }
        best.map(|(a, _)| a)
    }

    // ── Mutation ─────────────────────────────────────────────

    /// Append an anchor at the end of the path.
    pub fn add(&mut self, spec: AnchorSpec) -> AnchorId {
        self.insert(self.anchors.len(), spec)
    }

    /// Insert an anchor at `index` (clamped to the end of the path).
    pub fn insert(&mut self, index: usize, spec: AnchorSpec) -> AnchorId {
        let id = AnchorId(self.next_id);
        self.next_id += 1;
        let color = self.color_for(spec);
        let index = index.min(self.anchors.len());
        self.anchors
            .insert(index, Anchor::new(id, color, self.inverted_lightness));
        tracing::debug!(%id, index, %color, "anchor added");
        id
    }

    /// Remove an anchor and return it.
    ///
    /// # Errors
    ///
    /// [`PathError::AnchorNotFound`] if the reference does not resolve,
    /// [`PathError::MinimumAnchors`] if only two anchors remain.
    pub fn remove(&mut self, anchor: AnchorRef) -> Result<Anchor> {
        let index = self.resolve(anchor)?;
        if self.anchors.len() <= MIN_ANCHORS {
            return Err(PathError::MinimumAnchors {
                remaining: self.anchors.len() - 1,
            });
        }
        let removed = self.anchors.remove(index);
        tracing::debug!(id = %removed.id, index, "anchor removed");
        Ok(removed)
    }

    /// Replace an anchor's color in place. The id is unchanged.
    ///
    /// # Errors
    ///
    /// [`PathError::AnchorNotFound`] if the reference does not resolve.
    pub fn update(&mut self, anchor: AnchorRef, spec: AnchorSpec) -> Result<AnchorId> {
        let index = self.resolve(anchor)?;
        let color = self.color_for(spec);
        let inverted = self.inverted_lightness;
        let target = &mut self.anchors[index];
        target.recolor(color, inverted);
        tracing::debug!(id = %target.id, index, %color, "anchor updated");
        Ok(target.id)
    }

    /// Rotate every hue by `degrees`, wrapping modulo 360.
    pub fn shift_hue(&mut self, degrees: f64) {
        let inverted = self.inverted_lightness;
        for anchor in &mut self.anchors {
            anchor.recolor(anchor.color.shift_hue(degrees), inverted);
        }
    }

    /// Give every anchor the same saturation (clamped), keeping hue and
    /// lightness.
    pub fn set_saturation_all(&mut self, saturation: f64) {
        let inverted = self.inverted_lightness;
        for anchor in &mut self.anchors {
            anchor.recolor(anchor.color.with_saturation(saturation), inverted);
        }
    }

    /// Replace every color with `f(color)`, normalized.
    pub fn recolor_all(&mut self, mut f: impl FnMut(Hsl) -> Hsl) {
        let inverted = self.inverted_lightness;
        for anchor in &mut self.anchors {
            anchor.recolor(f(anchor.color).normalized(), inverted);
        }
    }

    /// Switch lightness inversion, re-deriving every position from the
    /// unchanged colors. Toggling twice restores positions bit for bit.
    pub fn set_inverted_lightness(&mut self, inverted: bool) {
        self.inverted_lightness = inverted;
        for anchor in &mut self.anchors {
            anchor.position = cylinder::to_position(anchor.color, inverted);
        }
    }

    /// The color an anchor spec resolves to.
    fn color_for(&self, spec: AnchorSpec) -> Hsl {
        match spec {
            AnchorSpec::Color(color) => color.normalized(),
            AnchorSpec::Position { position, clamp } => {
                let position = if clamp {
                    cylinder::clamp_position(position)
                } else {
                    position
                };
                cylinder::from_position(position, self.inverted_lightness)
            }
        }
    }
}

impl<'a> IntoIterator for &'a AnchorSet {
    type Item = &'a Anchor;
    type IntoIter = std::slice::Iter<'a, Anchor>;

    fn into_iter(self) -> Self::IntoIter {
        self.anchors.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
