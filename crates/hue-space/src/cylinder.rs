//! Cylindrical embedding of [`Hsl`] colors.
//!
//! Hue is the angle, saturation the radius and lightness the height:
//!
//! ```text
//!            z (lightness, or 1 − lightness when inverted)
//!            │
//!            │     ┌── disc of radius 0.5 centred on (0.5, 0.5)
//!            │    ╱
//!   (0,0) ───┼───●──────── x        angle = hue in radians
//!                 ╲                 radius = saturation / 2
//!                  y
//! ```
//!
//! Interpolating straight chords inside this disc takes the shortest way
//! around the hue circle for free, which is why the path engine works in
//! positions and converts back to colors only at the end.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::hsl::{Hsl, normalize_hue};

/// Centre of the color disc in both planar axes.
pub const CENTER: f64 = 0.5;

/// A point in normalized cylinder space.
///
/// `x` and `y` address the unit square that contains the color disc;
/// `z` is the height in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Planar distance from the disc centre, in position units (the rim
    /// sits at 0.5).
    #[must_use]
    pub fn planar_radius(self) -> f64 {
        (self.x - CENTER).hypot(self.y - CENTER)
    }

    /// Interpolate each coordinate with its own progress value.
    ///
    /// Written as `a·(1 − t) + b·t` so that `t = 0` and `t = 1` land on the
    /// endpoints exactly.
    #[must_use]
    pub fn lerp_per_axis(self, other: Self, tx: f64, ty: f64, tz: f64) -> Self {
        Self {
            x: lerp(self.x, other.x, tx),
            y: lerp(self.y, other.y, ty),
            z: lerp(self.z, other.z, tz),
        }
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a.mul_add(1.0 - t, b * t)
}

/// Map a color onto the cylinder.
///
/// Out-of-range hues wrap first; this never fails.
#[must_use]
pub fn to_position(color: Hsl, inverted_lightness: bool) -> Position {
    let angle = normalize_hue(color.h) * PI / 180.0;
    let radius = color.s * CENTER;
    Position {
        x: radius.mul_add(angle.cos(), CENTER),
        y: radius.mul_add(angle.sin(), CENTER),
        z: height(color.l, inverted_lightness),
    }
}

/// Inverse of [`to_position`]. No clamping: a point outside the disc
/// yields saturation above 1.
#[must_use]
pub fn from_position(position: Position, inverted_lightness: bool) -> Hsl {
    let dx = position.x - CENTER;
    let dy = position.y - CENTER;
    let hue = normalize_hue(dy.atan2(dx).to_degrees());
    Hsl {
        h: hue,
        s: dx.hypot(dy) / CENTER,
        l: height(position.z, inverted_lightness),
    }
}

/// Lightness ↔ height. The mapping is its own inverse.
#[inline]
#[must_use]
pub fn height(value: f64, inverted_lightness: bool) -> f64 {
    if inverted_lightness { 1.0 - value } else { value }
}

/// Pull a position back onto the solid cylinder: radius at most 0.5 (full
/// saturation), height within `[0, 1]`. The angle is preserved.
#[must_use]
pub fn clamp_position(position: Position) -> Position {
    let dx = position.x - CENTER;
    let dy = position.y - CENTER;
    let r = dx.hypot(dy);
    let (x, y) = if r > CENTER {
        let k = CENTER / r;
        (dx.mul_add(k, CENTER), dy.mul_add(k, CENTER))
    } else {
        (position.x, position.y)
    };
    Position {
        x,
        y,
        z: position.z.clamp(0.0, 1.0),
    }
}

/// Euclidean distance between the `(x, y)` projections of two points.
/// Height is ignored: hit-testing happens on the 2D disc.
#[must_use]
pub fn planar_distance(a: Position, b: Position) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
