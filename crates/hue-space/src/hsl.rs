// SPDX-License-Identifier: MIT
//
// Hue / saturation / lightness triple: the only color model the path
// engine speaks.
//
// Hue is an angle in degrees, saturation and lightness are unit scalars.
// Conversion to sRGB, OKLab, CSS strings and gamut checks belong to
// whoever consumes the palette. This module only keeps the triple
// well-formed: hues wrap around the circle, saturation and lightness
// clamp to [0, 1].

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color as `(hue, saturation, lightness)`.
///
/// - `h`: hue angle in degrees, `[0, 360)` once normalized
/// - `s`: saturation, `[0, 1]`; doubles as radius on the color cylinder
/// - `l`: lightness, `[0, 1]`; doubles as height on the color cylinder
///
/// Serializes as a plain `[h, s, l]` array, the shape anchors take in
/// snapshots and share URLs.
///
/// # Examples
///
/// ```
/// use hue_space::hsl::Hsl;
///
/// let teal = Hsl::new(190.0, 0.7, 0.45);
/// let shifted = teal.shift_hue(200.0);
/// assert!((shifted.h - 30.0).abs() < 1e-9);
///
/// let wild = Hsl::new(-30.0, 1.4, -0.2).normalized();
/// assert_eq!(wild, Hsl::new(330.0, 1.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Hsl {
    /// Hue angle in degrees.
    pub h: f64,
    /// Saturation (radius on the cylinder).
    pub s: f64,
    /// Lightness (height on the cylinder).
    pub l: f64,
}

impl Hsl {
    /// Create a color from raw components. No normalization happens here;
    /// call [`normalized`](Self::normalized) for UI-sourced values.
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Wrap the hue into `[0, 360)` and clamp saturation and lightness
    /// into `[0, 1]`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            h: normalize_hue(self.h),
            s: self.s.clamp(0.0, 1.0),
            l: self.l.clamp(0.0, 1.0),
        }
    }

    /// Shift the hue by `degrees` (wraps around 360°).
    #[inline]
    #[must_use]
    pub fn shift_hue(self, degrees: f64) -> Self {
        Self {
            h: normalize_hue(self.h + degrees),
            ..self
        }
    }

    /// Set hue to an absolute angle (normalized to 0°–360°).
    #[inline]
    #[must_use]
    pub fn with_hue(self, h: f64) -> Self {
        Self {
            h: normalize_hue(h),
            ..self
        }
    }

    /// Set saturation (clamped to 0.0–1.0).
    #[inline]
    #[must_use]
    pub const fn with_saturation(self, s: f64) -> Self {
        Self {
            s: s.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Set lightness (clamped to 0.0–1.0).
    #[inline]
    #[must_use]
    pub const fn with_lightness(self, l: f64) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Whether this color has no visible saturation. Its hue is then
    /// meaningless and never survives a round trip through the cylinder.
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.s.abs() < 1e-9
    }

    /// Component-wise comparison with tolerance. Hues compare along the
    /// circle, so 359.9999 and 0.0 are close.
    #[must_use]
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        hue_diff(self.h, other.h).abs() <= epsilon
            && (self.s - other.s).abs() <= epsilon
            && (self.l - other.l).abs() <= epsilon
    }
}

impl From<[f64; 3]> for Hsl {
    fn from([h, s, l]: [f64; 3]) -> Self {
        Self { h, s, l }
    }
}

impl From<Hsl> for [f64; 3] {
    fn from(c: Hsl) -> Self {
        [c.h, c.s, c.l]
    }
}

impl From<(f64, f64, f64)> for Hsl {
    fn from((h, s, l): (f64, f64, f64)) -> Self {
        Self { h, s, l }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({:.2}, {:.4}, {:.4})", self.h, self.s, self.l)
    }
}

// ─── Hue helpers ─────────────────────────────────────────────────────────────

/// Normalize a hue angle to `[0, 360)`.
///
/// Non-finite input maps to 0 so a stray NaN from a UI slider can never
/// poison a whole palette.
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if h >= 360.0 { 0.0 } else { h }
}

/// Signed shortest angular difference from `a` to `b`, in `(-180, 180]`.
#[must_use]
pub fn hue_diff(a: f64, b: f64) -> f64 {
    let d = (b - a).rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
