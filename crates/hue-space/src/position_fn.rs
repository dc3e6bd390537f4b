//! Position functions: named easing curves for one axis of one segment.
//!
//! A position function re-parameterizes raw progress `t ∈ [0, 1]` along a
//! segment. Every curve here satisfies `f(0) = 0` and `f(1) = 1`, so
//! segments always start and end on their anchors no matter which curve
//! drives which axis. Using different curves per axis is what bends the
//! straight chord between two anchors into an arc.
//!
//! The set is closed: names are stable, serialization is by name, and
//! equality is plain enum equality.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lookup of a position function by a name that is not registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("unknown position function '{name}'")]
#[diagnostic(
    code(hue_space::position_fn::unknown),
    help(
        "registered names: linear, exponential, quadratic, cubic, quartic, \
         sinusoidal, asinusoidal, arc, smooth-step"
    )
)]
pub struct UnknownFunction {
    /// The name that failed to resolve.
    pub name: String,
}

/// A named easing curve.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionFunction {
    /// `t`: constant speed.
    #[default]
    #[serde(alias = "linearPosition")]
    Linear,
    /// `t²`
    #[serde(alias = "exponentialPosition")]
    Exponential,
    /// `t³`
    #[serde(alias = "quadraticPosition")]
    Quadratic,
    /// `t⁴`
    #[serde(alias = "cubicPosition")]
    Cubic,
    /// `t⁵`
    #[serde(alias = "quarticPosition")]
    Quartic,
    /// `sin(t·π/2)`: fast start, soft landing.
    #[serde(alias = "sinusoidalPosition")]
    Sinusoidal,
    /// `asin(t)/(π/2)`: soft start, steep finish.
    #[serde(alias = "asinusoidalPosition")]
    Asinusoidal,
    /// `1 − √(1 − t)`: quarter-circle profile.
    #[serde(alias = "arcPosition")]
    Arc,
    /// `t²(3 − 2t)`: Hermite smoothstep, symmetric about the midpoint.
    #[serde(alias = "smoothStepPosition")]
    SmoothStep,
}

impl PositionFunction {
    /// Evaluate the curve. Input is clamped to `[0, 1]` first so the
    /// `asin`/`sqrt` shapes never produce NaN.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Exponential => t.powi(2),
            Self::Quadratic => t.powi(3),
            Self::Cubic => t.powi(4),
            Self::Quartic => t.powi(5),
            Self::Sinusoidal => (t * FRAC_PI_2).sin(),
            Self::Asinusoidal => t.asin() / FRAC_PI_2,
            Self::Arc => 1.0 - (1.0 - t).sqrt(),
            Self::SmoothStep => t * t * 2.0f64.mul_add(-t, 3.0),
        }
    }

    /// Evaluate the curve mirrored through the segment midpoint:
    /// `1 − f(1 − t)`. Chaining a curve with its mirror on the next
    /// segment makes the joins smooth.
    #[must_use]
    pub fn apply_reversed(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            // Symmetric shapes are their own mirror; skip the round trip so
            // the endpoints stay exact.
            Self::Linear | Self::SmoothStep => self.apply(t),
            _ => 1.0 - self.apply(1.0 - t),
        }
    }

    /// Stable name used for lookup and serialization.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Exponential => "exponential",
            Self::Quadratic => "quadratic",
            Self::Cubic => "cubic",
            Self::Quartic => "quartic",
            Self::Sinusoidal => "sinusoidal",
            Self::Asinusoidal => "asinusoidal",
            Self::Arc => "arc",
            Self::SmoothStep => "smooth-step",
        }
    }

    /// The camel-case name used by older snapshots and share URLs
    /// (`sinusoidalPosition`, …).
    #[must_use]
    pub const fn legacy_name(self) -> &'static str {
        match self {
            Self::Linear => "linearPosition",
            Self::Exponential => "exponentialPosition",
            Self::Quadratic => "quadraticPosition",
            Self::Cubic => "cubicPosition",
            Self::Quartic => "quarticPosition",
            Self::Sinusoidal => "sinusoidalPosition",
            Self::Asinusoidal => "asinusoidalPosition",
            Self::Arc => "arcPosition",
            Self::SmoothStep => "smoothStepPosition",
        }
    }

    /// Resolve a function by name (case-insensitive). Accepts both the
    /// kebab-case names and the legacy camel-case names.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownFunction`] if nothing matches.
    pub fn from_name(name: &str) -> Result<Self, UnknownFunction> {
        let trimmed = name.trim();
        Self::all()
            .iter()
            .find(|f| {
                f.name().eq_ignore_ascii_case(trimmed)
                    || f.legacy_name().eq_ignore_ascii_case(trimmed)
            })
            .copied()
            .ok_or_else(|| UnknownFunction {
                name: name.to_string(),
            })
    }

    /// Resolve by name, falling back to [`Linear`](Self::Linear).
    #[must_use]
    pub fn from_name_or_linear(name: &str) -> Self {
        Self::from_name(name).unwrap_or_default()
    }

    /// All registered functions in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Linear,
            Self::Exponential,
            Self::Quadratic,
            Self::Cubic,
            Self::Quartic,
            Self::Sinusoidal,
            Self::Asinusoidal,
            Self::Arc,
            Self::SmoothStep,
        ]
    }

    /// Names of all registered functions, in display order.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(|f| f.name()).collect()
    }
}

impl fmt::Display for PositionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PositionFunction {
    type Err = UnknownFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

// ---------------------------------------------------------------------------
// AxisFunctions
// ---------------------------------------------------------------------------

/// One position function per cylinder axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisFunctions {
    pub x: PositionFunction,
    pub y: PositionFunction,
    pub z: PositionFunction,
}

impl AxisFunctions {
    #[must_use]
    pub const fn new(x: PositionFunction, y: PositionFunction, z: PositionFunction) -> Self {
        Self { x, y, z }
    }

    /// The same curve on every axis: segments stay straight chords.
    #[must_use]
    pub const fn uniform(f: PositionFunction) -> Self {
        Self { x: f, y: f, z: f }
    }

    /// Re-parameterize `t` on all three axes at once.
    #[must_use]
    pub fn apply(self, t: f64, reversed: bool) -> (f64, f64, f64) {
        if reversed {
            (
                self.x.apply_reversed(t),
                self.y.apply_reversed(t),
                self.z.apply_reversed(t),
            )
        } else {
            (self.x.apply(t), self.y.apply(t), self.z.apply(t))
        }
    }
}

impl Default for AxisFunctions {
    /// Sinusoidal across, quadratic down, linear in lightness.
    fn default() -> Self {
        Self {
            x: PositionFunction::Sinusoidal,
            y: PositionFunction::Quadratic,
            z: PositionFunction::Linear,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
