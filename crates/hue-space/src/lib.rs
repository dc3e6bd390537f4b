//! # hue-space: the geometry under a color path
//!
//! Colors live on a cylinder: hue is the angle, saturation the radius,
//! lightness the height. Paths between colors are drawn as chords through
//! that cylinder, bent per axis by named easing curves.
//!
//! # Architecture
//!
//! ```text
//! Hsl (h, s, l)
//!     │  cylinder::to_position / from_position
//!     ▼
//! Position (x, y, z) in the unit cube, disc centred on (0.5, 0.5)
//!     │  position_fn::AxisFunctions (one curve per axis)
//!     ▼
//! re-parameterized progress → consumed by hue-path's engine
//! ```
//!
//! Nothing here allocates beyond name lists, holds state, or performs I/O.

// Single-char math variables are standard in color geometry.
#![allow(clippy::many_single_char_names)]
// Hue/saturation/lightness variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod cylinder;
pub mod hsl;
pub mod position_fn;

pub use cylinder::Position;
pub use hsl::Hsl;
pub use position_fn::{AxisFunctions, PositionFunction, UnknownFunction};
