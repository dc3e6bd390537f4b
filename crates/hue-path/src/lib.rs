//! # hue-path: color paths through anchor colors
//!
//! A path is an ordered set of anchor colors. Between consecutive anchors
//! the engine walks a chord through the color cylinder, easing each axis
//! with its own position function, and samples it into a palette. Paths
//! can be edited live: anchors move, appear and disappear, hues rotate,
//! lightness flips; samples are re-derived lazily after each change.
//!
//! # Architecture
//!
//! ```text
//! anchor.rs:   AnchorSet (ids, positions, nearest-anchor query)
//!     │
//!     ▼
//! engine.rs:   ColorPath = AnchorSet + PathConfig → memoized samples
//!     │
//!     ├── random.rs:  seeded anchor generators, randomize
//!     │
//!     ▼
//! session.rs:  pointer grab/drag, selection, ring hover
//!     │
//!     ▼
//! rotary.rs:   pure reducer turning ring drags into saturation
//! ```
//!
//! All state is in memory and single-owner. Nothing here performs I/O.

// Single-char math variables are standard in color geometry.
#![allow(clippy::many_single_char_names)]
// Sample indices and counts become interpolation parameters.
#![allow(clippy::cast_precision_loss)]
// Segment index from floor(t · N) is bounded by the segment count.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Hue/saturation/lightness variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod anchor;
pub mod config;
pub mod engine;
pub mod error;
pub mod random;
pub mod rotary;
pub mod session;

pub use anchor::{Anchor, AnchorId, AnchorRef, AnchorSet, AnchorSpec};
pub use config::{PathConfig, PathSnapshot};
pub use engine::{Axis, ColorPath, FlattenedPoint};
pub use error::{PathError, Result};
pub use rotary::{Modifiers, RotaryConfig, RotaryController, RotaryEffect, RotaryEvent, RotaryState};
pub use session::Session;

pub use hue_space::{AxisFunctions, Hsl, Position, PositionFunction};
