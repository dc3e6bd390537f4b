//! Errors reported by path operations.
//!
//! Every variant is local and recoverable. The engine performs no I/O, so
//! there is no fatal class; callers decide whether to surface, retry with
//! corrected input, or ignore.
//!
//! | Variant                | Raised by                                      |
//! |------------------------|------------------------------------------------|
//! | [`UnknownFunction`]    | resolving a position function by name          |
//! | [`AnchorNotFound`]     | remove/update with a stale id or bad index     |
//! | [`MinimumAnchors`]     | construction or removal leaving < 2 anchors    |
//! | [`InvalidSampleCount`] | `num_points` of zero                           |
//!
//! [`UnknownFunction`]: PathError::UnknownFunction
//! [`AnchorNotFound`]: PathError::AnchorNotFound
//! [`MinimumAnchors`]: PathError::MinimumAnchors
//! [`InvalidSampleCount`]: PathError::InvalidSampleCount

use hue_space::UnknownFunction;

use crate::anchor::AnchorRef;

/// Fewest anchors a path can have.
pub const MIN_ANCHORS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum PathError {
    /// A position function name did not resolve.
    #[error(transparent)]
    #[diagnostic(transparent)]
    UnknownFunction(#[from] UnknownFunction),

    /// The referenced anchor does not exist (removed, or index out of range).
    #[error("anchor {anchor} not found")]
    #[diagnostic(
        code(hue_path::anchor::not_found),
        help("anchor ids are not reused; re-query the anchor list after removals")
    )]
    AnchorNotFound {
        /// The reference that failed to resolve.
        anchor: AnchorRef,
    },

    /// The operation would leave fewer than two anchors.
    #[error("a path needs at least {min} anchors, operation would leave {remaining}", min = MIN_ANCHORS)]
    #[diagnostic(code(hue_path::anchor::minimum))]
    MinimumAnchors {
        /// How many anchors would have remained.
        remaining: usize,
    },

    /// `num_points` must be at least one.
    #[error("sample count must be at least 1, got {requested}")]
    #[diagnostic(code(hue_path::config::sample_count))]
    InvalidSampleCount {
        /// The rejected value.
        requested: usize,
    },
}

pub type Result<T, E = PathError> = std::result::Result<T, E>;
