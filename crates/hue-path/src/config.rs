//! Path configuration and snapshots.
//!
//! | Field                       | Type            | Default                              |
//! |-----------------------------|-----------------|--------------------------------------|
//! | `num_points`                | integer (≥ 1)   | 6                                    |
//! | `functions`                 | `AxisFunctions` | x sinusoidal, y quadratic, z linear  |
//! | `closed_loop`               | bool            | false                                |
//! | `inverted_lightness`        | bool            | false                                |
//! | `mirror_alternate_segments` | bool            | false                                |
//!
//! A [`PathSnapshot`] pairs the anchor colors with a config. It is a plain
//! serde value: the engine never writes it anywhere, callers persist it
//! however they like.

use hue_space::{AxisFunctions, Hsl, PositionFunction};
use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};

/// Default number of samples along the whole path.
pub const DEFAULT_NUM_POINTS: usize = 6;

/// Tunable parameters of a color path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Samples across the whole path.
    pub num_points: usize,
    /// Easing curve per cylinder axis.
    pub functions: AxisFunctions,
    /// Add a final segment from the last anchor back to the first.
    pub closed_loop: bool,
    /// Map lightness to height as `1 − l` (dark palettes grow upward).
    pub inverted_lightness: bool,
    /// Use the mirrored form of each curve on odd segments, so consecutive
    /// segments meet with matching slopes.
    pub mirror_alternate_segments: bool,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_NUM_POINTS,
            functions: AxisFunctions::default(),
            closed_loop: false,
            inverted_lightness: false,
            mirror_alternate_segments: false,
        }
    }
}

impl PathConfig {
    /// Same curve on every axis.
    #[must_use]
    pub const fn with_shared_function(mut self, f: PositionFunction) -> Self {
        self.functions = AxisFunctions::uniform(f);
        self
    }

    #[must_use]
    pub const fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    #[must_use]
    pub const fn with_closed_loop(mut self, closed_loop: bool) -> Self {
        self.closed_loop = closed_loop;
        self
    }

    #[must_use]
    pub const fn with_inverted_lightness(mut self, inverted: bool) -> Self {
        self.inverted_lightness = inverted;
        self
    }

    /// Check invariants that the type system does not enforce.
    ///
    /// # Errors
    ///
    /// [`PathError::InvalidSampleCount`] when `num_points` is zero.
    pub fn validate(&self) -> Result<()> {
        validate_num_points(self.num_points)
    }
}

/// # Errors
///
/// [`PathError::InvalidSampleCount`] when `num_points` is zero.
pub fn validate_num_points(num_points: usize) -> Result<()> {
    if num_points == 0 {
        return Err(PathError::InvalidSampleCount {
            requested: num_points,
        });
    }
    Ok(())
}

/// Everything needed to rebuild a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSnapshot {
    pub anchors: Vec<Hsl>,
    #[serde(default)]
    pub config: PathConfig,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let c = PathConfig::default();
        assert_eq!(c.num_points, 6);
        assert!(!c.closed_loop);
        assert!(!c.inverted_lightness);
        assert!(!c.mirror_alternate_segments);
        assert_eq!(c.functions.x, PositionFunction::Sinusoidal);
    }

    #[test]
    fn zero_points_rejected() {
        let c = PathConfig::default().with_num_points(0);
        assert_eq!(
            c.validate(),
            Err(PathError::InvalidSampleCount { requested: 0 })
        );
        assert_eq!(PathConfig::default().validate(), Ok(()));
    }

    #[test]
    fn shared_function_sets_all_axes() {
        let c = PathConfig::default().with_shared_function(PositionFunction::Arc);
        assert_eq!(c.functions, AxisFunctions::uniform(PositionFunction::Arc));
    }

    #[test]
    fn snapshot_json_shape() {
        let snap = PathSnapshot {
            anchors: vec![Hsl::new(10.0, 0.5, 0.5), Hsl::new(200.0, 1.0, 0.25)],
            config: PathConfig::default().with_closed_loop(true),
        };
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["anchors"][1], serde_json::json!([200.0, 1.0, 0.25]));
        assert_eq!(json["config"]["closed_loop"], serde_json::json!(true));
        assert_eq!(json["config"]["functions"]["y"], serde_json::json!("quadratic"));

        let back: PathSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let snap: PathSnapshot = serde_json::from_str(
            r#"{"anchors": [[0, 1, 0.5], [90, 1, 0.5]], "config": {"num_points": 12}}"#,
        )
        .unwrap();
        assert_eq!(snap.config.num_points, 12);
        assert_eq!(snap.config.functions, AxisFunctions::default());
    }

    #[test]
    fn legacy_function_names_deserialize() {
        let snap: PathSnapshot = serde_json::from_str(
            r#"{"anchors": [[0, 1, 0.5], [90, 1, 0.5]],
                "config": {"functions": {"x": "arcPosition", "y": "linear", "z": "smoothStepPosition"}}}"#,
        )
        .unwrap();
        assert_eq!(snap.config.functions.x, PositionFunction::Arc);
        assert_eq!(snap.config.functions.z, PositionFunction::SmoothStep);
    }

    #[test]
    fn builders_chain() {
        let c = PathConfig::default()
            .with_num_points(3)
            .with_closed_loop(true)
            .with_inverted_lightness(true);
        assert_eq!(c.num_points, 3);
        assert!(c.closed_loop);
        assert!(c.inverted_lightness);
        assert!(!PathConfig::default().inverted_lightness);
    }
}
