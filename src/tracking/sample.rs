//! Per-frame blendshape samples
//!
//! A `TrackingSample` is the complete set of six normalized scalars the
//! puppet mapper consumes. Trackers deliver blendshapes as a name → value
//! map with no completeness guarantee, so extraction is fallible: a frame
//! missing any of the six keys yields `IncompleteSample` and the caller
//! skips the update instead of mapping a partial frame.

use std::collections::HashMap;
use thiserror::Error;

/// ARKit blendshape keys the mapper requires, in field order.
pub const REQUIRED_KEYS: [&str; 6] = [
    "eyeBlinkLeft",
    "eyeBlinkRight",
    "browInnerUp",
    "browDownLeft",
    "browDownRight",
    "jawOpen",
];

/// One tracking frame's blendshape scalars, each nominally in 0.0..=1.0.
///
/// Immutable once captured; carries no identity beyond the frame it was
/// sampled from. Values outside the nominal range are passed through
/// as-is — the mapper applies its affine formulas unclamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingSample {
    pub eye_blink_left: f32,
    pub eye_blink_right: f32,
    pub brow_inner_up: f32,
    pub brow_down_left: f32,
    pub brow_down_right: f32,
    pub jaw_open: f32,
}

/// A tracking frame that cannot drive the puppet because one or more
/// required blendshapes were absent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("incomplete tracking sample, missing: {}", .missing.join(", "))]
pub struct IncompleteSample {
    /// The required keys the frame did not carry
    pub missing: Vec<&'static str>,
}

impl TrackingSample {
    /// Extract a complete sample from a tracker's blendshape map.
    ///
    /// Returns `IncompleteSample` naming every missing key if the frame
    /// does not carry all six required blendshapes.
    pub fn from_blendshapes(
        blendshapes: &HashMap<String, f32>,
    ) -> Result<Self, IncompleteSample> {
        let missing: Vec<&'static str> = REQUIRED_KEYS
            .iter()
            .filter(|key| !blendshapes.contains_key(**key))
            .copied()
            .collect();

        if !missing.is_empty() {
            return Err(IncompleteSample { missing });
        }

        Ok(Self {
            eye_blink_left: blendshapes["eyeBlinkLeft"],
            eye_blink_right: blendshapes["eyeBlinkRight"],
            brow_inner_up: blendshapes["browInnerUp"],
            brow_down_left: blendshapes["browDownLeft"],
            brow_down_right: blendshapes["browDownRight"],
            jaw_open: blendshapes["jawOpen"],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> HashMap<String, f32> {
        REQUIRED_KEYS
            .iter()
            .enumerate()
            .map(|(i, key)| (key.to_string(), i as f32 * 0.1))
            .collect()
    }

    #[test]
    fn test_complete_sample() {
        let sample = TrackingSample::from_blendshapes(&full_map()).unwrap();
        assert!((sample.eye_blink_left - 0.0).abs() < 1e-6);
        assert!((sample.eye_blink_right - 0.1).abs() < 1e-6);
        assert!((sample.brow_inner_up - 0.2).abs() < 1e-6);
        assert!((sample.brow_down_left - 0.3).abs() < 1e-6);
        assert!((sample.brow_down_right - 0.4).abs() < 1e-6);
        assert!((sample.jaw_open - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_missing_key_reported() {
        let mut map = full_map();
        map.remove("jawOpen");

        let err = TrackingSample::from_blendshapes(&map).unwrap_err();
        assert_eq!(err.missing, vec!["jawOpen"]);
    }

    #[test]
    fn test_all_missing_reported_in_order() {
        let err = TrackingSample::from_blendshapes(&HashMap::new()).unwrap_err();
        assert_eq!(err.missing, REQUIRED_KEYS.to_vec());
    }

    #[test]
    fn test_extra_keys_ignored() {
        let mut map = full_map();
        map.insert("mouthSmileLeft".to_string(), 0.9);
        assert!(TrackingSample::from_blendshapes(&map).is_ok());
    }

    #[test]
    fn test_out_of_range_passed_through() {
        let mut map = full_map();
        map.insert("jawOpen".to_string(), 1.4);

        let sample = TrackingSample::from_blendshapes(&map).unwrap();
        assert!((sample.jaw_open - 1.4).abs() < 1e-6);
    }
}
