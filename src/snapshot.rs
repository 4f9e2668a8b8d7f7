//! Scene snapshot export
//!
//! Captures the current scene — active prop, mounted rig's joint angles,
//! frame count — to a timestamped JSON file. Rendering is out of scope,
//! so a snapshot is scene state, not pixels.

use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::SnapshotConfig;
use crate::error::{HeadOrbitError, SnapshotError};
use crate::SceneState;

/// What a snapshot file contains
#[derive(Debug, Serialize)]
pub struct Snapshot {
    /// Local time the snapshot was taken, RFC 3339
    pub taken_at: String,
    /// Active catalog entry
    pub prop: String,
    /// Whether a puppet was mounted
    pub puppet_mounted: bool,
    /// Joint name → angle in degrees; empty until a pose has been applied
    pub joint_angles: HashMap<&'static str, f32>,
    /// Tracking frames mapped since startup
    pub frames_mapped: u64,
}

impl Snapshot {
    /// Capture the given scene
    pub fn capture(scene: &SceneState, frames_mapped: u64) -> Self {
        Self {
            taken_at: chrono::Local::now().to_rfc3339(),
            prop: scene.active_prop.name().to_string(),
            puppet_mounted: scene.puppet.is_some(),
            joint_angles: scene
                .puppet
                .as_ref()
                .map(|p| p.joint_angles())
                .unwrap_or_default(),
            frames_mapped,
        }
    }
}

/// Writes snapshots into the configured output directory
pub struct SnapshotWriter {
    output_dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(config: &SnapshotConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
        }
    }

    /// Write a snapshot as `snapshot_YYYYmmdd_HHMMSS.json`, creating the
    /// output directory if needed. Returns the written path.
    pub fn write(&self, snapshot: &Snapshot) -> Result<PathBuf, HeadOrbitError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            SnapshotError::CreateDir(format!("{}: {}", self.output_dir.display(), e))
        })?;

        let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = self.output_dir.join(format!("snapshot_{}.json", ts));

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| SnapshotError::Serialize(e.to_string()))?;

        std::fs::write(&path, json)
            .map_err(|e| SnapshotError::WriteFile(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Snapshot written to {}", path.display());
        Ok(path)
    }

    /// The directory snapshots are written into
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puppet::{mapper, Prop, Puppet};
    use crate::tracking::TrackingSample;

    fn scene_with_pose() -> SceneState {
        let mut puppet = Puppet::mount(Prop::Scarecrow);
        puppet.apply_pose(&mapper::map(TrackingSample {
            eye_blink_left: 1.0,
            eye_blink_right: 0.0,
            brow_inner_up: 0.0,
            brow_down_left: 0.0,
            brow_down_right: 0.0,
            jaw_open: 0.0,
        }));
        SceneState {
            active_prop: Prop::Scarecrow,
            puppet: Some(puppet),
        }
    }

    #[test]
    fn test_capture_scene() {
        let snapshot = Snapshot::capture(&scene_with_pose(), 42);
        assert_eq!(snapshot.prop, "scarecrow");
        assert!(snapshot.puppet_mounted);
        assert_eq!(snapshot.frames_mapped, 42);
        assert_eq!(snapshot.joint_angles["left_eye"], -30.0);
        assert_eq!(snapshot.joint_angles["right_eye"], -120.0);
    }

    #[test]
    fn test_capture_unmounted_scene() {
        let scene = SceneState {
            active_prop: Prop::OrbitingBall,
            puppet: None,
        };
        let snapshot = Snapshot::capture(&scene, 0);
        assert!(!snapshot.puppet_mounted);
        assert!(snapshot.joint_angles.is_empty());
    }

    #[test]
    fn test_write_snapshot_file() {
        let dir = std::env::temp_dir().join(format!(
            "headorbit_snap_test_{}",
            std::process::id()
        ));
        let writer = SnapshotWriter::new(&SnapshotConfig {
            output_dir: dir.clone(),
        });

        let snapshot = Snapshot::capture(&scene_with_pose(), 7);
        let path = writer.write(&snapshot).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["prop"], "scarecrow");
        assert_eq!(parsed["frames_mapped"], 7);

        std::fs::remove_dir_all(&dir).ok();
    }
}
