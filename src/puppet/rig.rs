//! The mounted puppet rig
//!
//! Scene-side joint state for the active prop. Poses arrive as fixed-axis
//! degree rotations from the mapper and are stored as quaternions, the
//! representation downstream scene consumers read.

use glam::Quat;
use std::collections::HashMap;

use crate::puppet::catalog::Prop;
use crate::puppet::mapper::{Joint, PuppetPose};

/// A mounted puppet and its per-joint orientations
#[derive(Debug, Clone)]
pub struct Puppet {
    prop: Prop,
    /// Local joint orientations; empty for non-articulated props
    orientations: HashMap<Joint, Quat>,
    /// Last pose applied, kept in degrees for snapshots and the API
    last_pose: Option<PuppetPose>,
}

impl Puppet {
    /// Mount a fresh puppet for the given prop. Articulated joints start
    /// at the identity orientation.
    pub fn mount(prop: Prop) -> Self {
        let orientations = if prop.is_articulated() {
            [
                Joint::LeftEye,
                Joint::RightEye,
                Joint::LeftEyebrow,
                Joint::RightEyebrow,
                Joint::Mouth,
            ]
            .into_iter()
            .map(|joint| (joint, Quat::IDENTITY))
            .collect()
        } else {
            HashMap::new()
        };

        Self {
            prop,
            orientations,
            last_pose: None,
        }
    }

    /// The prop this puppet was mounted for
    pub fn prop(&self) -> Prop {
        self.prop
    }

    /// Apply a mapped pose to the rig.
    ///
    /// Non-articulated props ignore face poses entirely; the orbiting ball
    /// just exists in the scene.
    pub fn apply_pose(&mut self, pose: &PuppetPose) {
        if !self.prop.is_articulated() {
            return;
        }

        for (joint, joint_pose) in pose.joints() {
            self.orientations.insert(
                joint,
                Quat::from_axis_angle(joint_pose.axis, joint_pose.angle_radians()),
            );
        }
        self.last_pose = Some(*pose);
    }

    /// Current orientation of a joint, if the rig has one
    pub fn orientation(&self, joint: Joint) -> Option<Quat> {
        self.orientations.get(&joint).copied()
    }

    /// The last pose applied to this rig, if any
    pub fn last_pose(&self) -> Option<&PuppetPose> {
        self.last_pose.as_ref()
    }

    /// Current joint angles in degrees, keyed by joint name
    pub fn joint_angles(&self) -> HashMap<&'static str, f32> {
        self.last_pose
            .map(|pose| {
                pose.joints()
                    .into_iter()
                    .map(|(joint, jp)| (joint.name(), jp.angle_deg))
                    .collect()
            })
            .unwrap_or_default()
    }
}
