//! Blendshape → joint-angle mapper
//!
//! Five fixed affine remaps from tracking scalars to joint rotations. Each
//! formula was tuned by hand per joint so that input 0 gives the joint's
//! rest angle and input 1 its fully actuated angle; the coefficients are
//! load-bearing and must not be altered. Pure and stateless: no smoothing,
//! no dependence on previous frames.

use glam::Vec3;
use serde::Serialize;

use crate::tracking::TrackingSample;

/// The five face-driven joint targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    LeftEye,
    RightEye,
    LeftEyebrow,
    RightEyebrow,
    Mouth,
}

impl Joint {
    /// Fixed unit rotation axis for this joint. Axes are constants of the
    /// puppet design; only angles vary per frame.
    pub const fn axis(self) -> Vec3 {
        match self {
            Joint::LeftEye | Joint::RightEye => Vec3::Z,
            Joint::LeftEyebrow | Joint::RightEyebrow | Joint::Mouth => Vec3::Y,
        }
    }

    /// Joint name used in snapshots and the API
    pub fn name(self) -> &'static str {
        match self {
            Joint::LeftEye => "left_eye",
            Joint::RightEye => "right_eye",
            Joint::LeftEyebrow => "left_eyebrow",
            Joint::RightEyebrow => "right_eyebrow",
            Joint::Mouth => "mouth",
        }
    }
}

/// A rotation about a joint's fixed axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointPose {
    /// Unit rotation axis
    pub axis: Vec3,
    /// Rotation angle in degrees
    pub angle_deg: f32,
}

impl JointPose {
    fn new(joint: Joint, angle_deg: f32) -> Self {
        Self {
            axis: joint.axis(),
            angle_deg,
        }
    }

    /// Angle in radians, for quaternion composition at the rig
    pub fn angle_radians(&self) -> f32 {
        self.angle_deg.to_radians()
    }
}

/// The five joint rotations of one tracking frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PuppetPose {
    pub left_eye: JointPose,
    pub right_eye: JointPose,
    pub left_eyebrow: JointPose,
    pub right_eyebrow: JointPose,
    pub mouth: JointPose,
}

impl PuppetPose {
    /// Iterate the pose joint by joint
    pub fn joints(&self) -> [(Joint, JointPose); 5] {
        [
            (Joint::LeftEye, self.left_eye),
            (Joint::RightEye, self.right_eye),
            (Joint::LeftEyebrow, self.left_eyebrow),
            (Joint::RightEyebrow, self.right_eyebrow),
            (Joint::Mouth, self.mouth),
        ]
    }
}

/// Map a complete tracking sample to the five joint rotations.
///
/// Inputs are assumed to be in 0.0..=1.0 per the tracker's contract but
/// are not clamped: out-of-range values produce the unclamped affine
/// result, keeping the function total for any finite input.
pub fn map(sample: TrackingSample) -> PuppetPose {
    PuppetPose {
        left_eye: JointPose::new(Joint::LeftEye, -120.0 + 90.0 * sample.eye_blink_left),
        right_eye: JointPose::new(Joint::RightEye, -120.0 + 90.0 * sample.eye_blink_right),
        left_eyebrow: JointPose::new(
            Joint::LeftEyebrow,
            90.0 * sample.brow_down_left - 30.0 * sample.brow_inner_up,
        ),
        right_eyebrow: JointPose::new(
            Joint::RightEyebrow,
            90.0 * sample.brow_down_right - 30.0 * sample.brow_inner_up,
        ),
        mouth: JointPose::new(Joint::Mouth, -100.0 + 60.0 * sample.jaw_open),
    }
}
