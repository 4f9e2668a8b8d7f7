//! Puppet module
//!
//! The scene side of the service:
//! - the two-entry prop catalog
//! - the blendshape → joint-angle mapper
//! - the joint rig poses are applied to

pub mod catalog;
pub mod mapper;
pub mod rig;

pub use catalog::Prop;
pub use mapper::{Joint, JointPose, PuppetPose};
pub use rig::Puppet;
