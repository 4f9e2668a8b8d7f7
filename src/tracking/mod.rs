//! Tracking module
//!
//! Face tracking input for driving the puppet:
//! - ARKit-style blendshape packets (JSON over UDP)
//! - sample extraction with explicit completeness checking

pub mod receiver;
pub mod sample;

pub use receiver::{FaceData, FacePacket, FaceReceiver};
pub use sample::{IncompleteSample, TrackingSample};
