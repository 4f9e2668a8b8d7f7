//! Server-Sent Events for real-time pose updates

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::puppet::PuppetPose;
use crate::AppState;

/// Create an SSE stream of applied puppet poses
pub fn create_pose_stream(
    app_state: Arc<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = app_state.subscribe_pose();

    // Convert broadcast receiver to a stream
    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(pose) => Some(Ok(pose_to_event(&pose))),
        Err(_) => None, // Skip lagged messages
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// JSON payload of one applied pose: joint name → axis + degrees
fn pose_payload(pose: &PuppetPose) -> serde_json::Value {
    let data: std::collections::HashMap<_, _> = pose
        .joints()
        .into_iter()
        .map(|(joint, jp)| {
            (
                joint.name(),
                serde_json::json!({
                    "axis": jp.axis.to_array(),
                    "angle_deg": jp.angle_deg,
                }),
            )
        })
        .collect();
    serde_json::json!(data)
}

/// Convert an applied pose to an SSE event
fn pose_to_event(pose: &PuppetPose) -> Event {
    Event::default()
        .event("pose")
        .data(pose_payload(pose).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puppet::mapper;
    use crate::tracking::TrackingSample;

    #[test]
    fn test_pose_payload() {
        let pose = mapper::map(TrackingSample {
            eye_blink_left: 1.0,
            eye_blink_right: 0.0,
            brow_inner_up: 0.0,
            brow_down_left: 0.0,
            brow_down_right: 0.0,
            jaw_open: 0.0,
        });

        let payload = pose_payload(&pose);
        assert_eq!(payload["left_eye"]["angle_deg"], -30.0);
        assert_eq!(payload["right_eye"]["angle_deg"], -120.0);
        assert_eq!(payload["mouth"]["angle_deg"], -100.0);
        // Eyes rotate about Z, mouth about Y
        assert_eq!(payload["left_eye"]["axis"][2], 1.0);
        assert_eq!(payload["mouth"]["axis"][1], 1.0);
    }
}
