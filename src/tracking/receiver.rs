//! Face tracking receiver
//!
//! Receives JSON-over-UDP packets from an external face tracker that
//! reports ARKit-compatible blendshape names. The receiver keeps only the
//! latest packet; sample extraction (and the complete/incomplete split)
//! happens in `tracking::sample`.

use serde::Deserialize;
use std::collections::HashMap;
use std::net::UdpSocket;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::config::TrackingConfig;
use crate::error::{HeadOrbitError, TrackingError};
use crate::tracking::sample::TrackingSample;

/// A single JSON packet from the face tracker
#[derive(Debug, Clone, Deserialize)]
pub struct FacePacket {
    /// Whether a face was detected this frame
    pub face_detected: bool,
    /// ARKit blendshape name → value (0.0–1.0)
    pub blendshapes: HashMap<String, f32>,
}

impl FacePacket {
    /// Extract the sample driving the puppet, if this frame can provide one.
    ///
    /// Returns `None` when no face was detected or any required blendshape
    /// is missing; the per-frame update is skipped entirely in both cases.
    pub fn sample(&self) -> Option<TrackingSample> {
        if !self.face_detected {
            return None;
        }

        match TrackingSample::from_blendshapes(&self.blendshapes) {
            Ok(sample) => Some(sample),
            Err(e) => {
                tracing::debug!("Skipping incomplete frame: {}", e);
                None
            }
        }
    }
}

/// Latest face tracking data
#[derive(Debug, Clone, Default)]
pub struct FaceData {
    /// Most recently parsed packet
    pub packet: Option<FacePacket>,
    /// Whether any data has been received
    pub has_data: bool,
}

/// Face tracker JSON-over-UDP receiver
pub struct FaceReceiver {
    config: TrackingConfig,
    socket: Option<UdpSocket>,
    data: Arc<RwLock<FaceData>>,
}

impl FaceReceiver {
    /// Create a new receiver (does not bind yet)
    pub fn new(config: &TrackingConfig) -> Self {
        Self {
            config: config.clone(),
            socket: None,
            data: Arc::new(RwLock::new(FaceData::default())),
        }
    }

    /// Bind the UDP socket and start receiving
    pub fn start(&mut self) -> Result<(), HeadOrbitError> {
        let addr = format!("{}:{}", self.config.listen_address, self.config.port);

        let socket = UdpSocket::bind(&addr).map_err(|e| {
            TrackingError::Receiver(format!("Failed to bind to {}: {}", addr, e))
        })?;

        socket.set_nonblocking(true).map_err(|e| {
            TrackingError::Receiver(format!("Failed to set non-blocking: {}", e))
        })?;

        socket
            .set_read_timeout(Some(Duration::from_millis(100)))
            .ok();

        tracing::info!("Face tracking receiver listening on {}", addr);
        self.socket = Some(socket);

        Ok(())
    }

    /// Process incoming JSON packets (non-blocking)
    pub async fn process(&self) -> Result<Option<FaceData>, HeadOrbitError> {
        let socket = match &self.socket {
            Some(s) => s,
            None => return Ok(None),
        };

        let mut buf = [0u8; 65536];

        match socket.recv(&mut buf) {
            Ok(size) if size > 0 => {
                let packet: FacePacket = serde_json::from_slice(&buf[..size])
                    .map_err(|e| TrackingError::Parse(format!("JSON parse error: {}", e)))?;

                let mut data = self.data.write().await;
                data.packet = Some(packet);
                data.has_data = true;
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                // No data available
            }
            Err(e) => {
                return Err(TrackingError::Receiver(format!("Receive error: {}", e)).into());
            }
        }

        Ok(Some(self.data.read().await.clone()))
    }

    /// Get the current face tracking data
    pub async fn get_data(&self) -> FaceData {
        self.data.read().await.clone()
    }

    /// Stop the receiver
    pub fn stop(&mut self) {
        self.socket = None;
        tracing::info!("Face tracking receiver stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json(face_detected: bool, jaw_open: f32) -> String {
        serde_json::json!({
            "face_detected": face_detected,
            "blendshapes": {
                "eyeBlinkLeft": 0.1,
                "eyeBlinkRight": 0.2,
                "browInnerUp": 0.3,
                "browDownLeft": 0.4,
                "browDownRight": 0.5,
                "jawOpen": jaw_open,
            }
        })
        .to_string()
    }

    #[test]
    fn test_parse_packet() {
        let json = sample_json(true, 0.45);
        let pkt: FacePacket = serde_json::from_str(&json).unwrap();

        assert!(pkt.face_detected);
        assert!((pkt.blendshapes["jawOpen"] - 0.45).abs() < 0.01);
        assert!((pkt.blendshapes["eyeBlinkLeft"] - 0.1).abs() < 0.01);
    }

    #[test]
    fn test_parse_no_face() {
        let json = r#"{"face_detected":false,"blendshapes":{}}"#;
        let pkt: FacePacket = serde_json::from_str(json).unwrap();
        assert!(!pkt.face_detected);
        assert!(pkt.blendshapes.is_empty());
    }

    #[test]
    fn test_sample_from_complete_packet() {
        let json = sample_json(true, 0.45);
        let pkt: FacePacket = serde_json::from_str(&json).unwrap();

        let sample = pkt.sample().unwrap();
        assert!((sample.jaw_open - 0.45).abs() < 0.01);
        assert!((sample.brow_inner_up - 0.3).abs() < 0.01);
    }

    #[test]
    fn test_no_sample_without_face() {
        let json = sample_json(false, 0.45);
        let pkt: FacePacket = serde_json::from_str(&json).unwrap();
        assert!(pkt.sample().is_none());
    }

    #[test]
    fn test_no_sample_from_partial_blendshapes() {
        let json = r#"{"face_detected":true,"blendshapes":{"jawOpen":0.5}}"#;
        let pkt: FacePacket = serde_json::from_str(json).unwrap();
        assert!(pkt.sample().is_none());
    }

    #[test]
    fn test_face_data_default() {
        let data = FaceData::default();
        assert!(!data.has_data);
        assert!(data.packet.is_none());
    }
}
