//! REST API endpoints

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::puppet::Prop;
use crate::snapshot::{Snapshot, SnapshotWriter};
use crate::web::stream;
use crate::AppState;

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

impl ApiResponse<()> {
    pub fn error(message: &str) -> Json<Self> {
        Json(Self {
            success: false,
            data: None,
            error: Some(message.to_string()),
        })
    }
}

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub prop: String,
    pub prop_index: usize,
    pub puppet_mounted: bool,
    pub frames_mapped: u64,
    pub version: String,
}

/// Get current service status
pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let scene = state.get_scene().await;

    ApiResponse::success(StatusResponse {
        prop: scene.active_prop.name().to_string(),
        prop_index: scene.active_prop.index(),
        puppet_mounted: scene.puppet.is_some(),
        frames_mapped: state.frames_mapped(),
        version: crate::VERSION.to_string(),
    })
}

/// Scene response
#[derive(Debug, Serialize)]
pub struct SceneResponse {
    pub prop: String,
    pub articulated: bool,
    pub joint_angles: HashMap<&'static str, f32>,
}

/// Get the current scene: active prop and joint angles
pub async fn get_scene(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let scene = state.get_scene().await;

    ApiResponse::success(SceneResponse {
        prop: scene.active_prop.name().to_string(),
        articulated: scene.active_prop.is_articulated(),
        joint_angles: scene
            .puppet
            .as_ref()
            .map(|p| p.joint_angles())
            .unwrap_or_default(),
    })
}

/// Prop switch response
#[derive(Debug, Serialize)]
pub struct PropResponse {
    pub prop: String,
    pub prop_index: usize,
}

/// Step to the next catalog entry (clamped at the last)
pub async fn next_prop(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let prop = state.select_prop(Prop::next).await;
    ApiResponse::success(PropResponse {
        prop: prop.name().to_string(),
        prop_index: prop.index(),
    })
}

/// Step to the previous catalog entry (clamped at the first)
pub async fn prev_prop(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let prop = state.select_prop(Prop::prev).await;
    ApiResponse::success(PropResponse {
        prop: prop.name().to_string(),
        prop_index: prop.index(),
    })
}

/// Snapshot response
#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub path: String,
}

/// Write a scene snapshot and return its path
pub async fn take_snapshot(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = state.config.read().await;
    let writer = SnapshotWriter::new(&config.snapshot);
    drop(config);

    let scene = state.get_scene().await;
    let snapshot = Snapshot::capture(&scene, state.frames_mapped());

    match writer.write(&snapshot) {
        Ok(path) => ApiResponse::success(SnapshotResponse {
            path: path.display().to_string(),
        }),
        Err(e) => {
            tracing::error!("Snapshot failed: {}", e);
            Json(ApiResponse {
                success: false,
                data: None,
                error: Some(e.to_string()),
            })
        }
    }
}

/// SSE stream endpoint
pub async fn pose_stream(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    stream::create_pose_stream(state)
}
