//! HeadOrbit - Face-Tracked Puppet Service
//!
//! A small headless service that:
//! - Receives ARKit-style blendshape frames from an external face tracker
//! - Remaps six tracking scalars into five fixed-axis joint rotations
//! - Applies them to the currently mounted puppet from a two-prop catalog
//! - Exposes prop switching, scene snapshots, and a pose stream over HTTP

pub mod config;
pub mod error;
pub mod puppet;
pub mod snapshot;
pub mod tracking;
pub mod web;

pub use config::Config;
pub use error::{HeadOrbitError, Result};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use puppet::{mapper, Prop, Puppet, PuppetPose};
use tracking::TrackingSample;

/// The scene: which prop is selected and whatever puppet is currently
/// mounted for it. "No puppet mounted" is an explicit, normal state — the
/// per-frame update path skips work on it rather than assuming a global.
#[derive(Debug, Clone)]
pub struct SceneState {
    /// Active catalog entry
    pub active_prop: Prop,
    /// The mounted puppet, if any
    pub puppet: Option<Puppet>,
}

/// Application state shared across all components
#[derive(Debug)]
pub struct AppState {
    /// Current configuration
    pub config: RwLock<Config>,
    /// Current scene state
    pub scene: RwLock<SceneState>,
    /// Channel for applied puppet poses
    pub pose_tx: broadcast::Sender<PuppetPose>,
    /// Shutdown signal
    pub shutdown_tx: broadcast::Sender<()>,
    /// Number of tracking frames mapped onto the puppet
    pub frames_mapped: AtomicU64,
}

impl AppState {
    /// Create a new application state and mount the configured default prop
    pub fn new(config: Config) -> Arc<Self> {
        let (pose_tx, _) = broadcast::channel(64);
        let (shutdown_tx, _) = broadcast::channel(1);

        let prop = Prop::from_index(config.scene.default_prop).unwrap_or(Prop::Scarecrow);

        Arc::new(Self {
            config: RwLock::new(config),
            scene: RwLock::new(SceneState {
                active_prop: prop,
                puppet: Some(Puppet::mount(prop)),
            }),
            pose_tx,
            shutdown_tx,
            frames_mapped: AtomicU64::new(0),
        })
    }

    /// Map a complete tracking sample and apply it to the mounted puppet.
    ///
    /// Returns the applied pose, or `None` when no puppet is mounted or
    /// the active prop is not articulated — both are normal per-frame
    /// no-ops, not errors.
    pub async fn apply_sample(&self, sample: TrackingSample) -> Option<PuppetPose> {
        let mut scene = self.scene.write().await;
        let puppet = scene.puppet.as_mut()?;
        if !puppet.prop().is_articulated() {
            return None;
        }

        let pose = mapper::map(sample);
        puppet.apply_pose(&pose);
        drop(scene);

        self.frames_mapped.fetch_add(1, Ordering::Relaxed);
        let _ = self.pose_tx.send(pose);
        Some(pose)
    }

    /// Step the catalog selection and remount if it changed.
    ///
    /// Remounting resets the rig to identity; any previously applied
    /// pose is discarded. Returns the (possibly clamped) active prop.
    pub async fn select_prop<F>(&self, step: F) -> Prop
    where
        F: FnOnce(Prop) -> Prop,
    {
        let mut scene = self.scene.write().await;
        let next = step(scene.active_prop);
        if next != scene.active_prop {
            tracing::info!("Prop switch: {} -> {}", scene.active_prop, next);
            scene.active_prop = next;
            scene.puppet = Some(Puppet::mount(next));
        }
        next
    }

    /// Get a clone of the current scene state
    pub async fn get_scene(&self) -> SceneState {
        self.scene.read().await.clone()
    }

    /// Number of frames mapped so far
    pub fn frames_mapped(&self) -> u64 {
        self.frames_mapped.load(Ordering::Relaxed)
    }

    /// Subscribe to applied poses
    pub fn subscribe_pose(&self) -> broadcast::Receiver<PuppetPose> {
        self.pose_tx.subscribe()
    }

    /// Subscribe to shutdown signal
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    fn rest_sample() -> TrackingSample {
        TrackingSample {
            eye_blink_left: 0.0,
            eye_blink_right: 0.0,
            brow_inner_up: 0.0,
            brow_down_left: 0.0,
            brow_down_right: 0.0,
            jaw_open: 0.0,
        }
    }

    #[tokio::test]
    async fn test_default_scene_mounts_scarecrow() {
        let state = AppState::new(Config::default());
        let scene = state.get_scene().await;
        assert_eq!(scene.active_prop, Prop::Scarecrow);
        assert!(scene.puppet.is_some());
    }

    #[tokio::test]
    async fn test_apply_sample_on_scarecrow() {
        let state = AppState::new(Config::default());
        let pose = state.apply_sample(rest_sample()).await.unwrap();
        assert_eq!(pose.mouth.angle_deg, -100.0);
        assert_eq!(state.frames_mapped(), 1);
    }

    #[tokio::test]
    async fn test_apply_sample_skipped_on_ball() {
        let mut config = Config::default();
        config.scene.default_prop = 0;
        let state = AppState::new(config);

        assert!(state.apply_sample(rest_sample()).await.is_none());
        assert_eq!(state.frames_mapped(), 0);
    }

    #[tokio::test]
    async fn test_apply_sample_skipped_without_puppet() {
        let state = AppState::new(Config::default());
        state.scene.write().await.puppet = None;
        assert!(state.apply_sample(rest_sample()).await.is_none());
    }

    #[tokio::test]
    async fn test_prop_switch_remounts_and_resets() {
        let state = AppState::new(Config::default());
        state.apply_sample(rest_sample()).await;

        let prop = state.select_prop(Prop::prev).await;
        assert_eq!(prop, Prop::OrbitingBall);

        let scene = state.get_scene().await;
        assert!(scene.puppet.unwrap().last_pose().is_none());
    }

    #[tokio::test]
    async fn test_prop_switch_clamps() {
        let state = AppState::new(Config::default());
        // Already at the last entry
        assert_eq!(state.select_prop(Prop::next).await, Prop::Scarecrow);
        // Stepping back twice clamps at the first
        assert_eq!(state.select_prop(Prop::prev).await, Prop::OrbitingBall);
        assert_eq!(state.select_prop(Prop::prev).await, Prop::OrbitingBall);
    }

    #[tokio::test]
    async fn test_pose_broadcast() {
        let state = AppState::new(Config::default());
        let mut rx = state.subscribe_pose();

        state.apply_sample(rest_sample()).await;
        let pose = rx.recv().await.unwrap();
        assert_eq!(pose.left_eye.angle_deg, -120.0);
    }
}
