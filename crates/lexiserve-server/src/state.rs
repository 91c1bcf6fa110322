//! Shared application state and the readiness barrier

use lexiserve_core::HealthState;
use lexiserve_engine::TextPipeline;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::{Arc, OnceLock};
use tracing::info;

use crate::config::ServerConfig;

/// Application state shared across all requests
///
/// The pipeline slot and the health flag together form the readiness
/// barrier: handlers admit inference work only once the loader task has
/// published the pipeline, and the `OnceLock` guarantees at most one
/// publication per process.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Process health, driven by the loader task
    pub health: Arc<HealthState>,

    /// The pipeline handle, published exactly once after a successful load
    pipeline: Arc<OnceLock<Arc<dyn TextPipeline>>>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Initialize application state from configuration
    pub fn new(config: ServerConfig, metrics_handle: PrometheusHandle) -> Self {
        Self {
            config: Arc::new(config),
            health: Arc::new(HealthState::new()),
            pipeline: Arc::new(OnceLock::new()),
            metrics_handle,
        }
    }

    /// The loaded pipeline, or `None` while the barrier is closed
    pub fn pipeline(&self) -> Option<Arc<dyn TextPipeline>> {
        self.pipeline.get().cloned()
    }

    /// Publish the loaded pipeline and open the barrier.
    ///
    /// Returns false when a pipeline was already published; the second
    /// publication is dropped.
    pub fn publish_pipeline(&self, pipeline: Arc<dyn TextPipeline>) -> bool {
        if self.pipeline.set(pipeline).is_err() {
            return false;
        }
        let transitioned = self.health.mark_ready();
        if transitioned {
            info!("readiness barrier open, admitting inference traffic");
        }
        transitioned
    }

    /// Record a failed load; the barrier stays closed for good
    pub fn mark_load_failed(&self) -> bool {
        self.health.mark_failed()
    }

    /// Name of the loaded model, once ready
    pub fn model_name(&self) -> Option<String> {
        self.pipeline.get().map(|p| p.metadata().name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexiserve_core::HealthStatus;
    use lexiserve_engine::{ModelConfig, PipelineLoader};
    use metrics_exporter_prometheus::PrometheusBuilder;

    fn test_state() -> AppState {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        AppState::new(ServerConfig::default(), handle)
    }

    fn test_pipeline() -> Arc<dyn TextPipeline> {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en-fr.txt"), "cat {n} :: chat {m}\n").unwrap();
        std::fs::write(dir.path().join("fr-en.txt"), "chat {m} :: cat\n").unwrap();
        PipelineLoader::load(&ModelConfig::from_dir(dir.path())).unwrap()
    }

    #[test]
    fn test_barrier_starts_closed() {
        let state = test_state();
        assert!(state.pipeline().is_none());
        assert!(state.model_name().is_none());
        assert_eq!(state.health.status(), HealthStatus::Starting);
    }

    #[test]
    fn test_publish_opens_barrier_once() {
        let state = test_state();

        assert!(state.publish_pipeline(test_pipeline()));
        assert!(state.pipeline().is_some());
        assert_eq!(state.health.status(), HealthStatus::Ready);
        assert_eq!(state.model_name().as_deref(), Some("wiktionary-fr-en"));

        // A second publication is dropped
        assert!(!state.publish_pipeline(test_pipeline()));
    }

    #[test]
    fn test_failed_load_keeps_barrier_closed() {
        let state = test_state();
        assert!(state.mark_load_failed());
        assert!(state.pipeline().is_none());
        assert_eq!(state.health.status(), HealthStatus::Failed);
    }
}
