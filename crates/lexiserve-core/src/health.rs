//! Process-wide health state

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

/// Service health as seen by readiness probes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Process started, model load still in flight
    Starting,

    /// Model loaded, inference traffic admitted
    Ready,

    /// Model load failed, inference traffic refused
    Failed,
}

const STARTING: u8 = 0;
const READY: u8 = 1;
const FAILED: u8 = 2;

/// Shared health flag with monotonic transitions.
///
/// Transitions are `Starting -> Ready` or `Starting -> Failed`, enforced
/// with a compare-and-swap so a late loader thread can never move the
/// state backwards or sideways.
#[derive(Debug)]
pub struct HealthState {
    status: AtomicU8,
}

impl HealthState {
    /// Create a new state in `Starting`
    pub fn new() -> Self {
        Self {
            status: AtomicU8::new(STARTING),
        }
    }

    /// Current status
    pub fn status(&self) -> HealthStatus {
        match self.status.load(Ordering::SeqCst) {
            READY => HealthStatus::Ready,
            FAILED => HealthStatus::Failed,
            _ => HealthStatus::Starting,
        }
    }

    /// Whether inference traffic may be admitted
    pub fn is_ready(&self) -> bool {
        self.status.load(Ordering::SeqCst) == READY
    }

    /// Transition `Starting -> Ready`; returns false if already settled
    pub fn mark_ready(&self) -> bool {
        self.status
            .compare_exchange(STARTING, READY, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Transition `Starting -> Failed`; returns false if already settled
    pub fn mark_failed(&self) -> bool {
        self.status
            .compare_exchange(STARTING, FAILED, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_starting() {
        let state = HealthState::new();
        assert_eq!(state.status(), HealthStatus::Starting);
        assert!(!state.is_ready());
    }

    #[test]
    fn test_ready_transition_happens_once() {
        let state = HealthState::new();
        assert!(state.mark_ready());
        assert!(state.is_ready());

        // Second attempt is a no-op, as is a late failure
        assert!(!state.mark_ready());
        assert!(!state.mark_failed());
        assert_eq!(state.status(), HealthStatus::Ready);
    }

    #[test]
    fn test_failed_is_terminal() {
        let state = HealthState::new();
        assert!(state.mark_failed());
        assert_eq!(state.status(), HealthStatus::Failed);
        assert!(!state.mark_ready());
        assert_eq!(state.status(), HealthStatus::Failed);
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Starting).unwrap(),
            "\"starting\""
        );
        assert_eq!(serde_json::to_string(&HealthStatus::Ready).unwrap(), "\"ready\"");
        assert_eq!(serde_json::to_string(&HealthStatus::Failed).unwrap(), "\"failed\"");
    }
}
