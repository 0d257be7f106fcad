//! Focus sampling loop.
//!
//! Periodically reduces the two local attention signals (tab visibility and
//! face presence) to a focus score and emits a `focus_update` frame over the
//! outbound channel. Emission is fire-and-forget: there is no retry, no
//! acknowledgement, and a lost report is silently accepted.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use miharu_server::infrastructure::dto::websocket::{FocusUpdateMessage, MessageType};
use miharu_shared::time::now_utc_millis;

/// Interval between focus reports
pub const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// The two locally measured attention signals (both default to true)
#[derive(Debug, Clone, Copy)]
struct FocusSignals {
    is_tab_active: bool,
    is_face_detected: bool,
}

impl Default for FocusSignals {
    fn default() -> Self {
        Self {
            is_tab_active: true,
            is_face_detected: true,
        }
    }
}

/// Derive the focus score from the two signals.
///
/// A hidden tab dominates everything; a missing face halves the score.
/// Only three values are ever produced.
pub fn compute_score(is_tab_active: bool, is_face_detected: bool) -> u8 {
    if !is_tab_active {
        0
    } else if !is_face_detected {
        50
    } else {
        100
    }
}

/// Handle for the external collaborators feeding the sampler.
///
/// The visibility observer calls `set_tab_active`; the face-detection
/// collaborator calls `set_face_detected`. Changes take effect at the next
/// timer tick; neither call triggers an immediate report.
#[derive(Clone)]
pub struct SamplerHandle {
    signals: Arc<Mutex<FocusSignals>>,
}

impl SamplerHandle {
    /// Update the tab visibility signal
    pub async fn set_tab_active(&self, active: bool) {
        self.signals.lock().await.is_tab_active = active;
    }

    /// Update the face presence signal
    pub async fn set_face_detected(&self, detected: bool) {
        self.signals.lock().await.is_face_detected = detected;
    }

    /// Score the current signals without emitting a report
    pub async fn current_score(&self) -> u8 {
        let signals = *self.signals.lock().await;
        compute_score(signals.is_tab_active, signals.is_face_detected)
    }
}

/// Periodic focus sampler
pub struct FocusSampler {
    signals: Arc<Mutex<FocusSignals>>,
    emit_tx: mpsc::UnboundedSender<String>,
    report_task: Option<JoinHandle<()>>,
}

impl FocusSampler {
    /// Create a new sampler emitting serialized `focus_update` frames on `emit_tx`
    pub fn new(emit_tx: mpsc::UnboundedSender<String>) -> Self {
        Self {
            signals: Arc::new(Mutex::new(FocusSignals::default())),
            emit_tx,
            report_task: None,
        }
    }

    /// Get a handle for the signal-feeding collaborators
    pub fn handle(&self) -> SamplerHandle {
        SamplerHandle {
            signals: self.signals.clone(),
        }
    }

    /// Start the report loop.
    ///
    /// Idempotent: starting a running sampler does not create a second timer.
    /// The first report is emitted one full period after start.
    pub fn start(&mut self) {
        if let Some(task) = &self.report_task
            && !task.is_finished()
        {
            tracing::debug!("Focus sampler already running");
            return;
        }

        let signals = self.signals.clone();
        let emit_tx = self.emit_tx.clone();

        self.report_task = Some(tokio::spawn(async move {
            let mut interval =
                time::interval_at(Instant::now() + REPORT_INTERVAL, REPORT_INTERVAL);

            loop {
                interval.tick().await;

                // The score always reads whatever the signals are at tick time
                let current = *signals.lock().await;
                let score = compute_score(current.is_tab_active, current.is_face_detected);

                let report = FocusUpdateMessage {
                    r#type: MessageType::FocusUpdate,
                    timestamp: now_utc_millis(),
                    is_tab_active: current.is_tab_active,
                    is_face_detected: current.is_face_detected,
                    score,
                };

                let json = match serde_json::to_string(&report) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!("Failed to serialize focus report: {}", e);
                        continue;
                    }
                };

                // Fire-and-forget: a closed channel means the session is gone
                if emit_tx.send(json).is_err() {
                    break;
                }
            }
        }));
    }

    /// Stop the report loop.
    ///
    /// Safe to call when the sampler was never started.
    pub fn stop(&mut self) {
        if let Some(task) = self.report_task.take() {
            task.abort();
            tracing::debug!("Focus sampler stopped");
        }
    }
}

impl Drop for FocusSampler {
    fn drop(&mut self) {
        self.stop();
    }
}
