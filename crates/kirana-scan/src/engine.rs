//! # Scan Engine
//!
//! One activation at a time, one decoded value per activation.
//!
//! ## Activation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Scan Activation Lifecycle                          │
//! │                                                                         │
//! │  start()                                                                │
//! │    │  stop prior activation (camera is a singleton resource)           │
//! │    │  enumerate ── empty ──► Err(NoCamera)                             │
//! │    │  pick device (prefer rear-facing label, else first)               │
//! │    │  open stream ── error ──► Err(StartFailed / PermissionDenied)     │
//! │    ▼                                                                    │
//! │  decode loop (spawned task, owns the stream)                           │
//! │    │                                                                    │
//! │    ├── frame decodes ──► release stream, emit ONE value, exit          │
//! │    ├── frame misses  ──► pull next frame (non-event)                   │
//! │    ├── stop()/drop   ──► release stream, emit Cancelled, exit          │
//! │    └── device fault  ──► release stream, emit Failed, exit             │
//! │                                                                         │
//! │  Every exit path drops the stream, so the camera is never left "on".   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::decoder::FrameDecoder;
use crate::device::{CameraInfo, CameraProvider, CameraStream};
use crate::error::{ScanError, ScanResult};
use crate::symbology::ScanConfig;

// =============================================================================
// Outcome
// =============================================================================

/// How one activation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A barcode was decoded. The camera is already released.
    Decoded(String),

    /// The activation was stopped before any decode.
    Cancelled,

    /// The device failed mid-scan.
    Failed(ScanError),
}

/// Consumer handle for one activation.
///
/// `wait` consumes the handle: the single-value contract is structural,
/// there is no second receive.
#[derive(Debug)]
pub struct ScanActivation {
    rx: oneshot::Receiver<ScanOutcome>,
}

impl ScanActivation {
    /// Waits for the activation to end.
    pub async fn wait(self) -> ScanOutcome {
        // A dropped sender means the loop exited without reporting,
        // which only happens on cancellation paths.
        self.rx.await.unwrap_or(ScanOutcome::Cancelled)
    }
}

// =============================================================================
// Engine
// =============================================================================

struct ActiveScan {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl Drop for ActiveScan {
    fn drop(&mut self) {
        // Dropping the engine mid-scan aborts the loop; the stream is a
        // task-local and is dropped (released) with the task.
        self.task.abort();
    }
}

/// The camera barcode scan engine.
///
/// Holds at most one [`ActiveScan`]; `start` on a busy engine stops the
/// prior activation before touching the device again.
pub struct ScanEngine {
    provider: Arc<dyn CameraProvider>,
    decoder: Arc<dyn FrameDecoder>,
    config: ScanConfig,
    active: Mutex<Option<ActiveScan>>,
}

impl ScanEngine {
    /// Creates an engine over a camera provider and a decoder.
    pub fn new(provider: Arc<dyn CameraProvider>, decoder: Arc<dyn FrameDecoder>) -> Self {
        Self::with_config(provider, decoder, ScanConfig::default())
    }

    /// Creates an engine with explicit scan settings.
    pub fn with_config(
        provider: Arc<dyn CameraProvider>,
        decoder: Arc<dyn FrameDecoder>,
        config: ScanConfig,
    ) -> Self {
        ScanEngine {
            provider,
            decoder,
            config,
            active: Mutex::new(None),
        }
    }

    /// Starts a scan activation.
    ///
    /// Stops any prior activation first. Fails with [`ScanError::NoCamera`]
    /// when enumeration finds no devices; otherwise prefers a rear-facing
    /// device and falls back to the first one listed.
    pub async fn start(&self) -> ScanResult<ScanActivation> {
        let mut active = self.active.lock().await;

        if let Some(prior) = active.take() {
            debug!("stopping prior scan activation");
            Self::shutdown(prior).await;
        }

        let devices = self.provider.enumerate().await?;
        let device = pick_device(&devices).ok_or(ScanError::NoCamera)?;
        debug!(device = %device.label, "starting scan activation");

        let stream = self.provider.open(&device.id, &self.config).await?;

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        let (outcome_tx, outcome_rx) = oneshot::channel();
        let decoder = Arc::clone(&self.decoder);

        let task = tokio::spawn(decode_loop(stream, decoder, shutdown_rx, outcome_tx));

        *active = Some(ActiveScan { shutdown_tx, task });
        Ok(ScanActivation { rx: outcome_rx })
    }

    /// Stops the current activation, if any.
    ///
    /// Idempotent: safe whether or not a scan is active. When this call
    /// returns the decode loop has exited and the camera is released.
    pub async fn stop(&self) {
        let prior = self.active.lock().await.take();
        if let Some(prior) = prior {
            debug!("stopping scan activation");
            Self::shutdown(prior).await;
        }
    }

    /// Whether a decode loop is currently holding the camera.
    pub async fn is_active(&self) -> bool {
        self.active
            .lock()
            .await
            .as_ref()
            .map(|scan| !scan.task.is_finished())
            .unwrap_or(false)
    }

    async fn shutdown(mut prior: ActiveScan) {
        let _ = prior.shutdown_tx.send(()).await;
        // Await loop exit so the stream is dropped before we return.
        // The loop may already be gone (post-decode); joining then is
        // immediate. Abort-on-drop fires afterwards on a finished task.
        let _ = (&mut prior.task).await;
    }
}

/// Picks the scanning device: rear-facing when the label says so, else
/// the first enumerated camera.
fn pick_device(devices: &[CameraInfo]) -> Option<&CameraInfo> {
    devices
        .iter()
        .find(|d| d.is_rear_facing())
        .or_else(|| devices.first())
}

// =============================================================================
// Decode Loop
// =============================================================================

async fn decode_loop(
    mut stream: Box<dyn CameraStream>,
    decoder: Arc<dyn FrameDecoder>,
    mut shutdown_rx: mpsc::Receiver<()>,
    outcome_tx: oneshot::Sender<ScanOutcome>,
) {
    let outcome = loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                break ScanOutcome::Cancelled;
            }
            frame = stream.next_frame() => {
                match frame {
                    Ok(Some(frame)) => {
                        if let Some(code) = decoder.decode(&frame) {
                            debug!(%code, "barcode decoded");
                            break ScanOutcome::Decoded(code);
                        }
                        // No barcode in this frame: pull the next one.
                    }
                    Ok(None) => {
                        warn!("camera stream ended before a decode");
                        break ScanOutcome::Failed(ScanError::DeviceFailed(
                            "stream ended".to_string(),
                        ));
                    }
                    Err(err) => {
                        warn!(error = %err, "camera device failed mid-scan");
                        break ScanOutcome::Failed(err);
                    }
                }
            }
        }
    };

    // Release the camera before the consumer observes the outcome.
    drop(stream);
    let _ = outcome_tx.send(outcome);
}

// =============================================================================
// Unit Tests
// =============================================================================
