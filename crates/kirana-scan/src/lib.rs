//! # kirana-scan: Camera Barcode Scan Engine
//!
//! Manages exactly one active camera-decoding session at a time and
//! delivers at most one decoded value per activation.
//!
//! ## Modules
//!
//! - [`device`] - Camera provider/stream trait seams and the frame type
//! - [`decoder`] - Frame-to-barcode decoder seam
//! - [`symbology`] - Supported 1-D retail symbologies and scan config
//! - [`engine`] - The scan engine: activation, decode loop, teardown
//! - [`error`] - Scan error types
//!
//! ## Resource Discipline
//!
//! The camera stream lives inside the decode-loop task; every exit path
//! (first decode, explicit [`ScanEngine::stop`], consumer drop, device
//! failure) drops it, so the device is never left "on". `stop()` awaits
//! the loop, so release is complete when the call returns.
//!
//! [`ScanEngine::stop`]: engine::ScanEngine::stop

pub mod decoder;
pub mod device;
pub mod engine;
pub mod error;
pub mod symbology;

pub use decoder::FrameDecoder;
pub use device::{CameraInfo, CameraProvider, CameraStream, Frame};
pub use engine::{ScanActivation, ScanEngine, ScanOutcome};
pub use error::{ScanError, ScanResult};
pub use symbology::{ScanConfig, Symbology};
