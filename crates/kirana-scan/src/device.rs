//! # Camera Device Seams
//!
//! Trait boundaries between the scan engine and the platform camera
//! stack. Production wires a real capture backend here; tests substitute
//! scripted fakes, the same seam pattern either way.
//!
//! ## Ownership
//! A [`CameraStream`] IS the open device handle: dropping it releases
//! the camera. The engine keeps the stream inside the decode-loop task
//! so that every task exit, normal or not, releases the device.

use async_trait::async_trait;

use crate::error::ScanResult;
use crate::symbology::ScanConfig;

// =============================================================================
// Device Identity
// =============================================================================

/// One enumerable camera device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraInfo {
    /// Platform device identifier, passed back to `open`.
    pub id: String,

    /// Human-readable label ("Integrated Webcam", "Back Camera", ...).
    pub label: String,
}

impl CameraInfo {
    /// True when the label indicates a rear-facing camera, the preferred
    /// device for scanning shelf items.
    pub fn is_rear_facing(&self) -> bool {
        let label = self.label.to_lowercase();
        label.contains("back") || label.contains("rear")
    }
}

// =============================================================================
// Frames
// =============================================================================

/// One captured frame, 8-bit luma.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

// =============================================================================
// Provider / Stream Traits
// =============================================================================

/// Access to the platform's camera devices.
#[async_trait]
pub trait CameraProvider: Send + Sync {
    /// Lists available camera devices.
    async fn enumerate(&self) -> ScanResult<Vec<CameraInfo>>;

    /// Opens a capture stream on the given device.
    ///
    /// The returned stream owns the device; dropping it releases the
    /// camera.
    async fn open(&self, device_id: &str, config: &ScanConfig) -> ScanResult<Box<dyn CameraStream>>;
}

/// An open capture stream. Dropping it releases the camera.
#[async_trait]
pub trait CameraStream: Send {
    /// Pulls the next frame.
    ///
    /// `Ok(None)` means the stream ended (device closed); an `Err` is a
    /// fatal device fault. Both end the activation.
    async fn next_frame(&mut self) -> ScanResult<Option<Frame>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rear_facing_detection_is_case_insensitive() {
        let back = CameraInfo {
            id: "1".into(),
            label: "Back Camera".into(),
        };
        let rear = CameraInfo {
            id: "2".into(),
            label: "REAR wide".into(),
        };
        let front = CameraInfo {
            id: "3".into(),
            label: "Front Camera".into(),
        };

        assert!(back.is_rear_facing());
        assert!(rear.is_rear_facing());
        assert!(!front.is_rear_facing());
    }
}
