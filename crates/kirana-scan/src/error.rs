//! # Scan Error Types
//!
//! Failures at the camera/decoder boundary. These never touch the bill:
//! a scan failure is surfaced as a dedicated message and the billing
//! session continues unaffected.

use thiserror::Error;

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Scan engine failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Device enumeration found no cameras.
    #[error("No cameras found")]
    NoCamera,

    /// The platform denied camera access.
    #[error("Camera permission denied")]
    PermissionDenied,

    /// Enumeration or stream start failed at the device layer.
    #[error("Failed to start camera: {0}")]
    StartFailed(String),

    /// The device failed mid-scan (unplugged, driver fault).
    #[error("Camera device failed: {0}")]
    DeviceFailed(String),
}

impl ScanError {
    /// True when retrying with the same device could succeed
    /// (transient device fault rather than a missing camera or a
    /// permission decision).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ScanError::StartFailed(_) | ScanError::DeviceFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(ScanError::DeviceFailed("usb reset".into()).is_transient());
        assert!(!ScanError::NoCamera.is_transient());
        assert!(!ScanError::PermissionDenied.is_transient());
    }
}
