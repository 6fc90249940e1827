//! # Frame Decoder Seam
//!
//! Turns a captured frame into a barcode string. The decoder is
//! constructed with its symbology set; the engine only asks it one
//! question per frame.

use crate::device::Frame;

/// Decodes frames into barcode values.
///
/// `None` means "no barcode in this frame" and is a non-event: the
/// decode loop simply pulls the next frame. Only a `Some` ends the
/// activation.
pub trait FrameDecoder: Send + Sync {
    /// Attempts to decode a barcode from the frame.
    fn decode(&self, frame: &Frame) -> Option<String>;
}

/// Blanket impl so tests can pass a closure as a decoder.
impl<F> FrameDecoder for F
where
    F: Fn(&Frame) -> Option<String> + Send + Sync,
{
    fn decode(&self, frame: &Frame) -> Option<String> {
        self(frame)
    }
}
