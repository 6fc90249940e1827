//! # Symbologies and Scan Configuration
//!
//! The 1-D retail symbologies the decode loop is configured to
//! recognize, plus the per-activation scan settings.

use serde::{Deserialize, Serialize};

/// A 1-D barcode symbology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
    Code128,
    Code39,
    Ean13,
    Ean8,
    UpcA,
    UpcE,
}

impl Symbology {
    /// The common retail set every activation recognizes by default.
    pub fn retail_set() -> Vec<Symbology> {
        vec![
            Symbology::Code128,
            Symbology::Code39,
            Symbology::Ean13,
            Symbology::Ean8,
            Symbology::UpcA,
            Symbology::UpcE,
        ]
    }
}

/// Settings for one scan activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Frames per second the device is asked to deliver.
    pub fps: u32,

    /// Symbologies the decoder should recognize.
    pub symbologies: Vec<Symbology>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            fps: 10,
            symbologies: Symbology::retail_set(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_covers_the_retail_set() {
        let config = ScanConfig::default();
        assert_eq!(config.fps, 10);
        assert_eq!(config.symbologies.len(), 6);
        assert!(config.symbologies.contains(&Symbology::Ean13));
        assert!(config.symbologies.contains(&Symbology::UpcE));
    }
}
