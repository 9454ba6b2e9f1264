// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

use crate::hysteresis::{ADMISSION_THRESHOLD, EVICTION_WINDOW};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct HysteresisSettings {
    /// Score a pending asset needs before it is confirmed.
    #[serde(default = "default_admission_threshold")]
    pub admission_threshold: i64,
    /// Batches a confirmed asset may go unseen before it is evicted.
    #[serde(default = "default_eviction_window")]
    pub eviction_window: i64,
}

impl Default for HysteresisSettings {
    fn default() -> Self {
        Self {
            admission_threshold: ADMISSION_THRESHOLD,
            eviction_window: EVICTION_WINDOW,
        }
    }
}

impl HysteresisSettings {
    pub fn validate(&self) -> core_types::Result<()> {
        if self.admission_threshold <= 0 {
            return Err(core_types::Error::InvalidSettings(format!(
                "admission_threshold must be positive, got {}",
                self.admission_threshold
            )));
        }
        // A zero window would evict an asset in the same update that admits it.
        if self.eviction_window < 1 {
            return Err(core_types::Error::InvalidSettings(format!(
                "eviction_window must be at least 1, got {}",
                self.eviction_window
            )));
        }
        Ok(())
    }
}

fn default_admission_threshold() -> i64 {
    ADMISSION_THRESHOLD
}

fn default_eviction_window() -> i64 {
    EVICTION_WINDOW
}
