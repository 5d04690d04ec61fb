//! Tunable settings for the generation call.

use serde::{Deserialize, Serialize};

/// Generation timing.
///
/// There is no configuration file or environment lookup; the app uses
/// [`GenerationConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// How long the simulated generator waits before answering.
    pub simulated_delay_ms: u32,

    /// Upper bound on a single generation call. A call still running
    /// after this long fails with
    /// [`GenerationError::TimedOut`](crate::GenerationError::TimedOut).
    pub timeout_ms: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: 2_500,
            timeout_ms: 30_000,
        }
    }
}
