//! System configuration parameters
//!
//! All tunable parameters for the Greenthumb watering loop. The values
//! mirror the fixed constants of the board bring-up code; nothing here is
//! persisted (the system is stateless across resets by design).

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Simulated time ---
    /// Loop iterations per simulated day. Each iteration is one
    /// tick-second, so 1440 iterations stand in for minutes-in-a-day.
    pub minutes_per_day: u32,

    // --- Water level simulation ---
    /// Level at boot (also the refill set-point).
    pub initial_level: u32,
    /// Motor activates while the level is strictly below this.
    pub refill_threshold: u32,
    /// Upper bound (inclusive) of the pseudo-random daily drain.
    pub max_daily_drain: u32,

    // --- Actuation timing ---
    /// Tick-seconds to block after switching the motor on.
    pub refill_wait_ticks: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            minutes_per_day: 1440,

            initial_level: 50,
            refill_threshold: 50,
            max_daily_drain: 24,

            refill_wait_ticks: 120,
        }
    }
}
