use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::{Chips, constants};

/// Per-session tunables. The defaults are the production values; tests
/// shrink `phase_time_limit` to exercise the timeout paths quickly.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SessionConfig {
    pub starting_chips: Chips,
    pub min_bet: Chips,
    pub phase_time_limit: Duration,
    pub max_draws: u8,
}

impl SessionConfig {
    /// Checks the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_bet == 0 {
            return Err("minimum bet must be at least 1 chip".to_string());
        }
        if self.starting_chips < self.min_bet {
            return Err(format!(
                "starting chips ({}) must cover the minimum bet ({})",
                self.starting_chips, self.min_bet
            ));
        }
        if self.max_draws == 0 {
            return Err("players need at least one draw attempt".to_string());
        }
        if self.phase_time_limit.is_zero() {
            return Err("phase time limit must be non-zero".to_string());
        }
        Ok(())
    }

    /// Time limit in whole milliseconds, as sent in `timer-started`.
    #[must_use]
    pub fn phase_time_limit_ms(&self) -> u64 {
        self.phase_time_limit.as_millis() as u64
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_chips: constants::STARTING_CHIPS,
            min_bet: constants::MIN_BET,
            phase_time_limit: Duration::from_millis(constants::PHASE_TIME_LIMIT_MS),
            max_draws: constants::MAX_DRAW_COUNT,
        }
    }
}
