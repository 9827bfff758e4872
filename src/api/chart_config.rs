use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{HeightOverflowPolicy, RevealTiming};
use crate::error::{ChartError, ChartResult};

/// Public chart bootstrap configuration.
///
/// Every field has a serde default so partial JSON documents load cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarChartConfig {
    /// Delay between a reset and the first bar reveal.
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
    /// Delay between consecutive bar reveals.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
    #[serde(default)]
    pub height_overflow: HeightOverflowPolicy,
    /// Issue an initial reset as the last build step.
    #[serde(default = "default_autostart")]
    pub autostart: bool,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            restart_delay_ms: default_restart_delay_ms(),
            step_delay_ms: default_step_delay_ms(),
            height_overflow: HeightOverflowPolicy::default(),
            autostart: default_autostart(),
        }
    }
}

impl BarChartConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_restart_delay_ms(mut self, delay_ms: u64) -> Self {
        self.restart_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_step_delay_ms(mut self, delay_ms: u64) -> Self {
        self.step_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_height_overflow(mut self, policy: HeightOverflowPolicy) -> Self {
        self.height_overflow = policy;
        self
    }

    #[must_use]
    pub fn with_autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }

    /// Consecutive reveals must never share an instant.
    pub fn validate(&self) -> ChartResult<()> {
        if self.step_delay_ms == 0 {
            return Err(ChartError::InvalidData(
                "step delay must be > 0 ms".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn reveal_timing(&self) -> RevealTiming {
        RevealTiming {
            restart_delay: Duration::from_millis(self.restart_delay_ms),
            step_delay: Duration::from_millis(self.step_delay_ms),
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }
}

fn default_restart_delay_ms() -> u64 {
    200
}

fn default_step_delay_ms() -> u64 {
    100
}

fn default_autostart() -> bool {
    true
}
