//! Driver timing configuration.
//!
//! All tunable parameters for the bus driver. Defaults match the timing
//! the Geopro 202S controller is known to tolerate in the field; hosts
//! may override them before constructing the driver.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Timing parameters for polling, pacing, and frame reassembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    // --- Polling ---
    /// Minimum interval between re-polls of a standard reading class
    /// (temperature, valve, status/hour), in milliseconds.
    pub min_read_interval_ms: u32,
    /// Minimum interval between configuration-bank re-polls. Banks
    /// change rarely, so this is much longer than the standard interval.
    pub bank_read_interval_ms: u32,

    // --- Pacing ---
    /// Minimum delay between consecutive outbound requests (ms).
    pub request_delay_ms: u32,

    // --- Framing ---
    /// Inter-byte timeout after which a partial frame is abandoned (ms).
    pub byte_timeout_ms: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            min_read_interval_ms: 10_000, // 10 s between readings
            bank_read_interval_ms: 60_000, // 60 s between bank readings
            request_delay_ms: 200,
            byte_timeout_ms: 100,
        }
    }
}

impl DriverConfig {
    /// Reject configurations that would flood the bus or break framing.
    pub fn validate(&self) -> Result<()> {
        if self.request_delay_ms < 10 {
            return Err(Error::Config("request_delay_ms below 10 ms floods the bus"));
        }
        if self.min_read_interval_ms < self.request_delay_ms {
            return Err(Error::Config(
                "min_read_interval_ms must not undercut request_delay_ms",
            ));
        }
        if self.bank_read_interval_ms < self.min_read_interval_ms {
            return Err(Error::Config(
                "bank_read_interval_ms must not undercut min_read_interval_ms",
            ));
        }
        if self.byte_timeout_ms == 0 {
            return Err(Error::Config("byte_timeout_ms must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = DriverConfig::default();
        assert!(c.validate().is_ok());
        assert!(c.bank_read_interval_ms > c.min_read_interval_ms);
        assert!(c.min_read_interval_ms > c.request_delay_ms);
        assert!(c.byte_timeout_ms > 0);
    }

    #[test]
    fn serde_roundtrip() {
        let c = DriverConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: DriverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.min_read_interval_ms, c2.min_read_interval_ms);
        assert_eq!(c.bank_read_interval_ms, c2.bank_read_interval_ms);
        assert_eq!(c.request_delay_ms, c2.request_delay_ms);
        assert_eq!(c.byte_timeout_ms, c2.byte_timeout_ms);
    }

    #[test]
    fn rejects_flooding_pace() {
        let c = DriverConfig {
            request_delay_ms: 1,
            ..DriverConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_bank_interval_below_standard() {
        let c = DriverConfig {
            bank_read_interval_ms: 5_000,
            ..DriverConfig::default()
        };
        assert!(c.validate().is_err());
    }
}
