//! Report configuration loaded from environment variables.
//!
//! The single setting is the IANA timezone every timestamp is rendered in
//! and every month boundary is computed against.  It has a default so the
//! report layer works with zero configuration.

use chrono_tz::Tz;

/// Report layer configuration.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// IANA timezone for all local-time conversions.
    /// Env: `REPORT_TIMEZONE`
    /// Default: `Africa/Kampala`
    pub timezone: Tz,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Africa::Kampala,
        }
    }
}

impl ReportConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("REPORT_TIMEZONE") {
            match name.parse::<Tz>() {
                Ok(tz) => config.timezone = tz,
                Err(_) => {
                    tracing::warn!(value = %name, "Invalid REPORT_TIMEZONE, using default");
                }
            }
        }

        config
    }

    /// Configuration pinned to an explicit timezone.
    pub fn with_timezone(timezone: Tz) -> Self {
        Self { timezone }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.timezone, chrono_tz::Africa::Kampala);
    }

    #[test]
    fn test_with_timezone() {
        let config = ReportConfig::with_timezone(chrono_tz::America::New_York);
        assert_eq!(config.timezone, chrono_tz::America::New_York);
    }

    #[test]
    fn test_zone_names_parse() {
        assert_eq!(
            "Africa/Kampala".parse::<Tz>().ok(),
            Some(chrono_tz::Africa::Kampala)
        );
        assert!("Atlantis/Capital".parse::<Tz>().is_err());
    }
}
