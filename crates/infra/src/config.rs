use chrono::Duration;
use reminder_scheduler_domain::{QuietHoursPolicy, Tz};
use reminder_scheduler_utils::create_random_secret;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to verify the HS256 user tokens issued by the auth service
    pub jwt_secret: String,
    /// Secret the cron trigger has to present to start a reminder sweep
    pub sweep_secret_code: String,
    /// Local wall clock window reminders are allowed to fire in
    pub quiet_hours: QuietHoursPolicy,
    /// How far ahead of now a sweep looks for reminders to enqueue
    pub sweep_horizon: Duration,
    /// Seconds between two sweeps started by the in process job scheduler.
    /// Zero disables the job scheduler.
    pub sweep_interval_secs: u64,
}

const DEFAULT_PORT: usize = 5000;
const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Athens;
const DEFAULT_SWEEP_HORIZON_HOURS: i64 = 48;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5 * 60;

/// Parses an env var, falling back to the default with a warning if it
/// holds garbage. A missing env var silently gives the default.
fn parse_env<T: FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn secret_from_env(key: &str, description: &str) -> String {
    match std::env::var(key) {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            info!(
                "Did not find {} environment variable. Going to create one.",
                key
            );
            let secret = create_random_secret(32);
            info!("Secret for {} was generated and set to: {}", description, secret);
            secret
        }
    }
}

fn timezone_from_env() -> Tz {
    match std::env::var("REMINDER_TIMEZONE") {
        Ok(tz) => match tz.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                warn!(
                    "The given REMINDER_TIMEZONE: {} is not a known timezone, falling back to {}.",
                    tz, DEFAULT_TIMEZONE
                );
                DEFAULT_TIMEZONE
            }
        },
        Err(_) => DEFAULT_TIMEZONE,
    }
}

fn quiet_hours_from_env() -> QuietHoursPolicy {
    let timezone = timezone_from_env();
    let start = parse_env("QUIET_HOURS_START", QuietHoursPolicy::DEFAULT_START_HOUR);
    let end = parse_env("QUIET_HOURS_END", QuietHoursPolicy::DEFAULT_END_HOUR);
    match QuietHoursPolicy::new(timezone, start, end) {
        Ok(policy) => policy,
        Err(e) => {
            warn!("{}, falling back to the default quiet hours.", e);
            QuietHoursPolicy::with_default_window(timezone)
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let port = parse_env("PORT", DEFAULT_PORT);
        let jwt_secret = secret_from_env("JWT_SECRET", "verifying user tokens");
        let sweep_secret_code = secret_from_env("SWEEP_SECRET_CODE", "triggering sweeps");

        let mut horizon_hours = parse_env("SWEEP_HORIZON_HOURS", DEFAULT_SWEEP_HORIZON_HOURS);
        if horizon_hours <= 0 {
            warn!(
                "SWEEP_HORIZON_HOURS must be positive, falling back to the default: {}.",
                DEFAULT_SWEEP_HORIZON_HOURS
            );
            horizon_hours = DEFAULT_SWEEP_HORIZON_HOURS;
        }

        Self {
            port,
            jwt_secret,
            sweep_secret_code,
            quiet_hours: quiet_hours_from_env(),
            sweep_horizon: Duration::hours(horizon_hours),
            sweep_interval_secs: parse_env("SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_config_from_env() {
        let config = Config::new();
        assert!(config.sweep_horizon > Duration::zero());
        assert!(!config.jwt_secret.is_empty());
        assert!(!config.sweep_secret_code.is_empty());
    }

    #[test]
    fn garbage_falls_back_to_default() {
        assert_eq!(parse_env("REMINDER_SCHEDULER_TEST_UNSET_KEY", 42usize), 42);
    }
}
