use std::time::Duration;

use super::{parse_var, ConfigError};

pub const DEFAULT_STARTING_MONEY: i64 = 200;
pub const DEFAULT_CACHE_CAPACITY: u64 = 1024;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Controller settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Balance a brand-new session starts with.
    pub starting_money: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_money: DEFAULT_STARTING_MONEY,
        }
    }
}

impl SessionConfig {
    /// Read `BLACKJACK_STARTING_MONEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let starting_money = parse_var("BLACKJACK_STARTING_MONEY", DEFAULT_STARTING_MONEY)?;
        if starting_money < 0 {
            return Err(ConfigError::invalid(
                "BLACKJACK_STARTING_MONEY",
                starting_money.to_string(),
                "must not be negative",
            ));
        }
        Ok(Self { starting_money })
    }
}

/// Session cache sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub capacity: u64,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl CacheConfig {
    /// Read `BLACKJACK_CACHE_CAPACITY` and `BLACKJACK_CACHE_TTL_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let capacity = parse_var("BLACKJACK_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?;
        let ttl_secs = parse_var("BLACKJACK_CACHE_TTL_SECS", DEFAULT_CACHE_TTL.as_secs())?;
        Ok(Self {
            capacity,
            ttl: Duration::from_secs(ttl_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;

    fn clear() {
        env::remove_var("BLACKJACK_STARTING_MONEY");
        env::remove_var("BLACKJACK_CACHE_CAPACITY");
        env::remove_var("BLACKJACK_CACHE_TTL_SECS");
    }

    #[test]
    #[serial]
    fn defaults_apply_when_unset() {
        clear();
        assert_eq!(SessionConfig::from_env().unwrap().starting_money, 200);
        assert_eq!(CacheConfig::from_env().unwrap(), CacheConfig::default());
    }

    #[test]
    #[serial]
    fn values_are_parsed() {
        clear();
        env::set_var("BLACKJACK_STARTING_MONEY", "500");
        env::set_var("BLACKJACK_CACHE_CAPACITY", "16");
        env::set_var("BLACKJACK_CACHE_TTL_SECS", "5");
        assert_eq!(SessionConfig::from_env().unwrap().starting_money, 500);
        let cache = CacheConfig::from_env().unwrap();
        assert_eq!(cache.capacity, 16);
        assert_eq!(cache.ttl, Duration::from_secs(5));
        clear();
    }

    #[test]
    #[serial]
    fn malformed_values_are_rejected() {
        clear();
        env::set_var("BLACKJACK_STARTING_MONEY", "lots");
        let err = SessionConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "BLACKJACK_STARTING_MONEY",
                ..
            }
        ));

        env::set_var("BLACKJACK_STARTING_MONEY", "-5");
        assert!(SessionConfig::from_env().is_err());
        clear();
    }
}
