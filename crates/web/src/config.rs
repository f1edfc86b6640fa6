use std::{env, net::SocketAddr, str::FromStr};

use numbering::engine::DEFAULT_THRESHOLD_METERS;
use thiserror::Error;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_THRESHOLD_METERS: f64 = 50.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {variable} has invalid value {value:?}")]
    Invalid { variable: &'static str, value: String },

    #[error(
        "default threshold {default} m exceeds the maximum threshold {max} m"
    )]
    DefaultAboveMax { default: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebConfig {
    pub bind_address: SocketAddr,
    /// Used when a request does not name a threshold.
    pub default_threshold_meters: f64,
    /// Requests above this are rejected.
    pub max_threshold_meters: f64,
}

impl WebConfig {
    /// Reads `NUMBERING_BIND_ADDRESS`, `NUMBERING_DEFAULT_THRESHOLD` and
    /// `NUMBERING_MAX_THRESHOLD`, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            bind_address: parse(&lookup, "NUMBERING_BIND_ADDRESS")?
                .unwrap_or(defaults.bind_address),
            default_threshold_meters: parse(&lookup, "NUMBERING_DEFAULT_THRESHOLD")?
                .unwrap_or(defaults.default_threshold_meters),
            max_threshold_meters: parse(&lookup, "NUMBERING_MAX_THRESHOLD")?
                .unwrap_or(defaults.max_threshold_meters),
        };
        if config.default_threshold_meters > config.max_threshold_meters {
            return Err(ConfigError::DefaultAboveMax {
                default: config.default_threshold_meters,
                max: config.max_threshold_meters,
            });
        }
        Ok(config)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            default_threshold_meters: DEFAULT_THRESHOLD_METERS,
            max_threshold_meters: DEFAULT_MAX_THRESHOLD_METERS,
        }
    }
}

fn parse<T, F>(lookup: &F, variable: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    lookup(variable)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { variable, value })
        })
        .transpose()
}
