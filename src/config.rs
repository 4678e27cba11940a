//! Process configuration from environment (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

const DEFAULT_PORT: u16 = 8086;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which listing is served at `/`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HomeListing {
    #[default]
    TaxRates,
    GateConfigs,
}

impl FromStr for HomeListing {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tax_rates" => Ok(HomeListing::TaxRates),
            "gate_configs" => Ok(HomeListing::GateConfigs),
            _ => Err(ConfigError::Invalid {
                key: "HOME_LISTING",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: IpAddr,
    pub port: u16,
    pub max_connections: u32,
    pub home: HomeListing,
}

impl Settings {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        Ok(Settings {
            database_url,
            bind_addr: parse_or(&lookup, "BIND_ADDR", IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            home: parse_or(&lookup, "HOME_LISTING", HomeListing::default())?,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}
