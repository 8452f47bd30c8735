//! Process configuration read from the environment (and `.env` via dotenvy).

use crate::error::ConfigError;
use std::collections::HashMap;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8082";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub body_limit: usize,
}

impl ServerConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(&std::env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .filter(|s| !s.is_empty())
            .cloned()
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let bind_addr = vars
            .get("BIND_ADDR")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let max_connections = match vars.get("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "DB_MAX_CONNECTIONS",
                    value: v.clone(),
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let body_limit = match vars.get("BODY_LIMIT_BYTES") {
            Some(v) => v.parse::<usize>().map_err(|_| ConfigError::Invalid {
                key: "BODY_LIMIT_BYTES",
                value: v.clone(),
            })?,
            None => DEFAULT_BODY_LIMIT,
        };
        Ok(ServerConfig {
            database_url,
            bind_addr,
            max_connections,
            body_limit,
        })
    }
}
