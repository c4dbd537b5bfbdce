//! Configuration loading (environment variables).
//!
//! | variable | default |
//! |---|---|
//! | `STOREKEEP_BIND` | `0.0.0.0:8080` |
//! | `STOREKEEP_LOG_FORMAT` | `json` |
//! | `STOREKEEP_DEDUP_STATUSES` | `publish,pending,draft,private` |
//! | `STOREKEEP_REVIEW_LIMIT` | `1000` (`0` = unlimited) |
//! | `STOREKEEP_TOKEN_TTL_SECS` | `1800` |

use std::net::SocketAddr;

use chrono::Duration;
use thiserror::Error;

use storekeep_catalog::ProductStatus;
use storekeep_observability::LogFormat;

use crate::maintenance::MaintenanceConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

/// Process configuration, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    pub maintenance: MaintenanceConfig,
    pub token_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_format: LogFormat::Json,
            maintenance: MaintenanceConfig::default(),
            token_ttl: Duration::seconds(1800),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source; unset or blank variables keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get("STOREKEEP_BIND") {
            config.bind_addr = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("STOREKEEP_BIND", format!("{e}")))?;
        }

        if let Some(raw) = get("STOREKEEP_LOG_FORMAT") {
            config.log_format = raw
                .parse()
                .map_err(|e: String| ConfigError::invalid("STOREKEEP_LOG_FORMAT", e))?;
        }

        if let Some(raw) = get("STOREKEEP_DEDUP_STATUSES") {
            config.maintenance.dedup_statuses = parse_statuses(&raw)?;
        }

        if let Some(raw) = get("STOREKEEP_REVIEW_LIMIT") {
            let limit: usize = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("STOREKEEP_REVIEW_LIMIT", format!("{e}")))?;
            config.maintenance.review_batch_limit = (limit > 0).then_some(limit);
        }

        if let Some(raw) = get("STOREKEEP_TOKEN_TTL_SECS") {
            let secs: i64 = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("STOREKEEP_TOKEN_TTL_SECS", format!("{e}")))?;
            if secs <= 0 {
                return Err(ConfigError::invalid("STOREKEEP_TOKEN_TTL_SECS", "must be positive"));
            }
            config.token_ttl = Duration::seconds(secs);
        }

        Ok(config)
    }
}

fn parse_statuses(raw: &str) -> Result<Vec<ProductStatus>, ConfigError> {
    let mut statuses = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let status: ProductStatus = part
            .parse()
            .map_err(|e| ConfigError::invalid("STOREKEEP_DEDUP_STATUSES", format!("{e}")))?;
        if status.is_trashed() {
            return Err(ConfigError::invalid(
                "STOREKEEP_DEDUP_STATUSES",
                "trashed products cannot be deduplicated",
            ));
        }
        if !statuses.contains(&status) {
            statuses.push(status);
        }
    }

    if statuses.is_empty() {
        return Err(ConfigError::invalid("STOREKEEP_DEDUP_STATUSES", "no statuses given"));
    }
    Ok(statuses)
}
