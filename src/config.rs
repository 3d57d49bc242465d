use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("variable de entorno requerida: {0}")]
    Missing(&'static str),

    #[error("valor inválido para {0}: {1}")]
    Invalid(&'static str, String),
}

/// Runtime configuration, read once at startup. A missing `DATABASE_URL` is a
/// fatal error rather than a silent fallback to demo data.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("BIND_ADDR", raw))?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let seed_demo = std::env::var("SEED_DEMO")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            bind_addr,
            seed_demo,
        })
    }
}
