use std::net::SocketAddr;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> anyhow::Result<Config> {
        // a missing .env file is fine
        let _ = dotenv::dotenv();

        let database_url = var_or("DATABASE_URL", "sqlite://swapskill.db?mode=rwc");
        let max_connections = var_or("DATABASE_MAX_CONNECTIONS", "16")
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a number")?;
        let host = var_or("HOST", "0.0.0.0");
        let port: u16 = var_or("PORT", "3001")
            .parse()
            .context("PORT must be a port number")?;
        let bind_addr = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("invalid bind address {host}:{port}"))?;
        let bcrypt_cost = match dotenv::var("BCRYPT_COST") {
            Ok(cost) => cost.parse().context("BCRYPT_COST must be a number")?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(Config {
            database_url,
            max_connections,
            bind_addr,
            bcrypt_cost,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    dotenv::var(key).unwrap_or_else(|_| default.to_owned())
}
