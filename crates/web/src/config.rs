use anyhow::{Context, Result, bail};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = match lookup("PORT") {
            Some(port) => port.parse().context("PORT must be a number")?,
            None => 8000,
        };

        let backend = lookup("STORAGE_BACKEND").unwrap_or_else(|| "postgres".to_string());
        let storage = match backend.to_lowercase().as_str() {
            "postgres" | "pg" => StorageBackend::Postgres {
                database_url: lookup("DATABASE_URL")
                    .context("Cannot load DATABASE_URL env variable")?,
                max_connections: match lookup("DATABASE_MAX_CONNECTIONS") {
                    Some(value) => value
                        .parse()
                        .context("DATABASE_MAX_CONNECTIONS must be a number")?,
                    None => DEFAULT_MAX_CONNECTIONS,
                },
            },
            "memory" => StorageBackend::Memory,
            other => bail!("Unknown STORAGE_BACKEND: {}", other),
        };

        Ok(Self {
            host,
            port,
            storage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn postgres_needs_a_database_url() {
        assert!(config_from(&[]).is_err());

        let config = config_from(&[("DATABASE_URL", "postgres://localhost/workout")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(
            config.storage,
            StorageBackend::Postgres {
                database_url: "postgres://localhost/workout".to_string(),
                max_connections: 5,
            }
        );
    }

    #[test]
    fn memory_backend_ignores_database_settings() {
        let config = config_from(&[
            ("STORAGE_BACKEND", "memory"),
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
        ])
        .unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config_from(&[("STORAGE_BACKEND", "memory"), ("PORT", "http")]).is_err());
        assert!(config_from(&[("STORAGE_BACKEND", "sqlite")]).is_err());
    }
}
