//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Persistence configuration
    pub persistence: PersistenceConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Which person store backs the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process memory, lost on restart
    Memory,
    /// SQLite database file
    Sqlite,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(StoreBackend::Memory),
            "sqlite" => Some(StoreBackend::Sqlite),
            _ => None,
        }
    }
}

/// Persistence configuration
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Store backend to use
    pub backend: StoreBackend,
    /// Path of the SQLite database file (only used by the SQLite backend)
    pub database_path: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            persistence: PersistenceConfig {
                backend: env::var("PERSON_STORE")
                    .ok()
                    .and_then(|b| StoreBackend::parse(&b))
                    .unwrap_or(StoreBackend::Memory),
                database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| {
                    // Default to ~/.person-api or current directory
                    if let Some(home) = env::var_os("HOME") {
                        format!("{}/.person-api/persons.db", home.to_string_lossy())
                    } else {
                        ".person-api/persons.db".to_string()
                    }
                }),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = ["PORT", "HOST", "PERSON_STORE", "DATABASE_PATH", "HOME"];

    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let saved: Vec<_> = VARS.iter().map(|k| (*k, env::var_os(k))).collect();
        for key in VARS {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
        f();
        for (key, value) in saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        with_env(&[], || {
            let config = Config::from_env();
            assert_eq!(config.server_addr(), "0.0.0.0:8080");
            assert_eq!(config.persistence.backend, StoreBackend::Memory);
            assert_eq!(config.persistence.database_path, ".person-api/persons.db");
        });
    }

    #[test]
    #[serial]
    fn test_overrides() {
        with_env(
            &[
                ("PORT", "9000"),
                ("HOST", "127.0.0.1"),
                ("PERSON_STORE", "SQLite"),
                ("DATABASE_PATH", "/tmp/people.db"),
            ],
            || {
                let config = Config::from_env();
                assert_eq!(config.server_addr(), "127.0.0.1:9000");
                assert_eq!(config.persistence.backend, StoreBackend::Sqlite);
                assert_eq!(config.persistence.database_path, "/tmp/people.db");
            },
        );
    }

    #[test]
    #[serial]
    fn test_invalid_values_fall_back() {
        with_env(&[("PORT", "not-a-port"), ("PERSON_STORE", "redis")], || {
            let config = Config::from_env();
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.persistence.backend, StoreBackend::Memory);
        });
    }

    #[test]
    #[serial]
    fn test_database_path_under_home() {
        with_env(&[("HOME", "/home/tester")], || {
            let config = Config::from_env();
            assert_eq!(
                config.persistence.database_path,
                "/home/tester/.person-api/persons.db"
            );
        });
    }
}
