use anyhow::Result;
use serde::Deserialize;
use anyhow::{anyhow, Context};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_drivers_file")]
    pub drivers_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { drivers_file: default_drivers_file() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8000 }
fn default_drivers_file() -> String { "drivers.csv".into() }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content).with_context(|| format!("invalid config file {path}"))
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file at `CONFIG_PATH` first; see [`AppConfig::load_or_env_from`].
    pub fn load_or_env() -> Result<Self> {
        Self::load_or_env_from(&config_path())
    }

    /// Only a missing file falls back to `SERVER_HOST`, `SERVER_PORT`,
    /// `DRIVERS_FILE` and `TOKIO_WORKER_THREADS`. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => Self::from_env(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(file) = std::env::var("DRIVERS_FILE") {
            cfg.storage.drivers_file = file;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize();
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Public URL of the interactive API docs, advertised by the landing route.
    pub fn docs_url(&self) -> String {
        let host = match self.server.host.as_str() {
            "0.0.0.0" | "127.0.0.1" => "localhost",
            other => other,
        };
        format!("http://{}:{}/docs", host, self.server.port)
    }
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    fn normalize(&mut self) {
        if self.drivers_file.trim().is_empty() {
            self.drivers_file = default_drivers_file();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let mut cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [storage]
            drivers_file = "data/drivers.csv"
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.storage.drivers_file, "data/drivers.csv");
        assert_eq!(cfg.docs_url(), "http://localhost:9000/docs");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8000");
        assert_eq!(cfg.storage.drivers_file, "drivers.csv");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn blank_values_are_normalized() {
        let mut cfg = parse(
            r#"
            [server]
            host = "  "
            port = 8001
            worker_threads = 0

            [storage]
            drivers_file = ""
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.drivers_file, "drivers.csv");
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = parse("[server]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_from_file("/nonexistent/driver-registry.toml").is_err());
    }

    fn tmp_config(tag: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("driver-registry-{}-{tag}.toml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let cfg = AppConfig::load_or_env_from("/nonexistent/driver-registry.toml").unwrap();
        assert!(cfg.server.port > 0);
        assert!(!cfg.storage.drivers_file.trim().is_empty());
    }

    #[test]
    fn malformed_file_does_not_fall_back() {
        let path = tmp_config("malformed", "[server]\nport = \"eighty\"\n");
        let err = AppConfig::load_or_env_from(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("invalid config file"), "{err:#}");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn present_file_wins_over_env() {
        let path = tmp_config("present", "[server]\nport = 9123\n");
        let cfg = AppConfig::load_or_env_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9123);
        let _ = std::fs::remove_file(&path);
    }
}
