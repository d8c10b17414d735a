use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

// ─── TOML config file ─────────────────────────────────────────────────────────

/// `config.toml` in the working directory — all fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// HTTP server port (default: 5000).
    port: Option<u16>,
    /// Bind address (default: "0.0.0.0" — all interfaces).
    bind_address: Option<String>,
    /// Log level filter string, e.g. "debug", "info,taskboard=trace" (default: "info").
    log: Option<String>,
    /// Log output format: "pretty" (default, human-readable) | "json" (structured).
    log_format: Option<String>,
    /// Write logs to this file path (rotated daily).
    log_file: Option<PathBuf>,
}

fn load_toml(dir: &Path) -> Option<TomlConfig> {
    let path = dir.join("config.toml");
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config.toml — using defaults");
            None
        }
    }
}

// ─── ServerConfig ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Bind address for the HTTP server (default: "0.0.0.0").
    pub bind_address: String,
    pub log: String,
    /// Log output format: "pretty" (default) | "json".
    pub log_format: String,
    /// Optional log file path (rotated daily alongside stdout).
    pub log_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. `config.toml` in the working directory
    ///   3. Built-in defaults
    pub fn new(
        port: Option<u16>,
        bind_address: Option<String>,
        log: Option<String>,
        log_format: Option<String>,
        log_file: Option<PathBuf>,
    ) -> Self {
        let toml = load_toml(Path::new(".")).unwrap_or_default();

        Self {
            port: port.or(toml.port).unwrap_or(DEFAULT_PORT),
            bind_address: bind_address
                .or(toml.bind_address)
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            log: log.or(toml.log).unwrap_or_else(|| "info".to_string()),
            log_format: log_format
                .or(toml.log_format)
                .unwrap_or_else(|| "pretty".to_string()),
            log_file: log_file.or(toml.log_file),
        }
    }

    /// The address string the listener binds, e.g. "0.0.0.0:5000".
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(None, None, None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_are_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "port = 8080\nlog = \"debug\"\n",
        )
        .unwrap();

        let toml = load_toml(dir.path()).unwrap();
        assert_eq!(toml.port, Some(8080));
        assert_eq!(toml.log.as_deref(), Some("debug"));
        assert_eq!(toml.bind_address, None);
    }

    #[test]
    fn unparseable_toml_falls_back_to_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "port = {not valid").unwrap();
        assert!(load_toml(dir.path()).is_none());
    }

    #[test]
    fn missing_toml_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_toml(dir.path()).is_none());
    }

    #[test]
    fn defaults_bind_all_interfaces_on_5000() {
        let cfg = ServerConfig::new(None, None, None, None, None);
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.bind_address, "0.0.0.0");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:5000");
        assert_eq!(cfg.log, "info");
        assert_eq!(cfg.log_format, "pretty");
    }

    #[test]
    fn cli_overrides_win() {
        let cfg = ServerConfig::new(
            Some(8080),
            Some("127.0.0.1".to_string()),
            Some("debug".to_string()),
            None,
            None,
        );
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.log, "debug");
    }
}
