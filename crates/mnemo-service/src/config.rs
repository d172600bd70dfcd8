//! Service configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level mnemo configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Artificial per-operation latency in milliseconds. The in-memory
    /// service sleeps this long to exercise loading states; set to 0 to
    /// disable.
    #[serde(default = "default_latency")]
    pub simulated_latency_ms: u64,
    /// Question count used when a request doesn't specify one.
    #[serde(default = "default_question_count")]
    pub default_question_count: usize,
    /// Hard cap on questions per generation request.
    #[serde(default = "default_max_questions")]
    pub max_questions_per_request: usize,
    /// Maximum reviews packed into a single schedule day.
    #[serde(default = "default_max_items_per_day")]
    pub max_items_per_day: usize,
    /// Directory question banks are loaded from.
    #[serde(default = "default_bank_dir")]
    pub bank_dir: PathBuf,
    /// Directory session reports are written to.
    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,
}

fn default_latency() -> u64 {
    300
}
fn default_question_count() -> usize {
    5
}
fn default_max_questions() -> usize {
    20
}
fn default_max_items_per_day() -> usize {
    20
}
fn default_bank_dir() -> PathBuf {
    PathBuf::from("./banks")
}
fn default_session_dir() -> PathBuf {
    PathBuf::from("./mnemo-sessions")
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_latency(),
            default_question_count: default_question_count(),
            max_questions_per_request: default_max_questions(),
            max_items_per_day: default_max_items_per_day(),
            bank_dir: default_bank_dir(),
            session_dir: default_session_dir(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mnemo.toml` in the current directory
/// 2. `~/.config/mnemo/config.toml`
///
/// Environment variable overrides: `MNEMO_BANK_DIR`, `MNEMO_SESSION_DIR`.
pub fn load_config() -> Result<ServiceConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ServiceConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mnemo.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ServiceConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ServiceConfig::default(),
    };

    if let Ok(dir) = std::env::var("MNEMO_BANK_DIR") {
        config.bank_dir = PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var("MNEMO_SESSION_DIR") {
        config.session_dir = PathBuf::from(dir);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mnemo"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.simulated_latency_ms, 300);
        assert_eq!(config.default_question_count, 5);
        assert_eq!(config.max_questions_per_request, 20);
        assert_eq!(config.bank_dir, PathBuf::from("./banks"));
    }

    #[test]
    fn parse_partial_config_fills_defaults() {
        let toml_str = r#"
simulated_latency_ms = 0
bank_dir = "/tmp/banks"
"#;
        let config: ServiceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.simulated_latency_ms, 0);
        assert_eq!(config.bank_dir, PathBuf::from("/tmp/banks"));
        assert_eq!(config.max_items_per_day, 20);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/mnemo.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mnemo.toml");
        std::fs::write(&path, "default_question_count = 3\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_question_count, 3);
        assert_eq!(config.simulated_latency_ms, 300);
    }
}
