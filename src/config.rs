// src/config.rs
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub file: PathBuf,
    pub poll_timeout_ms: u64,
    pub log_filter: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file: PathBuf::from("example.txt"),
            poll_timeout_ms: 100, // a tenth of a second between resize checks
            log_filter: "vedit=info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Self {
            file: env::var("VEDIT_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.file),
            poll_timeout_ms: env::var("VEDIT_POLL_MS")
                .ok()
                .and_then(|ms| ms.parse().ok())
                .filter(|&ms| ms > 0)
                .unwrap_or(defaults.poll_timeout_ms),
            log_filter: env::var("VEDIT_LOG").unwrap_or(defaults.log_filter),
            log_dir: env::var("VEDIT_LOG_DIR").ok().map(PathBuf::from),
        }
    }

    /// Where the log file goes: `log_dir` if set, else the user cache dir.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("vedit")))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.file, PathBuf::from("example.txt"));
        assert_eq!(config.poll_timeout_ms, 100);
        assert_eq!(config.log_filter, "vedit=info");
    }

    #[test]
    fn test_explicit_log_dir_wins() {
        let config = Config {
            log_dir: Some(PathBuf::from("/tmp/vedit-logs")),
            ..Config::default()
        };
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/vedit-logs"));
    }

    #[test]
    fn test_from_env_overrides_and_rejects_zero_poll() {
        env::set_var("VEDIT_FILE", "notes.txt");
        env::set_var("VEDIT_POLL_MS", "0");
        env::set_var("VEDIT_LOG_DIR", "/tmp/vedit-env-logs");
        let config = Config::from_env();
        env::remove_var("VEDIT_FILE");
        env::remove_var("VEDIT_POLL_MS");
        env::remove_var("VEDIT_LOG_DIR");

        assert_eq!(
            config,
            Config {
                file: PathBuf::from("notes.txt"),
                log_dir: Some(PathBuf::from("/tmp/vedit-env-logs")),
                ..Config::default()
            }
        );
    }
}
