use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Native encoding of "no planner time limit".
pub const NO_TIMELIMIT: f64 = -1.0;

/// Process-wide engine configuration, applied once by
/// [`EngineNew::new`](crate::api::EngineNew::new).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Threads used by each plan created afterwards.
    pub threads: usize,
    /// Upper bound, in seconds, on the time spent planning. `None` means no limit.
    pub planner_time_limit: Option<f64>,
    /// Let the engine serialise its own planner calls.
    pub thread_safe_planner: bool,
    pub wisdom: WisdomSources,
}

/// Wisdom imported while the engine is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WisdomSources {
    /// Import the system-wide wisdom. Failure is logged, not returned.
    pub system: bool,
    pub files: Vec<PathBuf>,
    pub strings: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            planner_time_limit: None,
            thread_safe_planner: false,
            wisdom: WisdomSources::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| Error::invalid_config("engine config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path: &Path = path.as_ref();
        let json: String = std::fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), e))?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::invalid_config("engine config", e.to_string()))
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_planner_time_limit(mut self, seconds: Option<f64>) -> Self {
        self.planner_time_limit = seconds;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(Error::invalid_config("threads", "must be at least 1"));
        }
        if let Some(limit) = self.planner_time_limit.filter(|l| !(l.is_finite() && *l > 0.0)) {
            return Err(Error::invalid_config(
                "planner_time_limit",
                format!("{limit} is not a positive number of seconds"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::{ErrorCategory, ErrorKind};

    #[test]
    fn defaults_from_empty_object() {
        let config: EngineConfig = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.threads, 1);
    }

    #[test]
    fn parses_all_fields() {
        let json: &str = r#"{
            "threads": 4,
            "planner_time_limit": 2.5,
            "thread_safe_planner": true,
            "wisdom": { "system": true, "strings": ["(w)"] }
        }"#;
        let config: EngineConfig = EngineConfig::from_json_str(json).unwrap();
        assert_eq!(config.threads, 4);
        assert_eq!(config.planner_time_limit, Some(2.5));
        assert!(config.thread_safe_planner);
        assert!(config.wisdom.system);
        assert_eq!(config.wisdom.strings, vec!["(w)".to_string()]);
        assert!(config.wisdom.files.is_empty());
    }

    #[test]
    fn rejects_invalid_values() {
        for json in [r#"{"threads": 0}"#, r#"{"planner_time_limit": -1.0}"#, r#"{"thread": 2}"#] {
            let err: Error = EngineConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::InvalidConfig { .. }), "{json}");
            assert_eq!(err.category(), ErrorCategory::Configuration);
        }
    }

    #[test]
    fn from_file() {
        let mut file: tempfile::NamedTempFile = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", EngineConfig::default().with_threads(3).to_json_string().unwrap()).unwrap();
        let config: EngineConfig = EngineConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.threads, 3);

        let err: Error = EngineConfig::from_json_file(file.path().with_extension("missing")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Io { .. }));
    }
}
