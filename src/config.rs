//! Configuration resolution for the logging facade

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Which sink a facade writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    File,
    Cache,
}

impl SinkKind {
    /// Resolve a sink name; absent or unrecognized names select the file sink
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(n) if n.eq_ignore_ascii_case("cache") => SinkKind::Cache,
            _ => SinkKind::File,
        }
    }
}

/// Constructor option bag for [`LogFacade`](crate::LogFacade)
///
/// Every field is optional. Missing or unrecognized `sink` values fall back
/// to the file sink; a missing `log_file_path` falls back to a per-app
/// default under the home directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    /// Target path for the file sink
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<PathBuf>,

    /// Cache-store host for the cache sink
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_host: Option<String>,

    /// Sink selector: "file" or "cache"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sink: Option<String>,

    /// Identifiers joined into the cache list key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,
}

impl LoggerOptions {
    /// Load options from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).context("Failed to read logger options file")?;
        toml::from_str(&content).context("Failed to parse logger options file")
    }
}

/// Configuration resolved from constructor inputs, immutable afterwards
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub channel: String,
    pub app_name: String,
    pub sink_kind: SinkKind,
    /// Target path when the file sink is active
    pub file_path: PathBuf,
    /// Cache-store host when the cache sink is active
    pub cache_host: String,
    /// Destination list key when the cache sink is active
    pub list_key: String,
}

impl ResolvedConfig {
    /// Resolve the option bag against its defaults
    pub fn resolve(channel: &str, app_name: &str, options: &LoggerOptions) -> Self {
        let sink_kind = SinkKind::from_name(options.sink.as_deref());

        let file_path = options
            .log_file_path
            .clone()
            .unwrap_or_else(|| default_log_path(app_name, channel));

        let list_key = [
            options.business_user_id.as_deref().unwrap_or(""),
            options.user_id.as_deref().unwrap_or(""),
            options.cloud_id.as_deref().unwrap_or(""),
        ]
        .join(":");

        Self {
            channel: channel.to_string(),
            app_name: app_name.to_string(),
            sink_kind,
            file_path,
            cache_host: options.cache_host.clone().unwrap_or_default(),
            list_key,
        }
    }
}

/// Default log file location (`~/.<app>/logs/<channel>.log`)
///
/// Falls back to a relative path if the home directory cannot be determined.
pub fn default_log_path(app_name: &str, channel: &str) -> PathBuf {
    let base = dirs::home_dir()
        .map(|h| h.join(format!(".{}", app_name)))
        .unwrap_or_else(|| {
            tracing::warn!("Could not determine home directory, using current directory for logs");
            PathBuf::from(format!(".{}", app_name))
        });

    base.join("logs").join(format!("{}.log", channel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sink_kind_defaults_to_file() {
        assert_eq!(SinkKind::from_name(None), SinkKind::File);
        assert_eq!(SinkKind::from_name(Some("file")), SinkKind::File);
        assert_eq!(SinkKind::from_name(Some("queue")), SinkKind::File);
        assert_eq!(SinkKind::from_name(Some("")), SinkKind::File);
    }

    #[test]
    fn test_sink_kind_recognizes_cache() {
        assert_eq!(SinkKind::from_name(Some("cache")), SinkKind::Cache);
        assert_eq!(SinkKind::from_name(Some("CACHE")), SinkKind::Cache);
    }

    #[test]
    fn test_resolve_defaults() {
        let config = ResolvedConfig::resolve("billing", "invoicer", &LoggerOptions::default());

        assert_eq!(config.channel, "billing");
        assert_eq!(config.app_name, "invoicer");
        assert_eq!(config.sink_kind, SinkKind::File);
        assert!(config.file_path.ends_with("logs/billing.log"));
        assert_eq!(config.list_key, "::");
    }

    #[test]
    fn test_resolve_cache_list_key() {
        let options = LoggerOptions {
            sink: Some("cache".to_string()),
            cache_host: Some("cache.internal".to_string()),
            business_user_id: Some("b42".to_string()),
            user_id: Some("u7".to_string()),
            cloud_id: Some("c1".to_string()),
            ..LoggerOptions::default()
        };
        let config = ResolvedConfig::resolve("sync", "backup", &options);

        assert_eq!(config.sink_kind, SinkKind::Cache);
        assert_eq!(config.cache_host, "cache.internal");
        assert_eq!(config.list_key, "b42:u7:c1");
    }

    #[test]
    fn test_resolve_explicit_file_path() {
        let options = LoggerOptions {
            log_file_path: Some(PathBuf::from("/tmp/x/app.log")),
            ..LoggerOptions::default()
        };
        let config = ResolvedConfig::resolve("billing", "invoicer", &options);

        assert_eq!(config.file_path, PathBuf::from("/tmp/x/app.log"));
    }

    #[test]
    fn test_options_load_from_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logger.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "sink = \"cache\"").unwrap();
        writeln!(file, "cache_host = \"localhost\"").unwrap();
        writeln!(file, "business_user_id = \"b1\"").unwrap();

        let options = LoggerOptions::load(&path).unwrap();
        assert_eq!(options.sink.as_deref(), Some("cache"));
        assert_eq!(options.cache_host.as_deref(), Some("localhost"));
        assert_eq!(options.business_user_id.as_deref(), Some("b1"));
        assert_eq!(options.user_id, None);
    }

    #[test]
    fn test_options_load_missing_file() {
        assert!(LoggerOptions::load(Path::new("/nonexistent/logger.toml")).is_err());
    }

    #[test]
    fn test_options_toml_round_trip() {
        let options = LoggerOptions {
            log_file_path: Some(PathBuf::from("/var/log/app.log")),
            sink: Some("file".to_string()),
            ..LoggerOptions::default()
        };

        let toml_str = toml::to_string(&options).unwrap();
        let parsed: LoggerOptions = toml::from_str(&toml_str).unwrap();
        assert_eq!(options, parsed);
    }

    #[test]
    fn test_default_log_path_shape() {
        let path = default_log_path("invoicer", "billing");
        let display = path.to_string_lossy();
        assert!(display.contains(".invoicer"));
        assert!(display.ends_with("billing.log"));
    }
}
