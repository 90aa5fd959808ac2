use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of segment fetches in flight per job.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Global configuration loaded from `~/.config/hlsdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HlsdlConfig {
    /// Directory holding one subdirectory per playlist job. None = current dir.
    #[serde(default)]
    pub root_dir: Option<PathBuf>,
    /// Maximum concurrent segment fetches within one job.
    pub concurrency: usize,
    /// Connect timeout for every fetch, in seconds.
    pub connect_timeout_secs: u64,
    /// Hard wall-clock limit for a single fetch, in seconds.
    pub fetch_timeout_secs: u64,
    /// Abort a fetch whose throughput stays below this many bytes/s...
    pub low_speed_limit_bytes: u32,
    /// ...for this many seconds.
    pub low_speed_time_secs: u64,
    /// Extra request headers sent with every fetch (e.g. Referer).
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Default for HlsdlConfig {
    fn default() -> Self {
        Self {
            root_dir: None,
            concurrency: DEFAULT_CONCURRENCY,
            connect_timeout_secs: 30,
            fetch_timeout_secs: 300,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            headers: BTreeMap::new(),
        }
    }
}

impl HlsdlConfig {
    /// Worker pool size: `flag` if given, else the configured value; never zero.
    pub fn effective_concurrency(&self, flag: Option<usize>) -> usize {
        flag.unwrap_or(self.concurrency).max(1)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hlsdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HlsdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HlsdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: HlsdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = HlsdlConfig::default();
        assert_eq!(cfg.concurrency, 8);
        assert_eq!(cfg.connect_timeout_secs, 30);
        assert_eq!(cfg.fetch_timeout_secs, 300);
        assert!(cfg.root_dir.is_none());
        assert!(cfg.headers.is_empty());
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut cfg = HlsdlConfig::default();
        cfg.headers
            .insert("Referer".to_string(), "https://example.com/".to_string());
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: HlsdlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.concurrency, cfg.concurrency);
        assert_eq!(parsed.fetch_timeout_secs, cfg.fetch_timeout_secs);
        assert_eq!(
            parsed.headers.get("Referer").map(String::as_str),
            Some("https://example.com/")
        );
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            root_dir = "/srv/m3u8"
            concurrency = 4
            connect_timeout_secs = 5
            fetch_timeout_secs = 60
            low_speed_limit_bytes = 512
            low_speed_time_secs = 20

            [headers]
            User-Agent = "hlsdl-test"
        "#;
        let cfg: HlsdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.root_dir.as_deref(), Some(std::path::Path::new("/srv/m3u8")));
        assert_eq!(cfg.concurrency, 4);
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(60));
        assert_eq!(cfg.low_speed_limit_bytes, 512);
        assert_eq!(cfg.headers.len(), 1);
    }

    #[test]
    fn zero_concurrency_clamps_to_one() {
        let cfg = HlsdlConfig {
            concurrency: 0,
            ..HlsdlConfig::default()
        };
        assert_eq!(cfg.effective_concurrency(None), 1);
        assert_eq!(cfg.effective_concurrency(Some(0)), 1);
    }

    #[test]
    fn concurrency_flag_overrides_config() {
        let cfg = HlsdlConfig::default();
        assert_eq!(cfg.effective_concurrency(None), 8);
        assert_eq!(cfg.effective_concurrency(Some(3)), 3);
    }
}
