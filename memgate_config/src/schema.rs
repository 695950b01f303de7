use anyhow::Context;
use memgate_core::{GateConfig, QueryGate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Template written by `memgate init`.
pub const CONFIG_TEMPLATE: &str = r#"{
  "gate": {
    "enabled": true,
    "min_length": 5,
    "min_length_cjk": 6,
    "min_length_other": 15,
    "extra_skip_patterns": [],
    "extra_force_patterns": [],
    "extra_risk_patterns": [],
    "expansion": {
      "marker": "[policy-hints]",
      "anchors": [
        "安全守则",
        "文件操作规范",
        "风险控制",
        "security policy",
        "safe file operation"
      ]
    }
  },
  "logging": {
    "level": "warn"
  }
}"#;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        "warn".to_string()
    }
}

impl Config {
    /// `~/memgate`
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("memgate"))
    }

    /// `~/memgate/config.json`
    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` (or the default location), using built-in defaults
    /// when the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Write the template to `~/memgate/config.json`.
    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");
        Self::create_config_at(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("🔧 Configuration options:");
        println!("   - gate.enabled: Turn the retrieval gate on or off");
        println!("   - gate.min_length_*: Short-message thresholds");
        println!("   - gate.extra_*_patterns: Additional case-insensitive regexes per table");
        println!("   - gate.expansion: Marker and anchors appended to risky queries");
        println!("   - logging.level: Default log filter (overridden by RUST_LOG)");
        println!();
        Ok(config_path)
    }

    /// Write the template to `path`, refusing to overwrite.
    pub fn create_config_at(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }

        std::fs::write(path, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Compile the gate described by this configuration.
    pub fn build_gate(&self) -> anyhow::Result<QueryGate> {
        QueryGate::new(&self.gate).context("Invalid gate configuration")
    }
}
