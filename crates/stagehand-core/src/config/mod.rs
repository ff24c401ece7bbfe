//! # Stagehand Kernel Configuration
//!
//! A [`KernelConfig`] lists the providers to register by type identifier and
//! the values to seed the shared context with. Files are decoded according to
//! their extension, see [`ConfigFormat`].
pub mod error;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::error::ConfigError;
use crate::kernel::error::Result;

/// Encoding of a kernel configuration file, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    /// `.yaml` or `.yml`, needs the `yaml-config` feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// `.toml`, needs the `toml-config` feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Canonical extension; doubles as the format name in error messages.
    pub fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Case-insensitive match on a bare extension such as `"yml"`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let lowered = extension.to_ascii_lowercase();
        let format = match lowered.as_str() {
            "json" => ConfigFormat::Json,
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => ConfigFormat::Yaml,
            #[cfg(feature = "toml-config")]
            "toml" => ConfigFormat::Toml,
            _ => return None,
        };
        Some(format)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(path.extension()?.to_str()?)
    }
}

/// Providers to register and the initial shared context.
///
/// Provider entries are kept as raw values: strings name provider types,
/// anything else is rejected at registration time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub providers: Vec<Value>,
    pub shared: HashMap<String, Value>,
}

impl KernelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and decode a configuration file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            source,
            path: path.to_path_buf(),
            operation: "read".to_string(),
        })?;
        log::debug!("Loaded {} configuration from {}", format.extension(), path.display());
        Self::parse(&text, format)
    }

    /// Decode configuration text in the given format.
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self> {
        let config: KernelConfig = match format {
            ConfigFormat::Json => serde_json::from_str(text).map_err(|e| deserialization(format, e))?,
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(text).map_err(|e| deserialization(format, e))?,
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(text).map_err(|e| deserialization(format, e))?,
        };
        Ok(config)
    }

    /// Add a provider type identifier to the list.
    pub fn with_provider(mut self, type_name: impl Into<String>) -> Self {
        self.providers.push(Value::String(type_name.into()));
        self
    }

    /// Add a shared context value.
    pub fn with_shared(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.shared.insert(key.into(), value.into());
        self
    }
}

fn deserialization<E>(format: ConfigFormat, source: E) -> ConfigError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ConfigError::Deserialization {
        format: format.extension().to_string(),
        source: Box::new(source),
    }
}
