use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use weread_notes_engine::ReflectionConfig;

pub const DEFAULT_PROMPT_TEMPLATE: &str = "你是一名资深读者，请你基于我的上述读书笔记谈谈你的思考。可以是金句、脑洞、或对我观点的质疑，50～100字左右，不要轻易认同我，你的见解一定要明确、专业、独到、发人深省，不要使用Markdown格式优化.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown setting '{key}', expected one of: {}", SettingKey::names().join(", "))]
    UnknownKey { key: String },
}

/// Settings for the reflection service. Keys missing from the file take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint_url: String,
    pub api_key: String,
    pub model_name: String,
    pub prompt_template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            api_key: String::new(),
            model_name: String::new(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    EndpointUrl,
    ApiKey,
    ModelName,
    PromptTemplate,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::EndpointUrl,
        SettingKey::ApiKey,
        SettingKey::ModelName,
        SettingKey::PromptTemplate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::EndpointUrl => "endpoint_url",
            SettingKey::ApiKey => "api_key",
            SettingKey::ModelName => "model_name",
            SettingKey::PromptTemplate => "prompt_template",
        }
    }

    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|key| key.as_str()).collect()
    }
}

impl FromStr for SettingKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| ConfigError::UnknownKey { key: s.to_string() })
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Settings {
    /// Loads settings, falling back to defaults when the file does not exist.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
            config_path: config_path.to_path_buf(),
            source,
        })
    }

    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/weread-notes");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn get(&self, key: SettingKey) -> &str {
        match key {
            SettingKey::EndpointUrl => &self.endpoint_url,
            SettingKey::ApiKey => &self.api_key,
            SettingKey::ModelName => &self.model_name,
            SettingKey::PromptTemplate => &self.prompt_template,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: impl Into<String>) {
        let value = value.into();
        match key {
            SettingKey::EndpointUrl => self.endpoint_url = value,
            SettingKey::ApiKey => self.api_key = value,
            SettingKey::ModelName => self.model_name = value,
            SettingKey::PromptTemplate => self.prompt_template = value,
        }
    }

    pub fn reset_prompt_template(&mut self) {
        self.prompt_template = DEFAULT_PROMPT_TEMPLATE.to_string();
    }

    /// Reflection is offered only once endpoint, key and model are all set.
    pub fn reflection_enabled(&self) -> bool {
        !self.endpoint_url.is_empty() && !self.api_key.is_empty() && !self.model_name.is_empty()
    }

    /// Settings as seen by the reflection client. The API key may name an
    /// environment variable (`$DEEPSEEK_API_KEY`), expanded here so the
    /// secret itself never has to be written to the file.
    pub fn reflection_config(&self) -> ReflectionConfig {
        ReflectionConfig {
            endpoint_url: self.endpoint_url.trim().to_string(),
            api_key: Self::expand_env(&self.api_key),
            model_name: self.model_name.trim().to_string(),
            prompt_template: self.prompt_template.clone(),
        }
    }

    fn expand_env(value: &str) -> String {
        match shellexpand::env(value) {
            Ok(expanded) => expanded.into_owned(),
            Err(_) => value.to_string(),
        }
    }
}
