//! Configuration management
//!
//! Non-secret settings come from an optional YAML file. Secrets (bot token,
//! vendor API keys) only ever come from the environment or the command line.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::application::errors::{Capability, ConfigError};

/// Bot configuration, built once at start-up and shared read-only
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub telegram: TelegramConfig,
    pub http: HttpConfig,
    pub vendors: VendorsConfig,
    pub contact: ContactConfig,
    #[serde(skip)]
    pub keys: ApiKeys,
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    #[serde(skip)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TelegramConfig {
    pub api_base: String,
    /// Long polling timeout passed to getUpdates
    pub poll_timeout_seconds: u64,
    pub register_commands: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HttpConfig {
    /// Upper bound for a whole vendor request
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct VendorsConfig {
    pub chat: ChatVendorConfig,
    pub price: PriceVendorConfig,
    pub news: NewsVendorConfig,
    pub image: ImageVendorConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ChatVendorConfig {
    pub url: String,
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PriceVendorConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct NewsVendorConfig {
    pub url: String,
    pub query: String,
    pub language: String,
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ImageVendorConfig {
    pub url: String,
    pub cfg_scale: u32,
    pub width: u32,
    pub height: u32,
    pub samples: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ContactConfig {
    pub email: String,
    pub whatsapp: String,
}

/// Optional vendor API keys, empty values count as missing
#[derive(Clone, Default)]
pub struct ApiKeys {
    pub chat: Option<String>,
    pub news: Option<String>,
    pub image: Option<String>,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = if self.token.is_some() { "set" } else { "unset" };
        f.debug_struct("BotConfig")
            .field("name", &self.name)
            .field("token", &token)
            .finish()
    }
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |k: &Option<String>| if k.is_some() { "set" } else { "unset" };
        f.debug_struct("ApiKeys")
            .field("chat", &mask(&self.chat))
            .field("news", &mask(&self.news))
            .field("image", &mask(&self.image))
            .finish()
    }
}

impl ApiKeys {
    /// Read keys through a variable lookup (normally the process environment)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |capability: Capability| {
            capability
                .key_var()
                .and_then(&lookup)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            chat: read(Capability::Chat),
            news: read(Capability::News),
            image: read(Capability::Image),
        }
    }

    pub fn get(&self, capability: Capability) -> Option<&str> {
        match capability {
            Capability::Chat => self.chat.as_deref(),
            Capability::News => self.news.as_deref(),
            Capability::Image => self.image.as_deref(),
            Capability::Price => None,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "buddy-bot".to_string(),
            token: None,
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            poll_timeout_seconds: 30,
            register_commands: true,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
        }
    }
}

impl Default for ChatVendorConfig {
    fn default() -> Self {
        Self {
            url: "https://api.together.xyz/v1/chat/completions".to_string(),
            model: "meta-llama/Llama-3-70b-chat-hf".to_string(),
            system_prompt: "You are a helpful assistant for crypto enthusiasts, gamers, and students. \
                Be friendly, knowledgeable, and concise. Use emojis appropriately and speak like a knowledgeable friend."
                .to_string(),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

impl Default for PriceVendorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
        }
    }
}

impl Default for NewsVendorConfig {
    fn default() -> Self {
        Self {
            url: "https://newsapi.org/v2/everything".to_string(),
            query: "crypto OR bitcoin OR gaming OR esports".to_string(),
            language: "en".to_string(),
            page_size: 3,
        }
    }
}

impl Default for ImageVendorConfig {
    fn default() -> Self {
        Self {
            url: "https://api.stability.ai/v1/generation/stable-diffusion-v1-6/text-to-image".to_string(),
            cfg_scale: 7,
            width: 512,
            height: 512,
            samples: 1,
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email: "your.email@example.com".to_string(),
            whatsapp: "+1234567890".to_string(),
        }
    }
}

impl Config {
    /// Parse the non-secret part of the configuration from YAML
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Load the YAML file if it exists, then apply secrets from the environment
    pub fn load(path: impl AsRef<Path>, token_override: Option<String>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;
            Self::from_yaml(&content)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.with_secrets(token_override, |name| std::env::var(name).ok())
    }

    /// Fill in secrets and validate; the bot token is mandatory
    pub fn with_secrets(
        mut self,
        token_override: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let token = token_override
            .or_else(|| lookup("BOT_TOKEN"))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingField("BOT_TOKEN".to_string()))?;

        self.bot.token = Some(token);
        self.keys = ApiKeys::from_lookup(lookup);
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue("http.timeout-seconds must be positive".to_string()));
        }
        if self.vendors.news.page_size == 0 {
            return Err(ConfigError::InvalidValue("vendors.news.page-size must be positive".to_string()));
        }
        Ok(())
    }

    pub fn bot_token(&self) -> &str {
        self.bot.token.as_deref().unwrap_or_default()
    }

    pub fn api_key(&self, capability: Capability) -> Option<&str> {
        self.keys.get(capability)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.http.connect_timeout_seconds)
    }

    /// Default configuration rendered as YAML, secrets excluded
    pub fn default_yaml() -> Result<String, ConfigError> {
        serde_yaml::to_string(&Config::default())
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_token_prevents_start() {
        let err = Config::default().with_secrets(None, env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(f) if f == "BOT_TOKEN"));

        let err = Config::default().with_secrets(None, env(&[("BOT_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn optional_keys_are_read_from_env() {
        let config = Config::default()
            .with_secrets(None, env(&[("BOT_TOKEN", "123:abc"), ("TOGETHER_API_KEY", "tg"), ("NEWS_API_KEY", "")]))
            .unwrap();

        assert_eq!(config.bot_token(), "123:abc");
        assert_eq!(config.api_key(Capability::Chat), Some("tg"));
        assert_eq!(config.api_key(Capability::News), None);
        assert_eq!(config.api_key(Capability::Image), None);
    }

    #[test]
    fn token_override_wins() {
        let config = Config::default()
            .with_secrets(Some("cli-token".into()), env(&[("BOT_TOKEN", "env-token")]))
            .unwrap();
        assert_eq!(config.bot_token(), "cli-token");
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("http:\n  timeout-seconds: 5\nvendors:\n  chat:\n    model: tiny\n").unwrap();
        assert_eq!(config.http.timeout_seconds, 5);
        assert_eq!(config.vendors.chat.model, "tiny");
        assert_eq!(config.vendors.chat.max_tokens, 1000);
        assert_eq!(config.vendors.news.page_size, 3);
    }

    #[test]
    fn default_yaml_has_no_secrets() {
        let yaml = Config::default_yaml().unwrap();
        assert!(yaml.contains("api-base"));
        assert!(!yaml.contains("token:"));
        assert!(!yaml.contains("keys"));
    }

    #[test]
    fn debug_output_masks_keys() {
        let keys = ApiKeys::from_lookup(env(&[("TOGETHER_API_KEY", "secret-value")]));
        let printed = format!("{:?}", keys);
        assert!(!printed.contains("secret-value"));
        assert!(printed.contains("set"));
    }

    #[test]
    fn debug_output_masks_bot_token() {
        let config = Config::default()
            .with_secrets(Some("123456:very-secret".into()), env(&[]))
            .unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("very-secret"));
        assert!(printed.contains("token: \"set\""));
    }
}
