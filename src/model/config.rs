use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "RETIDOC_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_API_KEY: &str = "OPENAI_API_KEY";
const ENV_BASE_URL: &str = "LLM_BASE_URL";
const ENV_CHAT_MODEL: &str = "CHAT_MODEL";
const ENV_VISION_MODEL: &str = "VISION_MODEL";
const ENV_MAX_BODY_BYTES: &str = "MAX_BODY_BYTES";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";

/// Largest accepted JSON request body; inline base64 images need room
pub const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Chat-completions provider settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer credential. Only ever read from the environment.
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub vision_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Most recent prior turns forwarded with a chat message
    pub max_history_turns: usize,
    /// Outbound request timeout. `None` leaves the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            max_history_turns: 10,
            timeout_secs: None,
        }
    }
}

impl LlmConfig {
    /// Overlay values present in the config file
    fn apply_file(&mut self, file: LlmFileConfig) {
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(model) = file.chat_model {
            self.chat_model = model;
        }
        if let Some(model) = file.vision_model {
            self.vision_model = model;
        }
        if let Some(temperature) = file.temperature {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = file.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(turns) = file.max_history_turns {
            self.max_history_turns = turns;
        }
        if file.timeout_secs.is_some() {
            self.timeout_secs = file.timeout_secs;
        }
    }

    /// Overlay environment variables (highest precedence)
    fn apply_env(&mut self) {
        self.api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty());

        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Ok(model) = std::env::var(ENV_CHAT_MODEL) {
            self.chat_model = model;
        }
        if let Ok(model) = std::env::var(ENV_VISION_MODEL) {
            self.vision_model = model;
        }
    }

    /// Full chat-completions endpoint URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// `llm:` section of the YAML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmFileConfig {
    pub base_url: Option<String>,
    pub chat_model: Option<String>,
    pub vision_model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub max_history_turns: Option<usize>,
    pub timeout_secs: Option<u64>,
}

/// `server:` section of the YAML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerFileConfig {
    pub max_body_bytes: Option<usize>,
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub llm: LlmFileConfig,
    #[serde(default)]
    pub server: ServerFileConfig,
}

impl ConfigFile {
    /// Parse config file contents. Empty contents yield the defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        let contents = contents.trim();
        if contents.is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub port: u16,
    pub host: String,
    /// JSON body limit applied to every route
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut llm = LlmConfig::default();
        let mut max_body_bytes = DEFAULT_MAX_BODY_BYTES;
        if let Some(file) = Self::load_config_file(&config_path) {
            llm.apply_file(file.llm);
            max_body_bytes = file.server.max_body_bytes.unwrap_or(max_body_bytes);
        }
        llm.apply_env();

        if let Some(limit) = std::env::var(ENV_MAX_BODY_BYTES)
            .ok()
            .and_then(|v| v.parse().ok())
        {
            max_body_bytes = limit;
        }

        Self {
            llm,
            port,
            host,
            max_body_bytes,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match ConfigFile::from_yaml(&contents) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration from file");
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to parse config file, using defaults"
                    );
                    None
                }
            },
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read config file, using defaults"
                );
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
