use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
};

pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "Qwen/Qwen2.5-Coder-32B-Instruct";

/// Sampling parameters sent with every completion request.
///
/// Higher temperature and top_p widen vocabulary; the penalties discourage
/// the repetition that makes generated prose read as machine-written.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 2048,
            temperature: 0.9,
            top_p: 0.95,
            frequency_penalty: Some(0.8),
            presence_penalty: Some(0.6),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub api_token: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub generation: GenerationParams,
    pub error_body_limit: usize,
}

// Hand-written so the token never reaches a log line.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("listen_addr", &self.listen_addr)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("generation", &self.generation)
            .field("error_body_limit", &self.error_body_limit)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080),
            api_token: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            generation: GenerationParams::default(),
            error_body_limit: 500,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("SERVER_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".into())
            .parse()
            .unwrap_or(defaults.listen_addr);

        let api_token = non_empty(env::var("HF_TOKEN").ok());
        let endpoint = non_empty(env::var("COMPLETION_ENDPOINT").ok()).unwrap_or(defaults.endpoint);
        let model = non_empty(env::var("COMPLETION_MODEL").ok()).unwrap_or(defaults.model);

        let base = defaults.generation;
        let generation = GenerationParams {
            max_tokens: parsed_var("MAX_TOKENS").unwrap_or(base.max_tokens),
            temperature: parsed_var("TEMPERATURE").unwrap_or(base.temperature),
            top_p: parsed_var("TOP_P").unwrap_or(base.top_p),
            frequency_penalty: parsed_var("FREQUENCY_PENALTY").or(base.frequency_penalty),
            presence_penalty: parsed_var("PRESENCE_PENALTY").or(base.presence_penalty),
        };

        let error_body_limit = parsed_var("ERROR_BODY_LIMIT").unwrap_or(defaults.error_body_limit);

        Ok(Self {
            listen_addr,
            api_token,
            endpoint,
            model,
            generation,
            error_body_limit,
        })
    }

    /// Returns a copy carrying the given credential.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = non_empty(Some(token.into()));
        self
    }
}

fn parsed_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| parse_trimmed(&v))
}

fn parse_trimmed<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
