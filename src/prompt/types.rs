use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_TONE: &str = "Professional";

/// Tones the page offers in its picker. Any other string is accepted as-is.
pub const TONE_SUGGESTIONS: [&str; 5] = [
    "Professional",
    "Friendly",
    "Marketing",
    "Storyteller",
    "Authoritative",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Humanize,
    #[default]
    Seo,
    Faq,
    Meta,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Humanize, Mode::Seo, Mode::Faq, Mode::Meta];

    /// Exact, case-sensitive match; anything unrecognised selects `Seo`.
    pub fn parse_lossy(raw: &str) -> Mode {
        match raw {
            "humanize" => Mode::Humanize,
            "faq" => Mode::Faq,
            "meta" => Mode::Meta,
            _ => Mode::Seo,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Humanize => "humanize",
            Mode::Seo => "seo",
            Mode::Faq => "faq",
            Mode::Meta => "meta",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub keyword: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tone: Option<String>,
}

/// Accepts any JSON value: strings pass through, `null` is absent, and
/// everything else is kept in its JSON text form.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl GenerationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode.as_deref().map(Mode::parse_lossy).unwrap_or_default()
    }

    pub fn tone(&self) -> &str {
        self.tone.as_deref().unwrap_or(DEFAULT_TONE)
    }

    /// Blank keywords are treated as absent; others are used verbatim.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub system_instruction: String,
    pub user_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResponse {
    pub result: String,
}
