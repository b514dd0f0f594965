mod builder;
mod types;

pub use builder::{
    FAQ_COUNT, KEYWORD_PLACEHOLDER, META_DESCRIPTION_MAX_CHARS, META_TITLE_MAX_CHARS, build,
};
pub use types::{
    DEFAULT_TONE, GenerationRequest, GenerationResponse, Mode, PromptSpec, TONE_SUGGESTIONS,
};
