use crate::prompt::{GenerationRequest, Mode, PromptSpec};

pub const KEYWORD_PLACEHOLDER: &str = "relevant keywords";
pub const FAQ_COUNT: usize = 5;
pub const META_TITLE_MAX_CHARS: usize = 60;
pub const META_DESCRIPTION_MAX_CHARS: usize = 160;

/// Words and stock phrases that give generated prose away.
const FORBIDDEN_PHRASES: [&[&str]; 5] = [
    &["Crucial", "Paramount", "Undoubtedly", "Metaphorical"],
    &["Dive in", "Delve", "Explore", "Uncover", "Navigate"],
    &["In conclusion", "Summary", "Wrap up", "Remember"],
    &["Tapestry", "Symphony", "Landscape", "Realm"],
    &["Game-changer", "Revolutionize", "Foster"],
];

/// Builds the system instruction for `mode`.
///
/// `tone` is interpolated verbatim. `keyword` only affects the SEO template and
/// falls back to a generic phrase when absent.
pub fn build(mode: Mode, tone: &str, keyword: Option<&str>) -> String {
    let voice = human_voice(tone);
    match mode {
        Mode::Humanize => humanize_template(&voice),
        Mode::Faq => faq_template(&voice),
        Mode::Meta => meta_template(&voice),
        Mode::Seo => seo_template(&voice, keyword.unwrap_or(KEYWORD_PLACEHOLDER)),
    }
}

impl PromptSpec {
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            system_instruction: build(request.mode(), request.tone(), request.keyword()),
            user_content: request.text.clone(),
        }
    }
}

fn human_voice(tone: &str) -> String {
    let forbidden = FORBIDDEN_PHRASES
        .iter()
        .map(|group| {
            let quoted: Vec<String> = group.iter().map(|w| format!("\"{w}\"")).collect();
            format!("   - {}", quoted.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "CRITICAL: You are a human writer, NOT an AI.\n\
         1. UNPREDICTABILITY:\n\
         \x20  - Aggressively vary sentence length (mix 3-word sentences with 30-word complex ones).\n\
         \x20  - Use irregular paragraph structures.\n\
         \x20  - Insert rhetorical questions and conversational interjections (\"Right?\", \"You know...\").\n\
         \n\
         2. FORBIDDEN WORDS (Do NOT use these):\n\
         {forbidden}\n\
         \n\
         3. HUMAN STYLE:\n\
         \x20  - Use emotional language and personal opinions.\n\
         \x20  - Use contractions (don't, can't, it's).\n\
         \x20  - Use idioms and colloquialisms appropriate for the tone.\n\
         \x20  - Drop the \"perfect\" grammar slightly if it sounds too robotic.\n\
         \x20  - Tone: {tone}.\n"
    )
}

fn humanize_template(voice: &str) -> String {
    format!(
        "You are a professional blog writer. Rewrite the provided text to maximize Perplexity and Burstiness.\n\
         {voice}\
         - Rewrite the text completely so it reads naturally.\n\
         - Make it indistinguishable from a human writing."
    )
}

fn faq_template(voice: &str) -> String {
    format!(
        "You are an SEO expert. Generate {FAQ_COUNT} relevant FAQs.\n\
         {voice}\
         - Answers must be direct and personal.\n\
         - No robotic intros/outros.\n\
         Format: Markdown."
    )
}

fn meta_template(voice: &str) -> String {
    format!(
        "You are an SEO expert. Generate an optimized Meta Title and Description.\n\
         {voice}\
         - Max {META_TITLE_MAX_CHARS} chars for Title.\n\
         - Max {META_DESCRIPTION_MAX_CHARS} chars for Description.\n\
         Format:\n\
         **Title**: [Title]\n\
         **Description**: [Description]"
    )
}

fn seo_template(voice: &str, keyword: &str) -> String {
    format!(
        "You are a professional SEO blog writer.\n\
         {voice}\
         - Keyword: \"{keyword}\" (include naturally, don't force it).\n\
         - Add proper markdown headings (H1, H2, H3).\n\
         - Avoid all common AI patterns.\n\
         - Output clean Markdown."
    )
}
