use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use regex::Regex;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::config::Settings;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const PLACEHOLDER_API_KEY: &str = "YOUR_GROQ_API_KEY_HERE";

const SYSTEM_PROMPT: &str = "You are Skilli, an AI educational tutor for the KnowWhereYouLack platform. \
Your ONLY purpose is to help students learn academic subjects.\n\n\
STRICT RULES:\n\
1. ONLY answer questions about education, academics, studying, and learning\n\
2. Subjects you can help with: Math, Science, Programming, Languages, History, Literature, etc.\n\
3. You MUST refuse to discuss: entertainment, sports, politics, gossip, recipes, dating, or any non-educational topics\n\
4. If asked about non-educational topics, politely redirect to educational content\n\
5. Keep responses concise, clear, and student-friendly (2-3 paragraphs max)\n\
6. Use examples and analogies to explain concepts\n\
7. Encourage critical thinking and problem-solving\n\
8. Break down complex topics into simple steps\n\
9. Use emojis sparingly for engagement (\u{1F4DA}, \u{1F4A1}, \u{2728})\n\n\
Your goal: Help students UNDERSTAND concepts, not just provide answers.";

const UNAVAILABLE_REPLY: &str = "\u{26A0}\u{FE0F} The AI tutor is currently unavailable. \
Please contact the administrator to configure the Groq API key.";

const EMPTY_MESSAGE_REPLY: &str = "Please ask me a question about your studies!";

const REDIRECT_REPLY: &str = "\u{1F393} I'm Skilli, your educational AI tutor! I can only help \
with academic topics like mathematics, science, programming, languages, and other educational \
subjects.\n\nPlease ask me questions related to:\n\u{2022} Math, Science, or Programming\n\
\u{2022} Study tips and learning strategies\n\u{2022} Subject explanations and concepts\n\
\u{2022} Homework or assignment help\n\nHow can I help you learn today? \u{1F4DA}";

const REPHRASE_REPLY: &str =
    "I'm having trouble understanding the response. Could you rephrase your question?";

const NETWORK_ERROR_REPLY: &str =
    "\u{26A0}\u{FE0F} Network error. Please check your connection and try again.";

const AUTH_FAILED_REPLY: &str =
    "\u{26A0}\u{FE0F} API authentication failed. Please check the API key configuration.";

const RATE_LIMIT_REPLY: &str =
    "\u{26A0}\u{FE0F} Rate limit reached. Please wait a moment and try again.";

const INVALID_REQUEST_REPLY: &str =
    "\u{26A0}\u{FE0F} Invalid request format. Please try again.";

const EDUCATIONAL_KEYWORDS: &[&str] = &[
    // Core subjects
    "math", "mathematics", "science", "physics", "chemistry", "biology", "history", "geography",
    "english", "literature", "grammar", "writing", "computer", "programming", "coding",
    "algorithm", "data structure",
    // Programming languages
    "java", "python", "javascript", "react", "html", "css", "sql", "c++",
    // Math topics
    "calculus", "algebra", "geometry", "statistics", "probability", "trigonometry", "derivative",
    "integral", "function", "variable", "theorem", "proof",
    // General academic
    "study", "learn", "education", "quiz", "test", "exam", "homework", "assignment", "research",
    "essay", "problem", "solution", "concept", "theory", "practice", "tutorial", "lesson",
    "course", "subject", "topic",
    // Action words
    "explain", "understand", "help", "question", "answer", "teach", "show",
    // Science terms
    "photosynthesis", "cell", "atom", "molecule", "equation", "formula",
    // CS terms
    "array", "loop", "class", "object", "method", "recursion", "api",
];

const BLACKLISTED_KEYWORDS: &[&str] = &[
    "movie", "film", "song", "music", "game", "gaming", "sport", "football", "cricket", "recipe",
    "cooking", "fashion", "celebrity", "gossip", "politics", "election", "dating", "relationship",
    "joke", "meme", "weather", "news", "stocks", "cryptocurrency", "shopping",
];

const ACADEMIC_PATTERNS: &[&str] = &[
    "law", "theory", "rule", "principle", "formula", "equation", "concept", "compound", "element",
    "force", "energy", "motion", "reaction", "process", "structure", "system", "method",
    "technique", "solution", "definition", "analysis", "theorem", "proof", "axiom", "property",
    "characteristic",
];

fn question_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)(\?|what|how|why|when|where|who|explain|define|describe|teach|show|tell|give|provide|can you)",
        )
        .expect("question pattern compiles")
    })
}

/// Lenient education filter: reject only obvious off-topic messages, accept
/// everything with an academic signal. Blacklist wins over every accept rule.
pub(crate) fn is_educational(message: &str) -> bool {
    let lower = message.to_lowercase();

    for blacklisted in BLACKLISTED_KEYWORDS {
        if lower.contains(blacklisted) {
            tracing::info!(keyword = %blacklisted, "Chat message rejected: blacklisted keyword");
            return false;
        }
    }

    for educational in EDUCATIONAL_KEYWORDS {
        if lower.contains(educational) {
            tracing::info!(keyword = %educational, "Chat message approved: educational keyword");
            return true;
        }
    }

    if question_pattern().is_match(message) {
        tracing::info!("Chat message approved: question format detected");
        return true;
    }

    for pattern in ACADEMIC_PATTERNS {
        if lower.contains(pattern) {
            tracing::info!(keyword = %pattern, "Chat message approved: academic pattern");
            return true;
        }
    }

    if message.split_whitespace().count() >= 5 {
        tracing::info!("Chat message approved: long enough to be a genuine query");
        return true;
    }

    tracing::info!("Chat message rejected: no educational indicators found");
    false
}

#[derive(Clone)]
pub(crate) struct ChatService {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl ChatService {
    pub(crate) fn from_settings(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: settings.chat().groq_api_key.clone(),
            api_url: settings.chat().groq_api_url.clone(),
            model: settings.chat().groq_model.clone(),
        })
    }

    /// Produce a tutor reply for a raw user message. Every failure mode folds
    /// into a human-readable reply; the HTTP envelope stays 200.
    pub(crate) async fn reply(&self, raw_message: &str) -> String {
        if self.api_key.is_empty() || self.api_key == PLACEHOLDER_API_KEY {
            tracing::error!("Groq API key not configured");
            return UNAVAILABLE_REPLY.to_string();
        }

        let message = raw_message.trim();
        if message.is_empty() {
            tracing::warn!("Empty chat message received");
            return EMPTY_MESSAGE_REPLY.to_string();
        }

        if !is_educational(message) {
            return REDIRECT_REPLY.to_string();
        }

        self.call_upstream(message).await
    }

    async fn call_upstream(&self, message: &str) -> String {
        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": message},
            ],
            "temperature": 0.7,
            "max_tokens": 800,
            "top_p": 0.9,
            "stream": false,
        });

        let response = match self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, "Failed to reach the chat completion API");
                return NETWORK_ERROR_REPLY.to_string();
            }
        };

        let status = response.status();
        tracing::info!(status = status.as_u16(), "Chat completion API responded");

        if status.is_success() {
            let body: Value = match response.json().await {
                Ok(body) => body,
                Err(err) => {
                    tracing::error!(error = %err, "Failed to parse chat completion response");
                    return REPHRASE_REPLY.to_string();
                }
            };
            return extract_reply(&body);
        }

        error_status_reply(status.as_u16())
    }
}

fn error_status_reply(code: u16) -> String {
    match code {
        401 => {
            tracing::error!("Chat completion API authentication failed");
            AUTH_FAILED_REPLY.to_string()
        }
        429 => {
            tracing::warn!("Chat completion API rate limit exceeded");
            RATE_LIMIT_REPLY.to_string()
        }
        400 => {
            tracing::error!("Chat completion API rejected the request");
            INVALID_REQUEST_REPLY.to_string()
        }
        code => {
            tracing::error!(status = code, "Chat completion API error");
            format!(
                "\u{1F916} I'm experiencing technical difficulties (Error {code}). \
                 Please try again in a moment."
            )
        }
    }
}

fn extract_reply(body: &Value) -> String {
    if let Some(content) = body
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|value| value.as_str())
    {
        let reply = content.trim();
        if !reply.is_empty() {
            tracing::info!(chars = reply.len(), "AI reply received");
            return reply.to_string();
        }
    }

    if let Some(message) =
        body.get("error").and_then(|error| error.get("message")).and_then(|value| value.as_str())
    {
        tracing::error!(error = message, "Chat completion API returned an error body");
        return format!("\u{1F916} API Error: {message}");
    }

    REPHRASE_REPLY.to_string()
}
