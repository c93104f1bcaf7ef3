//! Lesson Content Generation
//!
//! This module provides the services that write lesson steps and hints. The
//! tutoring loop only sees the [`ContentService`] trait, so an LLM-backed
//! implementation and a fixed offline one can be swapped freely.

use crate::profile::LearnerProfile;
use anyhow::{Context, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{info, warn};

/// Prompt key for lesson generation.
pub const LESSON_PROMPT: &str = "generate_lesson";
/// Prompt key for hint generation.
pub const HINT_PROMPT: &str = "generate_hint";

/// Returned when the model answers but no text can be extracted from the reply.
pub const FALLBACK_EXPLANATION: &str = "Step 1: A fraction is a way to show a part of a whole.\n\
Step 2: The bottom number (denominator) tells how many equal parts the whole is split into.\n\
Step 3: The top number (numerator) tells how many of those parts you have.\n\
Step 4: Example: If a pizza is cut into 4 equal slices and you eat 1 slice, that is 1/4 of the pizza.";

const NO_CHALLENGES: &str = "no specific learning differences noted";

/// Built-in prompt templates, keyed by name.
pub fn default_prompts() -> HashMap<String, String> {
    HashMap::from([
        (
            LESSON_PROMPT.to_string(),
            include_str!("../prompts/generate_lesson.md").to_string(),
        ),
        (
            HINT_PROMPT.to_string(),
            include_str!("../prompts/generate_hint.md").to_string(),
        ),
    ])
}

/// Construction-time validation failures for [`LLMContentService`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ContentError {
    #[error("Missing required content configuration field: {0}")]
    MissingField(&'static str),
    #[error("Missing prompt template: '{0}'")]
    MissingPrompt(&'static str),
}

/// Connection settings for an OpenAI-compatible chat completion endpoint.
#[derive(Clone, Debug)]
pub struct ContentConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl ContentConfig {
    fn validate(&self) -> Result<(), ContentError> {
        if self.api_key.trim().is_empty() {
            return Err(ContentError::MissingField("api_key"));
        }
        if self.api_base.trim().is_empty() {
            return Err(ContentError::MissingField("api_base"));
        }
        if self.model.trim().is_empty() {
            return Err(ContentError::MissingField("model"));
        }
        Ok(())
    }
}

/// Defines the contract for any service that writes lesson material.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Writes a short lesson on `topic`, one step per line.
    async fn generate_lesson(&self, topic: &str, profile: &LearnerProfile) -> Result<String>;

    /// Writes a short, simpler hint for a step the learner found confusing.
    async fn generate_hint(&self, step_text: &str, profile: &LearnerProfile) -> Result<String>;
}

/// Comma-joined challenges, or a neutral phrase when none are declared.
pub fn describe_challenges(profile: &LearnerProfile) -> String {
    if profile.learning_challenges.is_empty() {
        NO_CHALLENGES.to_string()
    } else {
        profile.learning_challenges.join(", ")
    }
}

/// Fills a prompt template with learner context.
pub fn render_prompt(template: &str, profile: &LearnerProfile, vars: &[(&str, &str)]) -> String {
    let mut prompt = template
        .replace("{challenges}", &describe_challenges(profile))
        .replace("{preferences}", &profile.preferences.to_string());
    for (key, value) in vars {
        prompt = prompt.replace(&format!("{{{key}}}"), value);
    }
    prompt
}

/// Picks the first non-blank text among the reply candidates, or the fixed
/// fallback explanation when there is none.
pub fn text_or_fallback<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> String {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            warn!("Model reply contained no text. Using the fallback explanation.");
            FALLBACK_EXPLANATION.to_string()
        })
}

/// An implementation of `ContentService` that uses an OpenAI-compatible API.
pub struct LLMContentService {
    client: Client<OpenAIConfig>,
    model: String,
    prompts: HashMap<String, String>,
}

impl LLMContentService {
    /// Creates a new LLM-based content service.
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint, API key and model. All fields must be non-blank.
    /// * `prompts` - Template strings, which must include the keys
    ///   `"generate_lesson"` and `"generate_hint"`.
    pub fn new(config: ContentConfig, prompts: HashMap<String, String>) -> Result<Self, ContentError> {
        config.validate()?;
        for key in [LESSON_PROMPT, HINT_PROMPT] {
            if !prompts.contains_key(key) {
                return Err(ContentError::MissingPrompt(key));
            }
        }

        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key)
            .with_api_base(config.api_base);
        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.model,
            prompts,
        })
    }

    fn template(&self, key: &str) -> Result<&str> {
        self.prompts
            .get(key)
            .map(String::as_str)
            .with_context(|| format!("Missing prompt template: '{key}'"))
    }

    /// Sends a single prompt and returns the reply text.
    ///
    /// Transport and provider errors are returned as-is; a reply without any
    /// text falls back to [`FALLBACK_EXPLANATION`].
    async fn call_model(&self, prompt: String) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content("You are a patient tutor who writes short, clear explanations.")
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .with_context(|| format!("Error calling model '{}'", self.model))?;

        Ok(text_or_fallback(
            response
                .choices
                .iter()
                .map(|choice| choice.message.content.as_deref()),
        ))
    }
}

#[async_trait]
impl ContentService for LLMContentService {
    async fn generate_lesson(&self, topic: &str, profile: &LearnerProfile) -> Result<String> {
        let prompt = render_prompt(self.template(LESSON_PROMPT)?, profile, &[("topic", topic)]);
        info!(model = %self.model, %topic, "Requesting lesson");
        self.call_model(prompt).await
    }

    async fn generate_hint(&self, step_text: &str, profile: &LearnerProfile) -> Result<String> {
        let prompt = render_prompt(self.template(HINT_PROMPT)?, profile, &[("step", step_text)]);
        info!(model = %self.model, "Requesting hint");
        self.call_model(prompt).await
    }
}

/// A fixed `ContentService` for offline demos and tests.
///
/// The lesson has four steps and every hint restates the step in simpler words.
pub struct StaticContentService;

#[async_trait]
impl ContentService for StaticContentService {
    async fn generate_lesson(&self, topic: &str, _profile: &LearnerProfile) -> Result<String> {
        Ok(format!(
            "Step 1: {topic} starts with one simple idea.\n\
             Step 2: We look at that idea with a small picture.\n\
             Step 3: We try a tiny example together.\n\
             Step 4: We say the idea back in our own words."
        ))
    }

    async fn generate_hint(&self, step_text: &str, _profile: &LearnerProfile) -> Result<String> {
        Ok(format!("Try reading it slowly, one part at a time: {step_text}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ContentConfig {
        ContentConfig {
            api_key: "test-key".to_string(),
            api_base: "https://example.invalid/v1".to_string(),
            model: "test-model".to_string(),
        }
    }

    #[test]
    fn test_construction_validates_required_fields() {
        assert!(LLMContentService::new(config(), default_prompts()).is_ok());

        let mut cfg = config();
        cfg.api_key = "  ".to_string();
        assert_eq!(
            LLMContentService::new(cfg, default_prompts()).err(),
            Some(ContentError::MissingField("api_key"))
        );

        let mut cfg = config();
        cfg.model = String::new();
        assert_eq!(
            LLMContentService::new(cfg, default_prompts()).err(),
            Some(ContentError::MissingField("model"))
        );

        let mut prompts = default_prompts();
        prompts.remove(HINT_PROMPT);
        assert_eq!(
            LLMContentService::new(config(), prompts).err(),
            Some(ContentError::MissingPrompt(HINT_PROMPT))
        );
    }

    #[test]
    fn test_render_prompt_fills_learner_context() {
        let profile = LearnerProfile::with_defaults("s1", "Alex");
        let prompt = render_prompt(
            "{topic} | {challenges} | {preferences}",
            &profile,
            &[("topic", "Fractions")],
        );
        assert_eq!(
            prompt,
            "Fractions | dyslexia | visual=0.60, audio=0.30, text=0.10"
        );

        let mut profile = profile;
        profile.learning_challenges.clear();
        let prompt = render_prompt("{challenges}", &profile, &[]);
        assert_eq!(prompt, NO_CHALLENGES);
    }

    #[test]
    fn test_default_prompts_use_known_placeholders() {
        let prompts = default_prompts();
        assert!(prompts[LESSON_PROMPT].contains("{topic}"));
        assert!(prompts[HINT_PROMPT].contains("{step}"));
        for template in prompts.values() {
            assert!(template.contains("{challenges}"));
            assert!(template.contains("{preferences}"));
        }
    }

    #[test]
    fn test_text_or_fallback() {
        assert_eq!(
            text_or_fallback([None, Some("  "), Some(" Step 1: Hi \n")]),
            "Step 1: Hi"
        );
        assert_eq!(text_or_fallback([None, Some("")]), FALLBACK_EXPLANATION);
        assert_eq!(
            text_or_fallback(std::iter::empty::<Option<&str>>()),
            FALLBACK_EXPLANATION
        );
    }

    #[tokio::test]
    async fn test_static_service() {
        let profile = LearnerProfile::with_defaults("s1", "Alex");
        let lesson = StaticContentService
            .generate_lesson("Fractions", &profile)
            .await
            .unwrap();
        assert_eq!(lesson.lines().count(), 4);
        assert!(lesson.starts_with("Step 1: Fractions"));

        let hint = StaticContentService
            .generate_hint("Step 2: x", &profile)
            .await
            .unwrap();
        assert!(hint.ends_with("Step 2: x"));
    }
}
