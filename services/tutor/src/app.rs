//! Session Wiring
//!
//! Builds the collaborators a session needs from configuration and flags, and
//! runs the end-of-session pipeline: score, adjust, report. Saving is a
//! separate step so the report can be shown first.

use crate::{cli::Args, config::Config};
use anyhow::{Context, Result};
use edubridge_core::{
    analytics::effective_score,
    content::{ContentConfig, ContentService, LLMContentService, default_prompts},
    profile::LearnerProfile,
    report::render_report,
    session_log::SessionLog,
    storage::{ReportStore, load_profile},
    tutor::{LearnerIo, TutorSession},
};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

/// Loads prompt overrides from a directory of `*.md` files on top of the built-in prompts.
pub fn load_prompts(prompts_path: Option<&Path>) -> Result<HashMap<String, String>> {
    let mut prompts = default_prompts();
    let Some(dir) = prompts_path else {
        return Ok(prompts);
    };

    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read prompts directory {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            let prompt_key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .context("Could not get file stem")?
                .to_string();
            let content = fs::read_to_string(&path)?;
            info!(prompt = %prompt_key, "Loaded prompt override");
            prompts.insert(prompt_key, content);
        }
    }
    Ok(prompts)
}

/// Creates the LLM-backed content service for the configured provider.
pub fn build_content_service(config: &Config) -> Result<LLMContentService> {
    let api_key = config
        .api_key()
        .context("No API key configured for the selected provider")?;
    let prompts = load_prompts(config.prompts_path.as_deref())?;
    let service = LLMContentService::new(
        ContentConfig {
            api_key: api_key.to_string(),
            api_base: config.provider.api_base().to_string(),
            model: config.chat_model.clone(),
        },
        prompts,
    )?;
    info!(provider = ?config.provider, model = %config.chat_model, "Content service ready");
    Ok(service)
}

/// Uses the profile file when one is given and exists, otherwise the defaults.
pub fn resolve_profile(args: &Args) -> Result<LearnerProfile> {
    match &args.profile {
        Some(path) if path.exists() => {
            let profile = load_profile(path)?;
            info!(student_id = %profile.student_id, path = %path.display(), "Loaded profile");
            Ok(profile)
        }
        Some(path) => {
            warn!(path = %path.display(), "Profile file not found. Using the default profile.");
            Ok(LearnerProfile::with_defaults(&args.student, &args.name))
        }
        None => Ok(LearnerProfile::with_defaults(&args.student, &args.name)),
    }
}

/// A finished session: its log and the rendered report, not yet persisted.
#[derive(Debug)]
pub struct CompletedSession {
    pub log: SessionLog,
    pub report: String,
}

impl CompletedSession {
    /// Writes the log and the adjusted profile to the store.
    pub fn save(&self, profile: &LearnerProfile, store: &ReportStore) -> Result<(PathBuf, PathBuf)> {
        store
            .save(profile, &self.log)
            .context("Failed to save session outputs")
    }
}

/// Runs one session, scores it, adjusts the profile in place and renders the report.
///
/// Nothing is written here. The caller shows the report and then calls
/// [`CompletedSession::save`].
pub async fn run_session(
    content: &dyn ContentService,
    profile: &mut LearnerProfile,
    topic: &str,
    io: &mut dyn LearnerIo,
) -> Result<CompletedSession> {
    let log = TutorSession::new(content, &*profile)
        .run(topic, io)
        .await
        .context("Tutoring session failed")?;

    let score = effective_score(&log);
    info!(score, steps = log.len(), "Session scored");
    profile.adjust_preferences(score)?;

    let report = render_report(profile, &log);
    Ok(CompletedSession { log, report })
}
