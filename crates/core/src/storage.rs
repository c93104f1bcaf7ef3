//! Report Storage
//!
//! Persists the session log and the updated learner profile as pretty-printed
//! JSON files named after the learner's id.

use crate::{profile::LearnerProfile, session_log::SessionLog};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A directory of per-learner session reports and profiles.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn report_path(&self, student_id: &str) -> PathBuf {
        self.dir.join(format!("{student_id}_report.json"))
    }

    pub fn profile_path(&self, student_id: &str) -> PathBuf {
        self.dir.join(format!("{student_id}_profile.json"))
    }

    /// Writes the session log and profile, creating the directory if needed.
    pub fn save(&self, profile: &LearnerProfile, log: &SessionLog) -> Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create reports directory {}", self.dir.display()))?;

        let report_path = self.report_path(&profile.student_id);
        write_json(&report_path, log)?;
        let profile_path = self.profile_path(&profile.student_id);
        write_json(&profile_path, profile)?;

        info!(
            report = %report_path.display(),
            profile = %profile_path.display(),
            "Session saved"
        );
        Ok((report_path, profile_path))
    }
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Reads and validates a learner profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<LearnerProfile> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let profile: LearnerProfile = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid profile JSON in {}", path.display()))?;
    profile
        .validate()
        .with_context(|| format!("Invalid profile in {}", path.display()))?;
    Ok(profile)
}
