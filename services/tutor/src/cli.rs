use clap::Parser;
use std::path::PathBuf;

/// Run an EduBridge tutoring session.
#[derive(Parser, Debug, Clone)]
#[command(name = "tutor", version, about)]
pub struct Args {
    /// Student ID
    #[arg(long, default_value = "student_001")]
    pub student: String,

    /// Student name
    #[arg(long, default_value = "Alex")]
    pub name: String,

    /// Learning topic
    #[arg(long, default_value = "Introduction to Fractions")]
    pub topic: String,

    /// Path to a student profile JSON file; replaces the default profile when it exists
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Directory for the saved session log and profile (overrides REPORTS_DIR)
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,
}
