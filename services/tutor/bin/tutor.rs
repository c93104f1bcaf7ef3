//! Main Entrypoint for the EduBridge Tutor
//!
//! This binary is responsible for:
//! 1. Parsing command-line flags.
//! 2. Loading configuration from the environment.
//! 3. Building the content service and the learner profile.
//! 4. Running the interactive session on the terminal.
//! 5. Printing the report and saving the session log and updated profile.

use anyhow::Context;
use clap::Parser;
use edubridge_core::storage::ReportStore;
use edubridge_tutor::{
    app::{build_content_service, resolve_profile, run_session},
    cli::Args,
    config::Config,
    console::ConsoleIo,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Parse Flags ---
    let args = Args::parse();

    // --- 2. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 3. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
    info!("Configuration loaded. Initializing session...");

    // --- 4. Initialize Collaborators ---
    let content = build_content_service(&config).context("Failed to initialize content service")?;
    let mut profile = resolve_profile(&args).context("Failed to load learner profile")?;
    let reports_dir = args
        .reports_dir
        .clone()
        .unwrap_or_else(|| config.reports_dir.clone());
    let store = ReportStore::new(reports_dir);

    // --- 5. Run Session ---
    info!(
        provider = ?config.provider,
        model = %config.chat_model,
        student_id = %profile.student_id,
        topic = %args.topic,
        "Starting session"
    );
    let mut io = ConsoleIo::new();
    let completed = run_session(&content, &mut profile, &args.topic, &mut io).await?;

    // --- 6. Show Report, Then Persist ---
    println!("\n===== SESSION REPORT =====\n");
    println!("{}", completed.report);
    completed.save(&profile, &store)?;

    info!(reports_dir = %store.dir().display(), "Session complete.");
    Ok(())
}
