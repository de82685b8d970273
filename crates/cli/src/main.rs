//! Inkwise CLI: the main entry point.
//!
//! Commands:
//! - `init`:     Create the config directory and config.toml
//! - `status`:   Show the current session
//! - `set`:      Patch a session field (`intent`, `linkedin.maxBullets`, ...)
//! - `claim`:    Add, edit, remove and reorder claims
//! - `express`:  Write the paragraph for a claim
//! - `draft`:    Render the draft for the selected profile
//! - `profiles`: List output profiles
//! - `export`:   Write a session export file
//! - `import`:   Replace the session from an export file
//! - `preset`:   List or load quick-start presets
//! - `reset`:    Start over with an empty session

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "inkwise",
    about = "Inkwise — structured drafts for LinkedIn, threads, email, memos and blogs",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the config directory and a default config.toml
    Init,

    /// Show the current session
    Status,

    /// Set a session field, e.g. `set intent "Ship it"` or `set linkedin.maxBullets 3`
    Set {
        /// Dotted field path
        path: String,
        /// New value; parsed as JSON when possible, otherwise taken as text
        value: String,
    },

    /// Manage claims
    Claim {
        #[command(subcommand)]
        action: ClaimAction,
    },

    /// Write the expression paragraph for a claim
    Express {
        /// Claim number (1-based) or id
        claim: String,
        text: String,
    },

    /// Render the draft
    Draft {
        /// Preview with another profile without changing the session
        #[arg(short, long)]
        profile: Option<String>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List output profiles
    Profiles,

    /// Export the session to a file
    Export {
        /// Output file (defaults to the configured export directory)
        #[arg(short, long)]
        out: Option<std::path::PathBuf>,
    },

    /// Import a session export file, replacing the current session
    Import { file: std::path::PathBuf },

    /// Quick-start presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Discard the current session
    Reset,
}

#[derive(Subcommand)]
enum ClaimAction {
    /// List claims
    List,
    /// Append a claim
    Add { text: String },
    /// Replace a claim's text
    Edit { claim: String, text: String },
    /// Remove a claim and its expression
    Rm { claim: String },
    /// Move a claim up (negative) or down (positive)
    Mv {
        claim: String,
        #[arg(allow_hyphen_values = true)]
        offset: isize,
    },
    /// Drop expressions whose claim was removed
    Prune,
}

#[derive(Subcommand)]
enum PresetAction {
    /// List presets
    List,
    /// Load a preset, replacing the current session
    Load { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Status => commands::status::run().await?,
        Commands::Set { path, value } => commands::edit::set(&path, &value).await?,
        Commands::Claim { action } => match action {
            ClaimAction::List => commands::claim::list().await?,
            ClaimAction::Add { text } => commands::claim::add(&text).await?,
            ClaimAction::Edit { claim, text } => commands::claim::edit(&claim, &text).await?,
            ClaimAction::Rm { claim } => commands::claim::remove(&claim).await?,
            ClaimAction::Mv { claim, offset } => commands::claim::shift(&claim, offset).await?,
            ClaimAction::Prune => commands::claim::prune().await?,
        },
        Commands::Express { claim, text } => commands::claim::express(&claim, &text).await?,
        Commands::Draft { profile, json } => commands::draft::run(profile.as_deref(), json).await?,
        Commands::Profiles => commands::draft::profiles().await?,
        Commands::Export { out } => commands::transfer::export(out).await?,
        Commands::Import { file } => commands::transfer::import(&file).await?,
        Commands::Preset { action } => match action {
            PresetAction::List => commands::preset::list().await?,
            PresetAction::Load { id } => commands::preset::load(&id).await?,
        },
        Commands::Reset => commands::edit::reset().await?,
    }

    Ok(())
}
