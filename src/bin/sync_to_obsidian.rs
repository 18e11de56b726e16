//! sync-to-obsidian: mirror TIL notes into the Obsidian vault.
//!
//! Hooks:
//! - post-commit -> `sync-to-obsidian --diff` (only what the commit touched)
//! - post-merge  -> `sync-to-obsidian` (full clean sync; post-commit never
//!   runs for commits pulled from another machine)

use clap::Parser;
use std::process::ExitCode;
use til_lib::{sync_diff, sync_full, GitCli, SyncConfig};

#[derive(Parser)]
#[command(name = "sync-to-obsidian")]
#[command(version, about = "Sync TIL notes into the Obsidian vault")]
struct Cli {
    /// Only sync .md files changed in the last commit (post-commit)
    #[arg(long)]
    diff: bool,
}

fn main() -> ExitCode {
    til_lib::init_logging();
    let cli = Cli::parse();

    let result = SyncConfig::from_env().and_then(|config| {
        if cli.diff {
            sync_diff(&config, &GitCli::new(config.til_root.clone()))
        } else {
            sync_full(&config)
        }
    });

    match result {
        Ok(report) => {
            log::debug!(
                "{}",
                serde_json::to_string(&report).unwrap_or_else(|e| format!("<unserializable report: {}>", e))
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Obsidian sync failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
