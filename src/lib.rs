pub mod config;
pub mod frontmatter;
pub mod fsutil;
pub mod git;
pub mod note;
pub mod readme;
pub mod sync;




pub use config::{ReadmeConfig, SyncConfig};
pub use git::{CommitChanges, GitCli};
pub use sync::{sync_diff, sync_full, FileOutcome, SyncMode, SyncReport};

/// Install the `env_logger` backend; `RUST_LOG` overrides the default `info` level
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
