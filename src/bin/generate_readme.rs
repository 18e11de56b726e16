//! generate-readme: rebuild the TIL README.md table of contents.

use clap::Parser;
use std::process::ExitCode;
use til_lib::readme::generate_readme;
use til_lib::ReadmeConfig;

#[derive(Parser)]
#[command(name = "generate-readme")]
#[command(version, about = "Generate README.md with a categorized TIL index")]
struct Cli {}

fn main() -> ExitCode {
    til_lib::init_logging();
    Cli::parse();

    match ReadmeConfig::from_env().and_then(|config| generate_readme(&config)) {
        Ok(summary) => {
            log::info!("Wrote {:?}", summary.output_path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("README generation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
