use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use packes::cli::{self, Cli, Commands};
use packes::{Config, PackError, PackOptions, Packer};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose)?;

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    info!("Starting Packes v{}", packes::VERSION);

    // Handle commands
    match cli.command {
        Commands::Pack {
            input,
            output,
            alias,
            minify,
        } => {
            let output = output.unwrap_or_else(|| input.clone());
            let packer = Packer::new(config)?;

            let options = PackOptions {
                working_directory: None,
                alias,
                minify,
            };

            let progress = spinner("Bundling...")?;
            let result = packer.pack(&input, &output, options).await;
            progress.finish_and_clear();

            match result {
                Ok(result) => {
                    if !result.warnings.is_empty() {
                        warn!("{} bundler warning(s)", result.warnings.len());
                    }
                    info!("Output: {} ({} bytes)", result.output_path.display(), result.size);
                    println!("{}", "============ pack success ============".green());
                }
                Err(e) => {
                    eprintln!("❌ Pack failed: {}", e);
                    if let PackError::BuildFailed { errors } = &e {
                        for message in errors {
                            eprintln!("  - {}", message);
                        }
                    }
                    std::process::exit(1);
                }
            }
        }

        Commands::Scan { input } => {
            let packer = Packer::new(config)?;
            match packer.scan_entry(&input, None) {
                Ok(report) => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                Err(e) => {
                    eprintln!("❌ Scan failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init { output_dir } => {
            let path = Config::init(&output_dir)?;
            info!("Initialized Packes configuration in {}", path.display());
        }

        Commands::Completions { shell } => {
            cli::generate_completions(shell);
        }
    }

    Ok(())
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let progress = ProgressBar::new_spinner();
    progress.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    progress.set_message(message);
    progress.enable_steady_tick(Duration::from_millis(100));
    Ok(progress)
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_directive = if verbose { "packes=debug" } else { "packes=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
        )
        .with(filter)
        .init();

    Ok(())
}
