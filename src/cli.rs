use std::path::PathBuf;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

/// Rewrite an ES module entry file into one standalone bundled script
#[derive(Parser)]
#[command(
    name = "packes",
    version,
    about = "Rewrite an ES module entry file into one standalone bundled script",
    long_about = "Packes moves the imports and re-exports of an entry file into a bridge module, bundles that module with a generic bundler, and writes the bundle, a destructuring preamble and the rest of the entry file as one script."
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack an entry file into a standalone script
    Pack {
        /// Entry file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (defaults to INPUT, which is rejected)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Package aliases: name=path[,name=path...]
        #[arg(short, long, value_name = "NAME=PATH", env = "PACKES_ALIAS")]
        alias: Option<String>,

        /// Minify the bundled dependencies
        #[arg(short = 'M', long)]
        minify: bool,
    },

    /// Show the statements, bridge module and bindings for an entry file
    Scan {
        /// Entry file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Initialize Packes configuration
    Init {
        /// Output directory for configuration
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert()
    }

    #[test]
    fn test_pack_arguments() {
        let cli = Cli::parse_from([
            "packes", "pack", "src/index.js", "dist/index.js", "--alias", "react=./r.js", "-M",
        ]);

        match cli.command {
            Commands::Pack { input, output, alias, minify } => {
                assert_eq!(input, PathBuf::from("src/index.js"));
                assert_eq!(output, Some(PathBuf::from("dist/index.js")));
                assert_eq!(alias.as_deref(), Some("react=./r.js"));
                assert!(minify);
            }
            _ => panic!("expected pack command"),
        }
    }

    #[test]
    fn test_output_is_optional() {
        let cli = Cli::parse_from(["packes", "pack", "index.js"]);
        assert!(matches!(cli.command, Commands::Pack { output: None, .. }));
    }
}
