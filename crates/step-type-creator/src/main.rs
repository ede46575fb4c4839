//! Step type creator - main entry point

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Create a new VLE step type from the bundled templates.
///
/// Run it from the node directory (vle/node) so the new folder lands next
/// to the existing step types and setupNodes.js is updated.
#[derive(Parser)]
#[command(name = "step-type-creator")]
#[command(version)]
#[command(about = "Create a new step type from the bundled templates", long_about = None)]
struct Cli {
    /// Name of the new step type, e.g. chocoTaco (letters, numbers and underscores)
    name: String,

    /// File extension for the new step type's content files, e.g. ct
    extension: String,

    /// Directory to create the step type folder in (defaults to the current directory)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Manifest to register the step type in (defaults to setupNodes.js in the target directory)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Read templates from DIR/template instead of the bundled set
    #[arg(long, value_name = "DIR")]
    templates: Option<PathBuf>,

    /// Overwrite an existing step type folder without asking
    #[arg(short = 'y', long)]
    yes: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the progress lines or JSON report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "step_type_creator=info,step_type_create=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    commands::create::execute(commands::create::CreateArgs {
        name: cli.name,
        extension: cli.extension,
        dir: cli.dir,
        manifest: cli.manifest,
        templates: cli.templates,
        yes: cli.yes,
        json: cli.json,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_requires_name_and_extension() {
        assert!(Cli::try_parse_from(["step-type-creator"]).is_err());
        assert!(Cli::try_parse_from(["step-type-creator", "quiz"]).is_err());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "step-type-creator",
            "chocoTaco",
            "ct",
            "--dir",
            "vle/node",
            "--templates",
            "my-templates",
            "-y",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.name, "chocoTaco");
        assert_eq!(cli.extension, "ct");
        assert_eq!(cli.dir, Some(PathBuf::from("vle/node")));
        assert_eq!(cli.templates, Some(PathBuf::from("my-templates")));
        assert!(cli.manifest.is_none());
        assert!(cli.yes);
        assert!(cli.json);
    }
}
