mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use kdeploy_core::{DeployMode, ServiceType};

#[derive(Parser)]
#[command(
    name = "kdeploy",
    about = "Version container images in Kubernetes deployment manifests"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current and next version of an image reference
    NextVersion {
        /// Image reference, e.g. registry.example.com/acme_billing:1.2.3
        image: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compose a fully qualified image reference
    ImageRef {
        /// Registry base path
        #[arg(long)]
        registry: String,
        /// Service name
        #[arg(long)]
        svc: String,
        /// Image name prefix (joined with `_`)
        #[arg(long, default_value = "")]
        prefix: String,
        /// Version tag (default: 1.0.0)
        #[arg(long, default_value = "")]
        version: String,
    },
    /// Show a service's manifests, current image, and next image
    Show {
        #[command(flatten)]
        target: ServiceArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rewrite a service's deployment manifest with the next image version
    Bump {
        #[command(flatten)]
        target: ServiceArgs,
        /// Print the plan without writing the manifest
        #[arg(long)]
        dry_run: bool,
    },
}

/// Selects a configured service.
#[derive(Args)]
struct ServiceArgs {
    /// Service name as configured in kdeploy.toml
    #[arg(long)]
    svc: String,
    /// Deploy mode (dev|prod)
    #[arg(long, default_value = "dev")]
    mode: DeployMode,
    /// Service type (go|dotnet)
    #[arg(long = "type", default_value = "go")]
    service_type: ServiceType,
    /// Project directory containing kdeploy.toml
    #[arg(short = 'C', long = "project-dir", default_value = ".")]
    project_dir: PathBuf,
}

impl ServiceArgs {
    fn target(&self) -> commands::Target<'_> {
        commands::Target {
            project_dir: &self.project_dir,
            service: &self.svc,
            mode: self.mode,
            service_type: self.service_type,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                // arch-lint: allow(no-silent-result-drop) reason="unset or unparsable RUST_LOG falls back to the info filter"
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::NextVersion { image, json } => commands::next_version(&image, json)?,
        Commands::ImageRef {
            registry,
            svc,
            prefix,
            version,
        } => commands::image_ref(&registry, &prefix, &svc, &version),
        Commands::Show { target, json } => commands::show(&target.target(), json)?,
        Commands::Bump { target, dry_run } => commands::bump(&target.target(), dry_run)?,
    }

    Ok(())
}
