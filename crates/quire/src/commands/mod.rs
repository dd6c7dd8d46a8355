//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod clean;
pub(crate) mod dev;
pub(crate) mod start;

use std::path::PathBuf;

use clap::Args;
use quire_config::{CliSettings, Config};
use quire_site::PipelineOptions;

pub(crate) use build::BuildArgs;
pub(crate) use clean::CleanArgs;
pub(crate) use dev::DevArgs;
pub(crate) use start::StartArgs;

use crate::error::CliError;

/// Options shared by every command that touches the site directories.
#[derive(Args, Debug)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    pub source_dir: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Options for commands that start the server.
#[derive(Args, Debug)]
pub(crate) struct ListenArgs {
    /// Host to bind to (overrides config).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,
}

impl SiteArgs {
    fn load(&self, mut settings: CliSettings) -> Result<Config, CliError> {
        settings.source_dir.clone_from(&self.source_dir);
        settings.output_dir.clone_from(&self.output_dir);
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        tracing::debug!(
            config = ?config.config_path,
            source_dir = %config.docs_resolved.source_dir.display(),
            output_dir = %config.docs_resolved.output_dir.display(),
            "Loaded configuration"
        );
        Ok(config)
    }
}

fn pipeline_options(config: &Config) -> PipelineOptions {
    PipelineOptions {
        source_dir: config.docs_resolved.source_dir.clone(),
        output_dir: config.docs_resolved.output_dir.clone(),
        assets_dir: config.docs_resolved.assets_dir.clone(),
        site_title: config.site.title.clone(),
        diagram_languages: config.diagrams.languages.clone(),
    }
}
