//! `quire dev` command implementation.

use clap::Args;
use quire_config::CliSettings;
use quire_server::{LiveReloadOptions, MediaTypeTable, ServerConfig, run_server};
use quire_site::Pipeline;

use super::{ListenArgs, SiteArgs, pipeline_options};
use crate::error::CliError;
use crate::output::{BuildSummary, Output};

/// Arguments for the dev command.
#[derive(Args, Debug)]
pub(crate) struct DevArgs {
    #[command(flatten)]
    site: SiteArgs,

    #[command(flatten)]
    listen: ListenArgs,

    /// Enable live reload (default: enabled).
    #[arg(long)]
    live_reload: Option<bool>,

    /// Disable live reload.
    #[arg(long, conflicts_with = "live_reload")]
    no_live_reload: bool,
}

impl DevArgs {
    /// Build once, then serve the output and the assets directory.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let live_reload_enabled = self.resolve_live_reload_enabled();

        let config = self.site.load(CliSettings {
            host: self.listen.host,
            port: self.listen.port,
            live_reload_enabled,
            ..CliSettings::default()
        })?;

        let options = pipeline_options(&config);
        let report = Pipeline::new(options.clone()).run()?;
        output.build_summary(&BuildSummary::from_report(&report));

        let docs = &config.docs_resolved;
        let live_reload = config.live_reload.enabled.then(|| LiveReloadOptions {
            source_dir: docs.source_dir.clone(),
            output_dir: docs.output_dir.clone(),
            watch_patterns: config.live_reload.patterns(),
            pipeline: Pipeline::new(options),
        });

        output.info(&format!(
            "Live reload: {}",
            if live_reload.is_some() { "enabled" } else { "disabled" }
        ));
        output.serving(&config.server.host, config.server.port, None);

        let roots = vec![docs.output_dir.clone(), docs.assets_dir.clone()];
        tracing::debug!(?roots, "Static roots");

        run_server(ServerConfig {
            host: config.server.host.clone(),
            port: config.server.port,
            roots,
            media_types: MediaTypeTable::default(),
            live_reload,
        })
        .await?;
        Ok(())
    }

    /// Resolve `live_reload_enabled` from --live-reload/--no-live-reload flags.
    fn resolve_live_reload_enabled(&self) -> Option<bool> {
        self.no_live_reload.then_some(false).or(self.live_reload)
    }
}
