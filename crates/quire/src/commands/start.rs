//! `quire start` command implementation.

use clap::Args;
use quire_config::CliSettings;
use quire_server::{MediaTypeTable, ServerConfig, run_server};

use super::{ListenArgs, SiteArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the start command.
#[derive(Args, Debug)]
pub(crate) struct StartArgs {
    #[command(flatten)]
    site: SiteArgs,

    #[command(flatten)]
    listen: ListenArgs,
}

impl StartArgs {
    /// Serve the pre-built output root. Nothing is built or watched.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load(CliSettings {
            host: self.listen.host,
            port: self.listen.port,
            live_reload_enabled: Some(false),
            ..CliSettings::default()
        })?;

        let output_dir = config.docs_resolved.output_dir.clone();
        if !output_dir.join("index.html").is_file() {
            output.warning(&format!(
                "{} has no index.html; run `quire build` first",
                output_dir.display()
            ));
        }

        output.serving(&config.server.host, config.server.port, Some(&output_dir));

        run_server(ServerConfig {
            host: config.server.host,
            port: config.server.port,
            roots: vec![output_dir],
            media_types: MediaTypeTable::default(),
            live_reload: None,
        })
        .await?;
        Ok(())
    }
}
