//! `quire clean` command implementation.

use clap::Args;
use quire_config::CliSettings;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the clean command.
#[derive(Args, Debug)]
pub(crate) struct CleanArgs {
    #[command(flatten)]
    site: SiteArgs,
}

impl CleanArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load(CliSettings::default())?;
        let docs = &config.docs_resolved;

        if quire_site::clean(&docs.output_dir, &docs.source_dir)? {
            output.success(&format!("Removed {}", docs.output_dir.display()));
        } else {
            output.info(&format!(
                "Nothing to clean: {} does not exist",
                docs.output_dir.display()
            ));
        }
        Ok(())
    }
}
