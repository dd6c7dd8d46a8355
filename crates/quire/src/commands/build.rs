//! `quire build` command implementation.

use clap::Args;
use quire_config::CliSettings;
use quire_site::Pipeline;

use super::{SiteArgs, pipeline_options};
use crate::error::CliError;
use crate::output::{BuildSummary, Output};

/// Arguments for the build command.
#[derive(Args, Debug)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    site: SiteArgs,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load(CliSettings::default())?;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!(
            "Output: {}",
            config.docs_resolved.output_dir.display()
        ));

        let report = Pipeline::new(pipeline_options(&config)).run()?;
        output.build_summary(&BuildSummary::from_report(&report));
        Ok(())
    }
}
