use super::{path_suffix, warn_extra_operands};
use anyhow::Result;
use clap::Args;
use gvm_core::{EnvironmentStore, console, operations};

#[derive(Args, Debug)]
pub struct UseArgs {
    /// Installed Go version to switch to
    pub version: Option<String>,

    #[arg(hide = true)]
    pub extra: Vec<String>,
}

pub fn run(args: UseArgs, store: &dyn EnvironmentStore) -> Result<()> {
    warn_extra_operands(&args.extra);

    let (installation, report) = operations::use_version(store, args.version.as_deref())?;

    console::success(&format!(
        "Now using Go version {}. Set GOROOT to {}.{}",
        installation.marker.display(),
        report.active.display(),
        path_suffix(&report)
    ));
    console::note("You'll have to start another prompt to see the changes.");

    Ok(())
}
