use super::warn_extra_operands;
use anyhow::Result;
use clap::Args;
use gvm_core::{EnvironmentStore, console, operations};

#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Installed Go version to remove
    pub version: Option<String>,

    #[arg(hide = true)]
    pub extra: Vec<String>,
}

pub fn run(args: UninstallArgs, store: &dyn EnvironmentStore) -> Result<()> {
    warn_extra_operands(&args.extra);

    let removed = operations::uninstall(store, args.version.as_deref())?;

    console::success(&format!(
        "Uninstalled Go version {}.",
        removed.installation.marker.display()
    ));
    if removed.was_active {
        console::note("This was your GOROOT, make sure to set a new GOROOT with gvm goroot <path>");
    }

    Ok(())
}
