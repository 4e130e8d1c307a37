use super::warn_extra_operands;
use anyhow::Result;
use clap::Args;
use gvm_core::{EnvironmentStore, GvmConfig, console, operations};

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Go version to install, e.g. 1.21.3
    pub version: Option<String>,

    #[arg(hide = true)]
    pub extra: Vec<String>,
}

pub fn run(args: InstallArgs, config: &GvmConfig, store: &dyn EnvironmentStore) -> Result<()> {
    warn_extra_operands(&args.extra);
    console::header("install", env!("CARGO_PKG_VERSION"));

    let target = operations::install(config, store, args.version.as_deref())?;
    let version = args.version.as_deref().unwrap_or_default().trim();

    console::success(&format!(
        "Successfully installed Go version {} to {}.",
        version,
        target.display()
    ));
    console::info(&format!(
        "To use this version, run gvm use {}. This will also set your GOROOT.",
        version
    ));

    Ok(())
}
