use super::{path_suffix, warn_extra_operands};
use anyhow::Result;
use clap::Args;
use gvm_core::{EnvironmentStore, console, operations};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct GorootArgs {
    /// Directory of the Go installation to use
    pub path: Option<PathBuf>,

    #[arg(hide = true)]
    pub extra: Vec<String>,
}

pub fn run(args: GorootArgs, store: &dyn EnvironmentStore) -> Result<()> {
    warn_extra_operands(&args.extra);

    let Some(path) = args.path else {
        let status = operations::query_goroot(store)?;
        match (status.active, status.install_root) {
            (None, _) => console::info("No GOROOT set."),
            (Some(active), install_root) => {
                console::info(&format!("GOROOT: {}", active.display()));
                if let Some(install_root) = install_root {
                    console::info(&format!(
                        "Other Go versions installed at: {}",
                        install_root.display()
                    ));
                }
            }
        }
        return Ok(());
    };

    if !path.is_dir() {
        console::warn(&format!("{} is not an existing directory", path.display()));
    }

    let report = operations::set_goroot(store, &path)?;

    console::success(&format!(
        "Set the GOROOT to {}.{}",
        report.active.display(),
        path_suffix(&report)
    ));
    console::note("You'll have to start another prompt to see the changes.");

    Ok(())
}
