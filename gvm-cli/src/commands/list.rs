use super::warn_unused_operands;
use anyhow::Result;
use clap::Args;
use gvm_core::{EnvironmentStore, console, operations};

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(hide = true)]
    pub operands: Vec<String>,
}

pub fn run(args: ListArgs, store: &dyn EnvironmentStore) -> Result<()> {
    warn_unused_operands(&args.operands);

    let listing = operations::list(store)?;

    if listing.entries.is_empty() {
        console::info(&format!(
            "No Go versions found at {}",
            listing.install_root.display()
        ));
        return Ok(());
    }

    let active = listing.active.display().to_string();
    for entry in &listing.entries {
        let in_use = entry.in_use.then_some(active.as_str());
        console::installation(&entry.version, in_use);
    }

    Ok(())
}
