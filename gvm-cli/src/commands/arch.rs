use super::warn_unused_operands;
use anyhow::Result;
use clap::Args;
use gvm_core::GvmConfig;

#[derive(Args, Debug)]
pub struct ArchArgs {
    #[arg(hide = true)]
    pub operands: Vec<String>,
}

pub fn run(args: ArchArgs, config: &GvmConfig) -> Result<()> {
    warn_unused_operands(&args.operands);
    println!("System Architecture: {}", config.arch);
    Ok(())
}
