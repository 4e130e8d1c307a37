use super::warn_unused_operands;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct VersionArgs {
    #[arg(hide = true)]
    pub operands: Vec<String>,
}

pub fn run(args: VersionArgs) -> Result<()> {
    warn_unused_operands(&args.operands);
    println!("{}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
