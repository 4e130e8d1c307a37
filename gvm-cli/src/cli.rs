use crate::commands;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "gvm",
    about = "Go version manager",
    before_help = concat!("Running version ", env!("CARGO_PKG_VERSION"), "."),
    disable_version_flag = true,
    disable_help_subcommand = true,
    color = clap::ColorChoice::Auto
)]
pub struct Cli {
    /// Print debug logs to stderr
    #[arg(long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show architecture of OS
    Arch(commands::arch::ArchArgs),
    /// Download a version of Go next to the current GOROOT
    Install(commands::install::InstallArgs),
    /// Set GOROOT and PATH; without a path, show the current GOROOT
    Goroot(commands::goroot::GorootArgs),
    /// List the Go installations at or adjacent to GOROOT
    #[command(alias = "ls")]
    List(commands::list::ListArgs),
    /// Switch to the specified version, setting GOROOT and PATH
    Use(commands::use_version::UseArgs),
    /// Uninstall the specified version of Go
    Uninstall(commands::uninstall::UninstallArgs),
    /// Display the running version of gvm
    #[command(alias = "v")]
    Version(commands::version::VersionArgs),
}
