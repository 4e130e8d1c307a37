use clap::{CommandFactory, Parser};
use clap::error::ErrorKind;
use gvm_core::{GvmConfig, GvmError, console, env};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Command};

fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(error) => match error.kind() {
            ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument => {
                return print_help();
            }
            _ => error.exit(),
        },
    };

    if let Err(error) = init_tracing(args.verbose) {
        eprintln!("gvm: {}", error);
    }

    let config = GvmConfig::from_env();

    match run(args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            console::error(&error.to_string());
            ExitCode::from(exit_code(&error))
        }
    }
}

fn run(args: Cli, config: &GvmConfig) -> anyhow::Result<()> {
    let Some(command) = args.command else {
        print_help();
        return Ok(());
    };

    tracing::debug!(
        "data dir {}, {:?} environment backend",
        config.data_dir.display(),
        config.env_backend
    );
    let store = env::open_store(config);

    match command {
        Command::Arch(args) => commands::arch::run(args, config),
        Command::Install(args) => commands::install::run(args, config, store.as_ref()),
        Command::Goroot(args) => commands::goroot::run(args, store.as_ref()),
        Command::List(args) => commands::list::run(args, store.as_ref()),
        Command::Use(args) => commands::use_version::run(args, store.as_ref()),
        Command::Uninstall(args) => commands::uninstall::run(args, store.as_ref()),
        Command::Version(args) => commands::version::run(args),
    }
}

fn print_help() -> ExitCode {
    match Cli::command().print_help() {
        Ok(()) => {
            println!();
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("gvm: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .downcast_ref::<GvmError>()
        .map(GvmError::exit_code)
        .unwrap_or(gvm_core::error::EXIT_FAILURE)
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!(error))
}
