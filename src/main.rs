use std::io;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_purge::cli::{Backend, Cli, Command, exit_code};
use git_purge::git::{CommandGateway, VcsGateway};
use git_purge::list::list;
use git_purge::native::NativeGateway;
use git_purge::purge::{PurgeOptions, purge};

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            process::exit(exit_code(&err));
        }
    };
    init_tracing();
    run(cli)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("git_purge=warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let gateway: Box<dyn VcsGateway> = match cli.backend {
        Backend::Git => Box::new(CommandGateway::new(cli.repo.as_deref(), cli.remote)),
        Backend::Libgit2 => Box::new(NativeGateway::open(cli.repo.as_deref(), cli.remote)?),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List => {
            list(gateway.as_ref(), &mut out)?;
        }
        Command::Purge { dry_run } => {
            let options = PurgeOptions {
                verbose: cli.verbose,
                dry_run,
            };
            purge(gateway.as_ref(), &options, &mut out)?;
        }
    }

    Ok(())
}
