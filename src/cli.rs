use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum, ValueHint};

#[derive(Debug, Parser)]
#[command(
    name = "git-purge",
    about = "Tool to help clean up local branches whose remote counterpart is gone",
    version,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to the Git repository (defaults to current directory).
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub repo: Option<PathBuf>,

    /// Remote to compare local branches against.
    #[arg(short, long, global = true, default_value = "origin")]
    pub remote: String,

    /// How to talk to Git.
    #[arg(long, global = true, value_enum, default_value_t = Backend::Git)]
    pub backend: Backend,

    /// Print per-branch decisions.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all local branches and whether they still exist on the remote.
    List,

    /// Delete local branches that have no branch of the same name on the remote.
    Purge {
        /// Show what would be deleted without deleting.
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Shell out to the `git` executable on PATH.
    Git,
    /// Use the bundled libgit2 bindings.
    Libgit2,
}

/// Exit code for a parse failure. Running without a subcommand prints help
/// and exits 1 like any other failed run, not with clap's usage code.
pub fn exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 1,
        _ => err.exit_code(),
    }
}
