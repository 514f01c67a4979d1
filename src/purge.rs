use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::git::VcsGateway;
use crate::status::{RemoteStatus, check_remote};

#[derive(Debug, Clone, Copy, Default)]
pub struct PurgeOptions {
    /// Print one decision line per branch.
    pub verbose: bool,
    /// Decide as usual but leave every branch in place.
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct PurgeOutcome {
    pub name: String,
    pub remote: RemoteStatus,
    pub status: PurgeStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeStatus {
    Deleted,
    DryRun,
    Kept,
    Failed(String),
}

/// Only a confirmed absence leads to deletion. A branch whose remote could
/// not be queried is kept, unlike `list` which shows it as unknown.
pub fn should_delete(status: RemoteStatus) -> bool {
    match status {
        RemoteStatus::Absent => true,
        RemoteStatus::Present | RemoteStatus::Unknown => false,
    }
}

/// Force delete every local branch the remote no longer has.
///
/// Delete failures are recorded in the returned outcomes and otherwise
/// ignored; the remaining branches are still processed.
pub fn purge(
    gateway: &dyn VcsGateway,
    options: &PurgeOptions,
    out: &mut dyn Write,
) -> Result<Vec<PurgeOutcome>> {
    let url = gateway
        .remote_url()
        .context("Unable to resolve the remote URL")?;
    let branches = gateway
        .local_branches()
        .context("Failed to enumerate local branches")?;

    let mut outcomes = Vec::with_capacity(branches.len());

    for name in branches {
        let remote = check_remote(gateway, &url, &name);

        let status = if !should_delete(remote) {
            PurgeStatus::Kept
        } else if options.dry_run {
            PurgeStatus::DryRun
        } else {
            match gateway.delete_local_branch(&name) {
                Ok(()) => {
                    info!(branch = %name, "deleted local branch");
                    PurgeStatus::Deleted
                }
                Err(err) => {
                    debug!(branch = %name, error = %err, "failed to delete branch");
                    PurgeStatus::Failed(err.to_string())
                }
            }
        };

        if options.verbose {
            let action = match &status {
                PurgeStatus::Deleted => "deleting",
                PurgeStatus::DryRun => "would delete",
                PurgeStatus::Kept => "not deleting",
                PurgeStatus::Failed(_) => "deleting (failed)",
            };
            writeln!(out, "{name}: remote {remote}, {action}")
                .context("Failed to write purge output")?;
        }

        outcomes.push(PurgeOutcome {
            name,
            remote,
            status,
        });
    }

    Ok(outcomes)
}
