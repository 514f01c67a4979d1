use std::io::Write;

use anyhow::{Context, Result};

use crate::git::VcsGateway;
use crate::status::{RemoteStatus, check_remote};

const NAME_HEADER: &str = "NAME";
const STATUS_HEADER: &str = "REMOTE EXISTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRow {
    pub name: String,
    pub status: RemoteStatus,
}

/// Check every local branch against the remote and print a table to `out`.
/// Read only.
pub fn list(gateway: &dyn VcsGateway, out: &mut dyn Write) -> Result<Vec<BranchRow>> {
    let url = gateway
        .remote_url()
        .context("Unable to resolve the remote URL")?;
    let branches = gateway
        .local_branches()
        .context("Failed to enumerate local branches")?;

    let rows: Vec<BranchRow> = branches
        .into_iter()
        .map(|name| {
            let status = check_remote(gateway, &url, &name);
            BranchRow { name, status }
        })
        .collect();

    render_table(&rows, out).context("Failed to write branch table")?;
    Ok(rows)
}

pub fn render_table(rows: &[BranchRow], out: &mut dyn Write) -> std::io::Result<()> {
    let name_width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .chain(std::iter::once(NAME_HEADER.len()))
        .max()
        .unwrap_or(NAME_HEADER.len());

    let status_width = STATUS_HEADER.len();

    writeln!(out, "{:<name_width$} | {}", NAME_HEADER, STATUS_HEADER)?;
    writeln!(out, "{:-<name_width$}-+-{:-<status_width$}", "", "")?;
    for row in rows {
        writeln!(out, "{:<name_width$} | {}", row.name, row.status.display_flag())?;
    }
    Ok(())
}
