use std::fmt;

use tracing::warn;

use crate::git::VcsGateway;

/// What the remote said about a local branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    Present,
    Absent,
    /// The remote could not be queried.
    Unknown,
}

impl RemoteStatus {
    /// Flag shown in the `list` table.
    pub fn display_flag(self) -> &'static str {
        match self {
            RemoteStatus::Present => "Y",
            RemoteStatus::Absent => "N",
            RemoteStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_flag())
    }
}

pub fn check_remote(gateway: &dyn VcsGateway, url: &str, branch: &str) -> RemoteStatus {
    match gateway.remote_has_branch(url, branch) {
        Ok(true) => RemoteStatus::Present,
        Ok(false) => RemoteStatus::Absent,
        Err(err) => {
            warn!(%branch, error = %err, "could not query remote for branch");
            RemoteStatus::Unknown
        }
    }
}
