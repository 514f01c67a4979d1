use std::cell::Cell;
use std::path::Path;

use anyhow::{Context, Result};
use git2::{BranchType, Cred, Direction, Remote, RemoteCallbacks, Repository};
use tracing::warn;

use crate::git::{GitError, VcsGateway, anchor_local_url, checked_url, head_ref};

/// Gateway backed by libgit2 instead of the `git` executable.
pub struct NativeGateway {
    repo: Repository,
    remote: String,
}

impl NativeGateway {
    pub fn new(repo: Repository, remote: impl Into<String>) -> Self {
        Self {
            repo,
            remote: remote.into(),
        }
    }

    pub fn open(path: Option<&Path>, remote: impl Into<String>) -> Result<Self> {
        let start = path.unwrap_or(Path::new("."));
        let repo = Repository::discover(start).with_context(|| {
            format!("libgit2 backend found no repository at or above {}", start.display())
        })?;
        Ok(Self::new(repo, remote))
    }

    /// Directory that relative remote paths are resolved against.
    fn base_dir(&self) -> &Path {
        self.repo.workdir().unwrap_or_else(|| self.repo.path())
    }
}

impl VcsGateway for NativeGateway {
    fn remote_url(&self) -> Result<String, GitError> {
        let remote = self.repo.find_remote(&self.remote)?;
        checked_url(&self.remote, remote.url().unwrap_or_default())
    }

    fn local_branches(&self) -> Result<Vec<String>, GitError> {
        let mut names = Vec::new();
        for branch_result in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch_result?;
            match branch.name() {
                Ok(Some(name)) => names.push(name.to_string()),
                Ok(None) => continue,
                Err(err) => {
                    warn!("Skipping branch with invalid UTF-8 name: {err}");
                    continue;
                }
            }
        }
        Ok(names)
    }

    fn remote_has_branch(&self, url: &str, branch: &str) -> Result<bool, GitError> {
        let url = anchor_local_url(&checked_url(&self.remote, url)?, self.base_dir());
        let refname = head_ref(branch);
        let mut remote = Remote::create_detached(url)?;

        // libgit2 keeps asking for credentials as long as the callback
        // succeeds, so the agent only gets one try.
        let asked = Cell::new(false);
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(|_url, username, _allowed| {
            if asked.replace(true) {
                return Err(git2::Error::from_str("ssh agent authentication failed"));
            }
            Cred::ssh_key_from_agent(username.unwrap_or("git"))
        });

        let connection = remote.connect_auth(Direction::Fetch, Some(callbacks), None)?;
        let found = connection
            .list()?
            .iter()
            .any(|head| head.name() == refname);
        Ok(found)
    }

    fn delete_local_branch(&self, branch: &str) -> Result<(), GitError> {
        let mut local_branch = self.repo.find_branch(branch, BranchType::Local)?;
        local_branch.delete()?;
        Ok(())
    }
}
