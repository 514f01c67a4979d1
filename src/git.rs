use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::branches::parse_branches;

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("remote '{remote}' has no URL configured")]
    NoRemoteUrl { remote: String },

    #[error("remote '{remote}' has URL '{url}' which would be read as an option")]
    OptionLikeUrl { remote: String, url: String },

    #[error(transparent)]
    Libgit2(#[from] git2::Error),
}

/// Everything the actions need from version control.
pub trait VcsGateway {
    /// URL of the configured remote.
    fn remote_url(&self) -> Result<String, GitError>;

    /// Local branch names in the order Git reports them.
    fn local_branches(&self) -> Result<Vec<String>, GitError>;

    /// Whether `url` advertises `refs/heads/<branch>`. Errors mean the remote
    /// could not be asked, not that the branch is missing.
    fn remote_has_branch(&self, url: &str, branch: &str) -> Result<bool, GitError>;

    /// Force delete a local branch.
    fn delete_local_branch(&self, branch: &str) -> Result<(), GitError>;
}

/// Talks to the `git` executable found on PATH.
#[derive(Debug, Clone)]
pub struct CommandGateway {
    workdir: Option<PathBuf>,
    remote: String,
}

impl CommandGateway {
    pub fn new(workdir: Option<&Path>, remote: impl Into<String>) -> Self {
        Self {
            workdir: workdir.map(Path::to_path_buf),
            remote: remote.into(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<String, GitError> {
        let command = format!("git {}", args.join(" "));
        debug!(%command, "running git");

        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|source| GitError::Spawn {
            command: command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VcsGateway for CommandGateway {
    fn remote_url(&self) -> Result<String, GitError> {
        let key = format!("remote.{}.url", self.remote);
        let url = self.git(&["config", "--get", &key])?;
        checked_url(&self.remote, &url)
    }

    fn local_branches(&self) -> Result<Vec<String>, GitError> {
        let raw = self.git(&["branch", "--no-color"])?;
        Ok(parse_branches(&raw))
    }

    fn remote_has_branch(&self, url: &str, branch: &str) -> Result<bool, GitError> {
        let url = checked_url(&self.remote, url)?;
        let refname = head_ref(branch);
        let advertised = self.git(&["ls-remote", "--heads", &url, &refname])?;
        Ok(advertises(&advertised, &refname))
    }

    fn delete_local_branch(&self, branch: &str) -> Result<(), GitError> {
        self.git(&["branch", "-D", branch]).map(|_| ())
    }
}

/// Trim a configured URL and refuse ones that are empty or start with `-`,
/// since `git` would parse the latter as an option.
pub(crate) fn checked_url(remote: &str, url: &str) -> Result<String, GitError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(GitError::NoRemoteUrl {
            remote: remote.to_string(),
        });
    }
    if url.starts_with('-') {
        return Err(GitError::OptionLikeUrl {
            remote: remote.to_string(),
            url: url.to_string(),
        });
    }
    Ok(url.to_string())
}

/// `git` resolves a relative path URL against the directory it runs in;
/// libgit2 would use the process directory instead. Anchor such URLs on `base`.
/// Scheme URLs (`ssh://`, `file://`) and scp-like `host:path` are left alone.
pub(crate) fn anchor_local_url(url: &str, base: &Path) -> String {
    if url.contains("://") {
        return url.to_string();
    }
    if let Some(colon) = url.find(':') {
        let scp_like = !url[..colon].contains('/');
        if scp_like {
            return url.to_string();
        }
    }
    let path = Path::new(url);
    if path.is_relative() {
        base.join(path).to_string_lossy().into_owned()
    } else {
        url.to_string()
    }
}

pub(crate) fn head_ref(branch: &str) -> String {
    format!("refs/heads/{branch}")
}

/// `ls-remote` patterns match on trailing path components, so
/// `refs/heads/x/main` also answers a query for `main`. Only an exact ref counts.
fn advertises(ls_remote_output: &str, refname: &str) -> bool {
    ls_remote_output
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .any(|advertised| advertised == refname)
}
