use std::cell::RefCell;
use std::collections::HashSet;

use crate::git::{GitError, VcsGateway};

/// In-memory gateway that records which operations were invoked.
pub struct FakeGateway {
    url: Option<String>,
    local: Vec<String>,
    remote: HashSet<String>,
    failing_checks: HashSet<String>,
    failing_deletes: HashSet<String>,
    pub calls: RefCell<Vec<String>>,
    pub deleted: RefCell<Vec<String>>,
}

impl FakeGateway {
    pub fn new(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            local: Vec::new(),
            remote: HashSet::new(),
            failing_checks: HashSet::new(),
            failing_deletes: HashSet::new(),
            calls: RefCell::new(Vec::new()),
            deleted: RefCell::new(Vec::new()),
        }
    }

    pub fn without_remote() -> Self {
        Self {
            url: None,
            ..Self::new("")
        }
    }

    pub fn local(mut self, branches: &[&str]) -> Self {
        self.local = branches.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn remote(mut self, branches: &[&str]) -> Self {
        self.remote = branches.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn failing_check(mut self, branch: &str) -> Self {
        self.failing_checks.insert(branch.to_string());
        self
    }

    pub fn failing_delete(mut self, branch: &str) -> Self {
        self.failing_deletes.insert(branch.to_string());
        self
    }

    pub fn called(&self, op: &str) -> bool {
        self.calls.borrow().iter().any(|call| call.starts_with(op))
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn failure(op: &str, stderr: &str) -> GitError {
        GitError::CommandFailed {
            command: format!("git {op}"),
            status: exit_status(128),
            stderr: stderr.to_string(),
        }
    }
}

impl VcsGateway for FakeGateway {
    fn remote_url(&self) -> Result<String, GitError> {
        self.record("remote_url".to_string());
        self.url.clone().ok_or_else(|| GitError::NoRemoteUrl {
            remote: "origin".to_string(),
        })
    }

    fn local_branches(&self) -> Result<Vec<String>, GitError> {
        self.record("local_branches".to_string());
        Ok(self.local.clone())
    }

    fn remote_has_branch(&self, _url: &str, branch: &str) -> Result<bool, GitError> {
        self.record(format!("remote_has_branch {branch}"));
        if self.failing_checks.contains(branch) {
            return Err(Self::failure("ls-remote", "Could not read from remote repository."));
        }
        Ok(self.remote.contains(branch))
    }

    fn delete_local_branch(&self, branch: &str) -> Result<(), GitError> {
        self.record(format!("delete_local_branch {branch}"));
        if self.failing_deletes.contains(branch) {
            return Err(Self::failure("branch -D", "cannot delete branch checked out"));
        }
        self.deleted.borrow_mut().push(branch.to_string());
        Ok(())
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code as u32)
}
