//! Execution context: what the CI run knows about itself.

use serde::Serialize;

/// Prefix stripped from `ref` to get a branch name.
const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// A read-only snapshot of the workflow run that triggered the notification.
///
/// Every value is optional. Resolvers decide per keyword whether a missing
/// value is an error or simply leaves something out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContext {
    /// Name of the webhook event, e.g. `push` or `pull_request`.
    pub event_name: Option<String>,

    /// Issue or pull request number from the event payload.
    pub issue_number: Option<u64>,

    pub repo_owner: Option<String>,
    pub repo_name: Option<String>,

    /// Base URL of the GitHub server, e.g. `https://github.com`.
    pub server_url: Option<String>,

    /// Fully-formed ref, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,

    /// Full commit SHA.
    pub sha: Option<String>,

    pub actor: Option<String>,
    pub workflow: Option<String>,
    pub job: Option<String>,
    pub run_id: Option<u64>,
}

/// The event kinds that change how references are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Push,
    PullRequest,
    Other,
}

impl ExecutionContext {
    /// The trigger event, with anything unrecognized (or absent) as `Other`.
    pub fn trigger(&self) -> TriggerEvent {
        match present(self.event_name.as_ref()) {
            Some("push") => TriggerEvent::Push,
            Some("pull_request") => TriggerEvent::PullRequest,
            _ => TriggerEvent::Other,
        }
    }

    /// The pull request number, only for `pull_request` events with a positive number.
    pub fn pull_request_number(&self) -> Option<u64> {
        if self.trigger() != TriggerEvent::PullRequest {
            return None;
        }
        self.issue_number.filter(|&n| n > 0)
    }

    /// The branch name: `ref` with `refs/heads/` stripped.
    ///
    /// `None` when the ref is absent or does not point at a branch.
    pub fn branch_name(&self) -> Option<&str> {
        present(self.git_ref.as_ref())?
            .strip_prefix(BRANCH_REF_PREFIX)
            .filter(|b| !b.is_empty())
    }

    pub fn repo_owner(&self) -> Option<&str> {
        present(self.repo_owner.as_ref())
    }

    pub fn repo_name(&self) -> Option<&str> {
        present(self.repo_name.as_ref())
    }

    /// The server URL without a trailing slash.
    pub fn server_url(&self) -> Option<&str> {
        present(self.server_url.as_ref()).map(|u| u.trim_end_matches('/'))
    }

    pub fn sha(&self) -> Option<&str> {
        present(self.sha.as_ref())
    }

    pub fn actor(&self) -> Option<&str> {
        present(self.actor.as_ref())
    }

    pub fn workflow(&self) -> Option<&str> {
        present(self.workflow.as_ref())
    }

    pub fn job(&self) -> Option<&str> {
        present(self.job.as_ref())
    }
}

/// The single "is present" predicate: blank strings count as absent.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}
