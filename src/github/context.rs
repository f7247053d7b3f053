//! Execution context from the runner's `GITHUB_*` environment variables.

use std::path::Path;
use std::{env, fs};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::ExecutionContext;

/// Server URL when the runner does not set `GITHUB_SERVER_URL`.
const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Snapshot the execution context from the process environment.
pub fn from_env() -> ExecutionContext {
    load(|name| env::var(name).ok())
}

/// Build the execution context from a variable lookup.
///
/// Blank variables count as unset. The issue number comes from the webhook
/// payload at `GITHUB_EVENT_PATH`.
pub fn load(lookup: impl Fn(&str) -> Option<String>) -> ExecutionContext {
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let (repo_owner, repo_name) = match var("GITHUB_REPOSITORY")
        .as_deref()
        .and_then(|r| r.split_once('/'))
    {
        Some((owner, repo)) => (Some(owner.to_string()), Some(repo.to_string())),
        None => (None, None),
    };

    let ctx = ExecutionContext {
        event_name: var("GITHUB_EVENT_NAME"),
        issue_number: var("GITHUB_EVENT_PATH").and_then(|p| read_issue_number(Path::new(&p))),
        repo_owner,
        repo_name,
        server_url: var("GITHUB_SERVER_URL").or_else(|| Some(DEFAULT_SERVER_URL.to_string())),
        git_ref: var("GITHUB_REF"),
        sha: var("GITHUB_SHA"),
        actor: var("GITHUB_ACTOR"),
        workflow: var("GITHUB_WORKFLOW"),
        job: var("GITHUB_JOB"),
        run_id: var("GITHUB_RUN_ID").and_then(|id| id.trim().parse().ok()),
    };

    debug!(?ctx, "Loaded execution context");
    ctx
}

/// The parts of a webhook payload that carry an issue or pull request number.
#[derive(Deserialize)]
struct EventPayload {
    issue: Option<Numbered>,
    pull_request: Option<Numbered>,
    number: Option<u64>,
}

#[derive(Deserialize)]
struct Numbered {
    number: u64,
}

fn read_issue_number(path: &Path) -> Option<u64> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("failed to read event payload {}: {e}", path.display());
            return None;
        }
    };

    let payload: EventPayload = match serde_json::from_str(&contents) {
        Ok(p) => p,
        Err(e) => {
            warn!("invalid event payload {}: {e}", path.display());
            return None;
        }
    };

    payload
        .issue
        .or(payload.pull_request)
        .map(|n| n.number)
        .or(payload.number)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use tempfile::TempDir;

    fn load_from(vars: &[(&str, &str)]) -> ExecutionContext {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        load(|name| vars.get(name).cloned())
    }

    #[test]
    fn reads_runner_variables() {
        let ctx = load_from(&[
            ("GITHUB_EVENT_NAME", "push"),
            ("GITHUB_REPOSITORY", "user/repository"),
            ("GITHUB_SERVER_URL", "https://github.example.com"),
            ("GITHUB_REF", "refs/heads/develop"),
            ("GITHUB_SHA", "0bf2c9eb66d0a76fcd90b93e66074876ebc4405a"),
            ("GITHUB_ACTOR", "octocat"),
            ("GITHUB_WORKFLOW", "CI"),
            ("GITHUB_JOB", "build"),
            ("GITHUB_RUN_ID", "42"),
        ]);

        assert_eq!(ctx.event_name.as_deref(), Some("push"));
        assert_eq!(ctx.repo_owner(), Some("user"));
        assert_eq!(ctx.repo_name(), Some("repository"));
        assert_eq!(ctx.server_url(), Some("https://github.example.com"));
        assert_eq!(ctx.branch_name(), Some("develop"));
        assert_eq!(ctx.actor(), Some("octocat"));
        assert_eq!(ctx.workflow(), Some("CI"));
        assert_eq!(ctx.job(), Some("build"));
        assert_eq!(ctx.run_id, Some(42));
        assert_eq!(ctx.issue_number, None);
    }

    #[test]
    fn defaults_and_blanks() {
        let ctx = load_from(&[
            ("GITHUB_ACTOR", ""),
            ("GITHUB_REPOSITORY", "no-slash"),
            ("GITHUB_RUN_ID", "not-a-number"),
        ]);

        assert_eq!(ctx.server_url(), Some("https://github.com"));
        assert_eq!(ctx.actor, None);
        assert_eq!(ctx.repo_owner, None);
        assert_eq!(ctx.repo_name, None);
        assert_eq!(ctx.run_id, None);
    }

    #[test]
    fn pull_request_number_from_payload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.json");
        fs::write(&path, r#"{"number": 7, "pull_request": {"number": 7, "title": "Fix"}}"#)
            .unwrap();

        let ctx = load_from(&[
            ("GITHUB_EVENT_NAME", "pull_request"),
            ("GITHUB_EVENT_PATH", path.to_str().unwrap()),
        ]);
        assert_eq!(ctx.pull_request_number(), Some(7));
    }

    #[test]
    fn issue_number_from_payload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.json");
        fs::write(&path, r#"{"action": "opened", "issue": {"number": 12}}"#).unwrap();

        let ctx = load_from(&[("GITHUB_EVENT_PATH", path.to_str().unwrap())]);
        assert_eq!(ctx.issue_number, Some(12));
    }

    #[test]
    fn unreadable_payload_has_no_number() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, "not json").unwrap();

        for path in [missing, invalid] {
            let ctx = load_from(&[("GITHUB_EVENT_PATH", path.to_str().unwrap())]);
            assert_eq!(ctx.issue_number, None);
        }
    }
}
