//! GitHub URLs derived from the execution context, and their Slack rendering.

use crate::model::{ExecutionContext, Markup};

use super::{ResolveError, Result};

/// Length of an abbreviated commit SHA.
const SHORT_SHA_LEN: usize = 7;

/// A URL with a display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    url: String,
    label: String,
    code: bool,
}

impl Link {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
            code: false,
        }
    }

    /// A link whose label renders as inline code (commit SHAs).
    pub fn code(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: true,
            ..Self::new(url, label)
        }
    }

    pub fn render(&self, markup: Markup) -> String {
        match markup {
            Markup::Mrkdwn if self.code => format!("<{}|`{}`>", self.url, self.label),
            Markup::Mrkdwn => format!("<{}|{}>", self.url, self.label),
            Markup::PlainText => self.label.clone(),
        }
    }
}

/// `<server>/<owner>/<repo>`.
pub fn repo_url(ctx: &ExecutionContext) -> Result<String> {
    match (ctx.server_url(), ctx.repo_owner(), ctx.repo_name()) {
        (Some(server), Some(owner), Some(repo)) => Ok(format!("{server}/{owner}/{repo}")),
        _ => Err(ResolveError::MissingContext("repo")),
    }
}

/// `owner/repo`, for link labels.
pub fn repo_slug(ctx: &ExecutionContext) -> Result<String> {
    match (ctx.repo_owner(), ctx.repo_name()) {
        (Some(owner), Some(repo)) => Ok(format!("{owner}/{repo}")),
        _ => Err(ResolveError::MissingContext("repo")),
    }
}

/// The first seven characters of the commit SHA.
pub fn short_sha(ctx: &ExecutionContext) -> Result<&str> {
    let sha = ctx.sha().ok_or(ResolveError::MissingContext("commit SHA"))?;
    Ok(sha.get(..SHORT_SHA_LEN).unwrap_or(sha))
}

/// `<repo>/commit/<short sha>`.
pub fn commit_url(ctx: &ExecutionContext) -> Result<String> {
    Ok(format!("{}/commit/{}", repo_url(ctx)?, short_sha(ctx)?))
}

/// `<repo>/pull/<number>`.
pub fn pull_request_url(ctx: &ExecutionContext, number: u64) -> Result<String> {
    Ok(format!("{}/pull/{number}", repo_url(ctx)?))
}

/// `<repo>/tree/<branch>`.
pub fn tree_url(ctx: &ExecutionContext, branch: &str) -> Result<String> {
    Ok(format!("{}/tree/{branch}", repo_url(ctx)?))
}

/// `<server>/<actor>`.
pub fn actor_url(ctx: &ExecutionContext) -> Result<String> {
    match (ctx.server_url(), ctx.actor()) {
        (Some(server), Some(actor)) => Ok(format!("{server}/{actor}")),
        _ => Err(ResolveError::MissingContext("actor or server URL")),
    }
}

/// `<repo>/actions/runs/<run id>`.
pub fn workflow_run_url(ctx: &ExecutionContext) -> Result<String> {
    let run_id = ctx.run_id.ok_or(ResolveError::MissingContext("run ID"))?;
    Ok(format!("{}/actions/runs/{run_id}", repo_url(ctx)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::resolve::fixtures::push_context;

    #[test]
    fn renders_links() {
        let link = Link::new("https://example.com/pr/123", "#123");
        assert_eq!(link.render(Markup::Mrkdwn), "<https://example.com/pr/123|#123>");
        assert_eq!(link.render(Markup::PlainText), "#123");

        let code = Link::code("https://example.com/commit/abc1234", "abc1234 (main)");
        assert_eq!(
            code.render(Markup::Mrkdwn),
            "<https://example.com/commit/abc1234|`abc1234 (main)`>"
        );
        assert_eq!(code.render(Markup::PlainText), "abc1234 (main)");
    }

    #[test]
    fn builds_urls() {
        let ctx = push_context();
        assert_eq!(repo_url(&ctx).unwrap(), "https://github.com/user/repository");
        assert_eq!(short_sha(&ctx).unwrap(), "0bf2c9e");
        assert_eq!(
            commit_url(&ctx).unwrap(),
            "https://github.com/user/repository/commit/0bf2c9e"
        );
        assert_eq!(
            pull_request_url(&ctx, 5).unwrap(),
            "https://github.com/user/repository/pull/5"
        );
        assert_eq!(
            tree_url(&ctx, "develop").unwrap(),
            "https://github.com/user/repository/tree/develop"
        );
        assert_eq!(actor_url(&ctx).unwrap(), "https://github.com/octocat");
        assert_eq!(
            workflow_run_url(&ctx).unwrap(),
            "https://github.com/user/repository/actions/runs/1234567890"
        );
    }

    #[test]
    fn short_sha_keeps_short_values() {
        let ctx = ExecutionContext {
            sha: Some("abc12".to_string()),
            ..ExecutionContext::default()
        };
        assert_eq!(short_sha(&ctx).unwrap(), "abc12");
    }

    #[test]
    fn missing_values_are_named() {
        let mut ctx = push_context();
        ctx.repo_owner = None;
        assert_eq!(repo_url(&ctx), Err(ResolveError::MissingContext("repo")));

        let mut ctx = push_context();
        ctx.sha = Some(String::new());
        assert_eq!(
            commit_url(&ctx),
            Err(ResolveError::MissingContext("commit SHA"))
        );

        let mut ctx = push_context();
        ctx.server_url = None;
        assert_eq!(
            actor_url(&ctx),
            Err(ResolveError::MissingContext("actor or server URL"))
        );

        let mut ctx = push_context();
        ctx.run_id = None;
        assert_eq!(
            workflow_run_url(&ctx),
            Err(ResolveError::MissingContext("run ID"))
        );
    }

    #[test]
    fn error_message_names_context() {
        assert_eq!(
            ResolveError::MissingContext("repo").to_string(),
            "GitHub repo context is undefined"
        );
    }
}
