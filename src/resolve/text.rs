//! Text templates: `{KEYWORD}` interpolation in the message text.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ExecutionContext, Markup, TriggerEvent};

use super::Result;
use super::link::{self, Link};

/// Brace-delimited tokens, matched non-greedily.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{.*?\}").unwrap());

/// Tokens recognized in message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TextKeyword {
    GithubActor,
    GithubJob,
    GithubRef,
}

impl TextKeyword {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "{GITHUB_ACTOR}" => Some(Self::GithubActor),
            "{GITHUB_JOB}" => Some(Self::GithubJob),
            "{GITHUB_REF}" => Some(Self::GithubRef),
            _ => None,
        }
    }

    /// The replacement text. `None` keeps the token as written.
    fn resolve(self, ctx: &ExecutionContext) -> Result<Option<String>> {
        match self {
            Self::GithubActor => actor(ctx).map(Some),
            Self::GithubJob => job(ctx).map(Some),
            Self::GithubRef => Ok(reference(ctx)),
        }
    }
}

/// Interpolate the keywords in a message text template.
///
/// Unknown tokens are left as they are. Each keyword is computed once and
/// replaces every occurrence; replacements are never scanned again.
pub fn resolve_text(template: &str, ctx: &ExecutionContext) -> Result<String> {
    let mut resolved: BTreeMap<TextKeyword, Option<String>> = BTreeMap::new();
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for token in TOKEN.find_iter(template) {
        let Some(keyword) = TextKeyword::from_token(token.as_str()) else {
            continue;
        };

        if !resolved.contains_key(&keyword) {
            resolved.insert(keyword, keyword.resolve(ctx)?);
        }
        let Some(replacement) = &resolved[&keyword] else {
            continue;
        };

        out.push_str(&template[last..token.start()]);
        out.push_str(replacement);
        last = token.end();
    }

    out.push_str(&template[last..]);
    Ok(out)
}

/// `<actor url|actor>`.
fn actor(ctx: &ExecutionContext) -> Result<String> {
    let url = link::actor_url(ctx)?;
    let name = ctx.actor().unwrap_or_default();
    Ok(Link::new(url, name).render(Markup::Mrkdwn))
}

/// `<run url|workflow / job>`.
fn job(ctx: &ExecutionContext) -> Result<String> {
    use super::ResolveError::MissingContext;

    let url = link::workflow_run_url(ctx)?;
    let workflow = ctx.workflow().ok_or(MissingContext("workflow"))?;
    let job = ctx.job().ok_or(MissingContext("job"))?;
    Ok(Link::new(url, format!("{workflow} / {job}")).render(Markup::Mrkdwn))
}

/// The repository link, followed by `#<pull request>` or `@<branch>` when known.
///
/// Never fails: without a repository to link, there is nothing to render.
fn reference(ctx: &ExecutionContext) -> Option<String> {
    let repo = Link::new(link::repo_url(ctx).ok()?, link::repo_slug(ctx).ok()?)
        .render(Markup::Mrkdwn);

    let suffix = match (ctx.trigger(), ctx.pull_request_number(), ctx.branch_name()) {
        (TriggerEvent::PullRequest, Some(number), _) => {
            let url = link::pull_request_url(ctx, number).ok()?;
            format!("#{}", Link::new(url, number.to_string()).render(Markup::Mrkdwn))
        }
        (TriggerEvent::Push, _, Some(branch)) => {
            let url = link::tree_url(ctx, branch).ok()?;
            format!("@{}", Link::new(url, branch).render(Markup::Mrkdwn))
        }
        _ => String::new(),
    };

    Some(format!("{repo}{suffix}"))
}
