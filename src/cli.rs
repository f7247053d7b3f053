//! CLI interface for Herald.
//!
//! Built to run as a GitHub Actions step: every option falls back to the
//! `INPUT_*` variable the runner sets for the matching action input, and
//! Slack credentials come from `SLACK_*` variables.
//!
//! - `herald send`: post the message, or update it when a timestamp is given.
//! - `herald render`: print the resolved message as JSON without sending it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::github::{self, commands};
use crate::input::{Inputs, RawInputs};
use crate::message::{Message, Rendered};
use crate::model::ExecutionContext;
use crate::send::{self, Delivery};
use crate::slack::{DEFAULT_API_URL, SlackClient};

/// Name of the step output carrying the message timestamp.
const TIMESTAMP_OUTPUT: &str = "slack-timestamp";

/// Herald: Slack notifications for GitHub Actions jobs.
#[derive(Debug, Parser)]
#[command(name = "herald", version, after_long_help = KEYWORDS_HELP)]
pub struct Cli {
    /// TOML config file with channel and message defaults.
    #[arg(long, global = true, env = "HERALD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const KEYWORDS_HELP: &str = r"Keywords in --text:
  {GITHUB_ACTOR}  link to the user who triggered the run
  {GITHUB_JOB}    link to the workflow run, labelled <workflow> / <job>
  {GITHUB_REF}    link to the repository, plus the pull request or branch

Keywords in --fields (one per line, or `Name: Value`):
  {STATUS}        the job status
  {REF}           the pull request, or the commit (and branch on push)";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Post the message to Slack, or update it when `--timestamp` is set.
    ///
    /// The message timestamp is written to the `slack-timestamp` step output.
    Send {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        slack: SlackArgs,
    },

    /// Resolve the message and print it as JSON.
    ///
    /// Nothing is sent; no Slack credentials are needed.
    Render {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

/// Action inputs. Empty values mean "not set".
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Job status: in-progress, success, failure, cancelled or skipped.
    #[arg(long, env = "INPUT_STATUS", default_value = "")]
    status: String,

    /// Attachment color as `#rrggbb`, overriding the status color.
    #[arg(long, env = "INPUT_COLOR", default_value = "")]
    color: String,

    /// Message text template.
    #[arg(long, env = "INPUT_TEXT", default_value = "")]
    text: String,

    /// Field lines, newline separated.
    #[arg(long, env = "INPUT_FIELDS", default_value = "")]
    fields: String,

    /// How fields render: mrkdwn or `plain_text`.
    #[arg(long, env = "INPUT_FIELD-TYPE", default_value = "")]
    field_type: String,

    /// Timestamp of a message to update instead of posting a new one.
    #[arg(long, env = "INPUT_TIMESTAMP", default_value = "")]
    timestamp: String,

    /// Report failures without failing the step.
    #[arg(long, env = "INPUT_IGNORE-FAILURES", default_value = "false")]
    ignore_failures: String,

    /// Post a new message when the one being updated no longer exists.
    #[arg(long, env = "INPUT_IGNORE-MESSAGE-NOT-FOUND", default_value = "false")]
    ignore_message_not_found: String,
}

impl InputArgs {
    fn parse(&self) -> Result<Inputs, String> {
        RawInputs {
            status: self.status.clone(),
            color: self.color.clone(),
            text: self.text.clone(),
            fields: self.fields.clone(),
            field_type: self.field_type.clone(),
            timestamp: self.timestamp.clone(),
            ignore_failures: self.ignore_failures.clone(),
            ignore_message_not_found: self.ignore_message_not_found.clone(),
        }
        .parse()
        .map_err(|e| e.to_string())
    }
}

/// Slack connection settings.
#[derive(Debug, Args)]
pub struct SlackArgs {
    /// Channel name (with or without `#`) or ID.
    #[arg(long, env = "SLACK_CHANNEL")]
    channel: Option<String>,

    /// Bot token.
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Web API base URL.
    #[arg(long, env = "SLACK_API_URL")]
    api_url: Option<String>,
}

/// Run the CLI, returning an error message on failure.
pub async fn run(cli: Cli) -> Result<(), String> {
    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    match cli.command {
        Command::Send { inputs, slack } => cmd_send(&config, &inputs, &slack).await,
        Command::Render { inputs } => cmd_render(&config, &inputs),
    }
}

async fn cmd_send(config: &Config, args: &InputArgs, slack: &SlackArgs) -> Result<(), String> {
    let inputs = args.parse()?;

    match deliver(config, &inputs, slack).await {
        Err(e) if inputs.ignore_failures => {
            commands::error(&e);
            warn!("Ignoring failure: {e}");
            Ok(())
        }
        other => other,
    }
}

async fn deliver(config: &Config, inputs: &Inputs, slack: &SlackArgs) -> Result<(), String> {
    let message = build_message(config, inputs);
    let ctx = github::context::from_env();

    let channel = non_empty(slack.channel.as_deref())
        .or(config.slack.channel.as_deref())
        .ok_or("Slack channel not set. Did you forget to set the SLACK_CHANNEL environment variable?")?;
    let api_url = non_empty(slack.api_url.as_deref())
        .or(config.slack.api_url.as_deref())
        .unwrap_or(DEFAULT_API_URL);
    let token = slack.token.as_deref().unwrap_or_default();

    let client = SlackClient::connect(api_url, token, channel)
        .await
        .map_err(|e| e.to_string())?;

    let delivery = Delivery::from(inputs.timestamp.clone());
    let delivery = send::send(
        &client,
        &message,
        &ctx,
        &delivery,
        inputs.ignore_message_not_found,
    )
    .await
    .map_err(|e| e.to_string())?;

    if let Some(ts) = delivery.timestamp() {
        let _group = commands::group("Set output");
        commands::set_output(TIMESTAMP_OUTPUT, ts.as_str())
            .map_err(|e| format!("failed to set {TIMESTAMP_OUTPUT} output: {e}"))?;
        info!("Message timestamp: {ts}");
    }

    Ok(())
}

/// What `render` prints: the message and the context it was resolved against.
#[derive(Serialize)]
struct Preview<'a> {
    context: &'a ExecutionContext,
    message: Rendered,
}

fn cmd_render(config: &Config, args: &InputArgs) -> Result<(), String> {
    let inputs = args.parse()?;
    let message = build_message(config, &inputs);
    let ctx = github::context::from_env();

    let preview = Preview {
        context: &ctx,
        message: message.render(&ctx).map_err(|e| e.to_string())?,
    };
    let json = serde_json::to_string_pretty(&preview)
        .map_err(|e| format!("failed to serialize message: {e}"))?;
    println!("{json}");

    Ok(())
}

/// Combine inputs, config and defaults into the message to send.
///
/// Inputs win over config; anything unset in both keeps the message default.
fn build_message(config: &Config, inputs: &Inputs) -> Message {
    let mut status = inputs.status.entry();
    if let Some(color) = &inputs.color {
        status = status.with_color(color.clone());
    }

    let text = inputs.text.as_deref().or(config.message.text.as_deref());
    let mut message = Message::new(text, status);

    if let Some(fields) = inputs.fields.as_ref().or(config.message.fields.as_ref()) {
        message = message.with_fields(fields);
    }

    let markup = inputs
        .field_type
        .or(config.message.field_type)
        .unwrap_or_default();
    message.with_markup(markup)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
