//! Workflow commands: log groups, error annotations and step outputs.
//!
//! The runner parses these from stdout.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use uuid::Uuid;

/// An open log group. Closed when dropped.
#[must_use = "the group closes as soon as the guard is dropped"]
pub struct Group(());

/// Open a collapsible log group.
pub fn group(title: &str) -> Group {
    println!("::group::{}", escape_data(title));
    Group(())
}

impl Drop for Group {
    fn drop(&mut self) {
        println!("::endgroup::");
    }
}

/// Annotate the run with an error.
pub fn error(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// Set a step output.
///
/// Written to the `GITHUB_OUTPUT` file when the runner provides one,
/// otherwise emitted as a legacy `set-output` command.
pub fn set_output(name: &str, value: &str) -> io::Result<()> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) if !path.is_empty() => append_output(Path::new(&path), name, value),
        _ => {
            println!("::set-output name={name}::{}", escape_data(value));
            Ok(())
        }
    }
}

/// Append `name<<delimiter` / value / `delimiter` to an output file.
pub fn append_output(path: &Path, name: &str, value: &str) -> io::Result<()> {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write!(file, "{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

/// Percent-encode the characters that would end a command early.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
