use log::debug;
use std::ffi::OsStr;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

use crate::errors::ToolError;

// @module: Bounded execution of external tools

/// Run an external program to completion, capturing its output.
///
/// The child is killed when the timeout elapses or when the calling future is dropped.
pub async fn run_tool<I, S>(
    tool: &str,
    program: &str,
    args: I,
    timeout: Duration,
) -> Result<Output, ToolError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args).kill_on_drop(true);
    debug!("Running {}: {:?}", tool, command.as_std());

    let output = tokio::select! {
        result = command.output() => {
            result.map_err(|e| ToolError::Unavailable {
                tool: tool.to_string(),
                message: e.to_string(),
            })?
        },
        _ = tokio::time::sleep(timeout) => {
            return Err(ToolError::TimedOut {
                tool: tool.to_string(),
                seconds: timeout.as_secs(),
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ToolError::Failed {
            tool: tool.to_string(),
            status: output.status.to_string(),
            stderr: filter_tool_stderr(&stderr),
        });
    }

    Ok(output)
}

/// Drop ffmpeg banner and stream listing noise, keeping the lines that explain a failure
pub fn filter_tool_stderr(stderr: &str) -> String {
    const NOISE_PREFIXES: &[&str] = &[
        "ffmpeg version",
        "built with",
        "configuration:",
        "lib",
        "Input #",
        "Metadata:",
        "Duration:",
        "Chapter",
        "Stream #",
        "title",
        "encoder",
        "Output #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !NOISE_PREFIXES.iter().any(|p| line.starts_with(p)))
        .collect();

    if meaningful.is_empty() {
        "no diagnostic output".to_string()
    } else {
        meaningful.join("\n")
    }
}
