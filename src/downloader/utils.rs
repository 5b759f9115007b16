// Shared subprocess helpers.

use std::process::{Command as StdCommand, Stdio};

use tokio::process::Command as TokioCommand;
use tokio::time::{timeout, Duration};

/// Locate the yt-dlp binary: well-known install paths first, then `which`,
/// then fall back to the bare name and let PATH resolution decide at spawn
/// time.
pub fn find_ytdlp() -> String {
    let common_paths = [
        "/opt/homebrew/bin/yt-dlp",
        "/usr/local/bin/yt-dlp",
        "/usr/bin/yt-dlp",
    ];

    for path in common_paths {
        if std::path::Path::new(path).exists() {
            return path.to_string();
        }
    }

    if let Ok(output) = StdCommand::new("which")
        .arg("yt-dlp")
        .stderr(Stdio::null())
        .output()
    {
        if output.status.success() {
            if let Ok(path) = String::from_utf8(output.stdout) {
                let trimmed = path.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
    }

    "yt-dlp".to_string()
}

/// Run a command to completion with a timeout, capturing stdout and stderr.
/// The child is killed when the timeout elapses.
pub async fn run_output_with_timeout(
    program: &str,
    args: Vec<String>,
    timeout_secs: u64,
) -> Result<std::process::Output, String> {
    let child = TokioCommand::new(program)
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| format!("failed to start {}: {}", program, e))?;

    match timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await {
        Ok(result) => result.map_err(|e| format!("failed to wait for {}: {}", program, e)),
        Err(_) => Err(format!("{} timed out after {}s", program, timeout_secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_of_a_quick_command() {
        let output = run_output_with_timeout("echo", vec!["hello".to_string()], 5)
            .await
            .unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[tokio::test]
    async fn reports_missing_programs() {
        let result =
            run_output_with_timeout("definitely-not-a-real-binary-xyz", Vec::new(), 5).await;
        assert!(result.unwrap_err().contains("failed to start"));
    }

    #[tokio::test]
    async fn kills_commands_that_exceed_the_timeout() {
        let result = run_output_with_timeout("sleep", vec!["30".to_string()], 1).await;
        assert!(result.unwrap_err().contains("timed out"));
    }
}
