// Subprocess helper shared by every yt-dlp invocation

use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

use super::errors::ExtractError;

/// Run a command, capture stdout/stderr, and enforce a hard timeout. The
/// child is killed when the timeout expires so a wedged yt-dlp cannot outlive
/// the request that spawned it.
pub async fn run_output_with_timeout(
    program: &str,
    args: &[String],
    timeout_secs: u64,
) -> Result<std::process::Output, ExtractError> {
    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ExtractError::Execution(format!("failed to start {}: {}", program, e)))?;

    let mut stdout_pipe = child
        .stdout
        .take()
        .ok_or_else(|| ExtractError::Execution(format!("failed to capture stdout from {}", program)))?;
    let mut stderr_pipe = child
        .stderr
        .take()
        .ok_or_else(|| ExtractError::Execution(format!("failed to capture stderr from {}", program)))?;

    // Drain both pipes while waiting; a fat --dump-json payload can fill the
    // pipe buffer and deadlock the child if read only after exit.
    let drain = async {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let (out_res, err_res, status_res) = tokio::join!(
            stdout_pipe.read_to_end(&mut stdout),
            stderr_pipe.read_to_end(&mut stderr),
            child.wait(),
        );
        out_res.map_err(|e| ExtractError::Execution(format!("failed to read stdout: {}", e)))?;
        err_res.map_err(|e| ExtractError::Execution(format!("failed to read stderr: {}", e)))?;
        let status = status_res
            .map_err(|e| ExtractError::Execution(format!("failed to wait for {}: {}", program, e)))?;
        Ok::<std::process::Output, ExtractError>(std::process::Output {
            status,
            stdout,
            stderr,
        })
    };

    match timeout(Duration::from_secs(timeout_secs), drain).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(program, timeout_secs, "subprocess timed out, killing");
            Err(ExtractError::Timeout(timeout_secs))
        }
    }
}
