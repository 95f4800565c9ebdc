use colored::Colorize;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{HarnessError, Result};
use crate::protocol::ToolCallRequest;

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub command: String,
    pub args: Vec<String>,
    /// 0 disables the timeout and waits for the server forever.
    pub timeout_secs: u64,
    pub verbose: bool,
}

/// Send a single tool call to a fresh server process.
///
/// Each call spawns its own process with all three standard streams
/// piped, writes one JSON request line, closes stdin and buffers the
/// output until the server exits. A zero exit status means stdout must
/// parse as one JSON document; a non-zero status turns stderr into the
/// failure explanation.
pub async fn invoke_tool(
    name: &str,
    parameters: Map<String, Value>,
    settings: &ServerSettings,
) -> Result<Value> {
    let start_time = Instant::now();
    let request = ToolCallRequest::new(name, parameters);

    if settings.verbose {
        eprintln!(
            "{}",
            format!(
                "[harness] spawn: {} {} (tool={}, id={}, timeout={}s)",
                settings.command,
                settings.args.join(" "),
                request.name,
                request.id,
                settings.timeout_secs
            )
            .dimmed()
        );
    }

    let mut child = Command::new(&settings.command)
        .args(&settings.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    // One request line, then EOF so the server knows input is done.
    // A server that dies before reading stdin surfaces through its exit
    // status, not through the broken pipe.
    let line = request.to_wire_line()?;
    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(line.as_bytes()).await {
            Ok(()) => match stdin.flush().await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                Err(e) => return Err(e.into()),
            },
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
            Err(e) => return Err(e.into()),
        }
    }

    let output = if settings.timeout_secs > 0 {
        match timeout(
            Duration::from_secs(settings.timeout_secs),
            child.wait_with_output(),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(HarnessError::Timeout {
                    secs: settings.timeout_secs,
                })
            }
        }
    } else {
        child.wait_with_output().await?
    };

    if settings.verbose {
        eprintln!(
            "{}",
            format!(
                "[harness] done: exit_code={}, duration={:.2}s, stdout={} bytes, stderr={} bytes",
                output.status.code().unwrap_or(-1),
                start_time.elapsed().as_secs_f64(),
                output.stdout.len(),
                output.stderr.len()
            )
            .dimmed()
        );
    }

    if !output.status.success() {
        return Err(HarnessError::ServerExit {
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let stdout_text = String::from_utf8_lossy(&output.stdout).to_string();
    match serde_json::from_str::<Value>(&stdout_text) {
        Ok(response) => Ok(response),
        Err(e) => Err(HarnessError::ResponseParse {
            message: e.to_string(),
            output: stdout_text,
        }),
    }
}
