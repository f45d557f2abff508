//! Running external programs

use std::{io::ErrorKind, process::Stdio};

use jarvis::{CapabilityError, CapabilityResult};
use tokio::process::Command;

/// Run a program to completion and return its trimmed stdout
pub(crate) async fn run(program: &str, args: &[&str]) -> CapabilityResult<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| spawn_error(program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(CapabilityError::failed(if stderr.is_empty() {
            format!("{} exited with {}", program, output.status)
        } else {
            stderr
        }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Start a program without waiting for it
pub(crate) fn spawn_detached(program: &str, args: &[String]) -> CapabilityResult<()> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| spawn_error(program, e))
}

fn spawn_error(program: &str, e: std::io::Error) -> CapabilityError {
    if e.kind() == ErrorKind::NotFound {
        CapabilityError::Unsupported(program.to_string())
    } else {
        CapabilityError::failed(format!("Failed to run {}: {}", program, e))
    }
}
