//! External command execution.
//!
//! Runs one child process per call, merges stdout and stderr in arrival order,
//! and normalizes failures into [`CommandFailure`].

use crate::exporter::error::{CommandFailure, Error, Result};
use std::{
    ffi::{OsStr, OsString},
    process::Stdio,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader},
    process::{ChildStdin, Command},
};

/// Placeholder printed instead of secret argument values.
const REDACTED: &str = "***";

#[derive(Debug, Clone)]
struct CommandArg {
    value: OsString,
    secret: bool,
}

/// An external program plus its ordered argument list.
///
/// Built fresh for every call and consumed by [`CommandInvocation::run`].
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    program: OsString,
    args: Vec<CommandArg>,
    stdin: Option<Vec<u8>>,
}

impl CommandInvocation {
    /// Creates an invocation of `program` with no arguments.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Appends one argument.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(CommandArg {
            value: arg.as_ref().to_os_string(),
            secret: false,
        });
        self
    }

    /// Appends several arguments in order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    /// Appends an argument that is passed through but never printed.
    pub fn secret_arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(CommandArg {
            value: arg.as_ref().to_os_string(),
            secret: true,
        });
        self
    }

    /// Feeds `payload` to the child's standard input, then closes it.
    pub fn stdin<B: Into<Vec<u8>>>(mut self, payload: B) -> Self {
        self.stdin = Some(payload.into());
        self
    }

    /// Program name as given.
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Argument values in order, secrets included.
    pub fn arg_values(&self) -> impl Iterator<Item = &OsStr> {
        self.args.iter().map(|a| a.value.as_os_str())
    }

    /// Command line for logs and error messages.
    ///
    /// The program is printed bare and every argument quoted; secret
    /// arguments are replaced by `"***"`.
    pub fn printable(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        for arg in &self.args {
            if arg.secret {
                parts.push(format!("{:?}", REDACTED));
            } else {
                parts.push(format!("{:?}", arg.value.to_string_lossy()));
            }
        }
        parts.join(" ")
    }

    /// Runs the command to completion.
    ///
    /// Returns the trimmed combined output on exit code 0, whatever it contains.
    pub async fn run(self) -> Result<String> {
        let printable = self.printable();
        log::debug!("Running: {}", printable);

        let mut child = Command::new(&self.program)
            .args(self.args.iter().map(|a| &a.value))
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|error| Error::CommandFailed {
                command: printable.clone(),
                error,
            })?;

        let (stdout, stderr) = match (child.stdout.take(), child.stderr.take()) {
            (Some(stdout), Some(stderr)) => (stdout, stderr),
            _ => {
                return Err(Error::GenericError(format!(
                    "{} failed: output pipes unavailable",
                    printable
                )));
            }
        };

        let (fed, output) = tokio::join!(
            feed_stdin(child.stdin.take(), self.stdin),
            collect_combined(stdout, stderr)
        );
        let output = output.map_err(|error| Error::CommandFailed {
            command: printable.clone(),
            error,
        })?;

        let status = child.wait().await.map_err(|error| Error::CommandFailed {
            command: printable.clone(),
            error,
        })?;

        // The exit status describes a failed child better than a stdin error.
        if status.success() {
            fed.map_err(|error| Error::CommandFailed {
                command: printable.clone(),
                error,
            })?;
            Ok(output)
        } else {
            Err(CommandFailure {
                command: printable,
                status: status.code(),
                output,
            }
            .into())
        }
    }
}

/// Writes `payload` to the child's stdin, then closes it.
///
/// A child that exits without reading its input closes the pipe early; that
/// is not an error of its own.
async fn feed_stdin(stdin: Option<ChildStdin>, payload: Option<Vec<u8>>) -> std::io::Result<()> {
    let (Some(mut stdin), Some(payload)) = (stdin, payload) else {
        return Ok(());
    };

    match stdin.write_all(&payload).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => return Ok(()),
        Err(e) => return Err(e),
    }
    match stdin.shutdown().await {
        Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => Err(e),
        _ => Ok(()),
    }
}

/// Reads both streams to EOF, interleaving whole lines as they arrive.
async fn collect_combined<O, E>(stdout: O, stderr: E) -> std::io::Result<String>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut out = BufReader::new(stdout);
    let mut err = BufReader::new(stderr);
    let mut out_line = Vec::new();
    let mut err_line = Vec::new();
    let mut out_done = false;
    let mut err_done = false;
    let mut combined = Vec::new();

    while !(out_done && err_done) {
        tokio::select! {
            read = out.read_until(b'\n', &mut out_line), if !out_done => {
                // Partial reads stay in the line buffer until the line completes.
                out_done = read? == 0;
                combined.append(&mut out_line);
            }
            read = err.read_until(b'\n', &mut err_line), if !err_done => {
                err_done = read? == 0;
                combined.append(&mut err_line);
            }
        }
    }

    Ok(String::from_utf8_lossy(&combined).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_quotes_arguments() {
        let cmd = CommandInvocation::new("unzip")
            .arg("/tmp/a b/universal.apks")
            .args(["-d", "/tmp/out"]);
        assert_eq!(
            cmd.printable(),
            r#"unzip "/tmp/a b/universal.apks" "-d" "/tmp/out""#
        );
    }

    #[test]
    fn printable_redacts_secrets() {
        let cmd = CommandInvocation::new("java")
            .arg("--ks-pass")
            .secret_arg("hunter2");
        let printed = cmd.printable();
        assert!(!printed.contains("hunter2"));
        assert_eq!(printed, r#"java "--ks-pass" "***""#);
        let values: Vec<_> = cmd.arg_values().collect();
        assert_eq!(values, [OsStr::new("--ks-pass"), OsStr::new("hunter2")]);
    }

    #[tokio::test]
    async fn combines_both_streams() {
        let stdout: &[u8] = b"out line\n";
        let stderr: &[u8] = b"err line\n";
        let combined = collect_combined(stdout, stderr).await.unwrap();
        assert!(combined.contains("out line"));
        assert!(combined.contains("err line"));
        assert!(!combined.ends_with('\n'));
    }

    #[tokio::test]
    async fn missing_program_is_reported() {
        let err = CommandInvocation::new("definitely-not-a-real-program-1b7c")
            .arg("x")
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
        assert!(
            err.to_string()
                .starts_with(r#"definitely-not-a-real-program-1b7c "x" failed: "#)
        );
    }
}
