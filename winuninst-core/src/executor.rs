use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};

#[cfg(windows)]
use std::os::windows::process::CommandExt;

use tracing::debug;

use crate::command::CommandLine;
use crate::{Error, Result};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x08000000;

/// Process-level operations the uninstall dispatcher depends on.
pub trait Executor {
    /// Resolves `command` to an executable the way a shell would, accepting both full
    /// paths and bare names looked up on `PATH`.
    fn resolve(&self, command: &str) -> Result<PathBuf>;

    /// Runs the command to completion and returns its stdout and stderr interleaved.
    /// A non-zero exit status is an error carrying that same output.
    fn run(&self, command: &CommandLine) -> Result<Vec<u8>>;
}

/// Runs real child processes with no console window.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn resolve(&self, command: &str) -> Result<PathBuf> {
        which::which(command).map_err(|e| Error::CommandNotFound {
            command: command.to_string(),
            reason: e.to_string(),
        })
    }

    fn run(&self, command: &CommandLine) -> Result<Vec<u8>> {
        let spawn_error = |source| Error::Spawn {
            command: command.to_string(),
            source,
        };

        // Both streams share one pipe so the output keeps the order it was written in.
        // `cmd` holds the parent's copies of the write end and has to be dropped before
        // reading, otherwise the read never sees end of file.
        let (mut reader, writer) = io::pipe().map_err(spawn_error)?;
        let mut child = {
            let mut cmd = Command::new(&command.program);
            cmd.args(&command.args)
                .stdin(Stdio::null())
                .stdout(writer.try_clone().map_err(spawn_error)?)
                .stderr(writer);
            #[cfg(windows)]
            cmd.creation_flags(CREATE_NO_WINDOW);
            cmd.spawn().map_err(spawn_error)?
        };

        let mut output = Vec::new();
        reader.read_to_end(&mut output)?;
        let status = child.wait()?;
        debug!(command = %command, %status, bytes = output.len(), "child exited");

        if status.success() {
            Ok(output)
        } else {
            Err(Error::CommandFailed {
                command: command.to_string(),
                code: status.code(),
                output: String::from_utf8_lossy(&output).into_owned(),
            })
        }
    }
}
