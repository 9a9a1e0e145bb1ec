use std::fmt;
use std::io;

pub mod command;
pub mod executor;
pub mod locator;
pub mod prompt;
pub mod registry;
pub mod session;

pub use command::CommandLine;
pub use executor::{Executor, SystemExecutor};
pub use locator::find_programs;
pub use prompt::Prompter;
pub use registry::{MemoryKey, RegistryKey};
pub use session::{Outcome, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryLocation {
    /// The native `Uninstall` key
    Standard,
    /// The 32-bit mirror under `Wow6432Node`
    Wow6432Node,
}

impl fmt::Display for RegistryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryLocation::Standard => f.write_str("Standard"),
            RegistryLocation::Wow6432Node => f.write_str("Wow6432Node"),
        }
    }
}

/// An installed application as recorded under one of the uninstall keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub display_name: String,
    /// Raw command line written by the installer. Either an `msiexec` invocation or a
    /// vendor executable, optionally quoted and followed by its own flags.
    pub uninstall_string: String,
    pub registry_location: RegistryLocation,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to talk to the terminal")]
    Io(#[from] io::Error),

    #[error("input closed before an answer was given")]
    InputClosed,

    #[error("cannot open registry key HKLM\\{path}")]
    RegistryRoot {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid selection: {input:?} (expected a number from 1 to {max})")]
    InvalidSelection { input: String, max: usize },

    #[error("Uninstall command not found: {command}: {reason}")]
    CommandNotFound { command: String, reason: String },

    #[error("failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {}\nOutput: {output}", exit_code_label(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("the Windows registry is not available on this platform")]
    UnsupportedPlatform,
}

fn exit_code_label(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
