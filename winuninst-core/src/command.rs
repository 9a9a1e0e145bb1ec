//! Turning a stored `UninstallString` into an argument vector.
//!
//! Splitting is on literal spaces with no quoting rules, so a quoted path containing a
//! space is split apart. The MSI switch rewrite is a plain text substitution over the
//! whole string. Both match what installers have been observed to store and are kept
//! as-is.

use std::fmt;
use std::path::Path;

/// Silent-mode flags appended to every MSI uninstall.
pub const MSI_SILENT_FLAGS: [&str; 2] = ["/qn", "/norestart"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.args.join(" "))
    }
}

impl CommandLine {
    /// All tokens, program first.
    pub fn tokens(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

/// Whether the entry is removed through the Windows Installer service.
pub fn is_msi(uninstall_string: &str) -> bool {
    uninstall_string.to_lowercase().starts_with("msiexec")
}

/// Rewrites an `msiexec` install/repair invocation into a silent uninstall.
pub fn msi_command(uninstall_string: &str) -> CommandLine {
    let rewritten = uninstall_string.replace("/I", "/X").replace("/i", "/X");
    let mut tokens = split_args(&rewritten);
    tokens.extend(MSI_SILENT_FLAGS.iter().map(|flag| flag.to_string()));

    let program = tokens.remove(0);
    CommandLine {
        program,
        args: tokens,
    }
}

/// Removes one pair of surrounding double quotes.
pub fn strip_quotes(uninstall_string: &str) -> &str {
    if uninstall_string.len() >= 2
        && uninstall_string.starts_with('"')
        && uninstall_string.ends_with('"')
    {
        &uninstall_string[1..uninstall_string.len() - 1]
    } else {
        uninstall_string
    }
}

/// Builds the command line for a vendor uninstaller resolved to `executable`.
pub fn vendor_command(executable: &Path, silent_parameter: &str) -> CommandLine {
    CommandLine {
        program: executable.display().to_string(),
        args: split_args(silent_parameter),
    }
}

/// Splits on every space. Consecutive spaces yield empty tokens.
pub fn split_args(line: &str) -> Vec<String> {
    line.split(' ').map(str::to_string).collect()
}
