use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{debug, error, info};

use crate::command::{self, CommandLine};
use crate::executor::Executor;
use crate::locator::find_programs;
use crate::prompt::Prompter;
use crate::registry::RegistryKey;
use crate::Program;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing matched the name; not a failure.
    NothingFound,
    Uninstalled { program: Program, command: CommandLine },
    /// The command was built and shown but not run.
    DryRun { program: Program, command: CommandLine },
}

/// One pass of locate, select, uninstall.
pub struct Session<'a, K, E> {
    hklm: &'a K,
    executor: &'a E,
    dry_run: bool,
}

impl<'a, K: RegistryKey, E: Executor> Session<'a, K, E> {
    pub fn new(hklm: &'a K, executor: &'a E) -> Self {
        Self {
            hklm,
            executor,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> anyhow::Result<Outcome> {
        let name = prompter
            .read_line("Enter the program name: ")
            .context("Error reading program name")?;

        let programs = find_programs(self.hklm, &name).context("Error finding programs")?;
        info!(query = %name, candidates = programs.len(), "located programs");
        if programs.is_empty() {
            prompter.say("No programs found.")?;
            return Ok(Outcome::NothingFound);
        }

        let program = prompter.select(&programs)?.clone();
        let command = self.build_command(&program, prompter)?;
        debug!(program = %program.display_name, command = %command, "built uninstall command");

        prompter.say(format!("Executing command: {}", command))?;
        if self.dry_run {
            prompter.say("Dry run: command was not executed.")?;
            return Ok(Outcome::DryRun { program, command });
        }

        let output = match self.executor.run(&command) {
            Ok(output) => output,
            Err(e) => {
                error!(command = %command, error = %e, "Uninstall command failed");
                return Err(anyhow::Error::new(e).context("Uninstall failed"));
            }
        };

        prompter.write_raw(b"Uninstall output: ")?;
        prompter.write_raw(&output)?;
        if !output.ends_with(b"\n") {
            prompter.write_raw(b"\n")?;
        }
        prompter.say("Uninstall completed successfully.")?;

        Ok(Outcome::Uninstalled { program, command })
    }

    fn build_command<R: BufRead, W: Write>(
        &self,
        program: &Program,
        prompter: &mut Prompter<R, W>,
    ) -> anyhow::Result<CommandLine> {
        if command::is_msi(&program.uninstall_string) {
            return Ok(command::msi_command(&program.uninstall_string));
        }

        let silent = prompter
            .silent_parameter()
            .context("Error reading silent uninstall parameter")?;
        let executable = self
            .executor
            .resolve(command::strip_quotes(&program.uninstall_string))?;
        Ok(command::vendor_command(&executable, &silent))
    }
}
