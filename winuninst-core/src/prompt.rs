use std::io::{BufRead, Write};

use crate::{Error, Program, Result};

/// Line-oriented conversation with the operator.
///
/// All stages share this one handle, so no stage can leave half a line buffered for
/// the next.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Writes `prompt` and returns the next input line with surrounding whitespace
    /// removed. End of input is [`Error::InputClosed`].
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Writes raw bytes (e.g. captured child output) without adding a newline.
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.output.write_all(bytes)?;
        self.output.flush()?;
        Ok(())
    }

    /// Shows a 1-based menu of `programs` and returns the one picked.
    ///
    /// Anything other than an integer in `1..=programs.len()` is rejected without a
    /// second attempt.
    pub fn select<'a>(&mut self, programs: &'a [Program]) -> Result<&'a Program> {
        self.say("Select a program to uninstall:")?;
        for (i, program) in programs.iter().enumerate() {
            self.say(format!(
                "{}: {} ({})",
                i + 1,
                program.display_name,
                program.registry_location
            ))?;
        }

        let answer = self.read_line("Enter selection number: ")?;
        let invalid = || Error::InvalidSelection {
            input: answer.clone(),
            max: programs.len(),
        };
        let index: usize = answer.parse().map_err(|_| invalid())?;
        if index == 0 {
            return Err(invalid());
        }
        programs.get(index - 1).ok_or_else(invalid)
    }

    /// Asks until a non-blank silent parameter is given.
    pub fn silent_parameter(&mut self) -> Result<String> {
        loop {
            let parameter = self.read_line("Enter the silent uninstall parameter: ")?;
            if !parameter.is_empty() {
                self.say(format!("Silent uninstall parameter received: {}", parameter))?;
                return Ok(parameter);
            }
            self.say("Silent uninstall parameter cannot be empty. Please try again.")?;
        }
    }
}
