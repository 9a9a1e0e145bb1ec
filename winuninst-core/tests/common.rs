#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, Once};

use winuninst_core::locator::{UNINSTALL_KEY_PATH, UNINSTALL_KEY_PATH_WOW6432NODE};
use winuninst_core::{CommandLine, Error, Executor, MemoryKey, Prompter, Result};

static INIT_TRACING: Once = Once::new();

pub fn init_tracing_for_tests() {
    INIT_TRACING.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
            .with_test_writer()
            .try_init();

        if let Err(e) = subscriber {
            eprintln!("tracing_subscriber try_init returned error: {:?}", e);
        }
    });
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a debug-level subscriber on this thread and returns what it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().expect("log buffer poisoned")).into_owned();
    (value, logs)
}

pub fn entry(display_name: &str, uninstall_string: &str) -> MemoryKey {
    MemoryKey::new()
        .with_value("DisplayName", display_name)
        .with_value("UninstallString", uninstall_string)
}

/// An HKLM root with both uninstall views populated from `(key, entry)` pairs.
pub fn hklm(native: Vec<(&str, MemoryKey)>, wow64: Vec<(&str, MemoryKey)>) -> MemoryKey {
    fn view(entries: Vec<(&str, MemoryKey)>) -> MemoryKey {
        entries
            .into_iter()
            .fold(MemoryKey::new(), |key, (name, child)| key.with_subkey(name, child))
    }
    MemoryKey::new()
        .with_subkey(UNINSTALL_KEY_PATH, view(native))
        .with_subkey(UNINSTALL_KEY_PATH_WOW6432NODE, view(wow64))
}

pub type TestPrompter = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

pub fn prompter(input: &str) -> TestPrompter {
    Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

pub fn transcript(prompter: TestPrompter) -> String {
    String::from_utf8(prompter.into_parts().1).expect("utf-8 transcript")
}

/// Executor that records what it was asked to do instead of spawning anything.
#[derive(Default)]
pub struct FakeExecutor {
    pub executables: Vec<(String, PathBuf)>,
    pub output: String,
    pub exit_code: Option<i32>,
    pub resolved: RefCell<Vec<String>>,
    pub ran: RefCell<Vec<CommandLine>>,
}

impl FakeExecutor {
    pub fn with_executable(mut self, name: &str, path: &str) -> Self {
        self.executables.push((name.to_string(), PathBuf::from(path)));
        self
    }

    pub fn with_output(mut self, output: &str) -> Self {
        self.output = output.to_string();
        self
    }

    pub fn failing_with(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }
}

impl Executor for FakeExecutor {
    fn resolve(&self, command: &str) -> Result<PathBuf> {
        self.resolved.borrow_mut().push(command.to_string());
        self.executables
            .iter()
            .find(|(name, _)| name == command)
            .map(|(_, path)| path.clone())
            .ok_or_else(|| Error::CommandNotFound {
                command: command.to_string(),
                reason: "cannot find binary path".to_string(),
            })
    }

    fn run(&self, command: &CommandLine) -> Result<Vec<u8>> {
        self.ran.borrow_mut().push(command.clone());
        match self.exit_code {
            Some(code) => Err(Error::CommandFailed {
                command: command.to_string(),
                code: Some(code),
                output: self.output.clone(),
            }),
            None => Ok(self.output.clone().into_bytes()),
        }
    }
}
