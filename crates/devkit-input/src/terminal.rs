//! Terminal prompts.
//!
//! The binder asks for missing values on the terminal. [`TerminalIO`]
//! abstracts the prompt/read pair so tests can script the answers.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Abstraction over terminal I/O for testability.
pub trait TerminalIO: Send + Sync {
    /// Write a prompt to stdout.
    fn write_prompt(&self, prompt: &str) -> io::Result<()>;

    /// Read a line from stdin.
    ///
    /// Returns an empty string at end of input.
    fn read_line(&self) -> io::Result<String>;
}

/// Real terminal I/O.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealTerminal;

impl TerminalIO for RealTerminal {
    fn write_prompt(&self, prompt: &str) -> io::Result<()> {
        print!("{}", prompt);
        io::stdout().flush()
    }

    fn read_line(&self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// Mock terminal for testing prompts.
///
/// Returns scripted responses in order, then end of input. Every prompt
/// written is recorded and can be inspected with [`MockTerminal::prompts`].
#[derive(Debug, Default)]
pub struct MockTerminal {
    responses: Vec<String>,
    /// Index of the next response to return.
    response_index: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    fail_reads: bool,
}

impl MockTerminal {
    /// Create a mock terminal that returns the given response.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self::with_responses([response])
    }

    /// Create a mock terminal that returns multiple responses in sequence.
    pub fn with_responses(responses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Create a mock that simulates EOF (Ctrl+D).
    pub fn eof() -> Self {
        Self::default()
    }

    /// Create a mock whose reads fail with an I/O error.
    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Prompts written so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl TerminalIO for MockTerminal {
    fn write_prompt(&self, prompt: &str) -> io::Result<()> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        Ok(())
    }

    fn read_line(&self) -> io::Result<String> {
        if self.fail_reads {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"));
        }
        let idx = self.response_index.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(idx) {
            // Add newline like real read_line does
            Some(response) => Ok(format!("{}\n", response)),
            None => Ok(String::new()),
        }
    }
}
