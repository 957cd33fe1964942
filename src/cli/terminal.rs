//! Terminal I/O: the sign-up event sink and the line-based console.

use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use lh_core::ports::SignupEventPort;
use lh_core::signup::SignupState;

use super::render::{countdown_text, render_changes};

/// Prints sign-up state changes as they are emitted.
pub struct TerminalEventPort<W> {
    out: Mutex<W>,
    last: Mutex<Option<SignupState>>,
}

impl TerminalEventPort<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalEventPort<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            last: Mutex::new(None),
        }
    }

    fn write_lines(&self, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        for line in lines {
            // best effort: output errors are ignored
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }
}

impl<W> TerminalEventPort<W> {
    #[cfg(test)]
    fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl<W: Write + Send> SignupEventPort for TerminalEventPort<W> {
    async fn emit_signup_state_changed(&self, state: SignupState) {
        let lines = {
            let Ok(mut last) = self.last.lock() else {
                return;
            };
            let lines = render_changes(last.as_ref(), &state);
            *last = Some(state);
            lines
        };
        self.write_lines(&lines);
    }

    async fn emit_resend_countdown(&self, remaining_secs: u64) {
        if let Some(line) = countdown_text(remaining_secs) {
            self.write_lines(&[line]);
        }
    }
}

/// Line-oriented prompt reader.
pub struct Console<R> {
    lines: Lines<R>,
    /// Read secrets from the terminal without echo.
    hide_secrets: bool,
}

impl Console<BufReader<Stdin>> {
    /// Console over standard input. Secrets are hidden when stdin is a terminal.
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            hide_secrets: io::stdin().is_terminal(),
        }
    }
}

impl<R: AsyncBufRead + Unpin> Console<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            hide_secrets: false,
        }
    }

    /// Print `label` and read one line; `None` at end of input.
    pub async fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{label}")?;
            stdout.flush()?;
        }
        Ok(self.lines.next_line().await?)
    }

    /// Like [`Console::prompt`], but the typed text is not echoed when
    /// reading from a terminal.
    pub async fn prompt_secret(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        if !self.hide_secrets {
            return self.prompt(label).await;
        }
        let label = label.to_string();
        match tokio::task::spawn_blocking(move || rpassword::prompt_password(label)).await? {
            Ok(secret) => Ok(Some(secret)),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
