//! Interactive terminal presenter
//!
//! Shows the front of a fact, waits for Enter, shows the back, then asks for
//! a 0-5 score on the same stream.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use colored::Colorize;
use pankito_core::{Fact, Presenter, QualityError};

/// Presenter over any line-based input and writable output
pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
}

impl TerminalPresenter<StdinLock<'static>, Stdout> {
    /// Presenter on the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    /// Presenter reading lines from `input` and writing prompts to `output`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Read one line; end of input is an error so a session never spins on it
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed during review",
            ));
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn show_front(&mut self, fact: &Fact) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", " > Press 'Enter' to show answer".blue())?;
        writeln!(self.output)?;
        writeln!(self.output, "{}", fact.front.yellow())?;
        self.output.flush()
    }

    fn await_reveal(&mut self) -> io::Result<()> {
        self.read_line().map(|_| ())
    }

    fn show_back(&mut self, fact: &Fact) -> io::Result<()> {
        writeln!(self.output, "{}", fact.back.green())?;
        writeln!(self.output)?;
        self.output.flush()
    }

    fn collect_quality(&mut self) -> io::Result<String> {
        write!(
            self.output,
            "{} {} ",
            "Quality of answer".bold(),
            "[0-5]".dimmed()
        )?;
        self.output.flush()?;
        self.read_line()
    }

    fn reject_quality(&mut self, raw: &str, reason: &QualityError) -> io::Result<()> {
        writeln!(
            self.output,
            "{} '{}' ({}). Enter a score from 0 to 5.",
            "Invalid score".red(),
            raw.trim(),
            reason
        )
    }

    fn announce_session_complete(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "Review complete! 🎉".green().bold())?;
        self.output.flush()
    }
}
