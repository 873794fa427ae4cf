//! Line-oriented prompt shell.
//!
//! Wraps any `BufRead` / `Write` pair so the session can be driven from a
//! terminal or, in tests, from in-memory buffers. Invalid answers are
//! re-asked; every other failure is returned to the caller.

use std::io::{BufRead, Write};

use bikeshare_core::error::{BikeshareError, Result};

/// Printed after an answer fails validation.
pub const RETRY_MESSAGE: &str = "Check your input, try again.";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Ask `question` until `parse` accepts the answer.
    ///
    /// Only [`BikeshareError::InvalidSelection`] triggers a re-prompt; an
    /// answer that is not valid UTF-8 counts as invalid. End of input yields
    /// [`BikeshareError::InputClosed`].
    pub fn ask<T>(&mut self, question: &str, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
        loop {
            write!(self.output, "{}", question)?;
            self.output.flush()?;

            let mut buf = Vec::new();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Err(BikeshareError::InputClosed);
            }
            // Undecodable bytes become U+FFFD and fail validation like any typo.
            let line = String::from_utf8_lossy(&buf);

            match parse(&*line) {
                Ok(value) => return Ok(value),
                Err(BikeshareError::InvalidSelection { field, value }) => {
                    tracing::debug!("rejected {} answer {:?}", field, value);
                    self.say(RETRY_MESSAGE)?;
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// Recover the output sink, e.g. to inspect what was written.
    pub fn into_output(self) -> W {
        self.output
    }
}
