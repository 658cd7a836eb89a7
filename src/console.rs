//! Line-based console I/O (prompts, answers and result lines).

use anyhow::{Context, Result};
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// "Read one line" / "write one line" capabilities used by menus and actions.
pub trait Console {
    /// Writes `line` followed by a newline.
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Writes `prompt` without a newline and reads one line of input.
    ///
    /// The answer is trimmed. Returns `None` once input is exhausted.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// [`Console`] over any reader/writer pair. Tests drive it with `Cursor` and `Vec<u8>`.
pub struct LineConsole<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> LineConsole<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

impl LineConsole<StdinLock<'static>, Stdout> {
    /// Wires the console to the process stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<I: BufRead, O: Write> Console for LineConsole<I, O> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line).context("Failed to write to console")?;
        Ok(())
    }

    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt).context("Failed to write to console")?;
        self.output.flush().context("Failed to flush console")?;

        // Invalid UTF-8 is replaced rather than rejected; such an answer matches no menu key.
        let mut line = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut line)
            .context("Failed to read from console")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> LineConsole<Cursor<Vec<u8>>, Vec<u8>> {
        LineConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn prompt_is_written_before_reading() -> Result<()> {
        let mut console = console("delhi\n");
        let answer = console.prompt("Enter city name: ")?;
        assert_eq!(answer.as_deref(), Some("delhi"));
        assert_eq!(String::from_utf8(console.output().clone())?, "Enter city name: ");
        Ok(())
    }

    #[test]
    fn answers_are_trimmed() -> Result<()> {
        let cases = vec!["  2 \n", "2\r\n", "\t2\n", "2"];
        for case in cases {
            let mut console = console(case);
            assert_eq!(
                console.prompt("> ")?.as_deref(),
                Some("2"),
                "expected '{}' to be read as '2'",
                case.escape_debug()
            );
        }
        Ok(())
    }

    #[test]
    fn blank_line_is_empty_not_eof() -> Result<()> {
        let mut console = console("\n");
        assert_eq!(console.prompt("> ")?.as_deref(), Some(""));
        assert_eq!(console.prompt("> ")?, None);
        Ok(())
    }

    #[test]
    fn reads_consecutive_lines() -> Result<()> {
        let mut console = console("title\nbody\n");
        assert_eq!(console.prompt("Title: ")?.as_deref(), Some("title"));
        assert_eq!(console.prompt("Body: ")?.as_deref(), Some("body"));
        assert_eq!(console.prompt("More: ")?, None);
        Ok(())
    }

    #[test]
    fn invalid_utf8_is_read_lossily() -> Result<()> {
        let mut console = LineConsole::new(Cursor::new(vec![0xff, 0xfe, b'\n', b'2', b'\n']), Vec::new());
        assert_eq!(console.prompt("> ")?.as_deref(), Some("\u{FFFD}\u{FFFD}"));
        assert_eq!(console.prompt("> ")?.as_deref(), Some("2"));
        Ok(())
    }

    #[test]
    fn write_line_appends_newline() -> Result<()> {
        let mut console = console("");
        console.write_line("Goodbye!")?;
        assert_eq!(String::from_utf8(console.output().clone())?, "Goodbye!\n");
        Ok(())
    }
}
