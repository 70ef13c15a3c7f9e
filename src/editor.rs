use crate::ShellError;
use anyhow::Context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Anything that can hand the session one line of input at a time.
pub trait LineSource {
    /// `Ok(None)` signals end of input.
    fn next_line(&mut self) -> Result<Option<String>, ShellError>;
}

/// Prompting line editor for interactive use.
pub struct Interactive {
    editor: DefaultEditor,
    prompt: String,
}

impl Interactive {
    pub fn new(prompt: impl Into<String>) -> anyhow::Result<Self> {
        let editor = DefaultEditor::new().context("failed to set up line editor")?;

        Ok(Self {
            editor,
            prompt: prompt.into(),
        })
    }
}

impl LineSource for Interactive {
    fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            // ^C throws away what was typed so far
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Io(err)) => Err(ShellError::Input(err)),
            Err(err) => Err(ShellError::Input(io::Error::other(err.to_string()))),
        }
    }
}

/// Reads lines from any buffered reader, e.g. a batch file. Bytes that are not UTF-8
/// are replaced rather than failing the read.
pub struct ReaderSource<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl ReaderSource<BufReader<File>> {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open batch file {}", path.display()))?;

        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        self.buffer.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buffer)
            .map_err(ShellError::Input)?;
        if read == 0 {
            return Ok(None);
        }

        let line = strip_terminator(&self.buffer);
        Ok(Some(String::from_utf8_lossy(line).into_owned()))
    }
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    match line.strip_suffix(b"\n") {
        Some(line) => line.strip_suffix(b"\r").unwrap_or(line),
        None => line,
    }
}
