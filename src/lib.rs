pub mod bin_path;
pub mod builtin;
pub mod config;
pub mod editor;
pub mod executor;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod session;
pub mod splitter;

use std::io;
use std::path::PathBuf;

/// The only text a user ever sees on the error stream, whatever went wrong.
pub const ERROR_MESSAGE: &str = "An error has occurred\n";

#[derive(thiserror::Error, Debug)]
pub enum ShellError {
    #[error("syntax error: {0}")]
    Parse(#[from] parser::ParseError),
    #[error(transparent)]
    Builtin(#[from] builtin::BuiltinError),
    #[error("{0}: command not found")]
    NotFound(String),
    #[error("open {}: {source}", path.display())]
    Redirect { path: PathBuf, source: io::Error },
    #[error("spawn {}: {source}", path.display())]
    Spawn { path: PathBuf, source: io::Error },
    #[error("wait for child {pid}: {source}")]
    Wait { pid: u32, source: io::Error },
    #[error("read input: {0}")]
    Input(#[source] io::Error),
}
