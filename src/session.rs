use crate::ShellError;
use crate::bin_path::BinPath;
use crate::builtin::Flow;
use crate::config::Config;
use crate::editor::LineSource;
use crate::executor::{Executor, Outcome};
use crate::report;
use crate::splitter;
use std::env;
use std::path::PathBuf;

/// Mutable shell state shared by builtins and the executor.
#[derive(Debug, Clone)]
pub struct State {
    pub bin_path: BinPath,
    pub current_dir: PathBuf,
}

impl State {
    pub fn new(config: &Config) -> Self {
        Self {
            bin_path: BinPath::new(config.search_path.clone()),
            current_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

pub struct Session {
    state: State,
    executor: Executor,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self::with_state(State::new(config))
    }

    pub fn with_state(state: State) -> Self {
        Self {
            state,
            executor: Executor::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Feeds lines from `source` until it runs dry or `exit` is run.
    pub fn run(&mut self, source: &mut impl LineSource) -> Result<(), ShellError> {
        while let Some(line) = source.next_line()? {
            if self.run_line(&line) == Flow::Exit {
                break;
            }
        }

        Ok(())
    }

    /// Dispatches every command on `line` in order, then waits for all of its children.
    /// Failures are reported and never stop the rest of the line.
    pub fn run_line(&mut self, line: &str) -> Flow {
        let split = splitter::split(line);
        for err in split.errors {
            report!(ShellError::from(err));
        }

        for command in &split.commands {
            match self.executor.execute(command, &mut self.state) {
                Ok(Outcome::Handled(Flow::Exit)) => return Flow::Exit,
                Ok(_) => {}
                Err(err) => report!(err),
            }
        }

        if let Err(err) = self.executor.wait_all() {
            report!(err);
        }

        Flow::Continue
    }
}
