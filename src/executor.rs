use crate::ShellError;
use crate::builtin::{self, Flow};
use crate::parser::Command;
use crate::session::State;
use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{self, Child, Stdio};

const REDIRECT_MODE: u32 = 0o644;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A builtin ran in the shell itself; no process was created.
    Handled(Flow),
    /// A child was started. Non-deferred children have already exited.
    Launched(u32),
}

/// Children launched with deferred wait for the line currently being run.
#[derive(Debug, Default)]
pub struct Cohort {
    children: Vec<Child>,
}

impl Cohort {
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn push(&mut self, child: Child) {
        self.children.push(child);
    }

    /// Blocks until every child in the cohort has exited. Keeps reaping after a failed
    /// wait and returns the first failure.
    pub fn wait_all(&mut self) -> Result<(), ShellError> {
        tracing::debug!(children = self.children.len(), "waiting for cohort");
        let mut first_err = None;

        for mut child in self.children.drain(..) {
            let pid = child.id();
            match child.wait() {
                Ok(status) => tracing::debug!(pid, %status, "reaped"),
                Err(source) => {
                    first_err.get_or_insert(ShellError::Wait { pid, source });
                }
            }
        }

        first_err.map_or(Ok(()), Err)
    }
}

#[derive(Debug, Default)]
pub struct Executor {
    cohort: Cohort,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cohort(&self) -> &Cohort {
        &self.cohort
    }

    pub fn execute(&mut self, command: &Command, state: &mut State) -> Result<Outcome, ShellError> {
        if let Some(result) = builtin::dispatch(command, state) {
            return Ok(Outcome::Handled(result?));
        }

        let Some(path) = state.bin_path.lookup(command.program(), &state.current_dir) else {
            return Err(ShellError::NotFound(command.program().to_string()));
        };

        let mut cmd = process::Command::new(&path);
        cmd.arg0(command.program())
            .args(&command.args()[1..])
            .current_dir(&state.current_dir);

        if let Some(target) = command.redirect() {
            let target = state.current_dir.join(target);
            let (stdout, stderr) = open_redirect(&target)?;
            cmd.stdout(stdout).stderr(stderr);
        }

        let mut child = cmd.spawn().map_err(|source| ShellError::Spawn {
            path: path.clone(),
            source,
        })?;
        let pid = child.id();
        tracing::debug!(pid, path = %path.display(), deferred = command.is_deferred(), "spawned");

        if command.is_deferred() {
            self.cohort.push(child);
        } else {
            let status = child
                .wait()
                .map_err(|source| ShellError::Wait { pid, source })?;
            tracing::debug!(pid, %status, "reaped");
        }

        Ok(Outcome::Launched(pid))
    }

    /// The end-of-line barrier.
    pub fn wait_all(&mut self) -> Result<(), ShellError> {
        self.cohort.wait_all()
    }
}

/// Opens `target` once and hands out two handles to it, for stdout and stderr.
fn open_redirect(target: &Path) -> Result<(Stdio, Stdio), ShellError> {
    let to_err = |source| ShellError::Redirect {
        path: target.to_path_buf(),
        source,
    };

    let file: File = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(REDIRECT_MODE)
        .open(target)
        .map_err(to_err)?;
    let err = file.try_clone().map_err(to_err)?;

    Ok((Stdio::from(file), Stdio::from(err)))
}
